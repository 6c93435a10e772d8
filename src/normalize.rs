//! Shapes heterogeneous tool results for the dashboard: which card a
//! result turns into, and the price statistics a market card shows.

use crate::types::{
    CropDiseaseDiagnosis, GovernmentSchemesResult, MarketDataResult, MarketRecord, ToolResult,
};
use serde_json::Value;
use std::collections::BTreeMap;

/// What a tool result renders as. Market data always presents as a
/// collection: a bare result is one unnamed entry, a comparison is one
/// entry per region.
#[derive(Debug)]
pub enum ResultKind<'a> {
    MarketSingle(&'a MarketDataResult),
    MarketMultiple(&'a BTreeMap<String, MarketDataResult>),
    Schemes(&'a GovernmentSchemesResult),
    Disease(&'a CropDiseaseDiagnosis),
    Error(&'a str),
}

pub fn classify(result: &ToolResult) -> ResultKind<'_> {
    match result {
        ToolResult::Market(market) => ResultKind::MarketSingle(market),
        ToolResult::Comparison(by_region) => ResultKind::MarketMultiple(by_region),
        ToolResult::Schemes(schemes) => ResultKind::Schemes(schemes),
        ToolResult::Disease(diagnosis) => ResultKind::Disease(diagnosis),
        ToolResult::Error { error } => ResultKind::Error(error),
    }
}

/// Duck-typed classification of a raw wire value, for payloads that never
/// passed through the typed union. Discriminates purely on key presence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultShape {
    MarketSingle,
    MarketMultiple,
    Schemes,
    Disease,
    Error,
    Unknown,
}

pub fn classify_value(value: &Value) -> ResultShape {
    // A raw array is already a collection of market results.
    if value.is_array() {
        return ResultShape::MarketMultiple;
    }
    let Some(object) = value.as_object() else {
        return ResultShape::Unknown;
    };
    if object.contains_key("schemes") && object.contains_key("summary") {
        return ResultShape::Schemes;
    }
    if object.contains_key("diseaseName")
        && object.contains_key("cause")
        && object.contains_key("treatment")
    {
        return ResultShape::Disease;
    }
    if object.contains_key("records") {
        return ResultShape::MarketSingle;
    }
    if object.contains_key("error") {
        return ResultShape::Error;
    }
    if object.is_empty() {
        return ResultShape::Unknown;
    }
    // Any other object is read as a region → result mapping.
    ResultShape::MarketMultiple
}

/// Derived statistics for one market card. Absent values render as "-".
#[derive(Clone, Debug, PartialEq)]
pub struct PriceStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    pub date_range: Option<String>,
}

/// Price spread over a record set. With two or more records the sample is
/// the modal prices; a lone record instead contributes its own
/// min/max/modal triple, so a single row still yields a spread rather than
/// a degenerate point. The average is rounded to the nearest whole unit;
/// the date range is the lexicographic span of `Arrival_Date` (the feed's
/// dates sort as written).
pub fn price_stats(records: &[MarketRecord]) -> PriceStats {
    let sample: Vec<f64> = match records {
        [] => Vec::new(),
        [only] => [&only.max_price, &only.min_price, &only.modal_price]
            .into_iter()
            .filter_map(|price| parse_price(price))
            .collect(),
        many => many
            .iter()
            .filter_map(|record| parse_price(&record.modal_price))
            .collect(),
    };

    let (min, max, avg) = if sample.is_empty() {
        (None, None, None)
    } else {
        let min = sample.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = sample.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let avg = (sample.iter().sum::<f64>() / sample.len() as f64).round();
        (Some(min), Some(max), Some(avg))
    };

    let mut dates: Vec<&str> = records
        .iter()
        .map(|record| record.arrival_date.as_str())
        .collect();
    dates.sort_unstable();
    let date_range = match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => Some(format!("{first} to {last}")),
        _ => None,
    };

    PriceStats {
        min,
        max,
        avg,
        date_range,
    }
}

fn parse_price(price: &str) -> Option<f64> {
    price.trim().parse::<f64>().ok()
}
