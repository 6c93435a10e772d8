use crate::types::{ChatContext, CropDiseaseDiagnosis, GovernmentSchemesResult, MarketDataResult};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

#[cfg(test)]
use mockall::automock;

/// Lookup parameters for a single-commodity market query.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarketQuery {
    pub commodity_name: String,
    pub state: Option<String>,
    pub district: Option<String>,
    pub market: Option<String>,
    pub arrival_date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Date filter shared by the multi-region comparison.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DateWindow {
    pub arrival_date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// The external data tools the dispatcher drives. Implementations live
/// outside this crate (network services); tests substitute a mock.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ToolSet: Send + Sync {
    async fn market_data(&self, query: MarketQuery, ctx: ChatContext) -> Result<MarketDataResult>;

    async fn compare_market_data(
        &self,
        commodity_name: String,
        regions: Vec<String>,
        window: DateWindow,
        ctx: ChatContext,
    ) -> Result<BTreeMap<String, MarketDataResult>>;

    async fn government_schemes(
        &self,
        query: String,
        location: String,
        ctx: ChatContext,
    ) -> Result<GovernmentSchemesResult>;

    async fn diagnose_crop_disease(
        &self,
        image_data_uri: String,
        ctx: ChatContext,
    ) -> Result<CropDiseaseDiagnosis>;
}
