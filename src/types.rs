use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FunctionCall {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub args: Value, // untyped mapping, validated per-tool
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FunctionResponse {
    pub id: String,
    pub name: String,
    pub response: ResponsePayload,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ResponsePayload {
    pub result: ToolResult,
    pub scheduling: Scheduling,
}

/// How the model should treat a tool response within the current turn.
/// This system only ever emits `Interrupt` (process immediately).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scheduling {
    Interrupt,
}

impl FunctionResponse {
    pub fn interrupt(call: &FunctionCall, result: ToolResult) -> Self {
        Self {
            id: call.id.clone(),
            name: call.name.clone(),
            response: ResponsePayload {
                result,
                scheduling: Scheduling::Interrupt,
            },
        }
    }
}

/// Union of everything a tool can hand back. Tagged in-process; serialized
/// untagged so the wire shapes stay structural (the model and the renderer
/// both discriminate by key presence). The map-of-regions case is kept last
/// so decoding tries the specific shapes first.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum ToolResult {
    Schemes(GovernmentSchemesResult),
    Disease(CropDiseaseDiagnosis),
    Market(MarketDataResult),
    Error { error: String },
    Comparison(BTreeMap<String, MarketDataResult>),
}

impl ToolResult {
    pub fn error(message: impl Into<String>) -> Self {
        ToolResult::Error {
            error: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MarketDataResult {
    pub records: Vec<MarketRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "chartType", skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
    #[serde(rename = "chartData", skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<Value>,
}

/// One mandi price row. Field spellings follow the upstream feed; the
/// price columns arrive as strings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MarketRecord {
    #[serde(rename = "Commodity")]
    pub commodity: String,
    #[serde(rename = "Arrival_Date")]
    pub arrival_date: String,
    #[serde(rename = "Min_Price")]
    pub min_price: String,
    #[serde(rename = "Max_Price")]
    pub max_price: String,
    #[serde(rename = "Modal_Price")]
    pub modal_price: String,
    #[serde(rename = "State", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "District", default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(rename = "Market", default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(rename = "Variety", default, skip_serializing_if = "Option::is_none")]
    pub variety: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GovernmentSchemesResult {
    pub schemes: Vec<Scheme>,
    pub summary: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Scheme {
    pub name: String,
    pub summary: String,
    pub eligibility: String,
    #[serde(rename = "applicationLink")]
    pub application_link: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CropDiseaseDiagnosis {
    #[serde(rename = "diseaseName")]
    pub disease_name: String,
    pub cause: String,
    pub treatment: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
}

/// Read-only context threaded unchanged into every tool call in a batch.
/// Owned by the session layer; the dispatcher never mutates it.
#[derive(Clone, Debug, Default)]
pub struct ChatContext {
    pub previous_chats: Vec<ToolResult>,
    pub language: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadingState {
    pub active: bool,
    pub tool_name: Option<String>,
}

impl LoadingState {
    pub fn started(tool_name: Option<String>) -> Self {
        Self {
            active: true,
            tool_name,
        }
    }

    pub fn finished() -> Self {
        Self {
            active: false,
            tool_name: None,
        }
    }
}
