use crate::tools::{DateWindow, MarketQuery, ToolSet};
use crate::types::{ChatContext, FunctionCall, FunctionResponse, LoadingState, ToolResult};
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, warn};

// Detail of a failed diagnosis is deliberately not forwarded to the model.
const DIAGNOSIS_FAILED: &str = "Image diagnosis failed.";

/// UI-facing sink for dispatch progress. `on_tool_result` fires as each
/// call settles, so the dashboard can update before the batch finishes.
pub trait DispatchObserver: Send + Sync {
    fn on_tool_result(&self, result: &ToolResult);

    fn on_loading(&self, _state: LoadingState) {}

    /// Whether this observer can prompt the user for a crop photo. When
    /// false, `diagnose_crop_disease` reads the `image` argument instead.
    fn supports_image_capture(&self) -> bool {
        false
    }

    /// Handed a one-shot delivery handle when a diagnosis call is waiting
    /// on an image. Dropping the handle without delivering abandons the
    /// call.
    fn on_image_request(&self, _request: ImageRequest) {}

    /// Progress of a deferred diagnosis call, keyed by call id, so the UI
    /// can show what the capture flow is waiting on.
    fn on_diagnosis_phase(&self, _call_id: &str, _phase: DiagnosisPhase) {}
}

/// One-shot continuation for the deferred image-capture flow. The UI gets
/// exactly one of these per diagnosis call and may use it exactly once.
pub struct ImageRequest {
    sender: oneshot::Sender<String>,
}

impl ImageRequest {
    /// Deliver the captured image as a data URI. An empty string abandons
    /// the call rather than failing it.
    pub fn deliver(self, image: impl Into<String>) {
        let _ = self.sender.send(image.into());
    }

    /// Give up without an image. Equivalent to dropping the handle.
    pub fn abandon(self) {}
}

/// Lifecycle of a deferred diagnosis call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosisPhase {
    AwaitingImage,
    Diagnosing,
    Done,
    Abandoned,
}

pub struct Dispatcher {
    tools: Arc<dyn ToolSet>,
}

impl Dispatcher {
    pub fn new(tools: Arc<dyn ToolSet>) -> Self {
        Self { tools }
    }

    /// Run one model-issued function-call batch to completion.
    ///
    /// Every call is launched together and progresses independently; each
    /// result is pushed to the observer the moment it settles. Returns one
    /// response per call, correlated by id, except for diagnosis calls the
    /// user abandoned. Tool failures come back as structured error results
    /// rather than failing the batch.
    pub async fn dispatch(
        &self,
        batch: &[FunctionCall],
        observer: &dyn DispatchObserver,
        ctx: &ChatContext,
    ) -> Vec<FunctionResponse> {
        debug!(calls = batch.len(), "dispatching function-call batch");
        observer.on_loading(LoadingState::started(
            batch.first().map(|call| call.name.clone()),
        ));

        let outcomes = join_all(
            batch
                .iter()
                .map(|call| self.execute(call, observer, ctx)),
        )
        .await;

        // Cleared exactly once, after every call has settled, even when
        // some of them failed.
        observer.on_loading(LoadingState::finished());

        outcomes.into_iter().flatten().collect()
    }

    /// Resolve one call. `None` means the call was abandoned and gets no
    /// response at all.
    async fn execute(
        &self,
        call: &FunctionCall,
        observer: &dyn DispatchObserver,
        ctx: &ChatContext,
    ) -> Option<FunctionResponse> {
        let result = match call.name.as_str() {
            "get_market_data" => self.market_data(call, ctx).await,
            "compare_state_market_data" => self.compare_market_data(call, ctx).await,
            "get_government_schemes" => self.government_schemes(call, ctx).await,
            "diagnose_crop_disease" => self.diagnose(call, observer, ctx).await?,
            other => {
                warn!(call_id = %call.id, tool = other, "unknown tool requested");
                ToolResult::error(format!("Unknown tool: {other}"))
            }
        };

        observer.on_tool_result(&result);
        Some(FunctionResponse::interrupt(call, result))
    }

    async fn market_data(&self, call: &FunctionCall, ctx: &ChatContext) -> ToolResult {
        let Some(commodity) = call.args.get("commodityName").and_then(Value::as_str) else {
            warn!(call_id = %call.id, "get_market_data called without a commodity");
            return ToolResult::error(
                "Missing or invalid 'commodityName' argument for get_market_data.",
            );
        };

        let query = MarketQuery {
            commodity_name: commodity.to_string(),
            state: opt_string(&call.args, "state"),
            district: opt_string(&call.args, "district"),
            market: opt_string(&call.args, "market"),
            arrival_date: opt_string(&call.args, "arrivalDate"),
            start_date: opt_string(&call.args, "startDate"),
            end_date: opt_string(&call.args, "endDate"),
        };

        match self.tools.market_data(query, ctx.clone()).await {
            Ok(data) => ToolResult::Market(data),
            Err(err) => {
                warn!(call_id = %call.id, error = %err, "market data lookup failed");
                ToolResult::error(err.to_string())
            }
        }
    }

    async fn compare_market_data(&self, call: &FunctionCall, ctx: &ChatContext) -> ToolResult {
        let commodity = call.args.get("commodityName").and_then(Value::as_str);
        let states = string_list(&call.args, "states");
        let district = string_list(&call.args, "district");

        // Non-empty `states` wins over `district`.
        let regions = match (states, district) {
            (Some(states), _) if !states.is_empty() => Some(states),
            (_, Some(district)) => Some(district),
            _ => None,
        };

        let (Some(commodity), Some(regions)) = (commodity, regions) else {
            warn!(call_id = %call.id, "compare_state_market_data called without regions");
            return ToolResult::error(
                "Missing or invalid arguments for compare_state_market_data. \
                 Must provide commodityName and at least one of states or district.",
            );
        };

        let window = DateWindow {
            arrival_date: opt_string(&call.args, "arrivalDate"),
            start_date: opt_string(&call.args, "startDate"),
            end_date: opt_string(&call.args, "endDate"),
        };

        match self
            .tools
            .compare_market_data(commodity.to_string(), regions, window, ctx.clone())
            .await
        {
            Ok(by_region) => ToolResult::Comparison(by_region),
            Err(err) => {
                warn!(call_id = %call.id, error = %err, "market comparison failed");
                ToolResult::error(err.to_string())
            }
        }
    }

    async fn government_schemes(&self, call: &FunctionCall, ctx: &ChatContext) -> ToolResult {
        let query = call.args.get("query").and_then(Value::as_str);
        let location = call.args.get("location").and_then(Value::as_str);

        let (Some(query), Some(location)) = (query, location) else {
            warn!(call_id = %call.id, "get_government_schemes called with incomplete arguments");
            return ToolResult::error(
                "Missing or invalid arguments for get_government_schemes. \
                 Must provide query and location.",
            );
        };

        match self
            .tools
            .government_schemes(query.to_string(), location.to_string(), ctx.clone())
            .await
        {
            Ok(schemes) => ToolResult::Schemes(schemes),
            Err(err) => {
                warn!(call_id = %call.id, error = %err, "scheme search failed");
                ToolResult::error(err.to_string())
            }
        }
    }

    /// Diagnosis is the only tool with a human in the loop. When the
    /// observer can capture an image, execution parks until the UI delivers
    /// one; an empty or dropped delivery abandons the call silently, which
    /// is the one path that produces no response.
    async fn diagnose(
        &self,
        call: &FunctionCall,
        observer: &dyn DispatchObserver,
        ctx: &ChatContext,
    ) -> Option<ToolResult> {
        if !observer.supports_image_capture() {
            let image = call
                .args
                .get("image")
                .and_then(Value::as_str)
                .filter(|image| !image.is_empty());
            let Some(image) = image else {
                warn!(call_id = %call.id, "diagnose_crop_disease called without an image");
                return Some(ToolResult::error(
                    "Missing or invalid arguments for diagnose_crop_disease. \
                     Must provide image.",
                ));
            };
            return Some(self.run_diagnosis(call, image.to_string(), ctx).await);
        }

        enter_phase(observer, call, DiagnosisPhase::AwaitingImage);

        let (sender, delivery) = oneshot::channel();
        observer.on_image_request(ImageRequest { sender });

        let image = match delivery.await {
            Ok(image) if !image.is_empty() => image,
            // Empty delivery or a dropped handle: the user backed out.
            _ => {
                enter_phase(observer, call, DiagnosisPhase::Abandoned);
                return None;
            }
        };

        enter_phase(observer, call, DiagnosisPhase::Diagnosing);
        let result = self.run_diagnosis(call, image, ctx).await;
        enter_phase(observer, call, DiagnosisPhase::Done);
        Some(result)
    }

    async fn run_diagnosis(
        &self,
        call: &FunctionCall,
        image: String,
        ctx: &ChatContext,
    ) -> ToolResult {
        match self.tools.diagnose_crop_disease(image, ctx.clone()).await {
            Ok(diagnosis) => ToolResult::Disease(diagnosis),
            Err(err) => {
                warn!(call_id = %call.id, error = %err, "diagnosis failed");
                ToolResult::error(DIAGNOSIS_FAILED)
            }
        }
    }
}

fn enter_phase(observer: &dyn DispatchObserver, call: &FunctionCall, phase: DiagnosisPhase) {
    debug!(call_id = %call.id, ?phase, "diagnosis phase changed");
    observer.on_diagnosis_phase(&call.id, phase);
}

fn opt_string(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_string)
}

fn string_list(args: &Value, key: &str) -> Option<Vec<String>> {
    let items = args.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}
