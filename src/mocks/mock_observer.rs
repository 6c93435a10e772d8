use crate::dispatcher::{DiagnosisPhase, DispatchObserver, ImageRequest};
use crate::types::{LoadingState, ToolResult};
use std::sync::{Arc, Mutex};

/// What the observer should do when the dispatcher asks for a crop image.
#[derive(Clone)]
pub enum CaptureScript {
    Deliver(String),
    Abandon,
}

/// Records everything the dispatcher pushes at the UI, and optionally
/// plays a scripted image-capture interaction.
#[derive(Clone)]
pub struct RecordingObserver {
    results: Arc<Mutex<Vec<ToolResult>>>,
    loading: Arc<Mutex<Vec<LoadingState>>>,
    phases: Arc<Mutex<Vec<(String, DiagnosisPhase)>>>,
    capture: Option<CaptureScript>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(Vec::new())),
            loading: Arc::new(Mutex::new(Vec::new())),
            phases: Arc::new(Mutex::new(Vec::new())),
            capture: None,
        }
    }

    pub fn with_capture(script: CaptureScript) -> Self {
        let mut observer = Self::new();
        observer.capture = Some(script);
        observer
    }

    pub fn results(&self) -> Vec<ToolResult> {
        self.results.lock().unwrap().clone()
    }

    pub fn loading_states(&self) -> Vec<LoadingState> {
        self.loading.lock().unwrap().clone()
    }

    pub fn diagnosis_phases(&self) -> Vec<(String, DiagnosisPhase)> {
        self.phases.lock().unwrap().clone()
    }
}

impl DispatchObserver for RecordingObserver {
    fn on_tool_result(&self, result: &ToolResult) {
        self.results.lock().unwrap().push(result.clone());
    }

    fn on_loading(&self, state: LoadingState) {
        self.loading.lock().unwrap().push(state);
    }

    fn supports_image_capture(&self) -> bool {
        self.capture.is_some()
    }

    fn on_image_request(&self, request: ImageRequest) {
        match &self.capture {
            Some(CaptureScript::Deliver(image)) => request.deliver(image.clone()),
            Some(CaptureScript::Abandon) | None => request.abandon(),
        }
    }

    fn on_diagnosis_phase(&self, call_id: &str, phase: DiagnosisPhase) {
        self.phases.lock().unwrap().push((call_id.to_string(), phase));
    }
}
