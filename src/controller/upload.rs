use crate::controller::types::{CheckRequest, CheckResult, SelectedFile, UiState};
use crate::controller::view::{Element, UiEvent, View};
use crate::core::check_client::CheckClient;
use crate::error::CheckError;
use crate::render::result::{render_error, render_result};
use crate::utils::hash::same_digest;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{Instrument, debug, info, info_span, warn};

pub const FILE_LABEL_PROMPT: &str = "Click to upload or drag and drop";
const DRAG_OVER_CLASS: &str = "dragover";
const FILE_CHOSEN_CLASS: &str = "selected";
pub const SCAN_CHECKED_CLASS: &str = "checked";

#[derive(Debug)]
struct ControllerState {
    ui: UiState,
    selected: Option<SelectedFile>,
    virustotal: bool,
    drag_over: bool,
}

/// How a call to [`UploadController::submit`] ended.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// A request was already in flight; nothing was sent.
    Busy,
    Shown(Box<CheckResult>),
    Failed(CheckError),
}

/// Owns the selection and UI state for one upload form.
///
/// Clones share the same state, so event handlers registered in several
/// places still see one in-flight request at most.
pub struct UploadController<C, V> {
    client: Arc<C>,
    view: Arc<V>,
    state: Arc<Mutex<ControllerState>>,
}

impl<C, V> Clone for UploadController<C, V> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            view: self.view.clone(),
            state: self.state.clone(),
        }
    }
}

impl<C: CheckClient, V: View> UploadController<C, V> {
    pub fn new(client: Arc<C>, view: Arc<V>) -> Self {
        view.set_text(Element::FileNameLabel, FILE_LABEL_PROMPT);
        view.set_class(Element::FileNameLabel, FILE_CHOSEN_CLASS, false);
        view.set_class(Element::DropZone, DRAG_OVER_CLASS, false);
        view.set_visible(Element::LoadingIndicator, false);
        view.set_visible(Element::ResultsContainer, false);
        view.set_enabled(Element::SubmitButton, true);

        Self {
            client,
            view,
            state: Arc::new(Mutex::new(ControllerState {
                ui: UiState::Idle,
                selected: None,
                virustotal: false,
                drag_over: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> UiState {
        self.lock().ui
    }

    pub fn selected_file(&self) -> Option<SelectedFile> {
        self.lock().selected.clone()
    }

    pub fn is_drag_over(&self) -> bool {
        self.lock().drag_over
    }

    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    /// Dispatch one UI event. Only `Submit` produces an outcome.
    pub async fn handle(&self, event: UiEvent) -> Option<SubmitOutcome> {
        match event {
            UiEvent::FilePicked(file) => self.select_file(file),
            UiEvent::DragEnter | UiEvent::DragOver => self.set_drag_over(true),
            UiEvent::DragLeave => self.set_drag_over(false),
            UiEvent::Drop(file) => {
                self.set_drag_over(false);
                if let Some(file) = file {
                    self.select_file(file);
                }
            }
            UiEvent::ScanToggled(on) => self.set_virustotal(on),
            UiEvent::Submit => return Some(self.submit().await),
        }
        None
    }

    pub fn select_file(&self, file: SelectedFile) {
        debug!(file = %file.name, bytes = file.size(), "file selected");
        self.view.set_text(Element::FileNameLabel, &file.name);
        self.view.set_class(Element::FileNameLabel, FILE_CHOSEN_CLASS, true);
        self.lock().selected = Some(file);
    }

    pub fn set_virustotal(&self, on: bool) {
        self.lock().virustotal = on;
        self.view.set_class(Element::ScanOptIn, SCAN_CHECKED_CLASS, on);
    }

    fn set_drag_over(&self, over: bool) {
        let mut state = self.lock();
        if state.drag_over != over {
            state.drag_over = over;
            self.view.set_class(Element::DropZone, DRAG_OVER_CLASS, over);
        }
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let request = {
            let mut state = self.lock();
            if state.ui.is_busy() {
                debug!("submit ignored, a check is already in flight");
                return SubmitOutcome::Busy;
            }
            match state.selected.clone() {
                Some(file) => {
                    let request = CheckRequest::new(file, state.virustotal);
                    state.ui = UiState::Submitting;
                    request
                }
                None => {
                    state.ui = UiState::ShowingError;
                    drop(state);
                    let err = CheckError::no_file_selected();
                    self.show_error(&err);
                    return SubmitOutcome::Failed(err);
                }
            }
        };

        self.view.set_visible(Element::ResultsContainer, false);
        self.view.set_visible(Element::LoadingIndicator, true);
        self.view.set_enabled(Element::SubmitButton, false);

        let guard = InFlight {
            controller: self,
            settled: false,
        };
        let span = info_span!("check", request_id = %request.id, file = %request.file.name);
        let reply = self.client.check(&request).instrument(span).await;
        guard.settle(&request, reply)
    }

    fn show_error(&self, err: &CheckError) {
        warn!("check failed: {}", err);
        self.view
            .set_html(Element::ResultContent, render_error(err.display_message()));
        self.view.set_visible(Element::ResultsContainer, true);
    }

    fn release(&self) {
        self.view.set_visible(Element::LoadingIndicator, false);
        self.view.set_enabled(Element::SubmitButton, true);
    }
}

/// Restores the idle controls however the in-flight request ends,
/// including the submit future being dropped before it resolves.
struct InFlight<'a, C: CheckClient, V: View> {
    controller: &'a UploadController<C, V>,
    settled: bool,
}

impl<C: CheckClient, V: View> InFlight<'_, C, V> {
    fn settle(
        mut self,
        request: &CheckRequest,
        reply: Result<CheckResult, CheckError>,
    ) -> SubmitOutcome {
        self.settled = true;
        let controller = self.controller;

        let outcome = match reply {
            Ok(result) => {
                if let Some(reported) = result.virustotal.as_ref().and_then(|s| s.filehash()) {
                    let local = request.file.sha256();
                    if !same_digest(&local, reported) {
                        warn!(%local, %reported, "scan report is for a different content hash");
                    }
                }
                info!(
                    request_id = %request.id,
                    detected = %result.detected_type,
                    mismatch = result.mismatch,
                    "check completed"
                );
                controller.lock().ui = UiState::ShowingResult;
                controller
                    .view
                    .set_html(Element::ResultContent, render_result(&result));
                controller.view.set_visible(Element::ResultsContainer, true);
                SubmitOutcome::Shown(Box::new(result))
            }
            Err(err) => {
                controller.lock().ui = UiState::ShowingError;
                controller.show_error(&err);
                SubmitOutcome::Failed(err)
            }
        };
        controller.release();
        outcome
    }
}

impl<C: CheckClient, V: View> Drop for InFlight<'_, C, V> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("check abandoned before it settled");
            self.controller.lock().ui = UiState::Idle;
            self.controller.release();
        }
    }
}
