use crate::domain::{
    common::entities::app_errors::CoreError,
    controller::{
        entities::{InputMode, Notice, ViewModel},
        ports::{AnalysisGateway, ResultStore},
        render::{RenderedView, render},
        value_objects::{PendingSubmission, RESULT_STORAGE_KEY, SubmissionSource},
    },
    ingredient_analysis::entities::AnalysisResult,
    ocr::{ports::OcrService, value_objects::ImageInput},
};

/// Drives the view-model against the relay, the OCR engine and local storage.
pub struct ClientController<G, O, S>
where
    G: AnalysisGateway,
    O: OcrService,
    S: ResultStore,
{
    gateway: G,
    ocr: O,
    store: S,
    view: ViewModel,
}

impl<G, O, S> ClientController<G, O, S>
where
    G: AnalysisGateway,
    O: OcrService,
    S: ResultStore,
{
    pub fn new(gateway: G, ocr: O, store: S) -> Self {
        Self {
            gateway,
            ocr,
            store,
            view: ViewModel::new(),
        }
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn render(&self) -> RenderedView {
        render(&self.view)
    }

    pub fn select_mode(&mut self, mode: InputMode) {
        self.view.select_mode(mode);
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.view.set_text(text);
    }

    pub fn attach_upload(&mut self, image: ImageInput) {
        self.view.attach_upload(image);
    }

    pub fn attach_capture(&mut self, image: ImageInput) {
        self.view.attach_capture(image);
    }

    /// Runs one analysis end to end: OCR if needed, then the relay call.
    pub async fn submit(&mut self) -> Result<&AnalysisResult, Notice> {
        let PendingSubmission { token, source } = self.view.begin_submission()?;

        let text = match source {
            SubmissionSource::Text(text) => text,
            SubmissionSource::Image(image) => match self.ocr.extract_text(image).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(%token, "ocr failed: {}", e);
                    self.view.fail_submission(token, Notice::ImageUnreadable);
                    return Err(Notice::ImageUnreadable);
                }
            },
        };

        self.view.mark_loading(token);

        match self.gateway.analyze(text).await {
            Ok(result) => {
                self.view.complete_submission(token, result);
                self.view.last_result.as_ref().ok_or(Notice::AnalysisFailed)
            }
            Err(e) => {
                tracing::error!(%token, "analysis request failed: {}", e);
                let notice = Notice::for_relay_error(&e);
                self.view.fail_submission(token, notice);
                Err(notice)
            }
        }
    }

    pub fn reset(&mut self) {
        self.view.reset();
    }

    /// Persists the last successful result under [`RESULT_STORAGE_KEY`].
    pub async fn save(&mut self) -> Result<(), Notice> {
        let Some(result) = self.view.last_result.as_ref() else {
            return Err(self.view.raise(Notice::NothingToSave));
        };

        let serialized = match serde_json::to_string(result) {
            Ok(serialized) => serialized,
            Err(e) => {
                tracing::error!("Failed to serialize result: {}", e);
                return Err(self.view.raise(Notice::SaveFailed));
            }
        };

        if let Err(e) = self
            .store
            .set_item(RESULT_STORAGE_KEY.to_string(), serialized)
            .await
        {
            tracing::error!("Failed to save result: {}", e);
            return Err(self.view.raise(Notice::SaveFailed));
        }

        self.view.raise(Notice::Saved);
        Ok(())
    }

    /// Reads back the result stored by [`Self::save`], if any.
    pub async fn load_saved(&self) -> Result<Option<AnalysisResult>, CoreError> {
        let Some(raw) = self.store.get_item(RESULT_STORAGE_KEY.to_string()).await? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| CoreError::StorageError(format!("stored result is corrupt: {}", e)))
    }
}
