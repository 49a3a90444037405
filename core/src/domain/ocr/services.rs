use std::sync::Arc;

use tracing::instrument;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ocr::{
        ports::{OcrEngine, OcrService},
        value_objects::{ImageInput, OcrProgress},
    },
};

/// Image-to-text extractor in front of an [`OcrEngine`].
#[derive(Debug)]
pub struct OcrExtractor<E: OcrEngine> {
    engine: Arc<E>,
}

impl<E: OcrEngine> OcrExtractor<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

impl<E: OcrEngine> Clone for OcrExtractor<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<E: OcrEngine> OcrService for OcrExtractor<E> {
    #[instrument(
        skip_all,
        fields(
            file_name = image.file_name.as_deref(),
            bytes = image.data.len(),
            language = self.engine.language()
        )
    )]
    async fn extract_text(&self, image: ImageInput) -> Result<String, CoreError> {
        if image.is_empty() {
            return Err(CoreError::InvalidInput);
        }

        let text = self.engine.recognize(image).await?;
        tracing::info!(chars = text.len(), "ocr completed");

        Ok(text)
    }
}

/// Logs engine progress; nothing else observes it.
pub fn log_progress(progress: &OcrProgress) {
    tracing::debug!(
        status = %progress.status,
        progress = progress.progress,
        "ocr progress"
    );
}
