use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ocr::value_objects::ImageInput,
};

/// Optical character recognition backend
#[cfg_attr(test, mockall::automock)]
pub trait OcrEngine: Send + Sync {
    /// Language the engine was configured with (e.g. "eng").
    fn language(&self) -> &str;

    fn recognize(
        &self,
        image: ImageInput,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for turning a label photo into ingredient text
#[cfg_attr(test, mockall::automock)]
pub trait OcrService: Send + Sync {
    fn extract_text(
        &self,
        image: ImageInput,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

