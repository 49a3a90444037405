use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, ingredient_analysis::entities::AnalysisResult,
};

/// Client-side access to the relay endpoint
#[cfg_attr(test, mockall::automock)]
pub trait AnalysisGateway: Send + Sync {
    /// Sends ingredient text to the relay.
    ///
    /// A non-success status, or a success body that is not an
    /// [`AnalysisResult`], is [`CoreError::RelayRejected`]. A transport
    /// failure is [`CoreError::RelayUnavailable`].
    fn analyze(
        &self,
        text: String,
    ) -> impl Future<Output = Result<AnalysisResult, CoreError>> + Send;
}

/// Key-value storage that outlives the client session, like a browser's local storage
#[cfg_attr(test, mockall::automock)]
pub trait ResultStore: Send + Sync {
    fn set_item(
        &self,
        key: String,
        value: String,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn get_item(
        &self,
        key: String,
    ) -> impl Future<Output = Result<Option<String>, CoreError>> + Send;
}
