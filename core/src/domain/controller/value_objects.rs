use std::fmt;

use crate::domain::ocr::value_objects::ImageInput;

/// Key under which the last result is kept in local storage.
pub const RESULT_STORAGE_KEY: &str = "intellifood_result";

/// Identifies one submission; completions carrying any other token are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmissionToken(pub(crate) u64);

impl fmt::Display for SubmissionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionSource {
    Text(String),
    Image(ImageInput),
}

/// A submission accepted by the view-model and not yet completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub token: SubmissionToken,
    pub source: SubmissionSource,
}
