use std::fmt;

use crate::domain::{
    common::entities::app_errors::CoreError,
    controller::value_objects::{PendingSubmission, SubmissionSource, SubmissionToken},
    ingredient_analysis::entities::AnalysisResult,
    ocr::value_objects::ImageInput,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Image,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPhase {
    #[default]
    Idle,
    Loading,
    ResultsShown,
    ErrorShown,
}

/// User-facing messages raised by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    EmptyText,
    MissingImage,
    AnalysisInProgress,
    ImageUnreadable,
    AnalysisFailed,
    ConnectionFailed,
    NothingToSave,
    SaveFailed,
    Saved,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::EmptyText => "Please paste ingredient text first!",
            Notice::MissingImage => "Please upload or capture an image first!",
            Notice::AnalysisInProgress => "An analysis is already in progress.",
            Notice::ImageUnreadable => "Could not read text from the image.",
            Notice::AnalysisFailed => "AI analysis failed. Please try again.",
            Notice::ConnectionFailed => "Server connection failed.",
            Notice::NothingToSave => "No results to save!",
            Notice::SaveFailed => "Could not save results.",
            Notice::Saved => "Results saved successfully!",
        }
    }

    /// Notice shown when a relay call fails; kinds are never told apart beyond this.
    pub fn for_relay_error(error: &CoreError) -> Self {
        match error {
            CoreError::RelayUnavailable(_) => Notice::ConnectionFailed,
            _ => Notice::AnalysisFailed,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Client view-model. Every transition goes through a method here so the
/// single render function sees a consistent state.
#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    pub mode: InputMode,
    pub text_input: String,
    pub uploaded_image: Option<ImageInput>,
    pub captured_image: Option<ImageInput>,
    pub phase: ViewPhase,
    pub last_result: Option<AnalysisResult>,
    pub notice: Option<Notice>,
    in_flight: Option<SubmissionToken>,
    next_token: u64,
}

impl ViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> Option<SubmissionToken> {
        self.in_flight
    }

    pub fn select_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text_input = text.into();
    }

    pub fn attach_upload(&mut self, image: ImageInput) {
        self.uploaded_image = Some(image);
    }

    pub fn attach_capture(&mut self, image: ImageInput) {
        self.captured_image = Some(image);
    }

    /// Validates the active input and reserves a submission token.
    ///
    /// Rejections leave the phase untouched and only raise a notice.
    pub fn begin_submission(&mut self) -> Result<PendingSubmission, Notice> {
        if self.in_flight.is_some() {
            return Err(self.raise(Notice::AnalysisInProgress));
        }

        let source = match self.mode {
            InputMode::Text => {
                let text = self.text_input.trim();
                if text.is_empty() {
                    return Err(self.raise(Notice::EmptyText));
                }
                SubmissionSource::Text(text.to_string())
            }
            InputMode::Image => {
                let image = self
                    .uploaded_image
                    .as_ref()
                    .or(self.captured_image.as_ref())
                    .cloned();
                match image {
                    Some(image) => SubmissionSource::Image(image),
                    None => return Err(self.raise(Notice::MissingImage)),
                }
            }
        };

        self.next_token += 1;
        let token = SubmissionToken(self.next_token);
        self.in_flight = Some(token);
        self.notice = None;

        Ok(PendingSubmission { token, source })
    }

    pub fn mark_loading(&mut self, token: SubmissionToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.phase = ViewPhase::Loading;
        true
    }

    /// Applies a finished analysis. Returns `false` for a stale token.
    pub fn complete_submission(&mut self, token: SubmissionToken, result: AnalysisResult) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.in_flight = None;
        self.last_result = Some(result);
        self.phase = ViewPhase::ResultsShown;
        self.notice = None;
        true
    }

    /// Records a failed submission; the last result stays as it was.
    pub fn fail_submission(&mut self, token: SubmissionToken, notice: Notice) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.in_flight = None;
        self.phase = ViewPhase::ErrorShown;
        self.notice = Some(notice);
        true
    }

    /// Clears inputs and panels and returns to image mode. Any in-flight
    /// submission is abandoned; the last result is kept for saving.
    pub fn reset(&mut self) {
        self.mode = InputMode::Image;
        self.text_input.clear();
        self.uploaded_image = None;
        self.captured_image = None;
        self.phase = ViewPhase::Idle;
        self.notice = None;
        self.in_flight = None;
    }

    pub fn raise(&mut self, notice: Notice) -> Notice {
        self.notice = Some(notice);
        notice
    }

    fn is_current(&self, token: SubmissionToken) -> bool {
        self.in_flight == Some(token)
    }
}
