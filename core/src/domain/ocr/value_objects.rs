use bytes::Bytes;

/// Raw image bytes handed to the OCR engine, as uploaded or captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub file_name: Option<String>,
    pub data: Bytes,
}

impl ImageInput {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            file_name: None,
            data: data.into(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Progress event reported by an OCR engine while it works.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrProgress {
    pub status: String,
    pub progress: f32,
}
