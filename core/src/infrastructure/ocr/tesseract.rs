use std::process::Stdio;

use tokio::{io::AsyncWriteExt, process::Command};

use crate::domain::{
    common::{OcrConfig, entities::app_errors::CoreError},
    ocr::{
        ports::OcrEngine,
        services::log_progress,
        value_objects::{ImageInput, OcrProgress},
    },
};

/// Runs the `tesseract` binary, piping the image through stdin.
#[derive(Debug, Clone)]
pub struct TesseractOcrEngine {
    binary: String,
    language: String,
}

impl TesseractOcrEngine {
    pub fn new(config: OcrConfig) -> Self {
        Self {
            binary: config.tesseract_bin,
            language: config.language,
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .args(["stdin", "stdout", "-l", self.language.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

impl OcrEngine for TesseractOcrEngine {
    fn language(&self) -> &str {
        &self.language
    }

    async fn recognize(&self, image: ImageInput) -> Result<String, CoreError> {
        log_progress(&OcrProgress {
            status: "loading tesseract".to_string(),
            progress: 0.0,
        });

        let mut child = self.command().spawn().map_err(|e| {
            tracing::error!(binary = %self.binary, "Failed to start tesseract: {}", e);
            CoreError::OcrFailed(format!("failed to start {}: {}", self.binary, e))
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(&image.data)
                .await
                .map_err(|e| CoreError::OcrFailed(format!("failed to send image: {}", e)))?;
        }

        log_progress(&OcrProgress {
            status: "recognizing text".to_string(),
            progress: 0.5,
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| CoreError::OcrFailed(format!("tesseract did not finish: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(status = %output.status, "tesseract failed: {}", stderr.trim());
            return Err(CoreError::OcrFailed(stderr.trim().to_string()));
        }

        log_progress(&OcrProgress {
            status: "recognizing text".to_string(),
            progress: 1.0,
        });

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
