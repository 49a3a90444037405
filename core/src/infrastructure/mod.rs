pub mod llm;
pub mod ocr;
pub mod relay;
pub mod storage;
