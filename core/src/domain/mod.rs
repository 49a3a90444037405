pub mod common;
pub mod controller;
pub mod ingredient_analysis;
pub mod ocr;
