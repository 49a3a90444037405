use crate::{
    domain::{
        common::{IntellifoodConfig, OcrConfig, services::Service},
        controller::services::ClientController,
        ocr::services::OcrExtractor,
    },
    infrastructure::{
        llm::GroqLLMClient, ocr::TesseractOcrEngine, relay::HttpAnalysisGateway,
        storage::FileResultStore,
    },
};

pub type IntellifoodService = Service<GroqLLMClient>;

pub type TesseractExtractor = OcrExtractor<TesseractOcrEngine>;

pub type TerminalController =
    ClientController<HttpAnalysisGateway, TesseractExtractor, FileResultStore>;

pub fn create_service(config: IntellifoodConfig) -> IntellifoodService {
    tracing::debug!(
        model = %config.llm.groq_model,
        base_url = %config.llm.groq_base_url,
        "creating analysis service"
    );
    Service::new(GroqLLMClient::new(config.llm))
}

pub fn create_ocr_extractor(config: OcrConfig) -> TesseractExtractor {
    OcrExtractor::new(TesseractOcrEngine::new(config))
}

pub fn create_client_controller(
    backend_url: &str,
    ocr: OcrConfig,
    storage_dir: &std::path::Path,
) -> TerminalController {
    ClientController::new(
        HttpAnalysisGateway::new(backend_url),
        create_ocr_extractor(ocr),
        FileResultStore::new(storage_dir),
    )
}
