use std::sync::Arc;

use intellifood_core::application::IntellifoodService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: IntellifoodService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: IntellifoodService) -> Self {
        Self { args, service }
    }
}
