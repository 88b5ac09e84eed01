use rewater::core::models::registry::ModelRegistry;
use rewater::core::models::water::WaterModel;
use std::path::PathBuf;

pub struct AppConfig {
    pub registry: ModelRegistry,
    pub model: WaterModel,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub show_progress: bool,
}
