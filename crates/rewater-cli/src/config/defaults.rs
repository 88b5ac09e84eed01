use rewater::core::models::registry::DEFAULT_MODEL;

pub struct DefaultsConfig {
    pub model: String,
    pub show_progress: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            show_progress: true,
        }
    }
}
