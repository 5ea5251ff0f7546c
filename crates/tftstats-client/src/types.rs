use tftstats_types::ClientSettings;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub bundle_path: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from(&ClientSettings::default())
    }
}

impl From<&ClientSettings> for ClientConfig {
    fn from(settings: &ClientSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            bundle_path: settings.bundle_path.clone(),
            timeout_ms: settings.timeout_ms,
        }
    }
}
