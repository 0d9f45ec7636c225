// Application configuration
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            upload_dir: default_upload_dir(),
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:8050".to_string()
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

/// Load the server configuration. The file is optional; a bare checkout runs
/// with the built-in defaults. There is no environment-variable or CLI
/// surface.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}
