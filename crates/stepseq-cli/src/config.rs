//! CLI configuration file

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stepseq_core::SequenceOptions;
use tracing::{debug, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Options applied to every sequence the CLI builds
    #[serde(default)]
    pub sequence: SequenceOptions,
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stepseq")
        .join("config.toml")
}

/// Load `path`, or the default location when `None`. A missing or malformed
/// file yields the defaults.
pub fn load_config(path: Option<&Path>) -> CliConfig {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
    let Ok(text) = std::fs::read_to_string(&path) else {
        debug!(path = %path.display(), "no config file, using defaults");
        return CliConfig::default();
    };

    parse_config(&text).unwrap_or_else(|err| {
        warn!(path = %path.display(), %err, "ignoring malformed config file");
        CliConfig::default()
    })
}

pub fn parse_config(text: &str) -> Result<CliConfig, toml::de::Error> {
    toml::from_str(text)
}
