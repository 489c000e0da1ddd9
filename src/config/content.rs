//! Protected content configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the member-only content lives on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Directory holding `<slug>.md` files with YAML front matter
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,
}

impl ContentConfig {
    /// Validate content configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("CONTENT_DIR"));
        }
        Ok(())
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
        }
    }
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content/protected")
}
