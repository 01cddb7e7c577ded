//! Configuration and output directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable overriding where extracted images are written.
pub const OUTPUT_DIR_ENV: &str = "TICKETSIEVE_OUTPUT_DIR";
/// Environment variable holding the default log filter.
pub const LOG_ENV: &str = "TICKETSIEVE_LOG";

/// Top-level ticketsieve configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSieveConfig {
    /// Root under which `images_<ticket>/` directories are created.
    pub image_output_root: PathBuf,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for TicketSieveConfig {
    fn default() -> Self {
        Self {
            image_output_root: PathBuf::from("output"),
            log_filter: "warn".to_string(),
        }
    }
}

impl TicketSieveConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var(OUTPUT_DIR_ENV) {
            if dir.trim().is_empty() {
                return Err(Error::Config(format!("{} is set but empty", OUTPUT_DIR_ENV)));
            }
            config.image_output_root = PathBuf::from(dir);
        }

        if let Ok(filter) = std::env::var(LOG_ENV) {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }

        Ok(config)
    }

    pub fn with_image_output_root(mut self, root: impl AsRef<Path>) -> Self {
        self.image_output_root = root.as_ref().to_path_buf();
        self
    }

    /// Directory holding the images of one ticket.
    pub fn image_dir_for(&self, ticket_id: &str) -> PathBuf {
        self.image_output_root.join(format!("images_{}", ticket_id))
    }
}
