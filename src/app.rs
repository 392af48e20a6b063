//! Application context shared by command handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::service::UserDirectory;
use crate::service::http::HttpDirectory;

/// Resolved configuration plus output preferences for one invocation.
pub struct AppContext {
    pub config: Config,
    /// Machine-readable JSON output requested.
    pub json: bool,
}

impl AppContext {
    /// Build the context from parsed CLI flags.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = Config::load(cli.config.as_deref())?;
        if let Some(base_url) = &cli.base_url {
            config.service.base_url = base_url.clone();
        }

        Ok(Self {
            config,
            json: cli.json,
        })
    }

    /// Directory client for the configured service.
    pub fn directory(&self) -> Result<Arc<dyn UserDirectory>> {
        let timeout = Duration::from_secs(self.config.service.timeout_secs);
        Ok(Arc::new(HttpDirectory::new(
            &self.config.service.base_url,
            timeout,
        )?))
    }
}
