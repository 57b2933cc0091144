use std::time::Duration;

use clap::Args;
use url::Url;

use crate::error::Error;

/// Address of the Flask development server the parking application ships with.
pub const DEFAULT_SERVER: &str = "http://localhost:5000";
/// How long a single request may take before it is given up on.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// How long to wait before showing the new state after a vehicle was parked.
pub const ENTRY_REFRESH: Duration = Duration::from_millis(800);
/// How long to wait before showing the new state after a vehicle left.
pub const EXIT_REFRESH: Duration = Duration::from_millis(1200);

/// Command line options shared by every front end.
#[derive(Debug, Clone, Args)]
pub struct ServerArgs {
    /// Base address of the parking server.
    #[arg(long, env = "PARKING_SERVER", default_value = DEFAULT_SERVER)]
    pub server: Url,
    /// Give up on a request after this many seconds.
    #[arg(long, env = "PARKING_TIMEOUT", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
    /// Log every request that is sent.
    #[arg(long)]
    pub debug: bool,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: Url,
    pub timeout: Duration,
    pub entry_refresh: Duration,
    pub exit_refresh: Duration,
}

impl Settings {
    #[must_use]
    pub fn new(server: Url) -> Self {
        Self {
            server,
            timeout: DEFAULT_TIMEOUT,
            entry_refresh: ENTRY_REFRESH,
            exit_refresh: EXIT_REFRESH,
        }
    }

    /// Resolves an absolute endpoint path like `/api/status` against the server address.
    ///
    /// # Errors
    ///
    /// This function will return an error if the resulting address is not valid.
    pub fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(self.server.join(path)?)
    }
}

impl From<&ServerArgs> for Settings {
    fn from(args: &ServerArgs) -> Self {
        Self {
            timeout: Duration::from_secs(args.timeout_secs),
            ..Self::new(args.server.clone())
        }
    }
}
