use hahu_core::AppError;

pub const DEFAULT_PORT: u16 = 8787;

/// Server-only settings. Loader settings live in [`hahu_core::LoaderConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Refuse to start when neither the board nor the jobs file produced jobs.
    pub require_jobs: bool,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `HAHU_SERVER_PORT` (optional, defaults to 8787)
    /// - `HAHU_REQUIRE_JOBS` (optional, `true`/`false`, defaults to false)
    pub fn from_env() -> Result<Self, AppError> {
        Self::parse(
            std::env::var("HAHU_SERVER_PORT").ok(),
            std::env::var("HAHU_REQUIRE_JOBS").ok(),
        )
    }

    fn parse(port: Option<String>, require_jobs: Option<String>) -> Result<Self, AppError> {
        let port = match port {
            None => DEFAULT_PORT,
            Some(raw) => raw.parse().map_err(|_| {
                AppError::ConfigError(format!("Invalid HAHU_SERVER_PORT '{raw}'"))
            })?,
        };

        let require_jobs = match require_jobs.as_deref() {
            None | Some("") => false,
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(AppError::ConfigError(format!(
                        "Invalid HAHU_REQUIRE_JOBS '{raw}': expected true or false"
                    )));
                }
            },
        };

        Ok(Self { port, require_jobs })
    }
}
