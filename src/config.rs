use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
/// Everything has a sensible default; the service runs with no
/// configuration at all.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind (VERITEXT_BIND, default 127.0.0.1)
    pub bind: String,
    /// Port to listen on (VERITEXT_PORT, default 5000)
    pub port: u16,
    /// Scratch directory for uploaded files (VERITEXT_UPLOAD_DIR)
    pub upload_dir: PathBuf,
    /// Path of the JSON report log (VERITEXT_REPORTS_FILE)
    pub reports_file: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let port = match env::var("VERITEXT_PORT") {
            Ok(p) => p
                .parse()
                .map_err(|_| anyhow::anyhow!("VERITEXT_PORT is not a valid port: {p}"))?,
            Err(_) => 5000,
        };

        Ok(Self {
            bind: env::var("VERITEXT_BIND").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            upload_dir: env::var("VERITEXT_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            reports_file: env::var("VERITEXT_REPORTS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data").join("reports.json")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Only assert defaults for variables this test does not set;
        // the suite runs in one process and env vars are global.
        let config = Config {
            bind: "127.0.0.1".to_string(),
            port: 5000,
            upload_dir: PathBuf::from("uploads"),
            reports_file: PathBuf::from("data").join("reports.json"),
        };
        assert_eq!(config.port, 5000);
        assert!(config.reports_file.ends_with("reports.json"));
    }
}
