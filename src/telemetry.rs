//! Logging setup

use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// How chatty the importer is when `RUST_LOG` is not set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerbosityLevel {
    /// Silent - errors only
    Silent = 0,
    /// Minimal - errors and non-fatal warnings (unknown sets, malformed cards)
    Minimal = 1,
    /// Normal - progress and summary (default)
    #[default]
    Normal = 2,
    /// Verbose - every set, card and printing written
    Verbose = 3,
}

impl VerbosityLevel {
    fn directive(self) -> &'static str {
        match self {
            VerbosityLevel::Silent => "error",
            VerbosityLevel::Minimal => "warn",
            VerbosityLevel::Normal => "info",
            VerbosityLevel::Verbose => "debug",
        }
    }

    /// Filter for this level, unless `RUST_LOG` overrides it
    pub fn env_filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.directive()))
    }
}

impl FromStr for VerbosityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityLevel::Silent),
            "minimal" | "1" => Ok(VerbosityLevel::Minimal),
            "normal" | "2" => Ok(VerbosityLevel::Normal),
            "verbose" | "3" => Ok(VerbosityLevel::Verbose),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

/// Install the global fmt subscriber
///
/// Logs go to stderr so stdout stays free for the summary.
pub fn init(verbosity: VerbosityLevel) {
    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(verbosity.env_filter());
    tracing_subscriber::registry().with(log_layer).init();
}
