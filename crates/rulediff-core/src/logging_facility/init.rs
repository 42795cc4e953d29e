//! Logging initialization module
//!
//! The logging profile is the only runtime configuration the engine reads.
//! `RUST_LOG` overrides the profile's default filter when set.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Default filter directive for the development profile
pub const DEFAULT_DEV_FILTER: &str = "rulediff_core=debug";

/// Default filter directive for the production profile
pub const DEFAULT_PROD_FILTER: &str = "rulediff_core=info";

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, per-rule debug summaries included
    Development,
    /// JSON structured output, boundary events only
    Production,
    /// No output; tests install their own capture layer
    Test,
}

impl Profile {
    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => DEFAULT_DEV_FILTER,
            Profile::Production => DEFAULT_PROD_FILTER,
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Safe to call more than once; only the first call installs a subscriber.
/// Installation is skipped silently if another global subscriber already
/// exists (for example one set up by the embedding application).
///
/// # Example
///
/// ```
/// use rulediff_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_filter()));
        let _ = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
    });
}
