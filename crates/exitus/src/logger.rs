//! Logger registry: a process-wide, replaceable map from [`Severity`] to a
//! log function.
//!
//! Error construction looks a severity up here when logging is requested.
//! The map is replaced wholesale by [`set_logger_config`]; there is no
//! partial update.
//!
//! # Initial contents
//!
//! On first access the registry is built by [`LogConfig::from_env`]:
//!
//! - `EXITUS_LOG_BACKEND=tracing` - every severity forwards to `tracing`
//! - `EXITUS_LOG_LEVEL=<severity>` - with the tracing backend, only this
//!   severity and more severe ones are registered
//!
//! Otherwise the registry starts empty.
//!
//! # Usage
//!
//! ```
//! use exitus::{set_logger_config, LogConfig, Severity};
//!
//! set_logger_config(
//!     LogConfig::new().with(Severity::Warn, |err| eprintln!("warn: {}", err)),
//! );
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::env::{env_get, env_get_opt, LOG_BACKEND_VAR, LOG_LEVEL_VAR};
use crate::error::ErrorReport;

/// Log severities a function can be registered under, least severe first.
/// `Ord` follows [`Severity::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Severity {
    pub const ALL: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warn => "warn",
            Severity::Info => "info",
            Severity::Debug => "debug",
            Severity::Trace => "trace",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// 0 = trace … 5 = fatal.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Trace => 0,
            Severity::Debug => 1,
            Severity::Info => 2,
            Severity::Warn => 3,
            Severity::Error => 4,
            Severity::Fatal => 5,
        }
    }

    #[inline]
    pub fn is_at_least(&self, floor: Severity) -> bool {
        self.rank() >= floor.rank()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A severity name outside the fixed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity `{0}` (expected one of: warn, info, debug, trace, error, fatal)")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warn" | "warning" => Ok(Severity::Warn),
            "info" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            "trace" => Ok(Severity::Trace),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            _ => Err(UnknownSeverity(s.to_string())),
        }
    }
}

/// A single-argument log function. Receives the error value being built.
pub type LogFunction = Arc<dyn Fn(&dyn ErrorReport) + Send + Sync>;

/// A complete severity → function mapping, installed as one unit.
#[derive(Clone, Default)]
pub struct LogConfig {
    handlers: BTreeMap<Severity, LogFunction>,
}

impl LogConfig {
    /// An empty mapping. Installing it disables log dispatch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, severity: Severity, f: F) -> Self
    where
        F: Fn(&dyn ErrorReport) + Send + Sync + 'static,
    {
        self.insert(severity, f);
        self
    }

    pub fn insert<F>(&mut self, severity: Severity, f: F)
    where
        F: Fn(&dyn ErrorReport) + Send + Sync + 'static,
    {
        self.handlers.insert(severity, Arc::new(f));
    }

    pub fn get(&self, severity: Severity) -> Option<LogFunction> {
        self.handlers.get(&severity).cloned()
    }

    pub fn contains(&self, severity: Severity) -> bool {
        self.handlers.contains_key(&severity)
    }

    pub fn severities(&self) -> impl Iterator<Item = Severity> + '_ {
        self.handlers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Every severity forwarded to the matching `tracing` level.
    pub fn tracing() -> Self {
        Self::tracing_from(Severity::Trace)
    }

    /// Forward `floor` and every more severe level to `tracing`.
    pub fn tracing_from(floor: Severity) -> Self {
        let mut config = Self::new();
        for severity in Severity::ALL {
            if severity.is_at_least(floor) {
                config.insert(severity, move |err| emit_tracing(severity, err));
            }
        }
        config
    }

    /// Build the initial registry contents from the environment.
    pub fn from_env() -> Self {
        let backend: String = env_get(LOG_BACKEND_VAR, String::new());
        match backend.trim().to_ascii_lowercase().as_str() {
            "tracing" => {
                let floor = env_get_opt(LOG_LEVEL_VAR).unwrap_or(Severity::Trace);
                Self::tracing_from(floor)
            }
            _ => Self::new(),
        }
    }
}

impl fmt::Debug for LogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

fn emit_tracing(severity: Severity, err: &dyn ErrorReport) {
    let kind = err.error_kind();
    let payload = err.payload_fields();
    match severity {
        Severity::Trace => tracing::trace!(target: "exitus", %kind, ?payload, "{}", err),
        Severity::Debug => tracing::debug!(target: "exitus", %kind, ?payload, "{}", err),
        Severity::Info => tracing::info!(target: "exitus", %kind, ?payload, "{}", err),
        Severity::Warn => tracing::warn!(target: "exitus", %kind, ?payload, "{}", err),
        Severity::Error => tracing::error!(target: "exitus", %kind, ?payload, "{}", err),
        Severity::Fatal => {
            tracing::error!(target: "exitus", %kind, ?payload, fatal = true, "{}", err)
        }
    }
}

// ── Registry ──────────────────────────────────────────────────────

static REGISTRY: OnceLock<RwLock<Arc<LogConfig>>> = OnceLock::new();

fn registry() -> &'static RwLock<Arc<LogConfig>> {
    REGISTRY.get_or_init(|| RwLock::new(Arc::new(LogConfig::from_env())))
}

/// Replace the whole registry. Severities absent from `config` are gone
/// afterwards. Last writer wins.
pub fn set_logger_config(config: LogConfig) {
    let mut guard = registry().write().unwrap_or_else(PoisonError::into_inner);
    *guard = Arc::new(config);
}

/// Snapshot of the current registry.
pub fn logger_config() -> Arc<LogConfig> {
    registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Look a severity up in the current registry. The lock is released before
/// the caller runs the returned function.
pub(crate) fn get(severity: Severity) -> Option<LogFunction> {
    logger_config().get(severity)
}
