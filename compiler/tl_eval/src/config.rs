//! Evaluation policy.
//!
//! Deep copy on every assignment is the observable semantics and the
//! default. Copy elision is an opt-in optimization: with it enabled, a value
//! returned from a call is marked so that the single copy made when the
//! caller rebinds it is skipped.

/// Environment variable enabling copy elision (`1`/`true` or `0`/`false`).
const COPY_ELISION_VAR: &str = "TLANG_COPY_ELISION";
/// Environment variable overriding the maximum call depth.
const MAX_DEPTH_VAR: &str = "TLANG_MAX_DEPTH";

const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

/// Invalid configuration input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {var}")]
    InvalidValue { var: &'static str, value: String },
}

/// Evaluation configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    copy_elision: bool,
    max_call_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            copy_elision: false,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl EvalConfig {
    #[must_use]
    pub fn with_copy_elision(mut self, enabled: bool) -> Self {
        self.copy_elision = enabled;
        self
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Whether call results may skip their rebinding copy.
    #[inline]
    pub fn copy_elision(&self) -> bool {
        self.copy_elision
    }

    /// Maximum nesting of active calls before evaluation fails.
    #[inline]
    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// Defaults overridden by `TLANG_COPY_ELISION` and `TLANG_MAX_DEPTH`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = EvalConfig::default();
        if let Some(raw) = lookup(COPY_ELISION_VAR) {
            config.copy_elision = match raw.trim() {
                "1" | "true" => true,
                "0" | "false" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: COPY_ELISION_VAR,
                        value: raw,
                    })
                }
            };
        }
        if let Some(raw) = lookup(MAX_DEPTH_VAR) {
            config.max_call_depth = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: MAX_DEPTH_VAR,
                value: raw.clone(),
            })?;
        }
        tracing::debug!(?config, "evaluation config loaded");
        Ok(config)
    }
}
