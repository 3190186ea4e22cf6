//! Configuration for a story engine.

use std::path::PathBuf;
use std::time::Duration;

use wf_core::run::DEFAULT_HISTORY_LIMIT;
use wf_worldgen::DEFAULT_SPARSE_THRESHOLD;

/// Hosted zero-shot classification model used by default.
pub const DEFAULT_CLASSIFIER_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli";

/// Minimum similarity for the fuzzy interpreter stage.
pub const DEFAULT_FUZZY_CUTOFF: f64 = 0.7;

/// Settings for the remote intent classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Inference endpoint.
    pub endpoint: String,
    /// Bearer token, if the endpoint needs one.
    pub api_token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Top label is accepted only above this score.
    pub min_confidence: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CLASSIFIER_URL.to_string(),
            api_token: None,
            timeout: Duration::from_secs(10),
            min_confidence: 0.7,
        }
    }
}

impl ClassifierConfig {
    /// Read classifier settings from the environment.
    ///
    /// Environment variables:
    /// - `HF_API_TOKEN` - bearer token
    /// - `WAYFARER_CLASSIFIER_URL` - endpoint override
    /// - `WAYFARER_CLASSIFIER_TIMEOUT_SECS` - timeout (default: 10)
    ///
    /// Returns `None` when neither a token nor an endpoint is set, which
    /// leaves the classifier switched off.
    pub fn from_env() -> Option<Self> {
        let token = read_env("HF_API_TOKEN");
        let endpoint = read_env("WAYFARER_CLASSIFIER_URL");
        if token.is_none() && endpoint.is_none() {
            return None;
        }

        let mut config = Self {
            api_token: token,
            ..Self::default()
        };
        if let Some(endpoint) = endpoint {
            config.endpoint = endpoint;
        }
        if let Some(secs) = read_env("WAYFARER_CLASSIFIER_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs.max(1)),
                Err(_) => tracing::warn!(value = %secs, "ignoring invalid classifier timeout"),
            }
        }
        Some(config)
    }

    /// Set the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the acceptance threshold (clamped to 0-1).
    pub fn with_min_confidence(mut self, confidence: f64) -> Self {
        self.min_confidence = confidence.clamp(0.0, 1.0);
        self
    }
}

/// Configuration for a [`crate::StoryEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Directory save files are written to and read from.
    pub save_dir: PathBuf,
    /// Number of recent scenes kept for backtracking.
    pub history_limit: usize,
    /// Scenes with fewer exits than this may be explored.
    pub sparse_threshold: usize,
    /// Similarity cutoff for fuzzy command matching.
    pub fuzzy_cutoff: f64,
    /// Remote intent classifier, if any.
    pub classifier: Option<ClassifierConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("."),
            history_limit: DEFAULT_HISTORY_LIMIT,
            sparse_threshold: DEFAULT_SPARSE_THRESHOLD,
            fuzzy_cutoff: DEFAULT_FUZZY_CUTOFF,
            classifier: None,
        }
    }
}

impl EngineConfig {
    /// Set the save directory.
    pub fn with_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = dir.into();
        self
    }

    /// Set the history length (at least 1).
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    /// Set the sparse-scene threshold.
    pub fn with_sparse_threshold(mut self, threshold: usize) -> Self {
        self.sparse_threshold = threshold;
        self
    }

    /// Set the fuzzy cutoff (clamped to 0-1).
    pub fn with_fuzzy_cutoff(mut self, cutoff: f64) -> Self {
        self.fuzzy_cutoff = cutoff.clamp(0.0, 1.0);
        self
    }

    /// Enable the remote classifier.
    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.classifier = Some(classifier);
        self
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.save_dir, PathBuf::from("."));
        assert_eq!(cfg.history_limit, 10);
        assert_eq!(cfg.sparse_threshold, 2);
        assert!((cfg.fuzzy_cutoff - 0.7).abs() < f64::EPSILON);
        assert!(cfg.classifier.is_none());
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_save_dir("/tmp/saves")
            .with_history_limit(0)
            .with_fuzzy_cutoff(3.0)
            .with_classifier(ClassifierConfig::default().with_token("t"));
        assert_eq!(cfg.save_dir, PathBuf::from("/tmp/saves"));
        assert_eq!(cfg.history_limit, 1);
        assert!((cfg.fuzzy_cutoff - 1.0).abs() < f64::EPSILON);
        assert_eq!(
            cfg.classifier.and_then(|c| c.api_token).as_deref(),
            Some("t")
        );
    }

    #[test]
    fn classifier_defaults() {
        let cfg = ClassifierConfig::default();
        assert_eq!(cfg.endpoint, DEFAULT_CLASSIFIER_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert!((cfg.min_confidence - 0.7).abs() < f64::EPSILON);
    }
}
