//! Run mode resolution.
//!
//! Resolves whether pyprep prepares a local virtual environment or
//! reconciles a hosted notebook's interpreter, using the priority chain:
//! 1. Explicit `--mode` flag
//! 2. Config `mode` (unless `auto`)
//! 3. Hosted notebook detection
//! 4. Fallback to local

use serde::{Deserialize, Serialize};

use super::detection::{DetectedPlatform, NotebookDetector};

/// Requested run mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Decide from the environment.
    #[default]
    Auto,
    /// Create and populate a project virtual environment.
    Local,
    /// Reconcile the current interpreter against the manifest.
    Hosted,
}

/// How the mode was determined.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeSource {
    /// Explicitly set via `--mode` flag.
    Flag,
    /// Set via config `mode`.
    Config,
    /// Detected hosted notebook.
    Detected(DetectedPlatform),
    /// Nothing pointed at a hosted notebook.
    Fallback,
}

impl std::fmt::Display for ModeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "--mode flag"),
            Self::Config => write!(f, "config"),
            Self::Detected(d) => write!(f, "{} detected via {}", d.platform, d.detected_via),
            Self::Fallback => write!(f, "default"),
        }
    }
}

/// A concrete mode with the reason it was chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMode {
    /// Never `RunMode::Auto`.
    pub mode: RunMode,
    /// How this mode was determined.
    pub source: ModeSource,
}

impl ResolvedMode {
    /// Resolve the mode using the priority chain.
    ///
    /// # Example
    ///
    /// ```
    /// use pyprep::environment::{ModeSource, NotebookDetector, ResolvedMode, RunMode};
    ///
    /// let resolved = ResolvedMode::resolve(Some(RunMode::Local), RunMode::Hosted, &NotebookDetector::new());
    /// assert_eq!(resolved.mode, RunMode::Local);
    /// assert_eq!(resolved.source, ModeSource::Flag);
    /// ```
    pub fn resolve(flag: Option<RunMode>, config: RunMode, detector: &NotebookDetector) -> Self {
        Self::resolve_with_detection(flag, config, detector.detect())
    }

    /// Resolve with a pre-computed detection result (for testing).
    pub fn resolve_with_detection(
        flag: Option<RunMode>,
        config: RunMode,
        detected: Option<DetectedPlatform>,
    ) -> Self {
        // 1. Explicit --mode flag
        if let Some(mode) = flag.filter(|m| *m != RunMode::Auto) {
            return Self {
                mode,
                source: ModeSource::Flag,
            };
        }

        // 2. Config mode
        if config != RunMode::Auto {
            return Self {
                mode: config,
                source: ModeSource::Config,
            };
        }

        // 3. Detection
        if let Some(platform) = detected {
            return Self {
                mode: RunMode::Hosted,
                source: ModeSource::Detected(platform),
            };
        }

        // 4. Fallback
        Self {
            mode: RunMode::Local,
            source: ModeSource::Fallback,
        }
    }
}
