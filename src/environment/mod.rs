//! Run environment detection and mode resolution.
//!
//! Determines whether pyprep runs inside a hosted notebook. The priority
//! chain is:
//!
//! 1. Explicit `--mode` flag
//! 2. Config `mode`
//! 3. Auto-detection (hosted notebook env vars)
//! 4. Fallback to local mode

pub mod detection;
pub mod resolver;

pub use detection::{DetectedPlatform, HostedPlatform, NotebookDetector};
pub use resolver::{ModeSource, ResolvedMode, RunMode};
