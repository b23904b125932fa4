//! Hosted notebook detection.
//!
//! Hosted notebook platforms preinstall a large scientific stack into the
//! system interpreter. They are recognised by the environment variables the
//! platform sets for every kernel and subprocess.

/// A hosted notebook platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostedPlatform {
    /// Google Colaboratory.
    Colab,
}

impl std::fmt::Display for HostedPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Colab => write!(f, "Google Colab"),
        }
    }
}

/// A detected hosted platform and the variable that gave it away.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedPlatform {
    /// The platform.
    pub platform: HostedPlatform,
    /// The environment variable that triggered detection.
    pub detected_via: String,
}

/// Variables set inside Colab runtimes.
const COLAB_VARS: &[&str] = &["COLAB_RELEASE_TAG", "COLAB_BACKEND_VERSION", "COLAB_GPU"];

/// Hosted notebook detector.
///
/// # Example
///
/// ```
/// use pyprep::environment::NotebookDetector;
///
/// let detected = NotebookDetector::new().detect();
/// // Returns Some(DetectedPlatform) when running inside a hosted notebook
/// ```
#[derive(Debug, Default)]
pub struct NotebookDetector;

impl NotebookDetector {
    /// Create a detector.
    pub fn new() -> Self {
        Self
    }

    /// Detect the hosted platform from the process environment.
    pub fn detect(&self) -> Option<DetectedPlatform> {
        self.detect_with_env(|key| std::env::var(key))
    }

    /// Detect with a custom env var lookup (for testing).
    pub fn detect_with_env<F>(&self, env_fn: F) -> Option<DetectedPlatform>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        COLAB_VARS
            .iter()
            .copied()
            .find(|var| env_fn(var).is_ok_and(|value| !value.is_empty()))
            .map(|var| DetectedPlatform {
                platform: HostedPlatform::Colab,
                detected_via: var.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn make_env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, std::env::VarError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned().ok_or(std::env::VarError::NotPresent)
    }

    #[test]
    fn detect_nothing_in_clean_env() {
        let detector = NotebookDetector::new();
        assert!(detector.detect_with_env(make_env(&[])).is_none());
    }

    #[test]
    fn detect_colab_from_release_tag() {
        let detector = NotebookDetector::new();
        let result = detector
            .detect_with_env(make_env(&[("COLAB_RELEASE_TAG", "release-colab_20240301-060137")]))
            .unwrap();
        assert_eq!(result.platform, HostedPlatform::Colab);
        assert_eq!(result.detected_via, "COLAB_RELEASE_TAG");
    }

    #[test]
    fn detect_colab_from_gpu_var() {
        let detector = NotebookDetector::new();
        let result = detector
            .detect_with_env(make_env(&[("COLAB_GPU", "1")]))
            .unwrap();
        assert_eq!(result.detected_via, "COLAB_GPU");
    }

    #[test]
    fn empty_value_does_not_count() {
        let detector = NotebookDetector::new();
        assert!(detector
            .detect_with_env(make_env(&[("COLAB_RELEASE_TAG", "")]))
            .is_none());
    }

    #[test]
    fn unrelated_vars_are_ignored() {
        let detector = NotebookDetector::new();
        assert!(detector
            .detect_with_env(make_env(&[("CI", "true"), ("JUPYTER_PATH", "/x")]))
            .is_none());
    }

    #[test]
    fn platform_display() {
        assert_eq!(HostedPlatform::Colab.to_string(), "Google Colab");
    }
}
