//! Requirements manifests.
//!
//! - [`line`] - Classification of individual manifest lines
//! - [`source`] - Loading manifests from disk or over HTTP(S)

pub mod line;
pub mod source;

pub use line::{classify, is_raw, strip_inline_comment, Declaration};
pub use source::{ManifestFetcher, ManifestSource};
