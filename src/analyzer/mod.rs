use crate::models::DetectedLicenses;

pub mod generic;
pub mod go;
pub mod java;
pub mod node;
pub mod python;
pub mod rust;

/// Per-format license extraction over a manifest's text.
///
/// Implementations never fail: a manifest without any license signal yields
/// [`DetectedLicenses::unknown`].
pub trait Analyzer {
    async fn analyze(&self, content: &str) -> DetectedLicenses;
}
