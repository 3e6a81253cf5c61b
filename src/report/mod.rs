//! Report renderers for scan results.
//!
//! - [`terminal`] — colored per-manifest tables; respects `--quiet`.
//! - JSON output is the serialized [`ScanResult`](crate::models::ScanResult),
//!   written directly by `main`.

pub mod terminal;
