//! License keyword matching and policy evaluation.
//!
//! - [`keywords`] — case-insensitive keyword tables that map raw manifest text
//!   to license identifiers.
//! - [`policy`] — the forbidden-license list and violation classification.

pub mod keywords;
pub mod policy;
