//! Clitrace Domain Layer
//!
//! Core value types and trait interfaces shared by every other crate in the
//! workspace. Infrastructure (HTTP, regex matching, time parsing) lives
//! elsewhere; this crate only depends on `uuid` and `thiserror`.
//!
//! ## Key Concepts
//!
//! - **CliPair**: a marker line and the CLI value found on the line after it
//! - **LogHit**: one record returned by the log search backend
//! - **ExtractionMode**: `only_cli` (pairing only) or `with_samples`
//!   (pairing followed by backend correlation)
//! - **LogSearch**: the boundary to the search backend

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod hit;
pub mod mode;
pub mod pair;
pub mod request;
pub mod traits;

// Re-exports for convenience
pub use error::SearchError;
pub use hit::LogHit;
pub use mode::ExtractionMode;
pub use pair::{CliPair, ANONYMOUS, MARKER_PREFIX, NO_CLI_PRESENTED};
pub use request::RequestId;
pub use traits::LogSearch;
