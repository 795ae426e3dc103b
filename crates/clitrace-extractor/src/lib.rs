//! Clitrace Extractor
//!
//! Turns free-form call-detail text into CLI records and, on request,
//! verified call records reconstructed from the log store.
//!
//! # Architecture
//!
//! ```text
//! Text → Lines → Pairs ─┬─ only_cli ──────────────────────────────→ delivered CLIs
//!                       └─ with_samples → LogSearch → Correlator → result lines
//! ```
//!
//! # Key Features
//!
//! - **Pair extraction**: marker line + following CLI value, non-overlapping
//! - **Event correlation**: termination event → call id → establishment event
//! - **Best-effort aggregation**: a failing pair is recorded and skipped
//! - **Bounded fan-out**: pairs are queried concurrently, results keep pair order
//!
//! # Example Usage
//!
//! ```no_run
//! use clitrace_extractor::{Processor, ProcessorConfig, ProcessRequest};
//! use clitrace_search::{ElasticClient, SearchConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let search = ElasticClient::new(SearchConfig::new("http://localhost:9200", "elastic", "changeme"))?;
//! let processor = Processor::new(search, ProcessorConfig::default());
//!
//! let outcome = processor
//!     .process(ProcessRequest::with_samples("42123XYZ\n100\n"))
//!     .await?;
//!
//! for line in &outcome.results {
//!     println!("{}", line);
//! }
//! println!("Skipped: {} pairs", outcome.failures.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod processor;
mod types;

pub mod correlator;
pub mod lines;
pub mod numbering;
pub mod patterns;


pub use config::ProcessorConfig;
pub use correlator::{correlate, CorrelatedRecord};
pub use error::{CorrelationFailure, ExtractorError};
pub use lines::{extract_delivered_clis, extract_pairs, normalize_lines};
pub use processor::Processor;
pub use types::{FailureKind, PairFailure, ProcessMetadata, ProcessOutcome, ProcessRequest};
