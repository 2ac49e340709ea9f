//! Participant profile extraction.
//!
//! - `store`: record keys and typed load/save over a `KvStore`
//! - `gate`: completion checks run before any model call
//! - `prompt` / `parse`: the model-facing template and reply validation
//! - `extractor`: the extraction-and-merge engine
//! - `status` / `evaluator`: host-facing summary and per-turn entry point

pub mod evaluator;
pub mod extractor;
pub mod gate;
pub mod parse;
pub mod prompt;
pub mod status;
pub mod store;

pub use evaluator::ProfileEvaluator;
pub use extractor::{ExtractionOutcome, ProfileExtractor, SkipReason, merge_extraction};
pub use gate::{ProfileState, is_complete, should_extract};
pub use store::{RecordKey, RecordStore};
