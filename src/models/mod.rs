// src/models/mod.rs
pub mod record;
pub mod summary;

pub use record::CallRecord;
pub use summary::{format_hms, CallSummary};
