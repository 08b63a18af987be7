//! Support-call timing and billing core
//!
//! This crate provides the engine behind a single-operator support-call
//! timer:
//!
//! - A pause-aware call timer driven by a monotonic clock
//! - Billing with a minimum-time waiver and round-up final charges
//! - A month-partitioned, append-only CSV call ledger
//! - Settings resolution with portable-mode support
//!
//! The presentation layer drives the core through named operations
//! (`start`, `pause`, `end`, save/skip); the core has no dependency on any
//! presentation construct.

pub mod billing;
pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod timer;

pub use billing::BillingPolicy;
pub use clock::{Clock, SystemClock};
pub use config::{Settings, SettingsStore, APP_NAME};
pub use error::AppError;
pub use ledger::CallLedger;
pub use models::{CallRecord, CallSummary};
pub use timer::{CallPhase, CallTimer};

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
