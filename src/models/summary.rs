// src/models/summary.rs
use crate::billing::BillingPolicy;
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use std::fmt::Write;

/// Everything known about a call the moment it ends.
///
/// Produced exactly once per ended call; the ledger record is derived from
/// this plus the operator's annotations.
#[derive(Debug, Clone)]
pub struct CallSummary {
    pub elapsed_seconds: u64,
    pub raw_cost: Decimal,
    pub effective_cost: Decimal,
    pub final_charge: Decimal,
    pub started_at: DateTime<Local>,
    pub ended_at: DateTime<Local>,
    pub rate_per_hour: Decimal,
    pub minimum_minutes: i64,
}

impl CallSummary {
    pub fn new(
        policy: &BillingPolicy,
        elapsed_seconds: u64,
        started_at: DateTime<Local>,
        ended_at: DateTime<Local>,
    ) -> Self {
        Self {
            elapsed_seconds,
            raw_cost: policy.raw_cost(elapsed_seconds),
            effective_cost: policy.effective_cost(elapsed_seconds),
            final_charge: policy.final_charge(elapsed_seconds),
            started_at,
            ended_at,
            rate_per_hour: policy.rate_per_hour,
            minimum_minutes: policy.minimum_seconds / 60,
        }
    }

    /// True when the call fell under the minimum-time waiver.
    pub fn is_free(&self) -> bool {
        self.effective_cost.is_zero()
    }

    /// Plain-text summary block for the operator to read or copy elsewhere.
    pub fn text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Call Duration: {}", format_hms(self.elapsed_seconds));
        let _ = writeln!(out, "Rate: ${:.2} / hr", self.rate_per_hour);
        let _ = writeln!(out, "Minimum time: {} min (≤ free)", self.minimum_minutes);
        let _ = writeln!(out, "Calculated Cost: ${:.2}", self.raw_cost);
        if self.is_free() {
            let _ = writeln!(out, "Effective Cost: FREE");
        } else {
            let _ = writeln!(out, "Effective Cost: ${:.2}", self.effective_cost);
        }
        let _ = writeln!(out, "Final (rounded up): ${}", self.final_charge);
        let _ = writeln!(out, "Start: {}", self.started_at.format("%Y-%m-%d %H:%M:%S"));
        let _ = write!(out, "End:   {}", self.ended_at.format("%Y-%m-%d %H:%M:%S"));
        out
    }
}

/// Render whole seconds as `HH:MM:SS`.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
