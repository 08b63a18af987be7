// src/models/record.rs
use crate::models::CallSummary;
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::Serialize;

/// Finalized record of one ended, saved call.
///
/// Immutable once written to the ledger; never updated or deleted.
#[derive(Debug, Clone, Serialize)]
pub struct CallRecord {
    pub customer_name: String,
    pub customer_number: String,
    pub started_at: DateTime<Local>,
    pub ended_at: DateTime<Local>,
    /// Post-rounding charge; zero when the call was waived.
    pub total_charged: Decimal,
    pub rate_applied: Decimal,
    pub tech_notes: String,
}

impl CallRecord {
    /// Combine the end-of-call summary with the operator's annotations.
    /// All free-text fields are trimmed; any of them may be empty.
    pub fn from_summary(
        summary: &CallSummary,
        customer_name: &str,
        customer_number: &str,
        tech_notes: &str,
    ) -> Self {
        Self {
            customer_name: customer_name.trim().to_string(),
            customer_number: customer_number.trim().to_string(),
            started_at: summary.started_at,
            ended_at: summary.ended_at,
            total_charged: summary.final_charge,
            rate_applied: summary.rate_per_hour,
            tech_notes: tech_notes.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::BillingPolicy;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn annotations_are_trimmed_and_may_be_empty() {
        let policy = BillingPolicy {
            rate_per_hour: dec!(90),
            minimum_seconds: 0,
        };
        let start = Local.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap();
        let end = Local.with_ymd_and_hms(2025, 3, 14, 9, 4, 0).unwrap();
        let summary = CallSummary::new(&policy, 240, start, end);

        let record = CallRecord::from_summary(&summary, "  Acme Corp ", "", " rebooted router\n");
        assert_eq!(record.customer_name, "Acme Corp");
        assert_eq!(record.customer_number, "");
        assert_eq!(record.tech_notes, "rebooted router");
        assert_eq!(record.total_charged, dec!(6));
        assert_eq!(record.rate_applied, dec!(90));
    }
}
