// src/billing.rs
use crate::config::Settings;
use rust_decimal::Decimal;

const SECONDS_PER_HOUR: i64 = 3600;

/// Billing policy, immutable for the lifetime of a session.
///
/// The minimum-time waiver makes calls at or under the threshold free;
/// beyond it the full duration is charged, not just the excess.
#[derive(Debug, Clone, PartialEq)]
pub struct BillingPolicy {
    pub rate_per_hour: Decimal,
    pub minimum_seconds: i64,
}

impl BillingPolicy {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            rate_per_hour: settings.rate_per_hour,
            minimum_seconds: settings.minimum_minutes * 60,
        }
    }

    /// Continuous, unrounded cost of the given duration.
    pub fn raw_cost(&self, seconds: u64) -> Decimal {
        self.rate_per_hour * Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)
    }

    /// Cost after the minimum-time waiver. The boundary is inclusive: a call
    /// lasting exactly the minimum is free.
    pub fn effective_cost(&self, seconds: u64) -> Decimal {
        if seconds as i64 <= self.minimum_seconds {
            Decimal::ZERO
        } else {
            self.raw_cost(seconds)
        }
    }

    /// Final billed amount: zero when waived, otherwise the effective cost
    /// rounded up to the next whole currency unit. Rounding never favors the
    /// customer.
    pub fn final_charge(&self, seconds: u64) -> Decimal {
        let effective = self.effective_cost(seconds);
        if effective.is_zero() {
            Decimal::ZERO
        } else {
            effective.ceil()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn policy(rate: Decimal, minimum_minutes: i64) -> BillingPolicy {
        BillingPolicy {
            rate_per_hour: rate,
            minimum_seconds: minimum_minutes * 60,
        }
    }

    #[test]
    fn waiver_boundary_is_inclusive() {
        let p = policy(dec!(120), 10);
        assert_eq!(p.effective_cost(600), Decimal::ZERO);
        assert_eq!(p.final_charge(600), Decimal::ZERO);

        let just_over = p.effective_cost(601);
        assert_eq!(just_over.round_dp(3), dec!(20.033));
        assert_eq!(p.final_charge(601), dec!(21));
    }

    #[test]
    fn zero_elapsed_is_free_even_without_minimum() {
        let p = policy(dec!(120), 0);
        assert_eq!(p.effective_cost(0), Decimal::ZERO);
        assert_eq!(p.final_charge(0), Decimal::ZERO);
    }

    #[test]
    fn zero_minimum_charges_every_nonzero_duration() {
        let p = policy(dec!(90), 0);
        assert_eq!(p.effective_cost(1), dec!(0.025));
        assert_eq!(p.final_charge(1), dec!(1));
    }

    #[test]
    fn zero_rate_is_always_free() {
        let p = policy(Decimal::ZERO, 0);
        assert_eq!(p.effective_cost(7200), Decimal::ZERO);
        assert_eq!(p.final_charge(7200), Decimal::ZERO);
    }

    #[test]
    fn exact_whole_charge_is_not_rounded_up_further() {
        // 90/hr for 240s = 6.00 exactly
        let p = policy(dec!(90), 0);
        assert_eq!(p.raw_cost(240), dec!(6));
        assert_eq!(p.final_charge(240), dec!(6));
    }

    proptest! {
        #[test]
        fn final_charge_never_undercuts_effective_cost(
            rate_cents in 0u32..100_000,
            minimum_minutes in 0i64..120,
            seconds in 0u64..86_400,
        ) {
            let p = policy(Decimal::new(rate_cents as i64, 2), minimum_minutes);
            let effective = p.effective_cost(seconds);
            let final_charge = p.final_charge(seconds);

            prop_assert!(final_charge >= effective);
            if effective.is_zero() {
                prop_assert_eq!(final_charge, Decimal::ZERO);
            } else {
                prop_assert_eq!(final_charge, effective.ceil());
                prop_assert!(final_charge - effective < Decimal::ONE);
            }
        }
    }
}
