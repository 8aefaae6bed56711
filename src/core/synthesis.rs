//! Placeholder synthesis for display-only statistics
//!
//! Records created through the basic form flow carry no balance and no join
//! date. The dashboard still needs numbers for them, so a [`Synthesizer`]
//! supplies placeholders. Placeholders live only in the display projection
//! and are never written back to a record.
//!
//! RULE: the seeded synthesizer never touches a platform RNG. Every record
//! gets its own stream, seeded from (master_seed XOR hash(customer_id)), so
//! the value a record receives does not depend on which other records are
//! present or in what order they are visited.

use crate::types::Customer;
use chrono::{Months, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use rust_decimal::Decimal;

/// Upper bound (exclusive) of a synthesized balance, in cents
const BALANCE_CEILING_CENTS: i64 = 10_000_000;

/// Synthesized join dates fall this many whole months back at most
const JOIN_DATE_WINDOW_MONTHS: u32 = 6;

/// Source of placeholder values for records missing enriched fields
pub trait Synthesizer {
    /// Placeholder balance in `[0, 100000)`
    fn balance(&self, customer: &Customer) -> Decimal;

    /// Placeholder join date, on or before `today`
    fn join_date(&self, customer: &Customer, today: NaiveDate) -> NaiveDate;
}

/// Deterministic synthesizer derived from a master seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededSynthesizer {
    master_seed: u64,
}

impl SeededSynthesizer {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// One RNG stream per (record, purpose) pair
    fn stream(&self, customer: &Customer, purpose: u64) -> Pcg64Mcg {
        let derived_seed = self.master_seed
            ^ fnv1a(customer.customer_id.as_bytes())
            ^ purpose.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Pcg64Mcg::seed_from_u64(derived_seed)
    }
}

impl Synthesizer for SeededSynthesizer {
    fn balance(&self, customer: &Customer) -> Decimal {
        let cents = self.stream(customer, 1).gen_range(0..BALANCE_CEILING_CENTS);
        Decimal::new(cents, 2)
    }

    fn join_date(&self, customer: &Customer, today: NaiveDate) -> NaiveDate {
        let months_back = self.stream(customer, 2).gen_range(0..JOIN_DATE_WINDOW_MONTHS);
        today
            .checked_sub_months(Months::new(months_back))
            .unwrap_or(today)
    }
}

/// Stub synthesizer returning the same placeholders for every record
///
/// Used where exact sums matter, e.g. tests and reproducible reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSynthesizer {
    pub balance: Decimal,
    /// Whole months before `today`
    pub months_back: u32,
}

impl FixedSynthesizer {
    /// Zero balance, joined today
    pub fn zero() -> Self {
        Self {
            balance: Decimal::ZERO,
            months_back: 0,
        }
    }
}

impl Synthesizer for FixedSynthesizer {
    fn balance(&self, _customer: &Customer) -> Decimal {
        self.balance
    }

    fn join_date(&self, _customer: &Customer, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_months(Months::new(self.months_back))
            .unwrap_or(today)
    }
}

/// 64-bit FNV-1a, stable across platforms and releases
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Address;
    use chrono::Datelike;
    use rstest::rstest;

    fn customer(id: &str) -> Customer {
        Customer {
            customer_id: id.to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email_id: "a@b.com".to_string(),
            phone_no: "555".to_string(),
            address: Address::new("X", "Y", "Z"),
            total_balance: None,
            join_date: None,
            card_number: None,
            loan_account_number: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
    }

    #[test]
    fn test_same_seed_same_values() {
        let a = SeededSynthesizer::new(42);
        let b = SeededSynthesizer::new(42);
        for id in ["1", "2", "17", "customer-x"] {
            assert_eq!(a.balance(&customer(id)), b.balance(&customer(id)));
            assert_eq!(
                a.join_date(&customer(id), today()),
                b.join_date(&customer(id), today())
            );
        }
    }

    #[test]
    fn test_different_records_get_different_streams() {
        let synth = SeededSynthesizer::new(42);
        let balances: Vec<Decimal> = (1..=20)
            .map(|i| synth.balance(&customer(&i.to_string())))
            .collect();
        let first = balances[0];
        assert!(balances.iter().any(|b| *b != first));
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(42)]
    #[case(u64::MAX)]
    fn test_balance_range(#[case] seed: u64) {
        let synth = SeededSynthesizer::new(seed);
        for i in 0..200 {
            let balance = synth.balance(&customer(&i.to_string()));
            assert!(balance >= Decimal::ZERO);
            assert!(balance < Decimal::new(100_000, 0));
            assert!(balance.scale() <= 2);
        }
    }

    #[rstest]
    #[case(7)]
    #[case(99)]
    fn test_join_date_window(#[case] seed: u64) {
        let synth = SeededSynthesizer::new(seed);
        let earliest = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();
        for i in 0..200 {
            let date = synth.join_date(&customer(&i.to_string()), today());
            assert!(date <= today());
            assert!(date >= earliest, "{} is older than six months", date);
        }
    }

    #[test]
    fn test_join_date_window_is_fully_used() {
        let synth = SeededSynthesizer::new(42);
        let months_of = |date: NaiveDate| date.year() * 12 + date.month0() as i32;
        let mut offsets: Vec<i32> = (0..200)
            .map(|i| synth.join_date(&customer(&i.to_string()), today()))
            .map(|date| months_of(today()) - months_of(date))
            .collect();
        offsets.sort();
        offsets.dedup();
        assert_eq!(offsets, (0..JOIN_DATE_WINDOW_MONTHS as i32).collect::<Vec<_>>());
    }

    #[test]
    fn test_fixed_synthesizer() {
        let synth = FixedSynthesizer {
            balance: Decimal::new(1250, 2),
            months_back: 1,
        };
        assert_eq!(synth.balance(&customer("1")), Decimal::new(1250, 2));
        // month arithmetic clamps to the last day of a shorter month
        let date = synth.join_date(&customer("1"), today());
        assert_eq!((date.year(), date.month(), date.day()), (2026, 2, 28));
        assert_eq!(FixedSynthesizer::zero().join_date(&customer("1"), today()), today());
    }

    #[test]
    fn test_fnv1a_reference_values() {
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }
}
