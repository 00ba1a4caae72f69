//! Deterministic subscriber names for the synthetic roster.
//!
//! The first twenty slots are fixed pairs so a fallback roster always
//! opens with the same recognisable people. Slots past twenty draw
//! first and last names independently from the same lists.

use crate::rng::DeskRng;

const FIXED_PAIRS: &[(&str, &str)] = &[
    ("John", "Smith"), ("Sarah", "Johnson"), ("Michael", "Brown"), ("Emily", "Davis"),
    ("David", "Wilson"), ("Jessica", "Miller"), ("Christopher", "Moore"), ("Ashley", "Taylor"),
    ("Matthew", "Anderson"), ("Amanda", "Thomas"), ("James", "Jackson"), ("Jennifer", "White"),
    ("Robert", "Harris"), ("Lisa", "Martin"), ("William", "Thompson"), ("Karen", "Garcia"),
    ("Richard", "Martinez"), ("Susan", "Robinson"), ("Joseph", "Clark"), ("Betty", "Rodriguez"),
];

pub struct NameGenerator;

impl NameGenerator {
    /// (first, last) for roster slot `index` (0-based).
    pub fn name_for_slot(index: usize, rng: &mut DeskRng) -> (&'static str, &'static str) {
        if let Some(pair) = FIXED_PAIRS.get(index) {
            return *pair;
        }
        let first = rng.pick(FIXED_PAIRS).map(|p| p.0).unwrap_or("Alex");
        let last = rng.pick(FIXED_PAIRS).map(|p| p.1).unwrap_or("Doe");
        (first, last)
    }

    /// `first.last@example.com`; slots past the fixed pairs carry their
    /// 1-based slot number so emails stay unique.
    pub fn email_for(first: &str, last: &str, index: usize) -> String {
        let local = format!("{}.{}", first.to_lowercase(), last.to_lowercase());
        if index < FIXED_PAIRS.len() {
            format!("{local}@example.com")
        } else {
            format!("{local}{}@example.com", index + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngStream;

    #[test]
    fn fixed_slots_ignore_the_rng() {
        let mut a = DeskRng::new(1, RngStream::Names);
        let mut b = DeskRng::new(2, RngStream::Names);
        assert_eq!(NameGenerator::name_for_slot(0, &mut a), ("John", "Smith"));
        assert_eq!(NameGenerator::name_for_slot(19, &mut b), ("Betty", "Rodriguez"));
    }

    #[test]
    fn extra_slots_are_deterministic() {
        let mut a = DeskRng::new(12345, RngStream::Names);
        let mut b = DeskRng::new(12345, RngStream::Names);
        for i in 20..60 {
            assert_eq!(
                NameGenerator::name_for_slot(i, &mut a),
                NameGenerator::name_for_slot(i, &mut b),
            );
        }
    }

    #[test]
    fn emails_are_unique_past_the_fixed_pairs() {
        assert_eq!(NameGenerator::email_for("John", "Smith", 0), "john.smith@example.com");
        assert_eq!(NameGenerator::email_for("John", "Smith", 20), "john.smith21@example.com");
    }
}
