//! Shared primitive types used across the entire generator.

/// A stable, unique identifier for any generated entity.
pub type EntityId = String;

/// The canonical run identifier (uuid-v4, minted per master regeneration).
pub type RunId = String;

/// Round a dollar amount to whole cents.
///
/// Every monetary field in the generated data is rounded through this
/// one function so that sums of stored values reproduce exactly.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_cents_to_two_decimals() {
        assert_eq!(round_cents(1.239), 1.24);
        assert_eq!(round_cents(2.994), 2.99);
        assert_eq!(round_cents(10.0 / 3.0), 3.33);
        assert_eq!(round_cents(0.0), 0.0);
    }

    #[test]
    fn round_cents_is_idempotent() {
        let v = round_cents(123.456_789);
        assert_eq!(round_cents(v), v);
    }
}
