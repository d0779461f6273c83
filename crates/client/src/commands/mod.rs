//! Client subcommands.

mod inspect;
mod interactive;
mod score;

pub use inspect::{Rules, Terms};
pub use interactive::Interactive;
pub use score::Score;

/// Parses a level on the `[0, 100]` percentage scale.
pub(crate) fn parse_percent(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw.trim()))?;

    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} must be between 0 and 100"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_bounds_are_inclusive() {
        assert_eq!(parse_percent("0"), Ok(0.0));
        assert_eq!(parse_percent(" 100 "), Ok(100.0));
        assert_eq!(parse_percent("42.5"), Ok(42.5));
    }

    #[test]
    fn percent_rejects_out_of_range_and_garbage() {
        assert!(parse_percent("-0.1").is_err());
        assert!(parse_percent("100.01").is_err());
        assert!(parse_percent("NaN").is_err());
        assert_eq!(parse_percent("abc"), Err("'abc' is not a number".into()));
    }
}
