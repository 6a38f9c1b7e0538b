//! Command implementations.

pub mod clean;
pub mod count;
pub mod info;
pub mod plot;
pub mod run;

use book_freq_core::MAX_CHART_WIDTH;

/// Parse a count-like argument (minimum length, bar limit), rejecting zero.
pub fn parse_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("not a positive integer: {e}")),
    }
}

/// Parse a bar width: at least 1 and at most [`MAX_CHART_WIDTH`].
pub fn parse_width(s: &str) -> Result<usize, String> {
    match parse_positive(s)? {
        n if n > MAX_CHART_WIDTH => Err(format!("must be at most {MAX_CHART_WIDTH}")),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_parsing() {
        assert_eq!(parse_positive("3"), Ok(3));
        assert!(parse_positive("0").is_err());
        assert!(parse_positive("-1").is_err());
        assert!(parse_positive("three").is_err());
    }

    #[test]
    fn width_parsing() {
        assert_eq!(parse_width("40"), Ok(40));
        assert_eq!(parse_width("1000"), Ok(MAX_CHART_WIDTH));
        assert!(parse_width("1001").is_err());
        assert!(parse_width("0").is_err());
    }
}
