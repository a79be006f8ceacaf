use crate::error::{ChartError, ChartResult};

/// Parse one line of samples separated by whitespace and/or commas.
///
/// A blank line is an empty series, which every chart accepts.
pub fn parse_series(line: &str) -> ChartResult<Vec<f64>> {
    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ChartError::InvalidSample(token.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_mixed_separators() {
        assert_eq!(
            parse_series("1, 2.5 3\t-4,,5").unwrap(),
            vec![1.0, 2.5, 3.0, -4.0, 5.0]
        );
    }

    #[test]
    fn blank_line_is_empty_series() {
        assert!(parse_series("   ").unwrap().is_empty());
    }

    #[test]
    fn rejects_garbage_and_non_finite() {
        assert!(matches!(
            parse_series("1 two 3"),
            Err(ChartError::InvalidSample(t)) if t == "two"
        ));
        assert!(parse_series("1 inf").is_err());
        assert!(parse_series("NaN").is_err());
    }
}
