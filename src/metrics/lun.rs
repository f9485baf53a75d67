//! LUN count parsing.

use crate::error::{ExporterError, Result};

/// Parse a LUN count such as `wc -l` prints it, surrounding whitespace included.
pub fn parse_lun_count(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ExporterError::parse_error("empty LUN count output"));
    }

    trimmed
        .parse::<f64>()
        .map_err(|e| ExporterError::parse_error(format!("invalid LUN count {trimmed:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_trailing_newline() {
        assert_eq!(parse_lun_count("42\n").unwrap(), 42.0);
    }

    #[test]
    fn test_strips_wc_padding() {
        // BSD wc pads its count with leading spaces
        assert_eq!(parse_lun_count("     7\r\n").unwrap(), 7.0);
    }

    #[test]
    fn test_zero() {
        assert_eq!(parse_lun_count("0\n").unwrap(), 0.0);
    }

    #[test]
    fn test_empty_is_error() {
        assert!(parse_lun_count("\n").is_err());
    }

    #[test]
    fn test_garbage_is_error() {
        let err = parse_lun_count("Error: authentication failed\n").unwrap_err();
        assert!(err.to_string().contains("invalid LUN count"));
    }
}
