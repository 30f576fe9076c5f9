use std::path::PathBuf;
use thiserror::Error;

/// All errors produced while building a recipe report.
#[derive(Error, Debug)]
pub enum StatsError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or written.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A record inside the input array had malformed fields.
    #[error("Invalid record after {index} records: {source}")]
    InvalidRecord {
        /// Number of records successfully read before the bad one.
        index: u64,
        #[source]
        source: serde_json::Error,
    },

    /// A delivery string did not match `<Weekday> <1-12>AM - <1-12>PM`.
    #[error("bad delivery format: {0:?}")]
    DeliveryFormat(String),

    /// An hour captured from a delivery string was not a number.
    #[error("Invalid hour value {value:?}: {source}")]
    HourParse {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the recipe-stats crates.
pub type Result<T> = std::result::Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = StatsError::FileRead {
            path: PathBuf::from("/some/data.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/data.json"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_delivery_format() {
        let err = StatsError::DeliveryFormat("Monday 14AM - 15PM".to_string());
        assert_eq!(err.to_string(), "bad delivery format: \"Monday 14AM - 15PM\"");
    }

    #[test]
    fn test_error_display_hour_parse() {
        let source = "x".parse::<u32>().unwrap_err();
        let err = StatsError::HourParse {
            value: "x".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Invalid hour value \"x\""));
    }

    #[test]
    fn test_error_display_config() {
        let err = StatsError::Config("missing filter".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing filter");
    }

    #[test]
    fn test_error_display_invalid_record() {
        let source = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err = StatsError::InvalidRecord { index: 41, source };
        assert!(err.to_string().starts_with("Invalid record after 41 records"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: StatsError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
