//! Streaming decode of the delivery data file.
//!
//! The input is one large JSON array. Records are pulled from it one element
//! at a time, so the whole array is never held in memory.

use std::fmt;
use std::io::Read;

use serde::de::{Deserializer as _, SeqAccess, Visitor};
use stats_core::error::{Result, StatsError};
use stats_core::models::Record;
use tracing::debug;

/// How many records pass between two progress log lines.
pub const PROGRESS_INTERVAL: u64 = 100_000;

// ── Public API ────────────────────────────────────────────────────────────────

/// Decode a JSON array of records from `reader`, handing each to `on_record`
/// in input order.
///
/// Returns the number of records read. The first malformed record or framing
/// error aborts the read; nothing after it is delivered.
///
/// * [`StatsError::InvalidRecord`] – an element of the array had bad fields
///   (wrong type, missing field, bad delivery text).
/// * [`StatsError::JsonParse`] – the document itself is not a well-formed
///   array (syntax error, truncation, trailing data, not an array).
pub fn for_each_record<R, F>(reader: R, mut on_record: F) -> Result<u64>
where
    R: Read,
    F: FnMut(Record),
{
    let mut de = serde_json::Deserializer::from_reader(reader);
    let mut progress = Progress::default();

    let visitor = RecordVisitor {
        on_record: &mut on_record,
        progress: &mut progress,
    };

    if let Err(err) = (&mut de).deserialize_seq(visitor) {
        if err.is_data() && progress.in_array {
            return Err(StatsError::InvalidRecord {
                index: progress.count,
                source: err,
            });
        }
        return Err(err.into());
    }
    de.end()?;

    debug!(count = progress.count, "parsed");
    Ok(progress.count)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Progress {
    count: u64,
    /// Set once the opening `[` has been consumed.
    in_array: bool,
}

struct RecordVisitor<'a, F> {
    on_record: &'a mut F,
    progress: &'a mut Progress,
}

impl<'de, F> Visitor<'de> for RecordVisitor<'_, F>
where
    F: FnMut(Record),
{
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON array of delivery records")
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        self.progress.in_array = true;

        while let Some(record) = seq.next_element::<Record>()? {
            (self.on_record)(record);
            self.progress.count += 1;

            if self.progress.count % PROGRESS_INTERVAL == 0 {
                debug!(count = self.progress.count, "parsing");
            }
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let count = for_each_record(input.as_bytes(), |r| records.push(r))?;
        assert_eq!(count as usize, records.len());
        Ok(records)
    }

    // ── success ───────────────────────────────────────────────────────────────

    #[test]
    fn test_reads_records_in_order() {
        let input = r#"[
            {"postcode": "10224", "recipe": "Creamy Dill Chicken", "delivery": "Wednesday 1AM - 7PM"},
            {"postcode": "10208", "recipe": "Speedy Steak Fajitas", "delivery": "Thursday 7AM - 5PM"}
        ]"#;
        let records = collect(input).expect("valid input");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].postcode, "10224");
        assert_eq!(records[1].recipe.full_name(), "Speedy Steak Fajitas");
    }

    #[test]
    fn test_empty_array() {
        assert!(collect("[]").expect("valid input").is_empty());
        assert!(collect("  [ ]\n").expect("valid input").is_empty());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let input = r#"[{"postcode":"1","recipe":"A","delivery":"Monday 9AM - 5PM","extra":42}]"#;
        assert_eq!(collect(input).expect("valid input").len(), 1);
    }

    // ── failures ──────────────────────────────────────────────────────────────

    #[test]
    fn test_bad_delivery_aborts_with_index() {
        let input = r#"[
            {"postcode":"1","recipe":"A","delivery":"Monday 9AM - 5PM"},
            {"postcode":"2","recipe":"B","delivery":"Monday 9AM-5PM"},
            {"postcode":"3","recipe":"C","delivery":"Monday 9AM - 5PM"}
        ]"#;

        let mut seen = Vec::new();
        let err = for_each_record(input.as_bytes(), |r| seen.push(r.postcode)).unwrap_err();

        match err {
            StatsError::InvalidRecord { index, source } => {
                assert_eq!(index, 1);
                assert!(source.to_string().contains("bad delivery format"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(seen, vec!["1".to_string()]);
    }

    #[test]
    fn test_missing_field_is_invalid_record() {
        let input = r#"[{"postcode":"1","recipe":"A"}]"#;
        let err = collect(input).unwrap_err();
        assert!(matches!(err, StatsError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn test_truncated_array_is_parse_error() {
        let input = r#"[{"postcode":"1","recipe":"A","delivery":"Monday 9AM - 5PM"},"#;
        let err = collect(input).unwrap_err();
        assert!(matches!(err, StatsError::JsonParse(_)));
    }

    #[test]
    fn test_trailing_data_is_parse_error() {
        let input = r#"[] {"postcode":"1"}"#;
        let err = collect(input).unwrap_err();
        assert!(matches!(err, StatsError::JsonParse(_)));
    }

    #[test]
    fn test_non_array_document_is_parse_error() {
        let input = r#"{"postcode":"1","recipe":"A","delivery":"Monday 9AM - 5PM"}"#;
        let err = collect(input).unwrap_err();
        assert!(matches!(err, StatsError::JsonParse(_)));
    }
}
