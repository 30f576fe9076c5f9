use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::Weekday;
use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::error::{Result, StatsError};

/// Anchored template for `"<Weekday> <1-12>AM - <1-12>PM"`.
const DELIVERY_TEMPLATE: &str = r"^(Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday) ([1-9]|1[0-2])AM - ([1-9]|1[0-2])PM$";

fn delivery_template() -> &'static Regex {
    static TEMPLATE: OnceLock<Regex> = OnceLock::new();
    TEMPLATE.get_or_init(|| Regex::new(DELIVERY_TEMPLATE).expect("regex is valid"))
}

// ── Recipe ────────────────────────────────────────────────────────────────────

/// A recipe identified by its full display name.
///
/// The name is also split on single spaces into tokens, which are only used
/// for case-insensitive word matching against a filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Recipe {
    full_name: String,
    names: Vec<String>,
}

impl Recipe {
    /// Build a recipe from raw text, stripping any wrapping `"` characters.
    ///
    /// An empty input yields a single empty token.
    pub fn new(raw: &str) -> Self {
        let full_name = raw.trim_matches('"').to_string();
        let names = full_name.split(' ').map(str::to_string).collect();
        Self { full_name, names }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Space-separated tokens of the full name.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// `true` when at least one token equals one of `words`, ignoring case.
    ///
    /// Tokens must match whole; `"Steak"` does not match `"Steaks"`.
    pub fn contains_one_of<S: AsRef<str>>(&self, words: &[S]) -> bool {
        words.iter().any(|word| {
            let word = word.as_ref().to_lowercase();
            self.names.iter().any(|name| name.to_lowercase() == word)
        })
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

impl<'de> Deserialize<'de> for Recipe {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Recipe::new(&raw))
    }
}

// ── TimeRange ─────────────────────────────────────────────────────────────────

/// An opening hour on the AM side and a closing hour on the PM side.
///
/// Hours are raw 1–12 clock numbers and are never converted to 24-hour time,
/// so comparisons between ranges are purely numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimeRange {
    pub am: u32,
    pub pm: u32,
}

impl TimeRange {
    pub fn new(am: u32, pm: u32) -> Self {
        Self { am, pm }
    }

    /// `true` when this window is nested in `other` on both bounds.
    pub fn is_in(&self, other: &TimeRange) -> bool {
        self.am >= other.am && self.pm <= other.pm
    }

    /// The opening bound rendered as `"<am>AM"`.
    pub fn from_label(&self) -> String {
        format!("{}AM", self.am)
    }

    /// The closing bound rendered as `"<pm>PM"`.
    pub fn to_label(&self) -> String {
        format!("{}PM", self.pm)
    }
}

// ── DeliveryPeriod ────────────────────────────────────────────────────────────

/// A weekday plus the hour window a delivery happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryPeriod {
    pub weekday: Weekday,
    pub range: TimeRange,
}

impl FromStr for DeliveryPeriod {
    type Err = StatsError;

    /// Parse `"<Weekday> <1-12>AM - <1-12>PM"`, e.g. `"Wednesday 9AM - 10PM"`.
    fn from_str(s: &str) -> Result<Self> {
        let caps = delivery_template()
            .captures(s)
            .ok_or_else(|| StatsError::DeliveryFormat(s.to_string()))?;

        let weekday = caps[1]
            .parse::<Weekday>()
            .map_err(|_| StatsError::DeliveryFormat(s.to_string()))?;
        let am = parse_hour(&caps[2])?;
        let pm = parse_hour(&caps[3])?;

        Ok(Self {
            weekday,
            range: TimeRange { am, pm },
        })
    }
}

impl fmt::Display for DeliveryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}AM - {}PM",
            weekday_name(self.weekday),
            self.range.am,
            self.range.pm
        )
    }
}

impl<'de> Deserialize<'de> for DeliveryPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

fn parse_hour(value: &str) -> Result<u32> {
    value.parse::<u32>().map_err(|source| StatsError::HourParse {
        value: value.to_string(),
        source,
    })
}

/// Full English name; chrono's own `Display` only gives the short form.
fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// ── Record ────────────────────────────────────────────────────────────────────

/// A single delivery event read from the input array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    /// Opaque postcode string.
    pub postcode: String,
    pub recipe: Recipe,
    pub delivery: DeliveryPeriod,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
