//! Single-pass aggregation of delivery records into a [`Report`].

use std::collections::{HashMap, HashSet};
use std::io::Read;

use stats_core::error::Result;
use stats_core::models::{Record, TimeRange};
use stats_core::report::{PostcodeCount, PostcodeDeliveries, RecipeCount, Report};
use stats_core::settings::SearchFilter;

use crate::reader::for_each_record;

// ── ReportAggregator ──────────────────────────────────────────────────────────

/// Running statistics over one stream of delivery records.
///
/// Each record is folded in exactly once via [`ingest`](Self::ingest); the
/// report is compiled from the running state once the stream is exhausted.
/// Memory grows with the number of *distinct* postcodes and recipes, not with
/// the number of records.
///
/// An instance serves a single stream. After a failed
/// [`ingest_reader`](Self::ingest_reader) the state is incomplete and must be
/// discarded; [`ReportAggregator::run`] enforces that by construction.
#[derive(Debug)]
pub struct ReportAggregator {
    postcode: String,
    window: TimeRange,
    recipe_names: Vec<String>,

    unique_recipe: HashMap<String, u64>,
    postcode_deliveries: HashMap<String, u64>,
    search_postcode: u64,
    busiest_postcode: PostcodeCount,
    found_recipes: HashSet<String>,
}

impl ReportAggregator {
    pub fn new(filter: SearchFilter) -> Self {
        Self {
            window: filter.range(),
            postcode: filter.postcode,
            recipe_names: filter.recipe_names,
            unique_recipe: HashMap::new(),
            postcode_deliveries: HashMap::new(),
            search_postcode: 0,
            busiest_postcode: PostcodeCount::default(),
            found_recipes: HashSet::new(),
        }
    }

    /// Ingest the whole of `reader` and compile the report.
    ///
    /// Returns the report with the number of records ingested. Any decode
    /// error discards the work done so far.
    pub fn run<R: Read>(filter: SearchFilter, reader: R) -> Result<(Report, u64)> {
        let mut aggregator = Self::new(filter);
        let records = aggregator.ingest_reader(reader)?;
        Ok((aggregator.report(), records))
    }

    /// Fold a single record into the running statistics.
    pub fn ingest(&mut self, record: &Record) {
        let recipe = record.recipe.full_name();

        increment(&mut self.unique_recipe, recipe);

        if record.postcode == self.postcode && record.delivery.range.is_in(&self.window) {
            self.search_postcode += 1;
        }

        let total = increment(&mut self.postcode_deliveries, &record.postcode);
        if self.busiest_postcode.count == 0 {
            self.busiest_postcode = PostcodeCount {
                postcode: record.postcode.clone(),
                count: 1,
            };
        } else if total > self.busiest_postcode.count {
            // Strictly greater: on a tie the postcode that got there first keeps it.
            self.busiest_postcode = PostcodeCount {
                postcode: record.postcode.clone(),
                count: total,
            };
        }

        if !self.found_recipes.contains(recipe) && record.recipe.contains_one_of(&self.recipe_names) {
            self.found_recipes.insert(recipe.to_string());
        }
    }

    /// Decode a JSON array of records from `reader` and ingest each one.
    ///
    /// Returns the number of records ingested.
    pub fn ingest_reader<R: Read>(&mut self, reader: R) -> Result<u64> {
        for_each_record(reader, |record| self.ingest(&record))
    }

    /// Compile the report from the current state.
    ///
    /// Only meaningful once the input has been fully ingested.
    pub fn report(&self) -> Report {
        Report {
            unique_recipe_count: self.unique_count(),
            count_per_recipe: self.count_per_recipe(),
            busiest_code: self.busiest_postcode.clone(),
            count_per_postcode_and_time: PostcodeDeliveries {
                postcode: self.postcode.clone(),
                from: self.window.from_label(),
                to: self.window.to_label(),
                delivery_count: self.search_postcode,
            },
            match_by_name: self.found_recipes(),
        }
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Recipes seen exactly once.
    fn unique_count(&self) -> u64 {
        self.unique_recipe.values().filter(|&&n| n == 1).count() as u64
    }

    fn count_per_recipe(&self) -> Vec<RecipeCount> {
        let mut recipes: Vec<RecipeCount> = self
            .unique_recipe
            .iter()
            .map(|(recipe, &count)| RecipeCount {
                recipe: recipe.clone(),
                count,
            })
            .collect();
        recipes.sort_unstable_by(|a, b| a.recipe.cmp(&b.recipe));
        recipes
    }

    fn found_recipes(&self) -> Vec<String> {
        let mut recipes: Vec<String> = self.found_recipes.iter().cloned().collect();
        recipes.sort_unstable();
        recipes
    }
}

/// Add one to `map[key]` and return the new total.
///
/// Only allocates the key the first time it is seen.
fn increment(map: &mut HashMap<String, u64>, key: &str) -> u64 {
    if let Some(count) = map.get_mut(key) {
        *count += 1;
        return *count;
    }
    map.insert(key.to_string(), 1);
    1
}

// ── Tests ─────────────────────────────────────────────────────────────────────
