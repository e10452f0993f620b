use crate::data::DataStore;
use crate::types::EmissionRecord;
use std::collections::HashSet;

/// The OWID aggregate row. It dwarfs every real country, so the bar chart
/// leaves it out; the map and comparison views keep it.
pub const WORLD_AGGREGATE: &str = "World";

/// All records for one year, excluding the aggregate pseudo-country.
pub fn by_year(store: &DataStore, year: i32) -> Vec<&EmissionRecord> {
    store
        .records
        .iter()
        .filter(|r| r.year == year && r.country != WORLD_AGGREGATE)
        .collect()
}

/// Top `n` records by emissions, descending. Ties are broken ascending by
/// country name so the ordering is deterministic across runs.
pub fn top_n_by_emission<'a>(
    mut records: Vec<&'a EmissionRecord>,
    n: usize,
) -> Vec<&'a EmissionRecord> {
    records.sort_by(|a, b| {
        b.co2_million
            .total_cmp(&a.co2_million)
            .then_with(|| a.country.cmp(&b.country))
    });
    records.truncate(n);
    records
}

/// All records for the given countries, across all years.
pub fn by_countries<'a>(store: &'a DataStore, selected: &HashSet<String>) -> Vec<&'a EmissionRecord> {
    store
        .records
        .iter()
        .filter(|r| selected.contains(&r.country))
        .collect()
}
