use crate::config::InputConfig;
use crate::error::{DataLoadError, SelectionError};
use crate::types::EmissionRecord;
use csv::ReaderBuilder;
use std::fs::File;

/// All cleaned records plus the derived views the UI is built from.
/// Built exactly once at startup and never modified afterward, so it can be
/// shared across server sessions without locking.
#[derive(Debug)]
pub struct DataStore {
    /// Source order; not semantically significant.
    pub records: Vec<EmissionRecord>,
    /// Distinct country names, lexicographically sorted.
    pub countries: Vec<String>,
    /// Distinct years, ascending.
    pub years: Vec<i32>,
    pub latest_year: i32,
}

impl DataStore {
    /// Loads and cleans the source CSV. Any structural problem (missing file,
    /// missing column, non-numeric year on a retained row, zero surviving
    /// rows) is fatal; unparsable emission values are treated as missing and
    /// dropped silently, which is a data-quality policy rather than an error.
    pub fn load(input: &InputConfig) -> Result<Self, DataLoadError> {
        println!("Loading emissions data from {:?}...", input.data_csv);

        let file = File::open(&input.data_csv).map_err(|source| DataLoadError::Open {
            path: input.data_csv.clone(),
            source,
        })?;
        let mut rdr = ReaderBuilder::new().from_reader(file);
        let headers = rdr.headers()?.clone();

        let country_idx = find_column(&headers, &input.country_column)?;
        let code_idx = find_column(&headers, &input.code_column)?;
        let year_idx = find_column(&headers, &input.year_column)?;
        let emissions_idx = find_column(&headers, &input.emissions_column)?;

        let mut records = Vec::new();
        let mut dropped = 0usize;

        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            // Data rows start at line 2, after the header.
            let row = i + 2;

            let code = record.get(code_idx).unwrap_or("").trim();
            let raw_emissions = record.get(emissions_idx).unwrap_or("").trim();
            // Rows without a territory code cannot be mapped; rows without an
            // emissions value have nothing to plot.
            if code.is_empty() || raw_emissions.is_empty() {
                dropped += 1;
                continue;
            }

            let country = record.get(country_idx).unwrap_or("").trim();
            if country.is_empty() {
                dropped += 1;
                continue;
            }

            let raw_year = record.get(year_idx).unwrap_or("").trim();
            let year: i32 = raw_year.parse().map_err(|_| DataLoadError::BadYear {
                row,
                country: country.to_string(),
                value: raw_year.to_string(),
            })?;

            let co2_tonnes: f64 = match raw_emissions.parse() {
                Ok(v) if f64::is_finite(v) => v,
                _ => {
                    dropped += 1;
                    continue;
                }
            };
            let co2_million = co2_tonnes / 1_000_000.0;

            if year < input.min_year {
                dropped += 1;
                continue;
            }

            records.push(EmissionRecord {
                country: country.to_string(),
                code: code.to_string(),
                year,
                co2_tonnes,
                co2_million,
            });
        }

        if records.is_empty() {
            return Err(DataLoadError::Empty);
        }

        let mut countries: Vec<String> = records.iter().map(|r| r.country.clone()).collect();
        countries.sort();
        countries.dedup();

        let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        let latest_year = *years.last().unwrap_or(&input.min_year);

        println!(
            "Loaded {} records across {} countries, {}-{} ({} rows dropped during cleaning)",
            records.len(),
            countries.len(),
            years.first().unwrap_or(&latest_year),
            latest_year,
            dropped
        );

        Ok(DataStore {
            records,
            countries,
            years,
            latest_year,
        })
    }

    /// Checks a UI-supplied year against the known domain. Callers fall back
    /// to `latest_year` on error rather than surfacing it.
    pub fn resolve_year(&self, requested: Option<i32>) -> Result<i32, SelectionError> {
        match requested {
            None => Ok(self.latest_year),
            Some(y) if self.years.binary_search(&y).is_ok() => Ok(y),
            Some(y) => Err(SelectionError::UnknownYear(y)),
        }
    }

    pub fn contains_country(&self, name: &str) -> bool {
        self.countries.binary_search_by(|c| c.as_str().cmp(name)).is_ok()
    }
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, DataLoadError> {
    // Exact match first, then whitespace-trimmed: OWID headers carry stray
    // spaces ("Annual CO₂ emissions (tonnes )") that exports don't always keep.
    headers
        .iter()
        .position(|h| h == name)
        .or_else(|| headers.iter().position(|h| h.trim() == name.trim()))
        .ok_or_else(|| DataLoadError::MissingColumn(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn test_input(csv_body: &str) -> (tempfile::TempDir, InputConfig) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("co2.csv");
        let mut f = File::create(&path).expect("create csv");
        f.write_all(csv_body.as_bytes()).expect("write csv");
        let input = InputConfig {
            data_csv: path,
            country_column: "Entity".to_string(),
            code_column: "Code".to_string(),
            year_column: "Year".to_string(),
            emissions_column: "Annual CO₂ emissions (tonnes )".to_string(),
            min_year: 1950,
        };
        (dir, input)
    }

    #[test]
    fn cleaning_pipeline_drops_and_converts() {
        let (_dir, input) = test_input(
            "Entity,Code,Year,Annual CO₂ emissions (tonnes )\n\
             USA,USA,2000,5000000000\n\
             World,OWID_WRL,2000,20000000000\n\
             Nowhere,,2000,100\n",
        );
        let store = DataStore::load(&input).expect("load");

        // The row without a code is dropped; the others survive.
        assert_eq!(store.records.len(), 2);
        assert!(!store.countries.contains(&"Nowhere".to_string()));

        let usa = store
            .records
            .iter()
            .find(|r| r.country == "USA")
            .expect("USA record");
        assert_eq!(usa.co2_million, 5000.0);

        let world = store
            .records
            .iter()
            .find(|r| r.country == "World")
            .expect("World record");
        assert_eq!(world.co2_million, 20000.0);
    }

    #[test]
    fn trims_country_and_filters_old_years() {
        let (_dir, input) = test_input(
            "Entity,Code,Year,Annual CO₂ emissions (tonnes )\n\
             \x20 Ireland ,IRL,1949,1000000\n\
             \x20 Ireland ,IRL,1990,2000000\n",
        );
        let store = DataStore::load(&input).expect("load");

        assert_eq!(store.records.len(), 1);
        assert_eq!(store.records[0].country, "Ireland");
        assert_eq!(store.records[0].year, 1990);
        assert_eq!(store.years, vec![1990]);
        assert_eq!(store.latest_year, 1990);
    }

    #[test]
    fn unparsable_emissions_are_silent_drops() {
        let (_dir, input) = test_input(
            "Entity,Code,Year,Annual CO₂ emissions (tonnes )\n\
             France,FRA,2000,not-a-number\n\
             France,FRA,2001,1000000\n",
        );
        let store = DataStore::load(&input).expect("load");
        assert_eq!(store.records.len(), 1);
        assert_eq!(store.records[0].year, 2001);
    }

    #[test]
    fn non_numeric_year_is_fatal() {
        let (_dir, input) = test_input(
            "Entity,Code,Year,Annual CO₂ emissions (tonnes )\n\
             France,FRA,two-thousand,1000000\n",
        );
        match DataStore::load(&input) {
            Err(DataLoadError::BadYear { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected BadYear, got {:?}", other),
        }
    }

    #[test]
    fn missing_column_is_fatal() {
        let (_dir, input) = test_input("Entity,Code,Year\nFrance,FRA,2000\n");
        match DataStore::load(&input) {
            Err(DataLoadError::MissingColumn(col)) => {
                assert_eq!(col, "Annual CO₂ emissions (tonnes )")
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn header_lookup_tolerates_trailing_whitespace() {
        // Header carries extra trailing whitespace the config does not.
        let (_dir, input) = test_input(
            "Entity,Code,Year,Annual CO₂ emissions (tonnes )  \n\
             France,FRA,2000,1000000\n",
        );
        let store = DataStore::load(&input).expect("load");
        assert_eq!(store.records.len(), 1);
    }

    #[test]
    fn empty_result_is_fatal() {
        let (_dir, input) = test_input(
            "Entity,Code,Year,Annual CO₂ emissions (tonnes )\n\
             France,FRA,1800,1000000\n",
        );
        assert!(matches!(DataStore::load(&input), Err(DataLoadError::Empty)));
    }

    #[test]
    fn resolve_year_falls_back_through_caller() {
        let (_dir, input) = test_input(
            "Entity,Code,Year,Annual CO₂ emissions (tonnes )\n\
             France,FRA,2000,1000000\n\
             France,FRA,2005,2000000\n",
        );
        let store = DataStore::load(&input).expect("load");
        assert_eq!(store.resolve_year(None), Ok(2005));
        assert_eq!(store.resolve_year(Some(2000)), Ok(2000));
        assert_eq!(
            store.resolve_year(Some(1999)),
            Err(SelectionError::UnknownYear(1999))
        );
    }
}
