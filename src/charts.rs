use crate::config::ChartsConfig;
use crate::data::DataStore;
use crate::filters;
use crate::types::{
    ChannelMap, ChartInstruction, ChartKind, DisplayOptions, SelectorDescriptor, TextPosition,
};
use std::collections::{BTreeMap, HashSet};

const EMISSIONS_LABEL: &str = "CO₂ Emissions (Million tonnes)";

/// Animated choropleth over the full dataset: one frame per year, countries
/// keyed by ISO-3 code and colored by emissions.
pub fn world_map(store: &DataStore) -> ChartInstruction {
    let mut data = store.records.clone();
    // Frame order is draw order for the animation.
    data.sort_by_key(|r| r.year);

    let first = store.years.first().copied().unwrap_or(store.latest_year);
    ChartInstruction {
        kind: ChartKind::Choropleth,
        title: format!(
            "Animated CO₂ Emissions by Country ({}-{})",
            first, store.latest_year
        ),
        channels: ChannelMap {
            locations: Some("code"),
            color: Some("co2_million"),
            animation_frame: Some("year"),
            ..ChannelMap::default()
        },
        options: DisplayOptions {
            color_scale: Some("Reds"),
            labels: BTreeMap::from([("co2_million", EMISSIONS_LABEL)]),
            ..DisplayOptions::default()
        },
        data,
    }
}

/// Top-N bar chart for one year. An unknown or absent year falls back to the
/// latest year in the store rather than failing the request.
pub fn bar_chart(
    store: &DataStore,
    charts: &ChartsConfig,
    requested_year: Option<i32>,
) -> ChartInstruction {
    let year = store.resolve_year(requested_year).unwrap_or_else(|err| {
        tracing::warn!(%err, "falling back to latest year");
        store.latest_year
    });

    let top = filters::top_n_by_emission(filters::by_year(store, year), charts.top_n);
    let data = top.into_iter().cloned().collect();

    ChartInstruction {
        kind: ChartKind::Bar,
        title: format!("Top {} CO₂ Emitters in {}", charts.top_n, year),
        channels: ChannelMap {
            x: Some("country"),
            y: Some("co2_million"),
            ..ChannelMap::default()
        },
        options: DisplayOptions {
            log_y: true,
            text_position: Some(TextPosition::Outside),
            labels: BTreeMap::from([("co2_million", EMISSIONS_LABEL), ("country", "Country")]),
            ..DisplayOptions::default()
        },
        data,
    }
}

/// One dropdown descriptor per requested selector, count clamped to the
/// configured bounds. Defaults cycle through the country list so they stay in
/// range even when the count exceeds the number of countries.
pub fn country_inputs(
    store: &DataStore,
    charts: &ChartsConfig,
    requested: usize,
) -> Vec<SelectorDescriptor> {
    let n = requested.clamp(charts.min_selectors, charts.max_selectors);
    (0..n)
        .map(|i| SelectorDescriptor {
            index: i,
            label: format!("Select Country {}", i + 1),
            default: store.countries[i % store.countries.len()].clone(),
        })
        .collect()
}

/// Multi-country line comparison. An empty selection yields an empty chart,
/// and unknown country names are dropped from the selection, never an error.
pub fn comparison(store: &DataStore, selected: &[String]) -> ChartInstruction {
    let mut known: HashSet<String> = HashSet::new();
    for name in selected {
        if store.contains_country(name) {
            known.insert(name.clone());
        } else {
            tracing::warn!(country = %name, "ignoring unknown country in comparison");
        }
    }

    let data = if known.is_empty() {
        Vec::new()
    } else {
        filters::by_countries(store, &known)
            .into_iter()
            .cloned()
            .collect()
    };

    ChartInstruction {
        kind: ChartKind::Line,
        title: "CO₂ Emissions Comparison".to_string(),
        channels: ChannelMap {
            x: Some("year"),
            y: Some("co2_million"),
            color: Some("country"),
            ..ChannelMap::default()
        },
        options: DisplayOptions {
            labels: BTreeMap::from([("co2_million", EMISSIONS_LABEL), ("year", "Year")]),
            ..DisplayOptions::default()
        },
        data,
    }
}
