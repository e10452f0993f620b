use serde::Serialize;
use std::collections::BTreeMap;

/// One cleaned row of the source data: (country, year) -> emissions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionRecord {
    pub country: String,
    /// ISO-3166 alpha-3 code, used to key choropleth locations.
    pub code: String,
    pub year: i32,
    pub co2_tonnes: f64,
    pub co2_million: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Choropleth,
    Bar,
    Line,
}

/// Field-to-visual-channel mapping. The renderer reads record fields by the
/// names given here; channels left as None are unused by the chart kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChannelMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_frame: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    Outside,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayOptions {
    pub log_y: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_position: Option<TextPosition>,
    /// Display-label overrides keyed by record field name.
    pub labels: BTreeMap<&'static str, &'static str>,
}

/// A declarative render instruction: one tidy record set plus the channel
/// mapping and display options needed to draw it. The core never performs
/// pixel or DOM work; the rendering layer consumes these as-is.
#[derive(Debug, Clone, Serialize)]
pub struct ChartInstruction {
    pub kind: ChartKind,
    pub title: String,
    pub channels: ChannelMap,
    pub options: DisplayOptions,
    /// Row order is significant: frame order for choropleth animation,
    /// bar order for the bar chart.
    pub data: Vec<EmissionRecord>,
}

/// One country dropdown in the comparison section. The option list is the
/// store's country list, served separately to avoid repeating it per selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorDescriptor {
    pub index: usize,
    pub label: String,
    pub default: String,
}
