//! Typed Plotly figure records.
//!
//! The shape of these structs is dictated by the Plotly figure schema: a figure
//! is `{ "data": [trace, ...], "layout": {...} }`, each trace carries a `type`
//! tag, and field names must match Plotly's exactly. Optional layout sections
//! are skipped when unset so the serialized JSON stays minimal.
//!
//! Only the subset of the schema this crate emits is modeled; adding a field is
//! a one-line change next to the others.

use serde::Serialize;

use crate::domain::MapScope;

/// A complete figure: traces plus layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// One trace specification, tagged by chart type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Surface {
        /// Terms (years).
        x: Vec<f64>,
        /// Date labels.
        y: Vec<String>,
        /// Rates, one row per y value. NaN serializes as `null`.
        z: Vec<Vec<f64>>,
        colorscale: Colorscale,
        name: String,
        showscale: bool,
    },
    Choropleth {
        colorscale: Colorscale,
        /// Country names (with `locationmode: "country names"`).
        locations: Vec<String>,
        z: Vec<f64>,
        /// Hover text, one entry per location.
        text: Vec<String>,
        hoverinfo: String,
        locationmode: String,
        marker: Marker,
        colorbar: ColorBar,
    },
}

/// Either a named Plotly colorscale or explicit `[position, color]` stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Colorscale {
    Named(String),
    Stops(Vec<(f64, String)>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autosize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dragmode: Option<String>,
    pub margin: Margin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

/// Figure margins in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
}

/// 3-D scene settings for surface figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub camera: Camera,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub zaxis: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Camera {
    pub center: Coord3,
    pub eye: Coord3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coord3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickformat: Option<String>,
}

/// Base-map settings for choropleth figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geo {
    pub scope: MapScope,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub line: MarkerLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLine {
    pub color: String,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub tickformat: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trace_tag_is_lowercase_type_field() {
        let trace = Trace::Surface {
            x: vec![1.0],
            y: vec!["Feb 2019".to_string()],
            z: vec![vec![0.0071]],
            colorscale: Colorscale::Stops(vec![
                (0.0, "#0b578e".to_string()),
                (1.0, "#119dff".to_string()),
            ]),
            name: "y".to_string(),
            showscale: false,
        };
        let value = serde_json::to_value(&trace).unwrap();
        assert_eq!(value["type"], json!("surface"));
        assert_eq!(value["colorscale"], json!([[0.0, "#0b578e"], [1.0, "#119dff"]]));
    }

    #[test]
    fn nan_cells_serialize_as_null() {
        let trace = Trace::Surface {
            x: vec![1.0, 2.0],
            y: vec!["Feb 2019".to_string()],
            z: vec![vec![0.0071, f64::NAN]],
            colorscale: Colorscale::Named("Viridis".to_string()),
            name: "y".to_string(),
            showscale: false,
        };
        let value = serde_json::to_value(&trace).unwrap();
        assert_eq!(value["z"], json!([[0.0071, null]]));
    }

    #[test]
    fn unset_layout_sections_are_omitted() {
        let layout = Layout {
            margin: Margin { l: 10, r: 10, b: 0, t: 0 },
            ..Layout::default()
        };
        let value = serde_json::to_value(&layout).unwrap();
        assert_eq!(value, json!({ "margin": { "l": 10, "r": 10, "b": 0, "t": 0 } }));
    }
}
