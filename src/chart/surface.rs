//! Curve history -> 3-D surface figure.

use chrono::NaiveDate;

use crate::chart::figure::{
    Axis, Camera, Colorscale, Coord3, Figure, Layout, Margin, Scene, Trace,
};
use crate::domain::{ChartStyle, SurfaceGeometry, YieldObservation};

/// Reshapes the flat observation table into surface axes for one country.
///
/// Stateless apart from styling; `reshape` + `figure` are pure functions of
/// their inputs.
#[derive(Debug, Clone, Default)]
pub struct CurveReshaper {
    style: ChartStyle,
}

impl CurveReshaper {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    /// Build the surface geometry for `country`.
    ///
    /// Terms and dates keep their first-seen order from the table. A country
    /// absent from the table yields an empty geometry (the chart renders
    /// nothing); that is not an error.
    pub fn reshape(&self, observations: &[YieldObservation], country: &str) -> SurfaceGeometry {
        let rows: Vec<&YieldObservation> = observations
            .iter()
            .filter(|o| o.country == country)
            .collect();

        let mut terms: Vec<f64> = Vec::new();
        let mut dates: Vec<NaiveDate> = Vec::new();
        for o in &rows {
            if !terms.contains(&o.term) {
                terms.push(o.term);
            }
            if !dates.contains(&o.date) {
                dates.push(o.date);
            }
        }

        // One z-row per date, one cell per term. Missing combinations become
        // NaN, which serializes as null and leaves a hole in the surface.
        let rates: Vec<Vec<f64>> = dates
            .iter()
            .map(|&date| {
                terms
                    .iter()
                    .map(|&term| {
                        rows.iter()
                            .find(|o| o.date == date && o.term == term)
                            .map(|o| o.spot_rate)
                            .unwrap_or(f64::NAN)
                    })
                    .collect()
            })
            .collect();

        let date_labels = dates.iter().map(|d| d.format("%b %Y").to_string()).collect();

        SurfaceGeometry {
            country: country.to_string(),
            terms,
            date_labels,
            rates,
        }
    }

    /// Wrap a geometry in the surface figure record.
    pub fn figure(&self, geometry: &SurfaceGeometry) -> Figure {
        let scale = Colorscale::Stops(vec![
            (0.0, self.style.palette.blue.clone()),
            (1.0, self.style.palette.intense_blue.clone()),
        ]);

        Figure {
            data: vec![Trace::Surface {
                x: geometry.terms.clone(),
                y: geometry.date_labels.clone(),
                z: geometry.rates.clone(),
                colorscale: scale,
                name: "y".to_string(),
                showscale: false,
            }],
            layout: Layout {
                autosize: Some(false),
                dragmode: Some("turntable".to_string()),
                margin: Margin { l: 10, r: 10, b: 10, t: 0 },
                scene: Some(Scene {
                    camera: Camera {
                        center: Coord3 { x: 0.0, y: 0.0, z: -0.2 },
                        eye: Coord3 { x: -1.35, y: -1.4, z: 0.2 },
                    },
                    xaxis: Axis {
                        title: "Term".to_string(),
                        tickformat: None,
                    },
                    yaxis: Axis {
                        title: String::new(),
                        tickformat: None,
                    },
                    zaxis: Axis {
                        title: "Yield".to_string(),
                        tickformat: Some(".2%".to_string()),
                    },
                }),
                geo: None,
                showlegend: Some(false),
            },
        }
    }

    /// Convenience: reshape and build the figure in one call.
    pub fn build(&self, observations: &[YieldObservation], country: &str) -> Figure {
        self.figure(&self.reshape(observations, country))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obs(date: (i32, u32, u32), term: f64, country: &str, spot_rate: f64) -> YieldObservation {
        YieldObservation {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            term,
            country: country.to_string(),
            spot_rate,
        }
    }

    fn uk_history() -> Vec<YieldObservation> {
        vec![
            obs((2018, 11, 30), 1.0, "United Kingdom", 0.0075),
            obs((2018, 11, 30), 5.0, "United Kingdom", 0.0102),
            obs((2018, 11, 30), 10.0, "United Kingdom", 0.0139),
            obs((2019, 2, 28), 1.0, "United Kingdom", 0.0071),
            obs((2019, 2, 28), 5.0, "United Kingdom", 0.0095),
            obs((2019, 2, 28), 10.0, "United Kingdom", 0.0130),
            // Another country, must be filtered out.
            obs((2019, 2, 28), 1.0, "France", 0.0089),
        ]
    }

    #[test]
    fn grid_is_dates_by_terms() {
        let reshaper = CurveReshaper::default();
        let geometry = reshaper.reshape(&uk_history(), "United Kingdom");

        assert_eq!(geometry.terms, vec![1.0, 5.0, 10.0]);
        assert_eq!(geometry.date_labels, vec!["Nov 2018", "Feb 2019"]);
        assert_eq!(geometry.rates.len(), 2);
        assert!(geometry.rates.iter().all(|row| row.len() == 3));
        assert_eq!(geometry.rates[0], vec![0.0075, 0.0102, 0.0139]);
        assert_eq!(geometry.rates[1], vec![0.0071, 0.0095, 0.0130]);
    }

    #[test]
    fn unknown_country_yields_empty_geometry() {
        let reshaper = CurveReshaper::default();
        let geometry = reshaper.reshape(&uk_history(), "Atlantis");

        assert!(geometry.is_empty());
        assert!(geometry.terms.is_empty());
        assert!(geometry.rates.is_empty());

        // An empty geometry still produces a schema-valid figure.
        let value = serde_json::to_value(reshaper.figure(&geometry)).unwrap();
        assert_eq!(value["data"][0]["z"], json!([]));
    }

    #[test]
    fn missing_combination_becomes_nan_cell() {
        let mut observations = uk_history();
        // Drop the 5y point for Feb 2019.
        observations.retain(|o| {
            !(o.date == NaiveDate::from_ymd_opt(2019, 2, 28).unwrap() && o.term == 5.0)
        });

        let geometry = CurveReshaper::default().reshape(&observations, "United Kingdom");
        assert_eq!(geometry.rates[1].len(), 3);
        assert!(geometry.rates[1][1].is_nan());
    }

    #[test]
    fn reshape_is_idempotent() {
        let reshaper = CurveReshaper::default();
        let observations = uk_history();
        let a = reshaper.reshape(&observations, "United Kingdom");
        let b = reshaper.reshape(&observations, "United Kingdom");
        assert_eq!(a, b);
        assert_eq!(reshaper.figure(&a), reshaper.figure(&b));
    }

    #[test]
    fn figure_matches_plotly_schema() {
        let reshaper = CurveReshaper::default();
        let observations = vec![
            obs((2019, 2, 28), 1.0, "United Kingdom", 0.0071),
            obs((2019, 2, 28), 5.0, "United Kingdom", 0.0095),
        ];
        let value = serde_json::to_value(reshaper.build(&observations, "United Kingdom")).unwrap();

        assert_eq!(
            value,
            json!({
                "data": [{
                    "type": "surface",
                    "x": [1.0, 5.0],
                    "y": ["Feb 2019"],
                    "z": [[0.0071, 0.0095]],
                    "colorscale": [[0.0, "#0b578e"], [1.0, "#119dff"]],
                    "name": "y",
                    "showscale": false
                }],
                "layout": {
                    "autosize": false,
                    "dragmode": "turntable",
                    "margin": { "l": 10, "r": 10, "b": 10, "t": 0 },
                    "scene": {
                        "camera": {
                            "center": { "x": 0.0, "y": 0.0, "z": -0.2 },
                            "eye": { "x": -1.35, "y": -1.4, "z": 0.2 }
                        },
                        "xaxis": { "title": "Term" },
                        "yaxis": { "title": "" },
                        "zaxis": { "title": "Yield", "tickformat": ".2%" }
                    },
                    "showlegend": false
                }
            })
        );
    }
}
