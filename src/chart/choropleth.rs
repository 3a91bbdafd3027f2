//! (date, term) cross-section -> choropleth map figure.

use chrono::NaiveDate;

use crate::chart::figure::{
    ColorBar, Colorscale, Figure, Geo, Layout, Margin, Marker, MarkerLine, Trace,
};
use crate::domain::{ChartStyle, MapEntry, MapSnapshot, YieldObservation};

/// Selects one `(date, term)` cross-section and projects it per country.
#[derive(Debug, Clone, Default)]
pub struct SnapshotFilter {
    style: ChartStyle,
}

impl SnapshotFilter {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    /// Build the per-country snapshot for an exact `(date, term)` match.
    ///
    /// Rates are carried over bit-for-bit from the source observations. A pair
    /// absent from the table yields an empty snapshot (the map renders with no
    /// shaded regions); that is not an error. Duplicate countries in the
    /// filtered rows resolve last-seen-wins, keeping the first-seen position.
    pub fn snapshot(
        &self,
        observations: &[YieldObservation],
        date: NaiveDate,
        term: f64,
    ) -> MapSnapshot {
        let mut entries: Vec<MapEntry> = Vec::new();

        for o in observations
            .iter()
            .filter(|o| o.date == date && o.term == term)
        {
            let entry = MapEntry::new(o.country.clone(), o.spot_rate);
            match entries.iter_mut().find(|e| e.country == o.country) {
                Some(existing) => *existing = entry,
                None => entries.push(entry),
            }
        }

        MapSnapshot { date, term, entries }
    }

    /// Wrap a snapshot in the choropleth figure record.
    pub fn figure(&self, snapshot: &MapSnapshot) -> Figure {
        Figure {
            data: vec![Trace::Choropleth {
                colorscale: Colorscale::Named(self.style.map_colorscale.clone()),
                locations: snapshot.entries.iter().map(|e| e.country.clone()).collect(),
                z: snapshot.entries.iter().map(|e| e.spot_rate).collect(),
                text: snapshot.entries.iter().map(|e| e.label.clone()).collect(),
                hoverinfo: "text".to_string(),
                locationmode: "country names".to_string(),
                marker: Marker {
                    line: MarkerLine {
                        color: "white".to_string(),
                        width: 2,
                    },
                },
                colorbar: ColorBar {
                    tickformat: ".2%".to_string(),
                },
            }],
            layout: Layout {
                margin: Margin { l: 10, r: 10, b: 0, t: 0 },
                geo: Some(Geo {
                    scope: self.style.map_scope,
                }),
                ..Layout::default()
            },
        }
    }

    /// Convenience: filter and build the figure in one call.
    pub fn build(&self, observations: &[YieldObservation], date: NaiveDate, term: f64) -> Figure {
        self.figure(&self.snapshot(observations, date, term))
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

    fn feb_2019() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 2, 28).unwrap()
    }

    #[test]
    fn snapshot_keeps_matching_countries_and_rates() {
        let observations = vec![
            obs((2019, 2, 28), 1.0, "UK", 0.0071),
            obs((2019, 2, 28), 1.0, "France", 0.0089),
            // Wrong term and wrong date, both excluded.
            obs((2019, 2, 28), 5.0, "UK", 0.0095),
            obs((2019, 1, 31), 1.0, "Germany", 0.0042),
        ];

        let snapshot = SnapshotFilter::default().snapshot(&observations, feb_2019(), 1.0);

        assert_eq!(snapshot.entries.len(), 2);
        assert_eq!(snapshot.entries[0].country, "UK");
        assert_eq!(snapshot.entries[0].spot_rate, 0.0071);
        assert_eq!(snapshot.entries[0].label, "0.71%<br>UK");
        assert_eq!(snapshot.entries[1].country, "France");
        assert_eq!(snapshot.entries[1].spot_rate, 0.0089);
        assert_eq!(snapshot.entries[1].label, "0.89%<br>France");
    }

    #[test]
    fn absent_date_yields_empty_snapshot() {
        let observations = vec![obs((2019, 2, 28), 1.0, "UK", 0.0071)];
        let filter = SnapshotFilter::default();

        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let snapshot = filter.snapshot(&observations, date, 1.0);
        assert!(snapshot.is_empty());

        // Still a schema-valid figure, just with nothing to shade.
        let value = serde_json::to_value(filter.figure(&snapshot)).unwrap();
        assert_eq!(value["data"][0]["locations"], json!([]));
        assert_eq!(value["data"][0]["z"], json!([]));
    }

    #[test]
    fn duplicate_country_resolves_last_seen_in_place() {
        let observations = vec![
            obs((2019, 2, 28), 1.0, "UK", 0.0071),
            obs((2019, 2, 28), 1.0, "France", 0.0089),
            obs((2019, 2, 28), 1.0, "UK", 0.0080),
        ];

        let snapshot = SnapshotFilter::default().snapshot(&observations, feb_2019(), 1.0);

        assert_eq!(snapshot.entries.len(), 2);
        assert_eq!(snapshot.entries[0].country, "UK");
        assert_eq!(snapshot.entries[0].spot_rate, 0.0080);
        assert_eq!(snapshot.entries[1].country, "France");
    }

    #[test]
    fn snapshot_is_idempotent() {
        let observations = vec![
            obs((2019, 2, 28), 1.0, "UK", 0.0071),
            obs((2019, 2, 28), 1.0, "France", 0.0089),
        ];
        let filter = SnapshotFilter::default();
        let a = filter.snapshot(&observations, feb_2019(), 1.0);
        let b = filter.snapshot(&observations, feb_2019(), 1.0);
        assert_eq!(a, b);
        assert_eq!(filter.figure(&a), filter.figure(&b));
    }

    #[test]
    fn figure_matches_plotly_schema() {
        let observations = vec![
            obs((2019, 2, 28), 1.0, "UK", 0.0071),
            obs((2019, 2, 28), 1.0, "France", 0.0089),
        ];
        let value =
            serde_json::to_value(SnapshotFilter::default().build(&observations, feb_2019(), 1.0))
                .unwrap();

        assert_eq!(
            value,
            json!({
                "data": [{
                    "type": "choropleth",
                    "colorscale": "Viridis",
                    "locations": ["UK", "France"],
                    "z": [0.0071, 0.0089],
                    "text": ["0.71%<br>UK", "0.89%<br>France"],
                    "hoverinfo": "text",
                    "locationmode": "country names",
                    "marker": { "line": { "color": "white", "width": 2 } },
                    "colorbar": { "tickformat": ".2%" }
                }],
                "layout": {
                    "margin": { "l": 10, "r": 10, "b": 0, "t": 0 },
                    "geo": { "scope": "europe" }
                }
            })
        );
    }
}
