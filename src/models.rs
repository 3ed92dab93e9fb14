//! Data models for the sales analyzer.
//!
//! This module contains the record type loaded from the sales document
//! and the aggregate structures computed from it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Placeholder for missing name, genre and platform strings.
pub const UNKNOWN: &str = "Unknown";

/// Sales region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// North America
    Na,
    /// Europe
    Eu,
    /// Japan
    Jp,
    /// Rest of the world
    Other,
    /// Worldwide total
    Global,
}

impl Region {
    /// All regions, in report order.
    pub const ALL: [Region; 5] = [
        Region::Na,
        Region::Eu,
        Region::Jp,
        Region::Other,
        Region::Global,
    ];

    /// Returns the lowercase key of the region.
    pub fn key(&self) -> &'static str {
        match self {
            Region::Na => "na",
            Region::Eu => "eu",
            Region::Jp => "jp",
            Region::Other => "other",
            Region::Global => "global",
        }
    }

    /// Resolves a user-supplied region key; `otros` is accepted for `other`.
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "na" => Some(Region::Na),
            "eu" => Some(Region::Eu),
            "jp" => Some(Region::Jp),
            "other" | "otros" => Some(Region::Other),
            "global" => Some(Region::Global),
            _ => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key().to_uppercase())
    }
}

/// A record as it appears in the input document; every field may be absent.
///
/// Values of the wrong JSON type count as absent rather than failing the
/// whole document.
#[derive(Debug, Deserialize)]
pub struct RawGameRecord {
    #[serde(default, rename = "nombre", deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, rename = "genero", deserialize_with = "lenient_string")]
    pub genre: Option<String>,
    #[serde(default, rename = "plataforma", deserialize_with = "lenient_string")]
    pub platform: Option<String>,
    #[serde(default, rename = "anio", deserialize_with = "lenient_year")]
    pub year: Option<i64>,
    #[serde(default, rename = "ventas_na", deserialize_with = "lenient_number")]
    pub sales_na: Option<f64>,
    #[serde(default, rename = "ventas_eu", deserialize_with = "lenient_number")]
    pub sales_eu: Option<f64>,
    #[serde(default, rename = "ventas_jp", deserialize_with = "lenient_number")]
    pub sales_jp: Option<f64>,
    #[serde(default, rename = "ventas_otros", deserialize_with = "lenient_number")]
    pub sales_other: Option<f64>,
    #[serde(default, rename = "ventas_global", deserialize_with = "lenient_number")]
    pub sales_global: Option<f64>,
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    })
}

/// Integral floats such as `2006.0` are accepted; fractional years are not.
fn lenient_year<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        _ => None,
    })
}

/// One video-game sales entry, with defaults already applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    pub name: String,
    pub genre: String,
    pub platform: String,
    pub year: i64,
    pub sales_na: f64,
    pub sales_eu: f64,
    pub sales_jp: f64,
    pub sales_other: f64,
    pub sales_global: f64,
}

impl From<RawGameRecord> for GameRecord {
    fn from(raw: RawGameRecord) -> Self {
        Self {
            name: raw.name.unwrap_or_else(|| UNKNOWN.to_string()),
            genre: raw.genre.unwrap_or_else(|| UNKNOWN.to_string()),
            platform: raw.platform.unwrap_or_else(|| UNKNOWN.to_string()),
            year: raw.year.unwrap_or(0),
            sales_na: raw.sales_na.unwrap_or(0.0),
            sales_eu: raw.sales_eu.unwrap_or(0.0),
            sales_jp: raw.sales_jp.unwrap_or(0.0),
            sales_other: raw.sales_other.unwrap_or(0.0),
            sales_global: raw.sales_global.unwrap_or(0.0),
        }
    }
}

impl GameRecord {
    /// Returns the sales figure for a region.
    pub fn sales(&self, region: Region) -> f64 {
        match region {
            Region::Na => self.sales_na,
            Region::Eu => self.sales_eu,
            Region::Jp => self.sales_jp,
            Region::Other => self.sales_other,
            Region::Global => self.sales_global,
        }
    }
}

/// Summed sales per region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RegionTotals {
    pub na: f64,
    pub eu: f64,
    pub jp: f64,
    pub other: f64,
    pub global: f64,
}

impl RegionTotals {
    /// Returns the total for a region.
    pub fn get(&self, region: Region) -> f64 {
        match region {
            Region::Na => self.na,
            Region::Eu => self.eu,
            Region::Jp => self.jp,
            Region::Other => self.other,
            Region::Global => self.global,
        }
    }

    /// Iterates `(region, total)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Region, f64)> + '_ {
        Region::ALL.into_iter().map(move |r| (r, self.get(r)))
    }
}

/// Per-genre accumulator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenreStats {
    pub count: usize,
    pub sales_global: f64,
    pub sales_na: f64,
    pub sales_eu: f64,
    pub sales_jp: f64,
}

impl GenreStats {
    fn add(&mut self, record: &GameRecord) {
        self.count += 1;
        self.sales_global += record.sales_global;
        self.sales_na += record.sales_na;
        self.sales_eu += record.sales_eu;
        self.sales_jp += record.sales_jp;
    }
}

/// Genre statistics keyed by genre, iterated in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct GenreSummary {
    entries: Vec<(String, GenreStats)>,
    index: HashMap<String, usize>,
}

impl GenreSummary {
    /// Adds a record to the group of its genre.
    pub fn add(&mut self, record: &GameRecord) {
        let slot = match self.index.get(&record.genre) {
            Some(&i) => i,
            None => {
                self.entries
                    .push((record.genre.clone(), GenreStats::default()));
                self.index
                    .insert(record.genre.clone(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[slot].1.add(record);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GenreStats)> {
        self.entries.iter().map(|(g, s)| (g.as_str(), s))
    }
}

impl Serialize for GenreSummary {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (genre, stats) in &self.entries {
            map.serialize_entry(genre, stats)?;
        }
        map.end()
    }
}

/// Mean global sales per platform, in first-occurrence order.
pub type PlatformAverage = Vec<(String, f64)>;

/// Earliest and latest year in a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearSpan {
    pub min: i64,
    pub max: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GameRecord {
        serde_json::from_str::<RawGameRecord>(json).unwrap().into()
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let record = parse("{}");
        assert_eq!(record.name, "Unknown");
        assert_eq!(record.genre, "Unknown");
        assert_eq!(record.platform, "Unknown");
        assert_eq!(record.year, 0);
        assert_eq!(record.sales_na, 0.0);
        assert_eq!(record.sales_global, 0.0);
    }

    #[test]
    fn test_null_counts_as_absent() {
        let record = parse(r#"{"nombre": null, "ventas_eu": null, "anio": 1998}"#);
        assert_eq!(record.name, "Unknown");
        assert_eq!(record.sales_eu, 0.0);
        assert_eq!(record.year, 1998);
    }

    #[test]
    fn test_source_field_names() {
        let record = parse(
            r#"{"nombre":"Tetris","genero":"Puzzle","plataforma":"GB","anio":1989,
                "ventas_na":23.2,"ventas_eu":2.26,"ventas_jp":4.22,
                "ventas_otros":0.58,"ventas_global":30.26}"#,
        );
        assert_eq!(record.name, "Tetris");
        assert_eq!(record.genre, "Puzzle");
        assert_eq!(record.platform, "GB");
        assert_eq!(record.sales(Region::Other), 0.58);
        assert_eq!(record.sales(Region::Global), 30.26);
    }

    #[test]
    fn test_integer_sales_are_accepted() {
        let record = parse(r#"{"ventas_global": 10}"#);
        assert_eq!(record.sales_global, 10.0);
    }

    #[test]
    fn test_region_from_key() {
        assert_eq!(Region::from_key("na"), Some(Region::Na));
        assert_eq!(Region::from_key(" Global\n"), Some(Region::Global));
        assert_eq!(Region::from_key("OTHER"), Some(Region::Other));
        assert_eq!(Region::from_key("mars"), None);
        assert_eq!(Region::from_key(""), None);
    }

    #[test]
    fn test_float_year_is_accepted() {
        assert_eq!(parse(r#"{"anio": 2006.0}"#).year, 2006);
        assert_eq!(parse(r#"{"anio": 2006.5}"#).year, 0);
    }

    #[test]
    fn test_wrong_types_count_as_absent() {
        let record = parse(
            r#"{"nombre": 7, "genero": ["Action"], "anio": "2001",
                "ventas_na": "1.5", "ventas_global": true}"#,
        );
        assert_eq!(record.name, "Unknown");
        assert_eq!(record.genre, "Unknown");
        assert_eq!(record.year, 0);
        assert_eq!(record.sales_na, 0.0);
        assert_eq!(record.sales_global, 0.0);
    }

    #[test]
    fn test_region_otros_alias() {
        assert_eq!(Region::from_key("otros"), Some(Region::Other));
        assert_eq!(Region::from_key("OTROS "), Some(Region::Other));
    }

    #[test]
    fn test_region_display_is_uppercase() {
        assert_eq!(Region::Jp.to_string(), "JP");
        assert_eq!(Region::Other.to_string(), "OTHER");
    }

    #[test]
    fn test_genre_summary_keeps_first_occurrence_order() {
        let mut summary = GenreSummary::default();
        for genre in ["Sports", "Action", "Sports", "Puzzle"] {
            summary.add(&GameRecord {
                genre: genre.to_string(),
                ..parse("{}")
            });
        }

        let order: Vec<_> = summary.iter().map(|(g, _)| g).collect();
        assert_eq!(order, vec!["Sports", "Action", "Puzzle"]);
        assert_eq!(summary.iter().next().map(|(_, s)| s.count), Some(2));
    }
}
