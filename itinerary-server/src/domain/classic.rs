//! Payload of the routing backend's shortest-path search.
//!
//! The "classic" search ignores timetables: the backend returns one untimed
//! path grouped by line, with field names as the backend spells them
//! (`chemin`, `Ligne`, `Nom Station`).

use serde::{Deserialize, Serialize};

use super::segment::null_as_default;

/// A station on a shortest-path leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassicStation {
    #[serde(rename = "Nom Station")]
    pub name: String,

    #[serde(rename = "ID", default)]
    pub id: Option<String>,

    /// Every line serving the station.
    #[serde(rename = "Lignes", default, deserialize_with = "null_as_default")]
    pub lines: Vec<String>,

    #[serde(rename = "Position", default)]
    pub position: Option<(f64, f64)>,

    /// "metro", "rer" or "bus".
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
}

impl ClassicStation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            lines: Vec::new(),
            position: None,
            kind: None,
        }
    }
}

/// Consecutive stations ridden on one line.
///
/// A line change repeats the interchange station: it ends one leg and
/// starts the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassicLeg {
    /// `null` when the path is a single station.
    #[serde(rename = "Ligne", default)]
    pub line: Option<String>,

    #[serde(rename = "Stations", default, deserialize_with = "null_as_default")]
    pub stations: Vec<ClassicStation>,

    /// Share of the total duration, in seconds.
    #[serde(rename = "Duration", default, deserialize_with = "null_as_default")]
    pub duration: u32,
}

impl ClassicLeg {
    pub fn new(line: impl Into<String>, stations: &[&str], duration: u32) -> Self {
        Self {
            line: Some(line.into()),
            stations: stations.iter().map(|s| ClassicStation::new(*s)).collect(),
            duration,
        }
    }
}

/// Response of `POST /shortest-path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassicPath {
    #[serde(default, deserialize_with = "null_as_default")]
    pub chemin: Vec<ClassicLeg>,

    /// Total duration in seconds. The backend sends its graph distance,
    /// which may be fractional.
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: f64,

    /// Stations on the path, interchanges counted once.
    #[serde(default, deserialize_with = "null_as_default")]
    pub stations_count: usize,

    /// Grams of CO2.
    #[serde(default, deserialize_with = "null_as_default")]
    pub emissions: f64,
}

impl ClassicPath {
    pub fn new(chemin: Vec<ClassicLeg>) -> Self {
        Self {
            chemin,
            duration: 0.0,
            stations_count: 0,
            emissions: 0.0,
        }
    }

    /// Total duration rounded to whole seconds.
    pub fn duration_secs(&self) -> u32 {
        // `as` saturates, and maps NaN to 0
        self.duration.round() as u32
    }
}
