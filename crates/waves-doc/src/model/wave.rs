//! Waves: the top-level editable unit.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::model::{IncidentEntry, ShipEntry};
use crate::util::num;

/// Wire spelling of [`WaveDuration::Unbounded`].
pub const UNBOUNDED_DURATION: &str = "Infinity";

/// Where a wave's ships appear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpawnDistribution {
    /// At [`Wave::at_coords`].
    At,
    Random,
    Outer,
    Inner,
    #[default]
    AroundPlayer,
    AroundPlayerNear,
    Center,
}

/// How long a wave runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaveDuration {
    Seconds(f64),
    /// Runs until cleared; persisted as the string `"Infinity"`.
    Unbounded,
}

impl Serialize for WaveDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            WaveDuration::Seconds(secs) => num::serialize(secs, serializer),
            WaveDuration::Unbounded => serializer.serialize_str(UNBOUNDED_DURATION),
        }
    }
}

struct WaveDurationVisitor;

impl Visitor<'_> for WaveDurationVisitor {
    type Value = WaveDuration;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a number of seconds or \"{UNBOUNDED_DURATION}\"")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<WaveDuration, E> {
        Ok(WaveDuration::Seconds(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<WaveDuration, E> {
        Ok(WaveDuration::Seconds(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<WaveDuration, E> {
        Ok(WaveDuration::Seconds(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<WaveDuration, E> {
        if v == UNBOUNDED_DURATION {
            Ok(WaveDuration::Unbounded)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for WaveDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WaveDurationVisitor)
    }
}

/// Spawn point for [`SpawnDistribution::At`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtCoords {
    #[serde(serialize_with = "num::serialize")]
    pub x: f64,
    #[serde(serialize_with = "num::serialize")]
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "num::serialize_opt")]
    pub spread_radius: Option<f64>,
}

/// A wave in canonical form: every defaulted field is present.
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    pub mods: Vec<String>,
    pub ships: Vec<ShipEntry>,
    /// `None` until the first incident is added.
    pub incidents: Option<Vec<IncidentEntry>>,
    pub formations: Option<Value>,
    pub music: Option<Value>,
    pub lighting_settings: Option<Value>,
    /// `None` defers to the runtime's default duration.
    pub duration: Option<WaveDuration>,
    pub spawn_distribution: SpawnDistribution,
    pub at_coords: Option<AtCoords>,
    pub is_boss: Option<bool>,
    pub sustain_mode: bool,
    /// Seconds before the first spawn.
    pub spawn_delay: Option<f64>,
}

impl Default for Wave {
    fn default() -> Self {
        Self {
            mods: Vec::new(),
            ships: Vec::new(),
            incidents: None,
            formations: None,
            music: None,
            lighting_settings: None,
            duration: None,
            spawn_distribution: SpawnDistribution::default(),
            at_coords: None,
            is_boss: None,
            sustain_mode: true,
            spawn_delay: None,
        }
    }
}

impl Wave {
    /// Incidents as a slice; empty when the list was never created.
    pub fn incidents(&self) -> &[IncidentEntry] {
        self.incidents.as_deref().unwrap_or_default()
    }
}

/// A wave as persisted: defaulted fields may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mods: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ships: Option<Vec<ShipEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incidents: Option<Vec<IncidentEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formations: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting_settings: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<WaveDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn_distribution: Option<SpawnDistribution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_coords: Option<AtCoords>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_boss: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustain_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "num::serialize_opt")]
    pub spawn_delay: Option<f64>,
}

/// Partial update for a [`Wave`]; `None` leaves a field as it is.
///
/// Nested `Option`s distinguish "leave" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WavePatch {
    pub mods: Option<Vec<String>>,
    pub ships: Option<Vec<ShipEntry>>,
    pub incidents: Option<Option<Vec<IncidentEntry>>>,
    pub formations: Option<Option<Value>>,
    pub music: Option<Option<Value>>,
    pub lighting_settings: Option<Option<Value>>,
    pub duration: Option<Option<WaveDuration>>,
    pub spawn_distribution: Option<SpawnDistribution>,
    pub at_coords: Option<Option<AtCoords>>,
    pub is_boss: Option<Option<bool>>,
    pub sustain_mode: Option<bool>,
    pub spawn_delay: Option<Option<f64>>,
}

impl WavePatch {
    /// Shallow-merges the set fields into `wave`.
    ///
    /// `at_coords` is kept when switching away from `at`.
    pub fn apply_to(self, wave: &mut Wave) {
        if let Some(v) = self.mods {
            wave.mods = v;
        }
        if let Some(v) = self.ships {
            wave.ships = v;
        }
        if let Some(v) = self.incidents {
            wave.incidents = v;
        }
        if let Some(v) = self.formations {
            wave.formations = v;
        }
        if let Some(v) = self.music {
            wave.music = v;
        }
        if let Some(v) = self.lighting_settings {
            wave.lighting_settings = v;
        }
        if let Some(v) = self.duration {
            wave.duration = v;
        }
        if let Some(v) = self.spawn_distribution {
            wave.spawn_distribution = v;
        }
        if let Some(v) = self.at_coords {
            wave.at_coords = v;
        }
        if let Some(v) = self.is_boss {
            wave.is_boss = v;
        }
        if let Some(v) = self.sustain_mode {
            wave.sustain_mode = v;
        }
        if let Some(v) = self.spawn_delay {
            wave.spawn_delay = v;
        }
    }
}
