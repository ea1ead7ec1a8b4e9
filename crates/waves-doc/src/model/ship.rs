//! Ship entries and the modifiers attached to them.
//!
//! A ship entry can be modified by an affix set and by a behavior. Each of
//! those is either a reference into the document's registry or an inline
//! literal, never both: [`Modifier`] makes the two forms mutually exclusive.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::util::num;

/// Identifier of an entry in the affix registry.
pub type AffixId = String;

/// Identifier of an entry in the behavior registry.
pub type BehaviorId = String;

/// Well-known behavior parameter names.
pub mod params {
    pub const ENGAGEMENT_RANGE: &str = "engagementRange";
    pub const DISENGAGE_RANGE: &str = "disengageRange";
    pub const SIEGE_RANGE: &str = "siegeRange";
}

/// Numeric multipliers applied to a ship's stats.
///
/// An absent field means "no modification" and is omitted on export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffixSet {
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "num::serialize_opt")]
    pub thrust_power_multi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "num::serialize_opt")]
    pub turn_power_multi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "num::serialize_opt")]
    pub fire_rate_multi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "num::serialize_opt")]
    pub projectile_speed_multi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "num::serialize_opt")]
    pub projectile_lifetime_multi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "num::serialize_opt")]
    pub block_durability_multi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "num::serialize_opt")]
    pub block_drop_rate_multi: Option<f64>,
}

impl AffixSet {
    /// Returns true if no multiplier is set.
    pub fn is_empty(&self) -> bool {
        self == &AffixSet::default()
    }
}

/// A named runtime strategy plus its open parameter record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSpec {
    pub preset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
}

impl BehaviorSpec {
    /// Creates a behavior with no parameters.
    pub fn new(preset: impl Into<String>) -> Self {
        Self { preset: preset.into(), params: None }
    }

    /// Creates a behavior with the given parameter record.
    pub fn with_params(preset: impl Into<String>, params: Map<String, Value>) -> Self {
        Self { preset: preset.into(), params: Some(params) }
    }

    /// Reads a numeric parameter.
    pub fn param_f64(&self, key: &str) -> Option<f64> {
        self.params.as_ref()?.get(key)?.as_f64()
    }

    pub fn engagement_range(&self) -> Option<f64> {
        self.param_f64(params::ENGAGEMENT_RANGE)
    }

    pub fn disengage_range(&self) -> Option<f64> {
        self.param_f64(params::DISENGAGE_RANGE)
    }

    pub fn siege_range(&self) -> Option<f64> {
        self.param_f64(params::SIEGE_RANGE)
    }

    /// Merges the three well-known ranges into `params`.
    ///
    /// `None` leaves any existing value for that key untouched. If the record
    /// ends up empty it is dropped entirely so it is not exported as `{}`.
    pub fn set_ranges(&mut self, engagement: Option<f64>, disengage: Option<f64>, siege: Option<f64>) {
        let mut record = self.params.take().unwrap_or_default();
        for (key, value) in [
            (params::ENGAGEMENT_RANGE, engagement),
            (params::DISENGAGE_RANGE, disengage),
            (params::SIEGE_RANGE, siege),
        ] {
            if let Some(number) = value.and_then(num::to_json_number) {
                record.insert(key.to_string(), number);
            }
        }
        self.params = (!record.is_empty()).then_some(record);
    }
}

/// What modifies a ship: a registry reference or an inline literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Modifier<T> {
    /// Id of an entry expected to exist in the document's registry.
    Ref(String),
    /// A literal carried by the ship entry itself.
    Inline(T),
}

impl<T> Modifier<T> {
    /// Creates a registry reference.
    pub fn reference(id: impl Into<String>) -> Self {
        Modifier::Ref(id.into())
    }

    /// Returns the referenced registry id, if this is a reference.
    pub fn ref_id(&self) -> Option<&str> {
        match self {
            Modifier::Ref(id) => Some(id),
            Modifier::Inline(_) => None,
        }
    }

    /// Returns the inline literal, if this is one.
    pub fn inline(&self) -> Option<&T> {
        match self {
            Modifier::Ref(_) => None,
            Modifier::Inline(value) => Some(value),
        }
    }
}

/// One spawn line inside a wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ShipEntryRepr", into = "ShipEntryRepr")]
pub struct ShipEntry {
    /// Opaque handle to an external ship asset; empty until one is chosen.
    pub ship_id: String,
    /// Held as authored. Integrality and `>= 1` are checked at export.
    pub count: Option<f64>,
    /// Absent means the runtime default (hunting).
    pub hunter: Option<bool>,
    pub no_clip: Option<bool>,
    /// Opaque script reference run when every spawned ship is destroyed.
    pub on_all_defeated: Option<String>,
    pub affixes: Option<Modifier<AffixSet>>,
    pub behavior: Option<Modifier<BehaviorSpec>>,
}

impl ShipEntry {
    /// Creates an entry with no flags or modifiers.
    pub fn new(ship_id: impl Into<String>, count: u32) -> Self {
        Self {
            ship_id: ship_id.into(),
            count: Some(f64::from(count)),
            hunter: None,
            no_clip: None,
            on_all_defeated: None,
            affixes: None,
            behavior: None,
        }
    }

    pub fn affix_ref(&self) -> Option<&str> {
        self.affixes.as_ref()?.ref_id()
    }

    pub fn behavior_ref(&self) -> Option<&str> {
        self.behavior.as_ref()?.ref_id()
    }
}

impl Default for ShipEntry {
    /// The entry added by the editor: no ship chosen yet, one copy, hunting.
    fn default() -> Self {
        Self { hunter: Some(true), ..ShipEntry::new("", 1) }
    }
}

/// Wire shape of [`ShipEntry`], with ref and inline forms as sibling keys.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShipEntryRepr {
    #[serde(default)]
    ship_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "num::serialize_opt")]
    count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hunter: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    no_clip: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    on_all_defeated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    affixes_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    affixes: Option<AffixSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    behavior_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    behavior: Option<BehaviorSpec>,
}

/// Collapses a (ref, inline) pair into one modifier.
///
/// An empty ref counts as "no reference". When both forms are present the
/// reference wins.
fn pick_modifier<T>(field: &'static str, ship_id: &str, reference: Option<String>, inline: Option<T>) -> Option<Modifier<T>> {
    match (reference.filter(|r| !r.is_empty()), inline) {
        (Some(r), Some(_)) => {
            warn!(field, ship_id, reference = %r, "ship entry has both a registry reference and an inline value; keeping the reference");
            Some(Modifier::Ref(r))
        }
        (Some(r), None) => Some(Modifier::Ref(r)),
        (None, Some(v)) => Some(Modifier::Inline(v)),
        (None, None) => None,
    }
}

fn split_modifier<T>(modifier: Option<Modifier<T>>) -> (Option<String>, Option<T>) {
    match modifier {
        Some(Modifier::Ref(id)) => (Some(id), None),
        Some(Modifier::Inline(value)) => (None, Some(value)),
        None => (None, None),
    }
}

impl From<ShipEntryRepr> for ShipEntry {
    fn from(repr: ShipEntryRepr) -> Self {
        let affixes = pick_modifier("affixes", &repr.ship_id, repr.affixes_ref, repr.affixes);
        let behavior = pick_modifier("behavior", &repr.ship_id, repr.behavior_ref, repr.behavior);
        Self {
            ship_id: repr.ship_id,
            count: repr.count,
            hunter: repr.hunter,
            no_clip: repr.no_clip,
            on_all_defeated: repr.on_all_defeated,
            affixes,
            behavior,
        }
    }
}

impl From<ShipEntry> for ShipEntryRepr {
    fn from(entry: ShipEntry) -> Self {
        let (affixes_ref, affixes) = split_modifier(entry.affixes);
        let (behavior_ref, behavior) = split_modifier(entry.behavior);
        Self {
            ship_id: entry.ship_id,
            count: entry.count,
            hunter: entry.hunter,
            no_clip: entry.no_clip,
            on_all_defeated: entry.on_all_defeated,
            affixes_ref,
            affixes,
            behavior_ref,
            behavior,
        }
    }
}

/// Partial update for a [`ShipEntry`]; `None` leaves a field as it is.
///
/// Nested `Option`s distinguish "leave" (`None`) from "clear" (`Some(None)`).
/// Setting `affixes` or `behavior` replaces the whole modifier, so switching
/// from a reference to an inline value drops the reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipPatch {
    pub ship_id: Option<String>,
    pub count: Option<f64>,
    pub hunter: Option<Option<bool>>,
    pub no_clip: Option<Option<bool>>,
    pub on_all_defeated: Option<Option<String>>,
    pub affixes: Option<Option<Modifier<AffixSet>>>,
    pub behavior: Option<Option<Modifier<BehaviorSpec>>>,
}

impl ShipPatch {
    /// Shallow-merges the set fields into `ship`.
    pub fn apply_to(self, ship: &mut ShipEntry) {
        if let Some(v) = self.ship_id {
            ship.ship_id = v;
        }
        if let Some(v) = self.count {
            ship.count = Some(v);
        }
        if let Some(v) = self.hunter {
            ship.hunter = v;
        }
        if let Some(v) = self.no_clip {
            ship.no_clip = v;
        }
        if let Some(v) = self.on_all_defeated {
            ship.on_all_defeated = v;
        }
        if let Some(v) = self.affixes {
            ship.affixes = v;
        }
        if let Some(v) = self.behavior {
            ship.behavior = v;
        }
    }
}
