//! Builder API for ergonomic document construction.
//!
//! Provides a fluent interface for building canonical documents, mostly for
//! tests and tooling that seed documents programmatically.
//!
//! # Example
//!
//! ```rust
//! use waves_doc::model::builder::DocBuilder;
//! use waves_doc::{AffixSet, SpawnDistribution};
//!
//! let doc = DocBuilder::new()
//!     .affix("FAST", AffixSet { thrust_power_multi: Some(1.8), ..Default::default() })
//!     .wave(|w| w
//!         .distribution(SpawnDistribution::Center)
//!         .ship("scout", 4, |s| s.affix_ref("FAST"))
//!         .incident(0.5, "QuantumBoomIncident", |i| i.label("Quantum Boom"))
//!     )
//!     .build();
//!
//! assert_eq!(doc.waves[0].ships[0].affix_ref(), Some("FAST"));
//! ```

use serde_json::{Map, Value};

use crate::model::{
    AffixSet, AtCoords, BehaviorSpec, IncidentEntry, Modifier, ShipEntry, SpawnDistribution, Wave,
    WaveDuration, WavesDoc,
};

/// Builder for constructing a [`WavesDoc`].
#[derive(Debug, Clone, Default)]
pub struct DocBuilder {
    doc: WavesDoc,
}

impl DocBuilder {
    /// Creates a builder for an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an affix registry entry.
    pub fn affix(mut self, id: impl Into<String>, affixes: AffixSet) -> Self {
        self.doc.affixes.insert(id.into(), affixes);
        self
    }

    /// Adds or replaces a behavior registry entry.
    pub fn behavior(mut self, id: impl Into<String>, behavior: BehaviorSpec) -> Self {
        self.doc.behaviors.insert(id.into(), behavior);
        self
    }

    /// Appends a wave configured by a builder function.
    pub fn wave<F>(mut self, f: F) -> Self
    where
        F: FnOnce(WaveBuilder) -> WaveBuilder,
    {
        self.doc.waves.push(f(WaveBuilder::new()).build());
        self
    }

    /// Appends a default wave.
    pub fn empty_wave(mut self) -> Self {
        self.doc.waves.push(Wave::default());
        self
    }

    /// Builds the document.
    pub fn build(self) -> WavesDoc {
        self.doc
    }
}

/// Builder for a single [`Wave`].
#[derive(Debug, Clone, Default)]
pub struct WaveBuilder {
    wave: Wave,
}

impl WaveBuilder {
    /// Creates a builder for a default wave.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mods<I, S>(mut self, mods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wave.mods = mods.into_iter().map(Into::into).collect();
        self
    }

    pub fn duration(mut self, duration: WaveDuration) -> Self {
        self.wave.duration = Some(duration);
        self
    }

    pub fn distribution(mut self, distribution: SpawnDistribution) -> Self {
        self.wave.spawn_distribution = distribution;
        self
    }

    /// Sets the distribution to `at` with the given coordinates.
    pub fn at(mut self, x: f64, y: f64, spread_radius: Option<f64>) -> Self {
        self.wave.spawn_distribution = SpawnDistribution::At;
        self.wave.at_coords = Some(AtCoords { x, y, spread_radius });
        self
    }

    pub fn boss(mut self) -> Self {
        self.wave.is_boss = Some(true);
        self
    }

    pub fn sustain(mut self, sustain: bool) -> Self {
        self.wave.sustain_mode = sustain;
        self
    }

    pub fn spawn_delay(mut self, seconds: f64) -> Self {
        self.wave.spawn_delay = Some(seconds);
        self
    }

    pub fn music(mut self, music: Value) -> Self {
        self.wave.music = Some(music);
        self
    }

    /// Appends a ship entry configured by a builder function.
    pub fn ship<F>(mut self, ship_id: impl Into<String>, count: u32, f: F) -> Self
    where
        F: FnOnce(ShipBuilder) -> ShipBuilder,
    {
        self.wave.ships.push(f(ShipBuilder::new(ship_id, count)).build());
        self
    }

    /// Appends an incident configured by a builder function.
    pub fn incident<F>(mut self, spawn_chance: f64, script: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(IncidentBuilder) -> IncidentBuilder,
    {
        let incident = f(IncidentBuilder::new(spawn_chance, script)).build();
        self.wave.incidents.get_or_insert_with(Vec::new).push(incident);
        self
    }

    pub fn build(self) -> Wave {
        self.wave
    }
}

/// Builder for a single [`ShipEntry`].
#[derive(Debug, Clone)]
pub struct ShipBuilder {
    ship: ShipEntry,
}

impl ShipBuilder {
    pub fn new(ship_id: impl Into<String>, count: u32) -> Self {
        Self { ship: ShipEntry::new(ship_id, count) }
    }

    pub fn hunter(mut self, hunter: bool) -> Self {
        self.ship.hunter = Some(hunter);
        self
    }

    pub fn no_clip(mut self) -> Self {
        self.ship.no_clip = Some(true);
        self
    }

    pub fn on_all_defeated(mut self, script: impl Into<String>) -> Self {
        self.ship.on_all_defeated = Some(script.into());
        self
    }

    /// References an affix registry entry, replacing any inline affixes.
    pub fn affix_ref(mut self, id: impl Into<String>) -> Self {
        self.ship.affixes = Some(Modifier::reference(id));
        self
    }

    /// Sets inline affixes, replacing any affix reference.
    pub fn affixes(mut self, affixes: AffixSet) -> Self {
        self.ship.affixes = Some(Modifier::Inline(affixes));
        self
    }

    /// References a behavior registry entry, replacing any inline behavior.
    pub fn behavior_ref(mut self, id: impl Into<String>) -> Self {
        self.ship.behavior = Some(Modifier::reference(id));
        self
    }

    /// Sets an inline behavior, replacing any behavior reference.
    pub fn behavior(mut self, behavior: BehaviorSpec) -> Self {
        self.ship.behavior = Some(Modifier::Inline(behavior));
        self
    }

    pub fn build(self) -> ShipEntry {
        self.ship
    }
}

/// Builder for a single [`IncidentEntry`].
#[derive(Debug, Clone)]
pub struct IncidentBuilder {
    incident: IncidentEntry,
}

impl IncidentBuilder {
    pub fn new(spawn_chance: f64, script: impl Into<String>) -> Self {
        Self { incident: IncidentEntry::new(spawn_chance, script) }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.incident.label = Some(label.into());
        self
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.incident.delay_seconds = Some(seconds);
        self
    }

    pub fn options(mut self, options: Map<String, Value>) -> Self {
        self.incident.options = Some(options);
        self
    }

    pub fn build(self) -> IncidentEntry {
        self.incident
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_doc_builder_basic() {
        let doc = DocBuilder::new()
            .behavior("SIEGER", BehaviorSpec::new("siege"))
            .wave(|w| {
                w.mods(["dark"])
                    .boss()
                    .ship("cruiser", 2, |s| s.behavior_ref("SIEGER").hunter(false))
                    .ship("scout", 6, |s| s)
            })
            .empty_wave()
            .build();

        assert_eq!(doc.waves.len(), 2);
        assert_eq!(doc.waves[0].mods, vec!["dark"]);
        assert_eq!(doc.waves[0].is_boss, Some(true));
        assert_eq!(doc.waves[0].ships[0].behavior_ref(), Some("SIEGER"));
        assert_eq!(doc.waves[0].ships[0].hunter, Some(false));
        assert_eq!(doc.waves[0].ships[1].hunter, None);
        assert_eq!(doc.waves[1], Wave::default());
        assert_eq!(doc.ship_count(), 2);
    }

    #[test]
    fn test_incident_list_created_on_first_incident() {
        let wave = WaveBuilder::new().build();
        assert!(wave.incidents.is_none());

        let options = json!({ "maxDuration": 20 }).as_object().cloned().unwrap();
        let wave = WaveBuilder::new()
            .incident(1.0, "DimensionalPortalIncident", |i| i.options(options).delay(3.0))
            .build();
        assert_eq!(wave.incidents().len(), 1);
        assert_eq!(wave.incidents()[0].delay_seconds, Some(3.0));
    }

    #[test]
    fn test_ship_builder_modifier_forms_are_exclusive() {
        let ship = ShipBuilder::new("scout", 1)
            .affix_ref("FAST")
            .affixes(AffixSet { fire_rate_multi: Some(2.0), ..Default::default() })
            .build();
        assert_eq!(ship.affix_ref(), None);
        assert!(matches!(ship.affixes, Some(Modifier::Inline(_))));
    }
}
