//! Built-in catalogues used to seed registries and incidents.
//!
//! Presets are templates: adding one copies it into the document under a
//! fresh id. Nothing here is persisted by reference.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde_json::{Map, Value, json};

use crate::model::{AffixSet, BehaviorSpec, IncidentEntry};

fn affixes(
    thrust: f64,
    turn: f64,
    fire_rate: Option<f64>,
    projectile_speed: Option<f64>,
    projectile_lifetime: Option<f64>,
    block_durability: Option<f64>,
    block_drop_rate: Option<f64>,
) -> AffixSet {
    AffixSet {
        thrust_power_multi: Some(thrust),
        turn_power_multi: Some(turn),
        fire_rate_multi: fire_rate,
        projectile_speed_multi: projectile_speed,
        projectile_lifetime_multi: projectile_lifetime,
        block_durability_multi: block_durability,
        block_drop_rate_multi: block_drop_rate,
    }
}

fn siege(engagement: u32, disengage: u32, siege: u32) -> BehaviorSpec {
    BehaviorSpec::with_params("siege", object(json!({
        "engagementRange": engagement,
        "disengageRange": disengage,
        "siegeRange": siege,
    })))
}

fn incident(script: &str, label: &str, options: Option<Value>) -> IncidentEntry {
    IncidentEntry {
        label: Some(label.to_string()),
        options: options.map(object),
        ..IncidentEntry::new(1.0, script)
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn portal_tiers(ships: &[&str], count: u32, hunter: Option<bool>) -> Value {
    let tiers = ships
        .iter()
        .map(|id| match hunter {
            Some(h) => json!([{ "shipId": id, "count": count, "hunter": h }]),
            None => json!([{ "shipId": id, "count": count }]),
        })
        .collect::<Vec<_>>();
    Value::Array(tiers)
}

lazy_static! {
    /// Affix presets, keyed by suggested registry id.
    pub static ref AFFIX_PRESETS: IndexMap<&'static str, AffixSet> = IndexMap::from([
        ("SPEED_DEMON_AFFIXES", affixes(2.4, 2.4, None, None, None, None, None)),
        ("FAST_AFFIXES", affixes(1.8, 1.8, None, None, None, None, None)),
        ("SUPER_FAST_AFFIXES", affixes(4.4, 4.4, None, None, None, None, None)),
        ("SUPER_FAST_CRUISERS", affixes(6.4, 2.8, Some(1.0), Some(4.5), None, None, None)),
        ("GIANT_CRUISER_AFFIXES", affixes(1.0, 0.25, Some(2.0), Some(1.5), Some(2.0), Some(1.2), Some(0.4))),
        ("GIANT_CRUISER_AFFIXES_2", affixes(3.0, 0.85, Some(2.0), Some(0.8), Some(4.0), Some(1.0), Some(0.4))),
        ("FINAL_ASSAULT_AFFIXES", affixes(4.5, 2.5, Some(2.0), Some(2.5), Some(2.0), Some(1.0), Some(0.4))),
        ("TIER2_AFFIXES", affixes(5.0, 2.0, Some(2.0), Some(1.5), None, Some(1.2), None)),
        ("TIER2_AFFIXES_FIGHTER", affixes(4.5, 2.0, Some(0.8), Some(0.6), None, Some(0.8), None)),
        ("TIER3_AFFIXES", affixes(2.0, 2.0, Some(2.5), Some(2.5), None, Some(1.2), None)),
    ]);

    /// Behavior presets, keyed by suggested registry id.
    pub static ref BEHAVIOR_PRESETS: IndexMap<&'static str, BehaviorSpec> = IndexMap::from([
        ("GIANT_CRUISER_BEHAVIOR", siege(2500, 3200, 2500)),
        ("GIANT_CRUISER_BEHAVIOR_2", siege(1900, 2500, 1900)),
        ("SHORT_SIEGER_1", siege(1200, 1400, 1200)),
        ("SHORT_SIEGER_2", siege(1400, 2000, 1400)),
        ("SHORT_SIEGER_3", siege(1800, 2400, 1800)),
        ("FINAL_ASSAULT_BEHAVIOR", siege(1500, 2000, 1500)),
        ("FINAL_ASSAULT_BEHAVIOR_2", siege(1800, 2400, 1800)),
        ("FINAL_ASSAULT_BEHAVIOR_3", siege(2100, 2800, 2100)),
    ]);

    /// Incident templates, keyed by preset name.
    pub static ref INCIDENT_PRESETS: IndexMap<&'static str, IncidentEntry> = IndexMap::from([
        ("QUANTUM_BOOM", incident("QuantumBoomIncident", "Quantum Boom", None)),
        ("CURSED_CARGO_T1", incident("CursedCargoIncident", "Cursed Cargo (T1)", Some(json!({
            "rewardBlockTier": 1,
            "rewardQuantityMultiplier": 1,
            "ships": [
                { "shipId": "incidents/cursed_cargo/cursed_cargo_killer_00", "count": 4 },
                { "shipId": "incidents/cursed_cargo/cursed_cargo_killer_01", "count": 4 },
            ],
            "cursedCacheShip": { "shipId": "incidents/cursed_cargo/cursed_cargo_00", "count": 1 },
        })))),
        ("CURSED_CARGO_T2", incident("CursedCargoIncident", "Cursed Cargo (T2)", Some(json!({
            "rewardBlockTier": 2,
            "rewardQuantityMultiplier": 1,
            "ships": [
                { "shipId": "incidents/cursed_cargo/cursed_cargo_killer_02", "count": 4 },
                { "shipId": "incidents/cursed_cargo/cursed_cargo_killer_03", "count": 4 },
            ],
            "cursedCacheShip": { "shipId": "incidents/cursed_cargo/cursed_cargo_01", "count": 1 },
        })))),
        ("DIMENSIONAL_PORTAL_20S_A", incident("DimensionalPortalIncident", "Dimensional Portal (20s / wave_0 tiers)", Some(json!({
            "maxDuration": 20,
            "tiers": portal_tiers(&[
                "wave_0_00", "wave_0_01", "wave_0_02", "wave_0_03", "wave_0_04",
                "ship_scrapper_4", "ship_scrapper_5", "ship_scrapper_6",
            ], 4, Some(true)),
        })))),
        ("DIMENSIONAL_PORTAL_20S_B", incident("DimensionalPortalIncident", "Dimensional Portal (20s / scrapper tiers)", Some(json!({
            "maxDuration": 20,
            "tiers": [
                [{ "shipId": "ship_scrapper_2", "count": 6 }],
                [{ "shipId": "ship_scrapper_3", "count": 6 }],
                [{ "shipId": "ship_scrapper_4", "count": 6, "hunter": true }],
                [{ "shipId": "mission_02/tier2_fighter_00", "count": 6, "hunter": true }],
                [{ "shipId": "mission_02/tier2_fighter_00", "count": 6, "hunter": true }],
                [{ "shipId": "mission_02/tier2_cruiser_00", "count": 6, "hunter": true }],
                [{ "shipId": "mission_02/tier2_cruiser_00", "count": 6, "hunter": true }],
                [{ "shipId": "mission_02/tier2_cruiser_01", "count": 6, "hunter": true }],
            ],
        })))),
    ]);
}
