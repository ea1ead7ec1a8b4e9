//! Conversion between the persisted and canonical document shapes.
//!
//! Import is permissive: absent per-wave defaults are filled in. Export does
//! no active stripping. A field the editor set, even to its default value,
//! is written back.

use crate::error::ImportError;
use crate::model::{FORMAT_VERSION, Wave, WaveFile, WavesDoc, WavesFile};

/// Converts a persisted document into the canonical form.
///
/// For every wave, `mods` and `ships` default to empty, `spawnDistribution`
/// to `aroundPlayer`, and `sustainMode` to `true`. Everything else passes
/// through unchanged. Absent registries become empty.
pub fn normalize_in(file: WavesFile) -> Result<WavesDoc, ImportError> {
    if file.version != FORMAT_VERSION {
        return Err(ImportError::UnsupportedVersion { found: Some(file.version.to_string()) });
    }

    Ok(WavesDoc {
        version: FORMAT_VERSION,
        affixes: file.affixes.unwrap_or_default(),
        behaviors: file.behaviors.unwrap_or_default(),
        waves: file.waves.into_iter().map(wave_in).collect(),
    })
}

/// Converts a canonical document into the persisted form.
///
/// Every wave carries `mods`, `ships`, `spawnDistribution` and `sustainMode`.
/// Empty registries are omitted.
pub fn normalize_out(doc: &WavesDoc) -> WavesFile {
    WavesFile {
        version: FORMAT_VERSION,
        affixes: (!doc.affixes.is_empty()).then(|| doc.affixes.clone()),
        behaviors: (!doc.behaviors.is_empty()).then(|| doc.behaviors.clone()),
        waves: doc.waves.iter().map(wave_out).collect(),
    }
}

fn wave_in(w: WaveFile) -> Wave {
    let defaults = Wave::default();
    Wave {
        mods: w.mods.unwrap_or_default(),
        ships: w.ships.unwrap_or_default(),
        incidents: w.incidents,
        formations: w.formations,
        music: w.music,
        lighting_settings: w.lighting_settings,
        duration: w.duration,
        spawn_distribution: w.spawn_distribution.unwrap_or(defaults.spawn_distribution),
        at_coords: w.at_coords,
        is_boss: w.is_boss,
        sustain_mode: w.sustain_mode.unwrap_or(defaults.sustain_mode),
        spawn_delay: w.spawn_delay,
    }
}

fn wave_out(w: &Wave) -> WaveFile {
    WaveFile {
        mods: Some(w.mods.clone()),
        ships: Some(w.ships.clone()),
        incidents: w.incidents.clone(),
        formations: w.formations.clone(),
        music: w.music.clone(),
        lighting_settings: w.lighting_settings.clone(),
        duration: w.duration,
        spawn_distribution: Some(w.spawn_distribution),
        at_coords: w.at_coords,
        is_boss: w.is_boss,
        sustain_mode: Some(w.sustain_mode),
        spawn_delay: w.spawn_delay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SpawnDistribution, WaveDuration};
    use proptest::prelude::*;
    use serde_json::json;

    fn file_from(value: serde_json::Value) -> WavesFile {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_in_fills_wave_defaults() {
        let doc = normalize_in(file_from(json!({
            "version": 1,
            "waves": [ {}, { "mods": ["fog"], "sustainMode": false, "spawnDistribution": "center" } ]
        })))
        .unwrap();

        assert!(doc.affixes.is_empty());
        assert!(doc.behaviors.is_empty());

        let first = &doc.waves[0];
        assert!(first.mods.is_empty());
        assert!(first.ships.is_empty());
        assert_eq!(first.spawn_distribution, SpawnDistribution::AroundPlayer);
        assert!(first.sustain_mode);
        assert_eq!(first.incidents, None);
        assert_eq!(first.duration, None);

        let second = &doc.waves[1];
        assert_eq!(second.mods, vec!["fog"]);
        assert!(!second.sustain_mode);
        assert_eq!(second.spawn_distribution, SpawnDistribution::Center);
    }

    #[test]
    fn test_normalize_in_rejects_other_versions() {
        let result = normalize_in(WavesFile { version: 2, ..Default::default() });
        assert_eq!(result, Err(ImportError::UnsupportedVersion { found: Some("2".to_string()) }));
    }

    #[test]
    fn test_normalize_out_writes_defaults_explicitly() {
        let doc = normalize_in(file_from(json!({ "version": 1, "waves": [ {} ] }))).unwrap();
        let out = serde_json::to_value(normalize_out(&doc)).unwrap();
        assert_eq!(
            out,
            json!({
                "version": 1,
                "waves": [ { "mods": [], "ships": [], "spawnDistribution": "aroundPlayer", "sustainMode": true } ]
            })
        );
    }

    #[test]
    fn test_roundtrip_preserves_opaque_fields() {
        let original = json!({
            "version": 1,
            "affixes": { "FAST": { "thrustPowerMulti": 1.8, "turnPowerMulti": 1.8 } },
            "behaviors": { "SIEGER": { "preset": "siege", "params": { "siegeRange": 1200, "custom": { "deep": [1, "two", null] } } } },
            "waves": [
                {
                    "mods": ["nebula"],
                    "ships": [
                        { "shipId": "scout", "count": 3, "hunter": false, "affixesRef": "FAST" },
                        { "shipId": "cruiser", "count": 1, "noClip": true, "onAllDefeated": "OnCruiserDown", "behavior": { "preset": "orbit" } }
                    ],
                    "incidents": [
                        { "spawnChance": 0.25, "script": "CursedCargoIncident", "options": { "b": 2, "a": [1, 2] }, "label": "Cargo", "delaySeconds": 12 }
                    ],
                    "formations": [ { "formationId": "v", "layout": [ { "x": 0, "y": 1 } ] } ],
                    "music": "boss_theme",
                    "lightingSettings": { "clearColor": [0, 0, 0.1, 1] },
                    "duration": "Infinity",
                    "spawnDistribution": "at",
                    "atCoords": { "x": 100, "y": -50.5, "spreadRadius": 30 },
                    "isBoss": true,
                    "sustainMode": false,
                    "spawnDelay": 2.5
                }
            ]
        });

        let doc = normalize_in(file_from(original.clone())).unwrap();
        assert_eq!(doc.waves[0].duration, Some(WaveDuration::Unbounded));

        let back = serde_json::to_value(normalize_out(&doc)).unwrap();
        assert_eq!(back, original);
    }

    fn arb_wave() -> impl Strategy<Value = serde_json::Value> {
        (
            prop::collection::vec("[a-z]{1,6}", 0..3),
            prop::collection::vec(("[a-z_]{1,8}", 1i64..50, prop::option::of(any::<bool>())), 0..4),
            prop::sample::select(vec!["at", "random", "outer", "inner", "aroundPlayer", "aroundPlayerNear", "center"]),
            any::<bool>(),
            prop::option::of(1u32..600),
        )
            .prop_map(|(mods, ships, dist, sustain, duration)| {
                let ships: Vec<_> = ships
                    .into_iter()
                    .map(|(id, count, hunter)| match hunter {
                        Some(h) => json!({ "shipId": id, "count": count, "hunter": h }),
                        None => json!({ "shipId": id, "count": count }),
                    })
                    .collect();
                let mut wave = json!({
                    "mods": mods,
                    "ships": ships,
                    "spawnDistribution": dist,
                    "sustainMode": sustain,
                });
                if let Some(d) = duration {
                    wave["duration"] = json!(d);
                }
                wave
            })
    }

    proptest! {
        #[test]
        fn prop_canonical_shaped_files_roundtrip(waves in prop::collection::vec(arb_wave(), 0..5)) {
            let original = json!({ "version": 1, "waves": waves });
            let doc = normalize_in(file_from(original.clone())).unwrap();
            let back = serde_json::to_value(normalize_out(&doc)).unwrap();
            prop_assert_eq!(back, original);
        }

        #[test]
        fn prop_normalized_waves_are_fully_defaulted(waves in prop::collection::vec(arb_wave(), 0..5), strip in any::<bool>()) {
            let mut original = json!({ "version": 1, "waves": waves });
            if strip {
                for wave in original["waves"].as_array_mut().unwrap() {
                    let wave = wave.as_object_mut().unwrap();
                    wave.remove("mods");
                    wave.remove("ships");
                    wave.remove("spawnDistribution");
                    wave.remove("sustainMode");
                }
            }
            let doc = normalize_in(file_from(original)).unwrap();
            let out = serde_json::to_value(normalize_out(&doc)).unwrap();
            for wave in out["waves"].as_array().unwrap() {
                prop_assert!(wave["mods"].is_array());
                prop_assert!(wave["ships"].is_array());
                prop_assert!(wave["spawnDistribution"].is_string());
                prop_assert!(wave["sustainMode"].is_boolean());
            }
        }
    }
}
