//! Read-only aggregations over a document.
//!
//! These scan every wave on each call. Documents are small, and a fresh scan
//! cannot go stale the way a cached back-index could.

use rustc_hash::FxHashMap;

use crate::model::{ShipEntry, WavesDoc};

/// Number of ship entries referencing each registry id.
///
/// Ids with no references are absent rather than mapped to zero.
pub type UsageCounts = FxHashMap<String, usize>;

fn collect_usage<'a>(doc: &'a WavesDoc, reference: fn(&'a ShipEntry) -> Option<&'a str>) -> UsageCounts {
    let mut counts = UsageCounts::default();
    for id in doc.waves.iter().flat_map(|w| w.ships.iter()).filter_map(reference) {
        *counts.entry(id.to_string()).or_default() += 1;
    }
    counts
}

/// Counts ship entries referencing each affix id.
pub fn collect_affix_usage(doc: &WavesDoc) -> UsageCounts {
    collect_usage(doc, ShipEntry::affix_ref)
}

/// Counts ship entries referencing each behavior id.
pub fn collect_behavior_usage(doc: &WavesDoc) -> UsageCounts {
    collect_usage(doc, ShipEntry::behavior_ref)
}

/// Affix registry ids, sorted.
pub fn affix_ids(doc: &WavesDoc) -> Vec<&str> {
    let mut ids: Vec<&str> = doc.affixes.keys().map(String::as_str).collect();
    ids.sort_unstable();
    ids
}

/// Behavior registry ids, sorted.
pub fn behavior_ids(doc: &WavesDoc) -> Vec<&str> {
    let mut ids: Vec<&str> = doc.behaviors.keys().map(String::as_str).collect();
    ids.sort_unstable();
    ids
}

/// Referenced affix ids with no registry entry, sorted.
pub fn dangling_affix_refs(doc: &WavesDoc) -> Vec<String> {
    let mut ids: Vec<String> = collect_affix_usage(doc)
        .into_keys()
        .filter(|id| !doc.affixes.contains_key(id))
        .collect();
    ids.sort_unstable();
    ids
}

/// Referenced behavior ids with no registry entry, sorted.
pub fn dangling_behavior_refs(doc: &WavesDoc) -> Vec<String> {
    let mut ids: Vec<String> = collect_behavior_usage(doc)
        .into_keys()
        .filter(|id| !doc.behaviors.contains_key(id))
        .collect();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AffixSet, BehaviorSpec, DocBuilder};

    fn sample() -> WavesDoc {
        DocBuilder::new()
            .affix("SLOW", AffixSet::default())
            .affix("FAST", AffixSet::default())
            .affix("UNUSED", AffixSet::default())
            .behavior("SIEGER", BehaviorSpec::new("siege"))
            .wave(|w| {
                w.ship("a", 1, |s| s.affix_ref("FAST").behavior_ref("SIEGER"))
                    .ship("b", 1, |s| s.affix_ref("FAST"))
                    .ship("c", 1, |s| s.affixes(AffixSet::default()))
            })
            .wave(|w| w.ship("d", 1, |s| s.affix_ref("SLOW").behavior_ref("GHOST")))
            .build()
    }

    #[test]
    fn test_collect_affix_usage() {
        let usage = collect_affix_usage(&sample());
        assert_eq!(usage.get("FAST"), Some(&2));
        assert_eq!(usage.get("SLOW"), Some(&1));
        assert_eq!(usage.get("UNUSED"), None);
        assert_eq!(usage.len(), 2);
    }

    #[test]
    fn test_collect_behavior_usage() {
        let usage = collect_behavior_usage(&sample());
        assert_eq!(usage.get("SIEGER"), Some(&1));
        assert_eq!(usage.get("GHOST"), Some(&1));
    }

    #[test]
    fn test_ids_are_sorted() {
        let doc = sample();
        assert_eq!(affix_ids(&doc), vec!["FAST", "SLOW", "UNUSED"]);
        assert_eq!(behavior_ids(&doc), vec!["SIEGER"]);
    }

    #[test]
    fn test_dangling_refs() {
        let doc = sample();
        assert!(dangling_affix_refs(&doc).is_empty());
        assert_eq!(dangling_behavior_refs(&doc), vec!["GHOST".to_string()]);
    }
}
