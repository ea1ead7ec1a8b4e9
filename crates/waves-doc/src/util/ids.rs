//! Registry id helpers.

/// Base used when the caller supplies nothing usable.
pub const DEFAULT_ID_BASE: &str = "NEW_ENTRY";

/// Returns an id derived from `base` that `is_taken` rejects.
///
/// The base is trimmed, runs of whitespace become `_`, and the result is
/// upper-cased (`"giant cruiser"` -> `"GIANT_CRUISER"`). If that id is taken,
/// `_2`, `_3`, ... are appended until a free one is found.
pub fn next_free_id(base: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let mut stem = base.split_whitespace().collect::<Vec<_>>().join("_").to_uppercase();
    if stem.is_empty() {
        stem = DEFAULT_ID_BASE.to_string();
    }
    if !is_taken(&stem) {
        return stem;
    }

    let mut n = 2usize;
    loop {
        let candidate = format!("{stem}_{n}");
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_free_id_normalizes() {
        assert_eq!(next_free_id("giant  cruiser", |_| false), "GIANT_CRUISER");
        assert_eq!(next_free_id("   ", |_| false), DEFAULT_ID_BASE);
    }

    #[test]
    fn test_next_free_id_suffixes() {
        let taken = ["FAST", "FAST_2"];
        assert_eq!(next_free_id("fast", |id| taken.contains(&id)), "FAST_3");
    }
}
