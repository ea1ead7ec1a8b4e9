//! Stable "move element" primitive shared by every list in the document.
//!
//! Waves, ships and incidents all reorder through [`reorder`], so the three
//! list types cannot drift apart in how a drag-and-drop move behaves.

/// Moves the element at `from` to position `to`, returning a new vector.
///
/// The element is removed first and then reinserted, so `to` is an index
/// into the list *after* removal. `from == to` yields an equal copy.
///
/// Returns `None` if either index is out of bounds.
pub fn reorder<T: Clone>(items: &[T], from: usize, to: usize) -> Option<Vec<T>> {
    if from >= items.len() || to >= items.len() {
        return None;
    }

    let mut out = items.to_vec();
    if from != to {
        let item = out.remove(from);
        out.insert(to, item);
    }
    Some(out)
}

/// Maps an index through a `reorder(from, to)` so it keeps pointing at the
/// same logical element.
pub fn follow_index(index: usize, from: usize, to: usize) -> usize {
    if index == from {
        to
    } else if from < index && to >= index {
        index - 1
    } else if from > index && to <= index {
        index + 1
    } else {
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reorder_forward() {
        assert_eq!(reorder(&["w0", "w1", "w2"], 0, 2), Some(vec!["w1", "w2", "w0"]));
    }

    #[test]
    fn test_reorder_backward() {
        assert_eq!(reorder(&["w0", "w1", "w2"], 2, 0), Some(vec!["w2", "w0", "w1"]));
    }

    #[test]
    fn test_reorder_identity() {
        let items = vec![1, 2, 3];
        assert_eq!(reorder(&items, 1, 1), Some(items.clone()));
    }

    #[test]
    fn test_reorder_out_of_bounds() {
        assert_eq!(reorder(&[1, 2, 3], 3, 0), None);
        assert_eq!(reorder(&[1, 2, 3], 0, 3), None);
        assert_eq!(reorder::<u8>(&[], 0, 0), None);
    }

    #[test]
    fn test_follow_index() {
        // [a, b, c, d], move a -> 2 gives [b, c, a, d]
        assert_eq!(follow_index(0, 0, 2), 2);
        assert_eq!(follow_index(1, 0, 2), 0);
        assert_eq!(follow_index(2, 0, 2), 1);
        assert_eq!(follow_index(3, 0, 2), 3);

        // [a, b, c, d], move d -> 1 gives [a, d, b, c]
        assert_eq!(follow_index(0, 3, 1), 0);
        assert_eq!(follow_index(1, 3, 1), 2);
        assert_eq!(follow_index(2, 3, 1), 3);
        assert_eq!(follow_index(3, 3, 1), 1);
    }

    proptest! {
        #[test]
        fn prop_reorder_is_permutation(items in prop::collection::vec(any::<u16>(), 1..16), a in any::<prop::sample::Index>(), b in any::<prop::sample::Index>()) {
            let from = a.index(items.len());
            let to = b.index(items.len());
            let out = reorder(&items, from, to).unwrap();

            prop_assert_eq!(out.len(), items.len());
            prop_assert_eq!(out[to], items[from]);

            let mut sorted_in = items.clone();
            let mut sorted_out = out.clone();
            sorted_in.sort_unstable();
            sorted_out.sort_unstable();
            prop_assert_eq!(sorted_in, sorted_out);
        }

        #[test]
        fn prop_follow_index_tracks_element(len in 1usize..12, a in any::<prop::sample::Index>(), b in any::<prop::sample::Index>(), c in any::<prop::sample::Index>()) {
            let items: Vec<usize> = (0..len).collect();
            let from = a.index(len);
            let to = b.index(len);
            let tracked = c.index(len);
            let out = reorder(&items, from, to).unwrap();
            prop_assert_eq!(out[follow_index(tracked, from, to)], tracked);
        }
    }
}
