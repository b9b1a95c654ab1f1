#![forbid(unsafe_code)]

//! EasyMotion label assignment.
//!
//! Every visible node gets a short alphabetic label; typing a label jumps
//! selection to its node. Two requirements shape the scheme:
//!
//! 1. **Prefix-free**: no label is a prefix of another, so key-by-key
//!    matching never has to disambiguate.
//! 2. **Closest gets shortest**: identifiers arrive ranked (closest
//!    first), and single-letter labels go to the front of the list.
//!
//! With `N` targets, the minimal number of alphabet letters `P` is
//! reserved as two-letter prefixes such that `(26 − P) + 26·P ≥ N`. The
//! remaining `26 − P` letters are handed out as single-letter labels in
//! alphabetical order; two-letter labels enumerate prefix-major after
//! that. Up to 676 targets are reachable (`P = 26`); anything beyond is
//! left unlabeled.

use bramble_core::geometry::Point;
use bramble_doc::node::NodeId;

const ALPHABET_LEN: usize = 26;

fn letter(index: usize) -> char {
    (b'a' + index as u8) as char
}

/// Assign prefix-free labels to ids already ranked closest-first.
///
/// Returns `(label, id)` pairs; ids past the 676-label capacity are
/// omitted.
#[must_use]
pub fn assign_labels(ids: &[NodeId]) -> Vec<(String, NodeId)> {
    let n = ids.len();
    if n == 0 {
        return Vec::new();
    }

    // Minimal P with (26 - P) + 26 * P >= N, i.e. ceil((N - 26) / 25).
    let prefixes = if n <= ALPHABET_LEN {
        0
    } else {
        ((n - ALPHABET_LEN).div_ceil(ALPHABET_LEN - 1)).min(ALPHABET_LEN)
    };
    let singles = ALPHABET_LEN - prefixes;

    let mut out = Vec::with_capacity(n.min(singles + prefixes * ALPHABET_LEN));
    let mut remaining = ids.iter().copied();

    for slot in 0..singles {
        let Some(id) = remaining.next() else {
            return out;
        };
        out.push((letter(prefixes + slot).to_string(), id));
    }

    'doubles: for prefix in 0..prefixes {
        for suffix in 0..ALPHABET_LEN {
            let Some(id) = remaining.next() else {
                break 'doubles;
            };
            let mut label = String::with_capacity(2);
            label.push(letter(prefix));
            label.push(letter(suffix));
            out.push((label, id));
        }
    }

    out
}

/// Rank candidate `(id, center)` pairs by ascending distance from the
/// reference point. Ties keep input order.
#[must_use]
pub fn rank_by_distance(candidates: &[(NodeId, Point)], reference: Point) -> Vec<NodeId> {
    let mut ranked: Vec<&(NodeId, Point)> = candidates.iter().collect();
    ranked.sort_by(|a, b| {
        a.1.distance(reference)
            .total_cmp(&b.1.distance(reference))
    });
    ranked.into_iter().map(|(id, _)| *id).collect()
}

/// Active EasyMotion state: the generated labels and the keys typed so
/// far.
#[derive(Debug, Clone)]
pub(crate) struct MotionMode {
    labels: Vec<(String, NodeId)>,
    pending: String,
}

/// What a typed key did to the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MotionHit {
    /// The pending string now names this node exactly.
    Jump(NodeId),
    /// The pending string is a proper prefix of at least one label.
    Partial,
    /// No label matches; the mode should exit.
    Miss,
}

impl MotionMode {
    pub(crate) fn new(labels: Vec<(String, NodeId)>) -> Self {
        Self {
            labels,
            pending: String::new(),
        }
    }

    pub(crate) fn label_for(&self, id: NodeId) -> Option<&str> {
        self.labels
            .iter()
            .find(|(_, labeled)| *labeled == id)
            .map(|(label, _)| label.as_str())
    }

    /// Feed one typed character.
    ///
    /// Labels are prefix-free, so an exact match can never also be a
    /// prefix of something longer.
    pub(crate) fn push_key(&mut self, key: char) -> MotionHit {
        self.pending.push(key);
        if let Some((_, id)) = self.labels.iter().find(|(label, _)| *label == self.pending) {
            return MotionHit::Jump(*id);
        }
        if self
            .labels
            .iter()
            .any(|(label, _)| label.starts_with(&self.pending))
        {
            return MotionHit::Partial;
        }
        MotionHit::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: u64) -> Vec<NodeId> {
        (0..n).map(NodeId).collect()
    }

    fn labels(n: u64) -> Vec<String> {
        assign_labels(&ids(n))
            .into_iter()
            .map(|(label, _)| label)
            .collect()
    }

    #[test]
    fn zero_targets_empty_map() {
        assert!(assign_labels(&[]).is_empty());
    }

    #[test]
    fn three_targets_get_a_b_c_in_order() {
        let assigned = assign_labels(&ids(3));
        assert_eq!(
            assigned,
            vec![
                ("a".to_string(), NodeId(0)),
                ("b".to_string(), NodeId(1)),
                ("c".to_string(), NodeId(2)),
            ]
        );
    }

    #[test]
    fn twenty_six_targets_use_every_letter_once() {
        let labels = labels(26);
        assert_eq!(labels.len(), 26);
        assert!(labels.iter().all(|label| label.len() == 1));
        assert_eq!(labels.first().map(String::as_str), Some("a"));
        assert_eq!(labels.last().map(String::as_str), Some("z"));
    }

    #[test]
    fn twenty_seven_targets_reserve_one_prefix() {
        let assigned = assign_labels(&ids(27));
        assert_eq!(assigned.len(), 27);
        // Closest 25 take b..z.
        assert_eq!(assigned[0].0, "b");
        assert_eq!(assigned[24].0, "z");
        // Farthest two spill into the reserved prefix.
        assert_eq!(assigned[25], ("aa".to_string(), NodeId(25)));
        assert_eq!(assigned[26], ("ab".to_string(), NodeId(26)));
    }

    #[test]
    fn fifty_one_targets_fill_one_prefix_exactly() {
        let labels = labels(51);
        assert_eq!(labels[..25], (0..25).map(|i| letter(1 + i).to_string()).collect::<Vec<_>>()[..]);
        for (i, label) in labels[25..].iter().enumerate() {
            assert_eq!(label, &format!("a{}", letter(i)));
        }
    }

    #[test]
    fn fifty_two_targets_reserve_two_prefixes() {
        let labels = labels(52);
        // 24 singles: c..z.
        assert_eq!(labels[0], "c");
        assert_eq!(labels[23], "z");
        // Then aa..az.
        assert_eq!(labels[24], "aa");
        assert_eq!(labels[49], "az");
        // Then ba, bb.
        assert_eq!(labels[50], "ba");
        assert_eq!(labels[51], "bb");
    }

    #[test]
    fn labels_are_distinct_and_prefix_free() {
        for n in [1u64, 10, 26, 27, 51, 52, 100, 676] {
            let labels = labels(n);
            assert_eq!(labels.len() as u64, n, "all {n} targets labeled");
            for (i, a) in labels.iter().enumerate() {
                for (j, b) in labels.iter().enumerate() {
                    if i != j {
                        assert_ne!(a, b);
                        assert!(!b.starts_with(a.as_str()), "{a} prefixes {b}");
                    }
                }
            }
        }
    }

    #[test]
    fn beyond_capacity_is_truncated() {
        let assigned = assign_labels(&ids(700));
        assert_eq!(assigned.len(), 676);
    }

    #[test]
    fn rank_sorts_by_distance_with_stable_ties() {
        let candidates = vec![
            (NodeId(0), Point::new(10.0, 0.0)),
            (NodeId(1), Point::new(1.0, 0.0)),
            (NodeId(2), Point::new(-10.0, 0.0)),
            (NodeId(3), Point::new(5.0, 0.0)),
        ];
        let ranked = rank_by_distance(&candidates, Point::new(0.0, 0.0));
        // 1 (d=1), 3 (d=5), then 0 and 2 tie at d=10 in input order.
        assert_eq!(ranked, vec![NodeId(1), NodeId(3), NodeId(0), NodeId(2)]);
    }

    #[test]
    fn push_key_matches_incrementally() {
        let mut mode = MotionMode::new(assign_labels(&ids(27)));
        // "a" is a reserved prefix at N=27, so it is a partial match.
        assert_eq!(mode.push_key('a'), MotionHit::Partial);
        assert_eq!(mode.push_key('b'), MotionHit::Jump(NodeId(26)));
    }

    #[test]
    fn push_key_miss_on_unknown() {
        let mut mode = MotionMode::new(assign_labels(&ids(3)));
        assert_eq!(mode.push_key('z'), MotionHit::Miss);
    }

    #[test]
    fn single_letter_jump() {
        let mut mode = MotionMode::new(assign_labels(&ids(3)));
        assert_eq!(mode.push_key('b'), MotionHit::Jump(NodeId(1)));
    }
}
