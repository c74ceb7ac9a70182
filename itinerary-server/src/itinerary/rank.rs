//! Ordering of alternative paths.

use std::cmp::Ordering;

use crate::domain::{AlternativePath, SortCriterion};

/// Sort alternatives best-first.
///
/// - `Duration`: shortest total duration first
/// - `Emissions`: lowest emissions first, then shortest duration
///
/// The sort is stable: equal alternatives keep the backend's order.
pub fn rank_alternatives(
    mut paths: Vec<AlternativePath>,
    criterion: SortCriterion,
) -> Vec<AlternativePath> {
    paths.sort_by(|a, b| match criterion {
        SortCriterion::Duration => a.total_duration.cmp(&b.total_duration),
        SortCriterion::Emissions => {
            let emissions_cmp = a.emissions.total_cmp(&b.emissions);
            if emissions_cmp != Ordering::Equal {
                return emissions_cmp;
            }
            a.total_duration.cmp(&b.total_duration)
        }
    });

    paths
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::TemporalSegment;
    use proptest::prelude::*;

    fn make_path(duration: u32, emissions: f64) -> AlternativePath {
        let mut path = AlternativePath::new(vec![TemporalSegment::new("1", "A", "B")], None);
        path.total_duration = duration;
        path.emissions = emissions;
        path
    }

    fn arb_paths() -> impl Strategy<Value = Vec<AlternativePath>> {
        prop::collection::vec((0u32..7200, 0.0f64..500.0), 0..12).prop_map(|specs| {
            specs
                .into_iter()
                .map(|(d, e)| make_path(d, e))
                .collect()
        })
    }

    proptest! {
        /// Ranking by duration yields non-decreasing durations
        #[test]
        fn duration_sorted(paths in arb_paths()) {
            let ranked = rank_alternatives(paths, SortCriterion::Duration);
            prop_assert!(ranked.windows(2).all(|w| w[0].total_duration <= w[1].total_duration));
        }

        /// Ranking by emissions yields non-decreasing emissions
        #[test]
        fn emissions_sorted(paths in arb_paths()) {
            let ranked = rank_alternatives(paths, SortCriterion::Emissions);
            prop_assert!(ranked.windows(2).all(|w| w[0].emissions <= w[1].emissions));
        }

        /// Ranking never adds or drops alternatives
        #[test]
        fn preserves_count(paths in arb_paths()) {
            let n = paths.len();
            prop_assert_eq!(rank_alternatives(paths.clone(), SortCriterion::Duration).len(), n);
            prop_assert_eq!(rank_alternatives(paths, SortCriterion::Emissions).len(), n);
        }
    }
}
