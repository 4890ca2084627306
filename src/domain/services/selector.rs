//! Resolution Selector Service
//!
//! Pure domain logic for picking the winning record out of a batch of
//! completed provider attempts. This service has NO external dependencies -
//! it's pure Rust.

use crate::domain::entities::{AttemptResult, GeoRecord, ProviderSpec, ResolutionOutcome};

/// Selector that reduces a batch of attempts to a single outcome.
///
/// The rule is a deterministic max-by-rank reduction:
/// 1. `Empty` and `Failed` attempts are discarded
/// 2. Among the remaining successes, the highest-ranked provider wins
/// 3. Ties go to the first-declared provider
/// 4. No successes at all means `Unresolved`
///
/// The winning record is returned verbatim. Fields from lower-ranked
/// providers are never merged in, so the caller can never observe a hybrid
/// record mixing, say, one provider's coordinates with another's city.
pub struct ResolutionSelector;

impl ResolutionSelector {
    /// Pick the winning record from completed attempts.
    ///
    /// `attempts` must be in provider declaration order; the tie-break
    /// depends on it. Replacement happens only on a strictly greater rank,
    /// which is what makes the first-declared provider win ties.
    pub fn select(attempts: Vec<(ProviderSpec, AttemptResult)>) -> ResolutionOutcome {
        let mut best: Option<(ProviderSpec, GeoRecord)> = None;

        for (spec, result) in attempts {
            let record = match result {
                AttemptResult::Success(record) => record,
                AttemptResult::Empty | AttemptResult::Failed(_) => continue,
            };

            match &best {
                Some((best_spec, _)) if spec.rank <= best_spec.rank => {}
                _ => best = Some((spec, record)),
            }
        }

        match best {
            Some((spec, record)) => ResolutionOutcome::Resolved {
                record,
                rank: spec.rank,
            },
            None => ResolutionOutcome::Unresolved,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::entities::{AttemptError, GeoRecord};
    use crate::domain::value_objects::AccuracyRank;
    use std::time::Duration;

    fn spec(name: &str, rank: u8) -> ProviderSpec {
        ProviderSpec::new(
            name,
            format!("https://{}.test", name),
            AccuracyRank(rank),
            Duration::from_secs(5),
        )
    }

    fn record(country: &str, city: &str) -> GeoRecord {
        GeoRecord {
            country: Some(country.to_string()),
            city: Some(city.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_highest_rank_wins() {
        let attempts = vec![
            (
                spec("low", 1),
                AttemptResult::Success(record("Poland", "Krakow")),
            ),
            (
                spec("high", 3),
                AttemptResult::Success(record("Poland", "Warsaw")),
            ),
        ];

        let outcome = ResolutionSelector::select(attempts);
        match outcome {
            ResolutionOutcome::Resolved { record, rank } => {
                assert_eq!(rank, AccuracyRank(3));
                assert_eq!(record.city.as_deref(), Some("Warsaw"));
            }
            ResolutionOutcome::Unresolved => panic!("expected resolved"),
        }
    }

    #[test]
    fn test_single_success_wins_regardless_of_rank() {
        let attempts = vec![
            (spec("high", 3), AttemptResult::Failed(AttemptError::Timeout)),
            (
                spec("low", 1),
                AttemptResult::Success(record("Poland", "Krakow")),
            ),
        ];

        let outcome = ResolutionSelector::select(attempts);
        match outcome {
            ResolutionOutcome::Resolved { record, rank } => {
                assert_eq!(rank, AccuracyRank(1));
                assert_eq!(record.city.as_deref(), Some("Krakow"));
            }
            ResolutionOutcome::Unresolved => panic!("expected resolved"),
        }
    }

    #[test]
    fn test_tie_breaks_to_first_declared() {
        let attempts = vec![
            (
                spec("first", 2),
                AttemptResult::Success(record("Poland", "Warsaw")),
            ),
            (
                spec("second", 2),
                AttemptResult::Success(record("Poland", "Krakow")),
            ),
        ];

        let outcome = ResolutionSelector::select(attempts);
        match outcome {
            ResolutionOutcome::Resolved { record, .. } => {
                assert_eq!(record.city.as_deref(), Some("Warsaw"));
            }
            ResolutionOutcome::Unresolved => panic!("expected resolved"),
        }
    }

    #[test]
    fn test_tie_break_is_deterministic() {
        for _ in 0..20 {
            let attempts = vec![
                (spec("a", 2), AttemptResult::Success(record("DE", "Berlin"))),
                (spec("b", 2), AttemptResult::Success(record("DE", "Munich"))),
                (spec("c", 2), AttemptResult::Success(record("DE", "Hamburg"))),
            ];
            let outcome = ResolutionSelector::select(attempts);
            match outcome {
                ResolutionOutcome::Resolved { record, .. } => {
                    assert_eq!(record.city.as_deref(), Some("Berlin"));
                }
                ResolutionOutcome::Unresolved => panic!("expected resolved"),
            }
        }
    }

    #[test]
    fn test_all_failed_is_unresolved() {
        let attempts = vec![
            (spec("a", 3), AttemptResult::Failed(AttemptError::Timeout)),
            (
                spec("b", 2),
                AttemptResult::Failed(AttemptError::Transport("refused".to_string())),
            ),
            (
                spec("c", 1),
                AttemptResult::Failed(AttemptError::Data("bad json".to_string())),
            ),
        ];

        assert_eq!(
            ResolutionSelector::select(attempts),
            ResolutionOutcome::Unresolved
        );
    }

    #[test]
    fn test_all_empty_is_unresolved() {
        let attempts = vec![
            (spec("a", 3), AttemptResult::Empty),
            (spec("b", 2), AttemptResult::Empty),
        ];

        assert_eq!(
            ResolutionSelector::select(attempts),
            ResolutionOutcome::Unresolved
        );
    }

    #[test]
    fn test_mixed_empty_and_failed_is_unresolved() {
        let attempts = vec![
            (spec("a", 3), AttemptResult::Empty),
            (spec("b", 2), AttemptResult::Failed(AttemptError::Timeout)),
        ];

        assert_eq!(
            ResolutionSelector::select(attempts),
            ResolutionOutcome::Unresolved
        );
    }

    #[test]
    fn test_no_attempts_is_unresolved() {
        assert_eq!(
            ResolutionSelector::select(Vec::new()),
            ResolutionOutcome::Unresolved
        );
    }

    #[test]
    fn test_losing_records_are_discarded_not_merged() {
        // Winner has no postal code; a lower-ranked success does. The
        // winning record must come through verbatim, without the loser's
        // postal code leaking in.
        let winner = record("Poland", "Warsaw");
        let mut loser = record("Poland", "Krakow");
        loser.postal = Some("30-001".to_string());

        let attempts = vec![
            (spec("high", 3), AttemptResult::Success(winner.clone())),
            (spec("low", 2), AttemptResult::Success(loser)),
        ];

        let outcome = ResolutionSelector::select(attempts);
        match outcome {
            ResolutionOutcome::Resolved { record, .. } => {
                assert_eq!(record, winner);
                assert!(record.postal.is_none());
            }
            ResolutionOutcome::Unresolved => panic!("expected resolved"),
        }
    }

    #[test]
    fn test_scenario_three_providers() {
        // P1 rank 3 succeeds, P2 rank 2 succeeds, P3 rank 1 fails:
        // P1's record wins, the others are dropped entirely.
        let attempts = vec![
            (
                spec("p1", 3),
                AttemptResult::Success(record("Poland", "Warsaw")),
            ),
            (
                spec("p2", 2),
                AttemptResult::Success(record("Poland", "Krakow")),
            ),
            (
                spec("p3", 1),
                AttemptResult::Failed(AttemptError::Transport("unreachable".to_string())),
            ),
        ];

        let outcome = ResolutionSelector::select(attempts);
        match outcome {
            ResolutionOutcome::Resolved { record, rank } => {
                assert_eq!(rank, AccuracyRank(3));
                assert_eq!(record.country.as_deref(), Some("Poland"));
                assert_eq!(record.city.as_deref(), Some("Warsaw"));
            }
            ResolutionOutcome::Unresolved => panic!("expected resolved"),
        }
    }
}
