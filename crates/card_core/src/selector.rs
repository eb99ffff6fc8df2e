use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shared::domain::SubjectId;

use crate::error::CardError;

/// Picks the next subject to show, never the one just shown unless it is the
/// only candidate left.
pub struct RandomSelector<R = ChaCha8Rng> {
    rng: R,
}

impl RandomSelector<ChaCha8Rng> {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl<R: Rng> RandomSelector<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn select(
        &mut self,
        candidates: &[SubjectId],
        excluding: Option<&SubjectId>,
    ) -> Result<SubjectId, CardError> {
        let Some(first) = candidates.first() else {
            return Err(CardError::EmptyCandidatePool);
        };

        let eligible: Vec<&SubjectId> = candidates
            .iter()
            .filter(|candidate| Some(*candidate) != excluding)
            .collect();

        // A lone candidate equal to `excluding` is returned anyway.
        let chosen = eligible.choose(&mut self.rng).copied().unwrap_or(first);
        Ok(chosen.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn ids(raw: &[&str]) -> Vec<SubjectId> {
        raw.iter().map(|id| SubjectId::new(*id)).collect()
    }

    #[test]
    fn empty_pool_is_an_error() {
        let mut selector = RandomSelector::from_seed(1);
        assert!(matches!(
            selector.select(&[], None),
            Err(CardError::EmptyCandidatePool)
        ));
    }

    #[test]
    fn single_candidate_is_returned_even_when_excluded() {
        let mut selector = RandomSelector::from_seed(1);
        let only = ids(&["x"]);
        let chosen = selector.select(&only, Some(&only[0])).expect("select");
        assert_eq!(chosen, only[0]);
    }

    #[test]
    fn excluded_id_never_returned_with_two_or_more_candidates() {
        let candidates = ids(&["a", "b", "c"]);
        for seed in 0..200 {
            let mut selector = RandomSelector::from_seed(seed);
            for excluded in &candidates {
                let chosen = selector.select(&candidates, Some(excluded)).expect("select");
                assert_ne!(&chosen, excluded, "seed {seed}");
            }
        }

        let pair = ids(&["a", "b"]);
        for seed in 0..200 {
            let mut selector = RandomSelector::from_seed(seed);
            let chosen = selector.select(&pair, Some(&pair[0])).expect("select");
            assert_eq!(chosen, pair[1], "seed {seed}");
        }
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let candidates = ids(&["a", "b", "c", "d"]);
        let mut left = RandomSelector::from_seed(42);
        let mut right = RandomSelector::from_seed(42);
        for _ in 0..20 {
            assert_eq!(
                left.select(&candidates, None).expect("left"),
                right.select(&candidates, None).expect("right")
            );
        }
    }

    #[test]
    fn every_eligible_candidate_is_reachable() {
        let candidates = ids(&["a", "b", "c", "d"]);
        let mut selector = RandomSelector::from_seed(7);
        let seen: HashSet<SubjectId> = (0..200)
            .map(|_| selector.select(&candidates, Some(&candidates[0])).expect("select"))
            .collect();
        assert_eq!(seen, candidates[1..].iter().cloned().collect());
    }
}
