//! Random draw of a fixed number of participants who want to play.

use crate::models::{Participant, ParticipantId, SelectionError};
use rand::rngs::ThreadRng;
use rand::Rng;
use std::collections::HashSet;

/// Number of participants drawn into bracket play unless configured otherwise.
pub const DEFAULT_QUOTA: usize = 16;

/// Ids chosen by one draw. Built fresh per draw, handed to the committer, then dropped.
pub type SelectionSet = HashSet<ParticipantId>;

/// Uniform integer source.
pub trait RandomSource {
    /// Integer in `[0, max_inclusive]`. `max_inclusive = 0` must return 0.
    fn next_int(&mut self, max_inclusive: usize) -> usize;
}

/// `RandomSource` backed by any `rand` generator.
#[derive(Clone, Debug)]
pub struct RngSource<R>(pub R);

impl RngSource<ThreadRng> {
    pub fn thread() -> Self {
        RngSource(rand::thread_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_int(&mut self, max_inclusive: usize) -> usize {
        self.0.gen_range(0..=max_inclusive)
    }
}

/// Draw `quota` distinct participants with `wants_to_play` from `filtered`.
///
/// 1. Fail with `InsufficientCandidates` if fewer than `quota` are eligible (nothing else happens).
/// 2. Pick indices uniformly over the whole filtered list, keep eligible picks, until `quota` ids.
///
/// Ineligible picks are rejected rather than sampling the eligible subset directly, so the
/// number of draws grows as the eligible share shrinks.
pub fn draw<R: RandomSource + ?Sized>(
    filtered: &[Participant],
    quota: usize,
    rng: &mut R,
) -> Result<SelectionSet, SelectionError> {
    check_eligibility(filtered, quota)?;
    Ok(sample(filtered, quota, rng))
}

/// Eligibility gate. Returns the number of eligible participants.
pub fn check_eligibility(filtered: &[Participant], quota: usize) -> Result<usize, SelectionError> {
    if quota == 0 {
        return Err(SelectionError::InvalidQuota);
    }
    let eligible = filtered.iter().filter(|p| p.is_eligible()).count();
    if eligible < quota {
        return Err(SelectionError::InsufficientCandidates {
            required: quota,
            eligible,
        });
    }
    Ok(eligible)
}

/// Rejection sampling loop. Caller must have passed `check_eligibility` for the same
/// list and quota, otherwise this never terminates.
pub fn sample<R: RandomSource + ?Sized>(filtered: &[Participant], quota: usize, rng: &mut R) -> SelectionSet {
    let mut selected = SelectionSet::with_capacity(quota);
    let Some(max_index) = filtered.len().checked_sub(1) else {
        return selected;
    };
    let mut draws = 0usize;
    while selected.len() < quota {
        draws += 1;
        // Out-of-range picks from a misbehaving source are treated as rejections.
        if let Some(p) = filtered.get(rng.next_int(max_index)) {
            if p.is_eligible() {
                selected.insert(p.id.clone());
            }
        }
    }
    log::debug!("Drew {} participants in {} picks", quota, draws);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed sequence of indices.
    struct Scripted(std::vec::IntoIter<usize>);

    impl RandomSource for Scripted {
        fn next_int(&mut self, _max_inclusive: usize) -> usize {
            self.0.next().expect("script exhausted")
        }
    }

    #[test]
    fn rejected_and_repeated_picks_do_not_count() {
        let roster = vec![
            Participant::new("A", "a@x", "a").wanting_to_play(true),
            Participant::new("B", "b@x", "b"),
            Participant::new("C", "c@x", "c").wanting_to_play(true),
        ];
        // 1 ineligible, 0 twice, 99 out of range, then 2.
        let mut rng = Scripted(vec![1, 0, 0, 99, 2].into_iter());
        let got = draw(&roster, 2, &mut rng).unwrap();
        let want: SelectionSet = [roster[0].id.clone(), roster[2].id.clone()].into();
        assert_eq!(got, want);
    }

    #[test]
    fn zero_quota_is_rejected() {
        let mut rng = RngSource::thread();
        assert_eq!(draw(&[], 0, &mut rng), Err(SelectionError::InvalidQuota));
    }

    #[test]
    fn rng_source_accepts_zero_bound() {
        let mut rng = RngSource::thread();
        for _ in 0..100 {
            assert_eq!(rng.next_int(0), 0);
        }
    }
}
