//! Seeding the first knockout round.

use crate::models::{DirectQualifierPair, DrawnPair, Team, TournamentError};
use rand::Rng;

/// Pair seed `i` with seed `n - 1 - i` (strongest against weakest), in seed order.
/// `seeds` must hold a power-of-two number of teams, at least two.
pub fn seeded_pairings(seeds: &[Team]) -> Result<Vec<(Team, Team)>, TournamentError> {
    let n = seeds.len();
    if n < 2 || !n.is_power_of_two() {
        return Err(TournamentError::InvalidBracketSize(n));
    }
    Ok((0..n / 2)
        .map(|i| (seeds[i].clone(), seeds[n - 1 - i].clone()))
        .collect())
}

/// Send one team of each pair left and the other right. Every pair is an independent
/// fair coin flip.
pub fn perform_draw<R: Rng + ?Sized>(pairs: &[DirectQualifierPair], rng: &mut R) -> Vec<DrawnPair> {
    pairs
        .iter()
        .map(|pair| {
            let (left, right) = if rng.gen_bool(0.5) {
                (pair.team_a.clone(), pair.team_b.clone())
            } else {
                (pair.team_b.clone(), pair.team_a.clone())
            };
            DrawnPair {
                pair_id: pair.pair_id,
                left,
                right,
            }
        })
        .collect()
}

/// Round of 16 pairings: left slot `i` is drawn left team `i` against left playoff winner `i`,
/// then the right half the same way. Left matches come first so the halves meet only in the final.
pub fn round_of_16_pairings(
    drawn: &[DrawnPair],
    left_winners: &[Team],
    right_winners: &[Team],
) -> Result<Vec<(Team, Team)>, TournamentError> {
    for winners in [left_winners, right_winners] {
        if winners.len() != drawn.len() {
            return Err(TournamentError::NotEnoughQualifiers {
                required: drawn.len(),
                found: winners.len(),
            });
        }
    }
    let left = drawn
        .iter()
        .zip(left_winners)
        .map(|(pair, winner)| (pair.left.clone(), winner.clone()));
    let right = drawn
        .iter()
        .zip(right_winners)
        .map(|(pair, winner)| (pair.right.clone(), winner.clone()));
    Ok(left.chain(right).collect())
}
