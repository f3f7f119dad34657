//! Home-and-away ties: two single matches combined into an aggregate.

use crate::logic::rating::{simulate_match, RatingParams};
use crate::models::{LegScore, Side, Team, TwoLegScore};
use rand::Rng;

/// Simulate both legs. Leg 1 is hosted by B, leg 2 by A; the host is always the first
/// argument to the rating model. A level aggregate is settled by a fair coin flip.
pub fn simulate_two_leg<R: Rng + ?Sized>(
    rng: &mut R,
    team_a: &Team,
    team_b: &Team,
    params: &RatingParams,
) -> (TwoLegScore, Side) {
    let (home, away) = simulate_match(rng, team_b, team_a, params);
    let leg1 = LegScore { home, away };
    let (home, away) = simulate_match(rng, team_a, team_b, params);
    let leg2 = LegScore { home, away };

    let score = TwoLegScore::from_legs(leg1, leg2);
    let winner = if score.agg_a > score.agg_b {
        Side::A
    } else if score.agg_b > score.agg_a {
        Side::B
    } else if rng.gen_bool(0.5) {
        Side::A
    } else {
        Side::B
    };
    (score, winner)
}

/// Display score for a manually picked tie winner: 3-0 on aggregate.
pub fn manual_two_leg(winner: Side) -> TwoLegScore {
    match winner {
        Side::A => TwoLegScore::from_legs(
            LegScore { home: 0, away: 2 },
            LegScore { home: 1, away: 0 },
        ),
        Side::B => TwoLegScore::from_legs(
            LegScore { home: 1, away: 0 },
            LegScore { home: 0, away: 2 },
        ),
    }
}
