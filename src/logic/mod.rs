//! Simulator logic: ratings, tables, qualification, brackets, and the per-competition flows.
//!
//! `finals` drives the World Cup knockout and `champions_league` the Champions League; both
//! expose the same operation names, so use them through their module paths.

pub mod bracket;
pub mod champions_league;
pub mod finals;
mod fixture_wheel;
pub mod group_play;
pub mod knockout;
pub mod qualification;
pub mod rating;
pub mod setup;
pub mod standings;
pub mod two_leg;

pub use knockout::Decision;
pub use rating::{simulate_match, RatingParams, TierBonuses};
pub use setup::{start_champions_league, start_world_cup};
