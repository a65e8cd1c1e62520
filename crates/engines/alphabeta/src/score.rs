//! Score scale shared by evaluation and search.
//!
//! Scores are centipawns. Mate scores sit just below [`MATE`] and encode the
//! distance to mate in plies, so shorter mates compare higher.

/// Base value for checkmate.
pub const MATE: i32 = 100_000;
/// Window bound; strictly larger than any reachable score.
pub const INFINITY: i32 = 1_000_000;
/// Deepest ply the search tables are sized for.
pub const MAX_PLY: usize = 128;

/// Scores at or beyond this magnitude announce a forced mate.
pub const MATE_BOUND: i32 = MATE - MAX_PLY as i32;

/// What [`crate::evaluate`] reports for a mated position, before the search
/// attaches a distance.
pub const MATED_STATIC: i32 = MATE - 1;

/// True for scores that announce a forced mate. Window bounds at
/// [`INFINITY`] are not mate scores.
#[inline]
pub fn is_mate_score(score: i32) -> bool {
    (MATE_BOUND..=MATE).contains(&score.abs())
}

/// Score of the side to move when it is checkmated at `ply`.
#[inline]
pub fn mated_in(ply: usize) -> i32 {
    -(MATE - ply as i32)
}

/// Score for delivering mate at `ply`.
#[inline]
pub fn mate_in(ply: usize) -> i32 {
    MATE - ply as i32
}

/// Plies until mate, positive when the side to move mates.
pub fn mate_distance(score: i32) -> Option<i32> {
    if !is_mate_score(score) {
        return None;
    }
    Some(if score > 0 { MATE - score } else { -(MATE + score) })
}

/// Converts a root-relative mate score into one relative to the node at `ply`
/// before it goes into the transposition table.
#[inline]
pub fn to_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_BOUND {
        score + ply as i32
    } else if score <= -MATE_BOUND {
        score - ply as i32
    } else {
        score
    }
}

/// Inverse of [`to_tt`] for a probe at `ply`.
#[inline]
pub fn from_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_BOUND {
        score - ply as i32
    } else if score <= -MATE_BOUND {
        score + ply as i32
    } else {
        score
    }
}

#[cfg(test)]
#[path = "score_tests.rs"]
mod score_tests;
