//! Move ordering: hash move, tactical moves by MVV-LVA, promotions, killers
//! and the history heuristic.

use std::cmp::Reverse;

use chess_core::{Move, PieceKind, Position};

use crate::score::MAX_PLY;

pub const TT_MOVE_BONUS: i32 = 10_000_000;
pub const PROMOTION_BONUS: i32 = 150_000;
pub const TACTICAL_BONUS: i32 = 100_000;
pub const KILLER_BONUS: i32 = 50_000;

/// Piece values used only for ordering. The king is large so that captures by
/// the king sort last among captures of the same victim.
#[inline]
pub fn order_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 300,
        PieceKind::Bishop => 325,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20_000,
    }
}

/// Most valuable victim, least valuable attacker. Zero for non-captures.
pub fn mvv_lva(pos: &Position, mv: Move) -> i32 {
    let victim = if mv.is_en_passant {
        Some(PieceKind::Pawn)
    } else {
        pos.piece_at(mv.to).map(|p| p.kind)
    };
    match (victim, pos.piece_at(mv.from)) {
        (Some(v), Some(a)) => order_value(v) * 10 - order_value(a.kind),
        _ => 0,
    }
}

/// Up to two quiet moves per ply that caused a beta cutoff, newest first.
#[derive(Debug, Clone)]
pub struct KillerTable {
    slots: Vec<[Option<Move>; 2]>,
}

impl KillerTable {
    pub fn new() -> Self {
        Self {
            slots: vec![[None; 2]; MAX_PLY],
        }
    }

    pub fn store(&mut self, ply: usize, mv: Move) {
        let Some(slot) = self.slots.get_mut(ply) else {
            return;
        };
        if slot.contains(&Some(mv)) {
            return;
        }
        slot[1] = slot[0];
        slot[0] = Some(mv);
    }

    pub fn get(&self, ply: usize) -> [Option<Move>; 2] {
        self.slots.get(ply).copied().unwrap_or([None; 2])
    }

    pub fn contains(&self, ply: usize, mv: Move) -> bool {
        self.get(ply).contains(&Some(mv))
    }

    pub fn clear(&mut self) {
        self.slots.fill([None; 2]);
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulated credit per (from, to) for quiet moves that raised alpha.
#[derive(Debug, Clone)]
pub struct HistoryTable(Box<[[i32; 64]; 64]>);

impl HistoryTable {
    pub fn new() -> Self {
        Self(Box::new([[0; 64]; 64]))
    }

    #[inline]
    pub fn get(&self, mv: Move) -> i32 {
        self.0[mv.from as usize][mv.to as usize]
    }

    /// Credits `depth²`.
    pub fn reward(&mut self, mv: Move, depth: i32) {
        let cell = &mut self.0[mv.from as usize][mv.to as usize];
        *cell = cell.saturating_add(depth * depth);
    }

    pub fn clear(&mut self) {
        for row in self.0.iter_mut() {
            row.fill(0);
        }
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Ranks moves for one node. Ordering only affects how much gets pruned,
/// never the value a full-window search returns.
pub struct MoveOrderer<'a> {
    pub killers: &'a KillerTable,
    pub history: &'a HistoryTable,
}

impl MoveOrderer<'_> {
    /// Priority of `mv` at `ply`; higher is searched earlier.
    pub fn score(&self, pos: &mut Position, mv: Move, tt_move: Option<Move>, ply: usize) -> i32 {
        let mut score = 0;
        if tt_move == Some(mv) {
            score += TT_MOVE_BONUS;
        }
        if pos.is_capture(mv) || pos.gives_check(mv) {
            score += TACTICAL_BONUS + mvv_lva(pos, mv);
        }
        if let Some(promo) = mv.promo {
            score += PROMOTION_BONUS + order_value(promo);
        }
        if self.killers.contains(ply, mv) {
            score += KILLER_BONUS;
        }
        score + self.history.get(mv)
    }

    /// Sorts `moves` by descending priority. Equal priorities keep their
    /// generation order.
    pub fn order(&self, pos: &mut Position, moves: &mut [Move], tt_move: Option<Move>, ply: usize) {
        moves.sort_by_cached_key(|&mv| Reverse(self.score(pos, mv, tt_move, ply)));
    }
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
