//! Tapered static evaluation.

use chess_core::{file_of, Color, PieceKind, Position};

use crate::pst::pst;
use crate::score::{mated_in, MATED_STATIC};

pub const DRAW: i32 = 0;

const BISHOP_PAIR: (i32, i32) = (30, 40);
const ROOK_OPEN_FILE: i32 = 15;
const ROOK_SEMI_OPEN_FILE: i32 = 8;
const DOUBLED_PAWN: i32 = 15;
const ISOLATED_PAWN: i32 = 12;
const TEMPO: i32 = 10;
const MAX_PHASE: i32 = 24;

/// Middlegame and endgame material values.
#[inline]
pub fn piece_value(kind: PieceKind) -> (i32, i32) {
    match kind {
        PieceKind::Pawn => (100, 120),
        PieceKind::Knight => (320, 300),
        PieceKind::Bishop => (330, 330),
        PieceKind::Rook => (500, 520),
        PieceKind::Queen => (900, 900),
        PieceKind::King => (0, 0),
    }
}

/// Evaluates the position in centipawns from White's point of view.
///
/// A checkmated side gets `∓(MATE - 1)`; stalemate, insufficient material and
/// a claimable fifty-move draw are 0. Everything else is material plus
/// piece-square tables blended by game phase, with pawn structure, rook files,
/// bishop pair, mobility and a tempo bonus.
pub fn evaluate(pos: &Position) -> i32 {
    let stm = pos.side_to_move;
    let stm_moves = pos.legal_move_count_for(stm) as i32;
    if stm_moves == 0 {
        return if pos.in_check(stm) {
            -stm.sign() * MATED_STATIC
        } else {
            DRAW
        };
    }
    if pos.is_insufficient_material() || pos.is_fifty_move_draw() {
        return DRAW;
    }
    let other_moves = pos.legal_move_count_for(stm.other()) as i32;
    let mobility = (stm_moves - other_moves) * stm.sign();

    let mut mg = mobility;
    let mut eg = 0;
    let mut side = [SideCounts::default(); 2];

    for (sq, pc) in pos.board.iter().enumerate() {
        let Some(pc) = pc else { continue };
        let sq = sq as u8;
        let sign = pc.color.sign();
        let (vm, ve) = piece_value(pc.kind);
        let (pm, pe) = pst(pc.kind, pc.color, sq);
        mg += sign * (vm + pm);
        eg += sign * (ve + pe);

        let counts = &mut side[pc.color.idx()];
        let file = file_of(sq) as usize;
        match pc.kind {
            PieceKind::Pawn => counts.pawns_on_file[file] += 1,
            PieceKind::Knight => counts.minors += 1,
            PieceKind::Bishop => {
                counts.minors += 1;
                counts.bishops += 1;
            }
            PieceKind::Rook => {
                counts.rooks += 1;
                counts.rook_files.push(file);
            }
            PieceKind::Queen => counts.queens += 1,
            PieceKind::King => {}
        }
    }

    for color in Color::BOTH {
        let own = &side[color.idx()];
        let enemy = &side[color.other().idx()];
        let sign = color.sign();
        if own.bishops >= 2 {
            mg += sign * BISHOP_PAIR.0;
            eg += sign * BISHOP_PAIR.1;
        }
        mg += sign * rook_file_bonus(own, enemy);
        mg += sign * pawn_structure(&own.pawns_on_file);
    }

    let phase = game_phase(&side);
    // Truncating division keeps evaluate(p) == -evaluate(mirror(p)) exact.
    let mut score = (mg * phase + eg * (MAX_PHASE - phase)) / MAX_PHASE;
    score += stm.sign() * TEMPO;
    score
}

/// Static score for the side to move at `ply`, with a mate rescaled so that
/// nearer mates score further from zero.
pub fn relative_eval(pos: &Position, ply: usize) -> i32 {
    let score = evaluate(pos) * pos.side_to_move.sign();
    if score == -MATED_STATIC {
        mated_in(ply)
    } else {
        score
    }
}

#[derive(Clone, Copy, Default)]
struct SideCounts {
    pawns_on_file: [u8; 8],
    rook_files: RookFiles,
    minors: i32,
    bishops: i32,
    rooks: i32,
    queens: i32,
}

/// Files of up to ten rooks, enough for every legal promotion sequence.
#[derive(Clone, Copy, Default)]
struct RookFiles {
    files: [u8; 10],
    len: usize,
}

impl RookFiles {
    fn push(&mut self, file: usize) {
        if self.len < self.files.len() {
            self.files[self.len] = file as u8;
            self.len += 1;
        }
    }

    fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.files[..self.len].iter().map(|&f| f as usize)
    }
}

fn rook_file_bonus(own: &SideCounts, enemy: &SideCounts) -> i32 {
    own.rook_files
        .iter()
        .map(|f| match (own.pawns_on_file[f], enemy.pawns_on_file[f]) {
            (0, 0) => ROOK_OPEN_FILE,
            (0, _) => ROOK_SEMI_OPEN_FILE,
            _ => 0,
        })
        .sum()
}

fn pawn_structure(files: &[u8; 8]) -> i32 {
    let mut score = 0;
    for f in 0..8 {
        let n = files[f] as i32;
        if n == 0 {
            continue;
        }
        score -= DOUBLED_PAWN * (n - 1);
        let left = f > 0 && files[f - 1] > 0;
        let right = f < 7 && files[f + 1] > 0;
        if !left && !right {
            score -= ISOLATED_PAWN * n;
        }
    }
    score
}

/// 24 with all minors and majors on the board, 0 with none left.
fn game_phase(side: &[SideCounts; 2]) -> i32 {
    let units: i32 = side
        .iter()
        .map(|s| s.minors + 2 * s.rooks + 4 * s.queens)
        .sum();
    (units * MAX_PHASE / 16).min(MAX_PHASE)
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
