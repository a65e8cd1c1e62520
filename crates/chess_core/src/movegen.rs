use crate::board::{CastlingRights, DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS, Position};
use crate::types::*;

const QUEEN_DIRS: [(i8, i8); 8] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
];

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    // Filter illegal moves in-place by playing them on the mutable position.
    out.retain(|&mv| is_legal(pos, mv));
}

/// Legal captures and checking moves: the only moves quiescence looks at.
pub fn tactical_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    legal_moves_into(pos, out);
    out.retain(|&mv| pos.is_capture(mv) || pos.gives_check(mv));
}

/// Stops at the first legal move instead of building the full list.
pub fn has_legal_move(pos: &mut Position) -> bool {
    let mut pseudo = Vec::with_capacity(64);
    pseudo_moves(pos, &mut pseudo);
    pseudo.into_iter().any(|mv| is_legal(pos, mv))
}

fn is_legal(pos: &mut Position, mv: Move) -> bool {
    let mover = pos.side_to_move;
    let undo = pos.make_move(mv);
    let illegal = pos.in_check(mover);
    pos.unmake_move(mv, undo);
    !illegal
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move;
    for from in 0..64u8 {
        let Some(pc) = pos.piece_at(from) else {
            continue;
        };
        if pc.color != us {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, us, out),
            PieceKind::Knight => gen_steps(pos, from, us, &KNIGHT_DELTAS, out),
            PieceKind::Bishop => gen_slider(pos, from, us, &DIAGONALS, out),
            PieceKind::Rook => gen_slider(pos, from, us, &ORTHOGONALS, out),
            PieceKind::Queen => gen_slider(pos, from, us, &QUEEN_DIRS, out),
            PieceKind::King => {
                gen_steps(pos, from, us, &KING_DELTAS, out);
                gen_castle(pos, from, us, out);
            }
        }
    }
}

/// Pushes a pawn move, expanding it into the four promotions on the last rank.
fn push_pawn_move(from: u8, to: u8, promo_rank: i8, out: &mut Vec<Move>) {
    if rank_of(to) == promo_rank {
        out.extend(
            PieceKind::PROMOTIONS
                .iter()
                .map(|&kind| Move::with_promo(from, to, kind)),
        );
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let dir = c.pawn_dir();
    let (start_rank, promo_rank) = match c {
        Color::White => (1, 7),
        Color::Black => (6, 0),
    };

    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(from, to, promo_rank, out);
        if r == start_rank
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2));
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != c => push_pawn_move(from, to, promo_rank, out),
            None if pos.en_passant == Some(to) => out.push(Move {
                is_en_passant: true,
                ..Move::new(from, to)
            }),
            _ => {}
        }
    }
}

fn gen_steps(pos: &Position, from: u8, c: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr)
            && pos.piece_at(to).is_none_or(|pc| pc.color != c)
        {
            out.push(Move::new(from, to));
        }
    }
}

fn gen_slider(pos: &Position, from: u8, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) => {
                    if pc.color != c {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            f += df;
            r += dr;
        }
    }
}

struct CastleRule {
    right: u8,
    king_from: u8,
    king_to: u8,
    /// Squares between king and rook
    empty: &'static [u8],
    /// Squares the king passes over or lands on
    crossed: [u8; 2],
}

const WHITE_CASTLES: [CastleRule; 2] = [
    CastleRule {
        right: CastlingRights::WHITE_KING,
        king_from: 4,
        king_to: 6,
        empty: &[5, 6],
        crossed: [5, 6],
    },
    CastleRule {
        right: CastlingRights::WHITE_QUEEN,
        king_from: 4,
        king_to: 2,
        empty: &[1, 2, 3],
        crossed: [3, 2],
    },
];

const BLACK_CASTLES: [CastleRule; 2] = [
    CastleRule {
        right: CastlingRights::BLACK_KING,
        king_from: 60,
        king_to: 62,
        empty: &[61, 62],
        crossed: [61, 62],
    },
    CastleRule {
        right: CastlingRights::BLACK_QUEEN,
        king_from: 60,
        king_to: 58,
        empty: &[57, 58, 59],
        crossed: [59, 58],
    },
];

fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let rules = match c {
        Color::White => &WHITE_CASTLES,
        Color::Black => &BLACK_CASTLES,
    };

    let enemy = c.other();
    let mut checked = None;
    for rule in rules {
        if from != rule.king_from || !pos.castling.has(rule.right) {
            continue;
        }
        if !rule.empty.iter().all(|&s| pos.piece_at(s).is_none()) {
            continue;
        }
        // Can't castle out of check; evaluated lazily, once.
        if *checked.get_or_insert_with(|| pos.in_check(c)) {
            return;
        }
        if rule.crossed.iter().any(|&s| pos.is_square_attacked(s, enemy)) {
            continue;
        }
        out.push(Move {
            is_castle: true,
            ..Move::new(rule.king_from, rule.king_to)
        });
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
