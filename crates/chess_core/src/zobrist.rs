//! Zobrist hashing for chess positions.
//!
//! `Position` keeps its hash up to date incrementally in `make_move`, so the
//! search can use it as a transposition-table key at no extra cost. The full
//! recomputation in [`full_hash`] is the reference the incremental value must
//! always match.
//!
//! The hash covers piece placement, side to move, castling rights and the
//! en passant file. Move counters are deliberately left out.

use crate::board::Position;
use crate::types::{Color, Piece, file_of};

pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// XORed in when Black is to move
    pub black_to_move: u64,
    /// One key per castling-rights bitmask (0..16)
    pub castling: [u64; 16],
    /// En passant target file (0-7)
    pub en_passant: [u64; 8],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// Keys from a fixed-seed splitmix64 stream, built at compile time.
    pub const fn new() -> Self {
        const fn splitmix64(state: &mut u64) -> u64 {
            *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = *state;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^ (z >> 31)
        }

        let mut state = 0x5EED_C0DE_2025_0001u64;

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut kind = 0;
            while kind < 6 {
                let mut sq = 0;
                while sq < 64 {
                    pieces[color][kind][sq] = splitmix64(&mut state);
                    sq += 1;
                }
                kind += 1;
            }
            color += 1;
        }

        let black_to_move = splitmix64(&mut state);

        let mut castling = [0u64; 16];
        let mut i = 0;
        while i < 16 {
            castling[i] = splitmix64(&mut state);
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            en_passant[i] = splitmix64(&mut state);
            i += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }

    #[inline(always)]
    pub fn castling_key(&self, rights: u8) -> u64 {
        self.castling[(rights & 0x0F) as usize]
    }

    /// Key for an en passant target square, or 0 when there is none.
    #[inline(always)]
    pub fn ep_key(&self, ep: Option<u8>) -> u64 {
        match ep {
            Some(sq) => self.en_passant[file_of(sq) as usize],
            None => 0,
        }
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

/// Hash computed from scratch.
pub fn full_hash(pos: &Position) -> u64 {
    let mut h = 0u64;
    for sq in 0..64u8 {
        if let Some(pc) = pos.piece_at(sq) {
            h ^= ZOBRIST.piece_key(pc, sq);
        }
    }
    if pos.side_to_move == Color::Black {
        h ^= ZOBRIST.black_to_move;
    }
    h ^= ZOBRIST.castling_key(pos.castling.bits());
    h ^= ZOBRIST.ep_key(pos.en_passant);
    h
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
