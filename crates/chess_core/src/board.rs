use crate::error::FenError;
use crate::movegen::{has_legal_move, legal_moves_into};
use crate::types::*;
use crate::zobrist::{ZOBRIST, full_hash};

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Castling rights packed as a 4-bit set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WHITE_KING: u8 = 0b0001;
    pub const WHITE_QUEEN: u8 = 0b0010;
    pub const BLACK_KING: u8 = 0b0100;
    pub const BLACK_QUEEN: u8 = 0b1000;

    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn has(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    pub fn insert(&mut self, flag: u8) {
        self.0 |= flag;
    }

    pub fn remove(&mut self, flags: u8) {
        self.0 &= !flags;
    }

    /// Rights that die when anything moves from or to `sq`.
    fn lost_on(sq: u8) -> u8 {
        match sq {
            0 => Self::WHITE_QUEEN,
            4 => Self::WHITE_KING | Self::WHITE_QUEEN,
            7 => Self::WHITE_KING,
            56 => Self::BLACK_QUEEN,
            60 => Self::BLACK_KING | Self::BLACK_QUEEN,
            63 => Self::BLACK_KING,
            _ => 0,
        }
    }

    /// Same rights with the colors swapped.
    pub fn mirrored(self) -> Self {
        CastlingRights(((self.0 & 0b0011) << 2) | ((self.0 >> 2) & 0b0011))
    }
}

/// Why a game has ended, in the order the checks are made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    /// Maintained by make/unmake; call `refresh_hash` after editing fields directly.
    hash: u64,
}

#[derive(Clone, Debug)]
pub struct Undo {
    captured: Option<Piece>,
    moved_piece: Piece,
    castling: CastlingRights,
    en_passant: Option<u8>,
    halfmove_clock: u32,
    fullmove_number: u32,
    rook_move: Option<(u8, u8)>,
    ep_captured_sq: Option<u8>,
    hash: u64,
}

impl Undo {
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

#[derive(Clone, Copy, Debug)]
pub struct NullUndo {
    en_passant: Option<u8>,
    hash: u64,
}

impl Position {
    pub fn startpos() -> Self {
        let mut p = Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
        };

        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece::new(Color::White, kind));
            p.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            p.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            p.board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        p.refresh_hash();
        p
    }

    /// Parses Forsyth-Edwards Notation. The two move counters are optional.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let mut board = [None; 64];
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: usize = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as usize;
                } else {
                    let pc = Piece::from_char(ch).ok_or(FenError::InvalidPiece(ch))?;
                    if file < 8
                        && let Some(s) = sq(file as i8, rank)
                    {
                        board[s as usize] = Some(pc);
                    }
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::RankWidth {
                    rank: 8 - rank_idx,
                    files: file,
                });
            }
        }

        for color in Color::BOTH {
            let kings = board
                .iter()
                .flatten()
                .filter(|pc| pc.color == color && pc.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(FenError::KingCount(color, kings));
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSideToMove(other.to_string())),
        };

        let mut castling = CastlingRights::NONE;
        if parts[2] != "-" {
            for c in parts[2].chars() {
                let flag = match c {
                    'K' => CastlingRights::WHITE_KING,
                    'Q' => CastlingRights::WHITE_QUEEN,
                    'k' => CastlingRights::BLACK_KING,
                    'q' => CastlingRights::BLACK_QUEEN,
                    _ => return Err(FenError::InvalidCastling(parts[2].to_string())),
                };
                castling.insert(flag);
            }
        }

        let en_passant = match parts[3] {
            "-" => None,
            text => match coord_to_sq(text) {
                Some(s) if rank_of(s) == 2 || rank_of(s) == 5 => Some(s),
                _ => return Err(FenError::InvalidEnPassant(text.to_string())),
            },
        };

        let counter = |text: Option<&&str>, default: u32| -> Result<u32, FenError> {
            match text {
                None => Ok(default),
                Some(t) => t
                    .parse()
                    .map_err(|_| FenError::InvalidCounter(t.to_string())),
            }
        };
        let halfmove_clock = counter(parts.get(4), 0)?;
        let fullmove_number = counter(parts.get(5), 1)?;

        let mut pos = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            hash: 0,
        };
        pos.refresh_hash();
        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board[rank * 8 + file] {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        if self.castling == CastlingRights::NONE {
            out.push('-');
        } else {
            for (flag, ch) in [
                (CastlingRights::WHITE_KING, 'K'),
                (CastlingRights::WHITE_QUEEN, 'Q'),
                (CastlingRights::BLACK_KING, 'k'),
                (CastlingRights::BLACK_QUEEN, 'q'),
            ] {
                if self.castling.has(flag) {
                    out.push(ch);
                }
            }
        }

        out.push(' ');
        match self.en_passant {
            Some(s) => out.push_str(&sq_to_coord(s)),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }

    /// The same position seen from the other side: ranks reversed, colors
    /// swapped, the other side to move.
    pub fn mirror(&self) -> Position {
        let mut board = [None; 64];
        for s in 0..64u8 {
            if let Some(pc) = self.board[s as usize] {
                board[mirror_sq(s) as usize] = Some(Piece::new(pc.color.other(), pc.kind));
            }
        }
        let mut pos = Position {
            board,
            side_to_move: self.side_to_move.other(),
            castling: self.castling.mirrored(),
            en_passant: self.en_passant.map(mirror_sq),
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            hash: 0,
        };
        pos.refresh_hash();
        pos
    }

    /// Zobrist key of the current position.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn refresh_hash(&mut self) {
        self.hash = full_hash(self);
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        self.board
            .iter()
            .position(|p| *p == Some(Piece::new(c, PieceKind::King)))
            .map(|i| i as u8)
    }

    #[inline]
    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    /// Places a piece and folds it into the hash.
    fn put(&mut self, sq: u8, pc: Piece) {
        self.hash ^= ZOBRIST.piece_key(pc, sq);
        self.board[sq as usize] = Some(pc);
    }

    /// Lifts whatever stands on `sq`, removing it from the hash.
    fn take(&mut self, sq: u8) -> Option<Piece> {
        let pc = self.board[sq as usize].take();
        if let Some(p) = pc {
            self.hash ^= ZOBRIST.piece_key(p, sq);
        }
        pc
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(k) => self.is_square_attacked(k, c.other()),
            None => false,
        }
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);
        let holds = |s: Option<u8>, kinds: &[PieceKind]| -> bool {
            s.and_then(|s| self.piece_at(s))
                .is_some_and(|pc| pc.color == by && kinds.contains(&pc.kind))
        };

        // A pawn of `by` attacks diagonally forward, so it sits one rank behind.
        let back = tr - by.pawn_dir();
        if holds(sq(tf - 1, back), &[PieceKind::Pawn]) || holds(sq(tf + 1, back), &[PieceKind::Pawn])
        {
            return true;
        }
        if KNIGHT_DELTAS
            .iter()
            .any(|(df, dr)| holds(sq(tf + df, tr + dr), &[PieceKind::Knight]))
        {
            return true;
        }
        if KING_DELTAS
            .iter()
            .any(|(df, dr)| holds(sq(tf + df, tr + dr), &[PieceKind::King]))
        {
            return true;
        }

        let ray_hits = |dirs: &[(i8, i8)], kinds: &[PieceKind]| -> bool {
            dirs.iter().any(|(df, dr)| {
                let (mut f, mut r) = (tf + df, tr + dr);
                while let Some(s) = sq(f, r) {
                    if let Some(pc) = self.piece_at(s) {
                        return pc.color == by && kinds.contains(&pc.kind);
                    }
                    f += df;
                    r += dr;
                }
                false
            })
        };
        ray_hits(&DIAGONALS, &[PieceKind::Bishop, PieceKind::Queen])
            || ray_hits(&ORTHOGONALS, &[PieceKind::Rook, PieceKind::Queen])
    }

    /// True if `mv` takes a piece, en passant included.
    #[inline]
    pub fn is_capture(&self, mv: Move) -> bool {
        mv.is_en_passant || self.board[mv.to as usize].is_some()
    }

    /// Plays `mv` and reports whether it leaves the opponent in check.
    pub fn gives_check(&mut self, mv: Move) -> bool {
        let undo = self.make_move(mv);
        let check = self.in_check(self.side_to_move);
        self.unmake_move(mv, undo);
        check
    }

    /// Does `c` own anything besides pawns and the king?
    pub fn has_non_pawn_material(&self, c: Color) -> bool {
        self.board.iter().flatten().any(|pc| {
            pc.color == c && !matches!(pc.kind, PieceKind::Pawn | PieceKind::King)
        })
    }

    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = self.piece_at(from).expect("no piece on from-square");

        let mut undo = Undo {
            captured: None,
            moved_piece: moved,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            rook_move: None,
            ep_captured_sq: None,
            hash: self.hash,
        };

        self.hash ^= ZOBRIST.castling_key(self.castling.bits()) ^ ZOBRIST.ep_key(self.en_passant);
        self.en_passant = None;

        if mv.is_en_passant {
            let cs = sq(file_of(to), rank_of(to) - moved.color.pawn_dir())
                .expect("en passant victim square on board");
            undo.captured = self.take(cs);
            undo.ep_captured_sq = Some(cs);
        } else {
            undo.captured = self.take(to);
        }

        self.take(from);
        let last_rank = match moved.color {
            Color::White => 7,
            Color::Black => 0,
        };
        let placed = if moved.kind == PieceKind::Pawn && rank_of(to) == last_rank {
            Piece::new(moved.color, mv.promo.unwrap_or(PieceKind::Queen))
        } else {
            moved
        };
        self.put(to, placed);

        if mv.is_castle && moved.kind == PieceKind::King {
            let rook_squares = match (from, to) {
                (4, 6) => Some((7, 5)),
                (4, 2) => Some((0, 3)),
                (60, 62) => Some((63, 61)),
                (60, 58) => Some((56, 59)),
                _ => None,
            };
            if let Some((rf, rt)) = rook_squares
                && let Some(rook) = self.take(rf)
            {
                self.put(rt, rook);
                undo.rook_move = Some((rf, rt));
            }
        }

        self.castling
            .remove(CastlingRights::lost_on(from) | CastlingRights::lost_on(to));

        if moved.kind == PieceKind::Pawn && (rank_of(to) - rank_of(from)).abs() == 2 {
            self.en_passant = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
        }

        self.halfmove_clock = if moved.kind == PieceKind::Pawn || undo.captured.is_some() {
            0
        } else {
            self.halfmove_clock + 1
        };
        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();

        self.hash ^= ZOBRIST.castling_key(self.castling.bits())
            ^ ZOBRIST.ep_key(self.en_passant)
            ^ ZOBRIST.black_to_move;
        undo
    }

    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.hash = undo.hash;

        if let Some((rf, rt)) = undo.rook_move {
            self.board[rf as usize] = self.board[rt as usize].take();
        }

        self.board[mv.to as usize] = None;
        self.board[mv.from as usize] = Some(undo.moved_piece);
        match undo.ep_captured_sq {
            Some(cs) => self.board[cs as usize] = undo.captured,
            None => self.board[mv.to as usize] = undo.captured,
        }
    }

    /// Passes the turn. Only meaningful for search heuristics; never legal in a game.
    pub fn make_null_move(&mut self) -> NullUndo {
        let undo = NullUndo {
            en_passant: self.en_passant,
            hash: self.hash,
        };
        self.hash ^= ZOBRIST.ep_key(self.en_passant) ^ ZOBRIST.black_to_move;
        self.en_passant = None;
        self.side_to_move = self.side_to_move.other();
        undo
    }

    pub fn unmake_null_move(&mut self, undo: NullUndo) {
        self.side_to_move = self.side_to_move.other();
        self.en_passant = undo.en_passant;
        self.hash = undo.hash;
    }

    /// Number of legal moves `c` would have if it were `c`'s turn.
    ///
    /// Works on a scratch copy, so the position and its hash are untouched.
    pub fn legal_move_count_for(&self, c: Color) -> usize {
        let mut scratch = self.clone();
        if scratch.side_to_move != c {
            scratch.side_to_move = c;
            scratch.en_passant = None;
        }
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(&mut scratch, &mut moves);
        moves.len()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can possibly mate: bare kings, a single minor piece, or
    /// only bishops that all stand on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut bishop_colors = [false; 2];
        for (s, pc) in self.board.iter().enumerate() {
            let Some(pc) = pc else { continue };
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight => {
                    minors += 1;
                    knights += 1;
                }
                PieceKind::Bishop => {
                    minors += 1;
                    let shade = (file_of(s as u8) + rank_of(s as u8)) % 2;
                    bishop_colors[shade as usize] = true;
                }
            }
        }
        minors <= 1 || (knights == 0 && !(bishop_colors[0] && bishop_colors[1]))
    }

    pub fn is_checkmate(&self) -> bool {
        self.termination() == Some(Termination::Checkmate)
    }

    pub fn is_stalemate(&self) -> bool {
        self.termination() == Some(Termination::Stalemate)
    }

    /// Reports why the game is over, or `None` while play continues.
    /// Mate and stalemate take precedence over the draw claims.
    pub fn termination(&self) -> Option<Termination> {
        let mut scratch = self.clone();
        if !has_legal_move(&mut scratch) {
            return Some(if self.in_check(self.side_to_move) {
                Termination::Checkmate
            } else {
                Termination::Stalemate
            });
        }
        if self.is_insufficient_material() {
            return Some(Termination::InsufficientMaterial);
        }
        if self.is_fifty_move_draw() {
            return Some(Termination::FiftyMoveRule);
        }
        None
    }

    pub fn is_game_over(&self) -> bool {
        self.termination().is_some()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
