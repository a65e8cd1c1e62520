use crate::{
    board::Position,
    error::{MoveParseError, PositionCommandError},
    movegen::legal_moves,
    types::*,
};

pub fn move_to_uci(mv: Move) -> String {
    mv.to_string()
}

/// Resolves coordinate notation ("e2e4", "e7e8q") against the legal moves of
/// `pos`, so castling and en passant flags come out right.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Result<Move, MoveParseError> {
    let malformed = || MoveParseError::Malformed(txt.to_string());
    if !(4..=5).contains(&txt.len()) || !txt.is_ascii() {
        return Err(malformed());
    }
    let from = coord_to_sq(&txt[0..2]).ok_or_else(malformed)?;
    let to = coord_to_sq(&txt[2..4]).ok_or_else(malformed)?;
    let promo = match txt[4..].chars().next() {
        None => None,
        Some(c) => match PieceKind::from_char(c) {
            Some(k) if PieceKind::PROMOTIONS.contains(&k) => Some(k),
            _ => return Err(malformed()),
        },
    };

    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
        .ok_or_else(|| MoveParseError::Illegal(txt.to_string()))
}

/// Applies the arguments of a UCI `position` command:
/// `startpos [moves ...]` or `fen <6 fields> [moves ...]`.
pub fn set_position_from_uci(args: &[&str]) -> Result<Position, PositionCommandError> {
    let moves_at = args.iter().position(|&a| a == "moves");
    let setup = &args[..moves_at.unwrap_or(args.len())];

    let mut pos = match setup.first() {
        Some(&"startpos") => Position::startpos(),
        Some(&"fen") => Position::from_fen(&setup[1..].join(" "))?,
        _ => return Err(PositionCommandError::MissingSetup),
    };

    if let Some(i) = moves_at {
        for txt in &args[i + 1..] {
            let mv = parse_uci_move(&pos, txt)?;
            pos.make_move(mv);
        }
    }
    Ok(pos)
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
