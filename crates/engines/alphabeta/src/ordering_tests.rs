use super::*;
use chess_core::{legal_moves, parse_uci_move};

fn mv(pos: &Position, uci: &str) -> Move {
    parse_uci_move(pos, uci).unwrap()
}

fn ordered(pos: &Position, killers: &KillerTable, history: &HistoryTable, tt: Option<Move>) -> Vec<Move> {
    let mut scratch = pos.clone();
    let mut moves = legal_moves(pos);
    MoveOrderer { killers, history }.order(&mut scratch, &mut moves, tt, 3);
    assert_eq!(&scratch, pos);
    moves
}

#[test]
fn test_killers_newest_first_and_deduplicated() {
    let pos = Position::startpos();
    let (a, b, c) = (mv(&pos, "e2e4"), mv(&pos, "d2d4"), mv(&pos, "g1f3"));
    let mut k = KillerTable::new();

    k.store(2, a);
    k.store(2, a);
    assert_eq!(k.get(2), [Some(a), None]);

    k.store(2, b);
    k.store(2, c);
    assert_eq!(k.get(2), [Some(c), Some(b)]);
    assert!(!k.contains(2, a));
    assert!(!k.contains(3, c));

    k.store(MAX_PLY + 5, a);
    assert_eq!(k.get(MAX_PLY + 5), [None, None]);

    k.clear();
    assert_eq!(k.get(2), [None, None]);
}

#[test]
fn test_history_rewards_depth_squared() {
    let pos = Position::startpos();
    let m = mv(&pos, "e2e4");
    let mut h = HistoryTable::new();
    h.reward(m, 3);
    h.reward(m, 2);
    assert_eq!(h.get(m), 13);
    h.clear();
    assert_eq!(h.get(m), 0);
}

#[test]
fn test_mvv_lva_prefers_cheap_attacker() {
    let pos = Position::from_fen("4k3/8/8/3q4/4P3/8/8/3QK3 w - - 0 1").unwrap();
    let pawn_takes = mv(&pos, "e4d5");
    let queen_takes = mv(&pos, "d1d5");
    assert_eq!(mvv_lva(&pos, pawn_takes), 8_900);
    assert_eq!(mvv_lva(&pos, queen_takes), 8_100);
    assert_eq!(mvv_lva(&pos, mv(&pos, "e1f1")), 0);

    let moves = ordered(&pos, &KillerTable::new(), &HistoryTable::new(), None);
    assert_eq!(moves[0], pawn_takes);
    assert_eq!(moves[1], queen_takes);
}

#[test]
fn test_hash_move_first() {
    let pos = Position::from_fen("4k3/8/8/3q4/4P3/8/8/3QK3 w - - 0 1").unwrap();
    let quiet = mv(&pos, "e1f2");
    let moves = ordered(&pos, &KillerTable::new(), &HistoryTable::new(), Some(quiet));
    assert_eq!(moves[0], quiet);
}

#[test]
fn test_killer_after_tactics_before_quiets() {
    let pos = Position::from_fen("4k3/8/8/3q4/4P3/8/8/3QK3 w - - 0 1").unwrap();
    let killer = mv(&pos, "e1f1");
    let mut killers = KillerTable::new();
    killers.store(3, killer);

    let moves = ordered(&pos, &killers, &HistoryTable::new(), None);
    let at = moves.iter().position(|&m| m == killer).unwrap();
    let mut scratch = pos.clone();
    for &m in &moves[..at] {
        assert!(scratch.is_capture(m) || scratch.gives_check(m), "{m} ahead of killer");
    }
    for &m in &moves[at + 1..] {
        assert!(!scratch.is_capture(m) && !scratch.gives_check(m), "{m} behind killer");
    }
}

#[test]
fn test_promotion_outranks_capture() {
    let pos = Position::from_fen("3r3k/4P3/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let moves = ordered(&pos, &KillerTable::new(), &HistoryTable::new(), None);
    // exd8=Q captures and promotes
    assert_eq!(moves[0], mv(&pos, "e7d8q"));
    assert!(moves[1].promo.is_some());
}

#[test]
fn test_stable_for_equal_scores() {
    let pos = Position::startpos();
    let moves = ordered(&pos, &KillerTable::new(), &HistoryTable::new(), None);
    assert_eq!(moves, legal_moves(&pos));
}

#[test]
fn test_history_breaks_ties() {
    let pos = Position::startpos();
    let favourite = mv(&pos, "b1c3");
    let mut history = HistoryTable::new();
    history.reward(favourite, 4);
    let moves = ordered(&pos, &KillerTable::new(), &history, None);
    assert_eq!(moves[0], favourite);
}
