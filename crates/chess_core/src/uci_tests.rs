use super::*;

#[test]
fn test_move_text_round_trip() {
    let pos = Position::startpos();
    let mv = parse_uci_move(&pos, "g1f3").unwrap();
    assert_eq!(move_to_uci(mv), "g1f3");
}

#[test]
fn test_parse_sets_special_flags() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    assert!(parse_uci_move(&pos, "e1g1").unwrap().is_castle);

    let pos = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let under = parse_uci_move(&pos, "a7a8n").unwrap();
    assert_eq!(under.promo, Some(PieceKind::Knight));
}

#[test]
fn test_parse_rejects_bad_text() {
    let pos = Position::startpos();
    assert!(matches!(
        parse_uci_move(&pos, "e2"),
        Err(MoveParseError::Malformed(_))
    ));
    assert!(matches!(
        parse_uci_move(&pos, "e2e4k"),
        Err(MoveParseError::Malformed(_))
    ));
    assert!(matches!(
        parse_uci_move(&pos, "e2e5"),
        Err(MoveParseError::Illegal(_))
    ));
}

#[test]
fn test_position_command() {
    let pos = set_position_from_uci(&["startpos", "moves", "e2e4", "e7e5"]).unwrap();
    assert_eq!(
        pos.to_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2"
    );

    let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    let mut args = vec!["fen"];
    args.extend(fen.split_whitespace());
    assert_eq!(set_position_from_uci(&args).unwrap().to_fen(), fen);

    assert_eq!(
        set_position_from_uci(&["moves", "e2e4"]),
        Err(PositionCommandError::MissingSetup)
    );
    assert!(set_position_from_uci(&["startpos", "moves", "e2e5"]).is_err());
}
