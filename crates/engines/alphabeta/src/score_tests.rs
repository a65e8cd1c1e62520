use super::*;

#[test]
fn test_mate_scores_are_in_band() {
    for ply in [0, 1, 7, MAX_PLY - 1] {
        assert!(is_mate_score(mate_in(ply)));
        assert!(is_mate_score(mated_in(ply)));
    }
    assert!(is_mate_score(MATED_STATIC));
    assert!(!is_mate_score(2_500));
    assert!(!is_mate_score(-MATE_BOUND + 1));
    assert!(!is_mate_score(INFINITY));
    assert!(!is_mate_score(-INFINITY));
}

#[test]
fn test_shorter_mate_scores_higher() {
    assert!(mate_in(1) > mate_in(3));
    assert!(mated_in(1) < mated_in(3));
}

#[test]
fn test_mate_distance() {
    assert_eq!(mate_distance(mate_in(3)), Some(3));
    assert_eq!(mate_distance(mated_in(2)), Some(-2));
    assert_eq!(mate_distance(150), None);
}

#[test]
fn test_tt_adjustment_is_reversible() {
    for score in [mate_in(5), mated_in(9), 0, 321, -MATE_BOUND + 1] {
        for ply in [0, 1, 4, 20] {
            assert_eq!(from_tt(to_tt(score, ply), ply), score);
        }
    }
}

#[test]
fn test_tt_adjustment_is_node_relative() {
    // Mate 5 plies below a node at ply 3, read back at ply 1.
    let stored = to_tt(mate_in(8), 3);
    assert_eq!(stored, mate_in(5));
    assert_eq!(from_tt(stored, 1), mate_in(6));
}
