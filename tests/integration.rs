//! Integration tests for the beta engine.

use beta_engine::{
    chain_links, delete_move, derive_stance, insert_move, insertion_order_after, reorder_move,
    validate_sequence, visual_positions, Anchor, Authority, BetaSession, BodyPart, EngineConfig,
    Hold, InMemoryAuthority, LayoutConfig, Move, MoveId, MoveInput, Point, SequenceOperation,
    SessionEvent, StanceCursor, StanceNavigator,
};

fn hold(id: &str, x: f64, y: f64) -> Hold {
    Hold {
        id: id.into(),
        position: Point::new(x, y),
    }
}

fn ids(moves: &[Move]) -> Vec<&str> {
    moves.iter().map(|mv| mv.id.as_str()).collect()
}

/// Build a beta by appending moves one by one, the way an editor would.
fn build_beta(holds: &[Hold]) -> Vec<Move> {
    let plan = [
        ("lh1", BodyPart::LeftHand, 0),
        ("rh1", BodyPart::RightHand, 0),
        ("lf1", BodyPart::LeftFoot, 1),
        ("rf1", BodyPart::RightFoot, 2),
        ("rh2", BodyPart::RightHand, 3),
        ("lh2", BodyPart::LeftHand, 3),
        ("rf2", BodyPart::RightFoot, 1),
    ];

    plan.iter().fold(Vec::new(), |moves, (id, body_part, hold_index)| {
        let order = insertion_order_after(&moves, None);
        insert_move(moves, MoveInput::on_hold(*id, *body_part, &holds[*hold_index]), order)
    })
}

fn holds() -> Vec<Hold> {
    vec![
        hold("start", 40.0, 80.0),
        hold("foot", 35.0, 95.0),
        hold("pinch", 55.0, 90.0),
        hold("jug", 50.0, 30.0),
    ]
}

// --- Realistic Workflow Tests ---

#[test]
fn test_build_and_walk_a_beta() {
    let holds = holds();
    let mut moves = build_beta(&holds);
    validate_sequence(&moves).unwrap();
    assert_eq!(ids(&moves), vec!["lh1", "rh1", "lf1", "rf1", "rh2", "lh2", "rf2"]);

    // The authority would flag the opening four as start moves
    for mv in moves.iter_mut().take(4) {
        mv.is_start = true;
    }

    let nav = StanceNavigator::new(&moves);
    let mut cursor = nav.select_first();
    assert_eq!(cursor, StanceCursor::at(3));

    let mut snapshots = vec![nav.stance(cursor)];
    while nav.has_next(cursor) {
        cursor = nav.select_next(cursor);
        snapshots.push(nav.stance(cursor));
    }

    assert_eq!(snapshots.len(), 4);
    assert!(snapshots.iter().all(|stance| stance.len() == 4));

    let last = snapshots.last().unwrap();
    assert_eq!(last.get(BodyPart::LeftHand), Some(&MoveId::from("lh2")));
    assert_eq!(last.get(BodyPart::RightHand), Some(&MoveId::from("rh2")));
    assert_eq!(last.get(BodyPart::LeftFoot), Some(&MoveId::from("lf1")));
    assert_eq!(last.get(BodyPart::RightFoot), Some(&MoveId::from("rf2")));
}

#[test]
fn test_insert_in_middle_then_delete() {
    let holds = holds();
    let moves = build_beta(&holds);

    // Insert a foot adjustment right after rf1
    let order = insertion_order_after(&moves, Some(&"rf1".into()));
    assert_eq!(order, 5);
    let moves = insert_move(
        moves,
        MoveInput::free("smear", BodyPart::LeftFoot, Point::new(45.0, 99.0)),
        order,
    );
    validate_sequence(&moves).unwrap();
    assert_eq!(moves[4].id.as_str(), "smear");
    assert_eq!(moves[4].order, 5);
    assert_eq!(moves[5].id.as_str(), "rh2");
    assert_eq!(moves[5].order, 6);

    let moves = delete_move(moves, &"lf1".into());
    validate_sequence(&moves).unwrap();
    assert_eq!(ids(&moves), vec!["lh1", "rh1", "rf1", "smear", "rh2", "lh2", "rf2"]);
}

#[test]
fn test_chain_links_follow_reorder() {
    let moves = build_beta(&holds());
    let moves = reorder_move(moves, &"lh2".into(), 1);

    let hand_links: Vec<(&str, &str)> = chain_links(&moves)
        .iter()
        .filter(|link| link.body_part == BodyPart::LeftHand)
        .map(|link| (link.from.id.as_str(), link.to.id.as_str()))
        .collect();
    assert_eq!(hand_links, vec![("lh2", "lh1")]);
}

#[test]
fn test_shared_hold_layout() {
    let holds = holds();
    let moves = build_beta(&holds);
    let positions = visual_positions(&moves, &LayoutConfig::default());
    assert_eq!(positions.len(), moves.len());

    // lh1 and rh1 share the start hold: both spread, hands up
    let lh1 = positions[&MoveId::from("lh1")];
    let rh1 = positions[&MoveId::from("rh1")];
    assert_eq!(lh1.anchor, holds[0].position);
    assert!(!lh1.offset.is_zero() && !rh1.offset.is_zero());
    assert!(lh1.offset.x < 0.0 && rh1.offset.x > 0.0);
    assert!(lh1.position().y < holds[0].position.y);

    // rf1 is alone on the pinch
    assert!(positions[&MoveId::from("rf1")].offset.is_zero());
}

// --- Optimistic Session Workflow ---

#[test]
fn test_session_with_authority_round_trip() {
    let holds = holds();
    let mut authority = InMemoryAuthority::with_moves(build_beta(&holds)).unwrap();
    let session = BetaSession::new(EngineConfig::default());
    session
        .load_beta("beta1".into(), authority.moves().to_vec())
        .unwrap();
    let handle = session.subscribe();

    // Two mutations in flight at once
    let first = session
        .dispatch(SequenceOperation::Reorder {
            id: "rf2".into(),
            order: 1,
        })
        .unwrap();
    let second = session
        .dispatch(SequenceOperation::Insert {
            input: MoveInput::on_hold("lf2", BodyPart::LeftFoot, &holds[2]),
            order: 3,
        })
        .unwrap();
    let predicted = session.moves();
    assert_eq!(predicted[0].id.as_str(), "rf2");
    assert_eq!(predicted[2].id.as_str(), "lf2");
    assert_eq!(session.pending_count(), 2);

    // Authority answers in order
    let confirmed = authority.commit(&first.operation).unwrap();
    assert!(session.confirm(first.id, confirmed).unwrap());
    assert_eq!(session.pending_count(), 1);
    assert_eq!(ids(&session.moves()), ids(&predicted));

    let confirmed = authority.commit(&second.operation).unwrap();
    assert!(session.confirm(second.id, confirmed.clone()).unwrap());
    assert_eq!(session.pending_count(), 0);

    // Server wins: start flags now come from the authority
    assert_eq!(session.moves(), confirmed);
    assert_eq!(ids(&session.moves()), ids(&predicted));

    let events = handle.drain();
    assert!(events.contains(&SessionEvent::MutationConfirmed { mutation: first.id }));
    assert!(events.contains(&SessionEvent::MutationConfirmed { mutation: second.id }));
}

#[test]
fn test_session_out_of_order_responses() {
    let mut authority = InMemoryAuthority::with_moves(vec![
        Move::new("move1", 1, BodyPart::LeftHand, Anchor::free(Point::ZERO)),
        Move::new("move2", 2, BodyPart::RightHand, Anchor::free(Point::ZERO)),
    ])
    .unwrap();
    let session = BetaSession::default();
    session
        .load_beta("beta1".into(), authority.moves().to_vec())
        .unwrap();

    let insert = session
        .dispatch(SequenceOperation::Insert {
            input: MoveInput::free("new", BodyPart::LeftFoot, Point::ZERO),
            order: 3,
        })
        .unwrap();
    let reorder = session
        .dispatch(SequenceOperation::Reorder {
            id: "move1".into(),
            order: 2,
        })
        .unwrap();

    let after_insert = authority.commit(&insert.operation).unwrap();
    let after_reorder = authority.commit(&reorder.operation).unwrap();

    // The later response lands first and already contains the pending insert
    assert!(session.confirm(reorder.id, after_reorder.clone()).unwrap());
    validate_sequence(&session.moves()).unwrap();
    assert_eq!(session.moves(), after_reorder);
    assert_eq!(session.pending_count(), 1);

    // Last response to arrive wins
    assert!(session.confirm(insert.id, after_insert.clone()).unwrap());
    validate_sequence(&session.moves()).unwrap();
    assert_eq!(session.moves(), after_insert);
    assert_eq!(ids(&session.moves()), vec!["move1", "move2", "new"]);
    assert_eq!(session.pending_count(), 0);
}

#[test]
fn test_session_refresh_with_committed_pending_insert() {
    let holds = holds();
    let mut authority = InMemoryAuthority::with_moves(build_beta(&holds)).unwrap();
    let session = BetaSession::default();
    session
        .load_beta("beta1".into(), authority.moves().to_vec())
        .unwrap();

    let pending = session
        .dispatch(SequenceOperation::Insert {
            input: MoveInput::on_hold("lf2", BodyPart::LeftFoot, &holds[2]),
            order: 3,
        })
        .unwrap();
    let confirmed = authority.commit(&pending.operation).unwrap();

    // A refetch lands before the mutation's own response
    session.refresh(authority.moves().to_vec()).unwrap();
    validate_sequence(&session.moves()).unwrap();
    assert_eq!(session.moves().len(), 8);
    assert_eq!(
        ids(&session.moves()).iter().filter(|id| **id == "lf2").count(),
        1
    );
    assert_eq!(session.pending_count(), 1);

    assert!(session.confirm(pending.id, confirmed.clone()).unwrap());
    assert_eq!(session.moves(), confirmed);
    assert_eq!(session.pending_count(), 0);
}

#[test]
fn test_session_rejection_rolls_back_prediction() {
    let holds = holds();
    let mut authority = InMemoryAuthority::with_moves(build_beta(&holds)).unwrap();
    let session = BetaSession::default();
    session
        .load_beta("beta1".into(), authority.moves().to_vec())
        .unwrap();

    // Someone else already deleted the move
    authority
        .commit(&SequenceOperation::Delete { id: "rh2".into() })
        .unwrap();

    let pending = session
        .dispatch(SequenceOperation::Relocate {
            id: "rh2".into(),
            anchor: Anchor::free(Point::new(1.0, 1.0)),
        })
        .unwrap();

    assert!(authority.commit(&pending.operation).is_err());
    assert!(session.reject(pending.id));

    // A refetch brings in the other client's delete
    session.refresh(authority.moves().to_vec()).unwrap();
    assert!(!ids(&session.moves()).contains(&"rh2"));
}

#[test]
fn test_session_stance_survives_deletion() {
    let session = BetaSession::default();
    session.load_beta("beta1".into(), build_beta(&holds())).unwrap();

    session.select_last();
    assert_eq!(session.cursor(), StanceCursor::at(6));

    session
        .dispatch(SequenceOperation::Delete { id: "rf2".into() })
        .unwrap();
    session
        .dispatch(SequenceOperation::Delete { id: "lh2".into() })
        .unwrap();

    // The stored cursor is stale; reads re-clamp it
    assert_eq!(session.cursor(), StanceCursor::at(4));
    assert_eq!(session.stance_move().unwrap().id.as_str(), "rh2");
    assert!(!session.has_next());
}

#[test]
fn test_free_function_stance_matches_navigator() {
    let moves = build_beta(&holds());
    for raw in -1..10 {
        let cursor = StanceCursor::from_raw(raw);
        assert_eq!(
            derive_stance(&moves, cursor),
            StanceNavigator::new(&moves).stance(cursor)
        );
    }
}
