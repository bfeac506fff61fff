//! Property checks over long, mixed sequences of moves and ticks.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use timed_chess_core::invariants::TableInvariants;
use timed_chess_core::{
    Cell, ClockConfig, GameEvent, InputEvent, InvariantSet, MoveError, Side, TurnController,
};

// Mostly on the board, sometimes just off it.
fn coord(rng: &mut SmallRng) -> i32 {
    rng.random_range(-1..9)
}

#[test]
fn test_random_play_keeps_invariants() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    let mut controller = TurnController::with_config(ClockConfig::new(5).expect("valid"));

    for _ in 0..5_000 {
        let turn = controller.current_turn();
        let pieces = controller.board().piece_count();
        let before = controller.state().clone();

        if rng.random_ratio(1, 4) {
            controller.tick();
        } else {
            let side = if rng.random_ratio(1, 5) {
                turn.opponent()
            } else {
                turn
            };
            let from = Cell::new(coord(&mut rng), coord(&mut rng));
            let to = Cell::new(coord(&mut rng), coord(&mut rng));

            match controller.attempt_move(side, from, to) {
                Ok(applied) => {
                    assert_ne!(controller.current_turn(), turn);
                    assert_eq!(controller.remaining_seconds(), 5);
                    let expected = pieces - usize::from(applied.is_capture());
                    assert_eq!(controller.board().piece_count(), expected);
                }
                Err(_) => assert_eq!(controller.state(), &before),
            }
        }

        assert!(TableInvariants::check_all(controller.state()).is_ok());
        assert!((1..=5).contains(&controller.remaining_seconds()));
        for piece in controller.board().pieces() {
            let at = controller.board().piece_at(piece.cell()).expect("on board");
            assert_eq!(at.map(|p| p.id()), Some(piece.id()));
        }
    }
}

#[test]
fn test_turn_strictly_alternates() {
    let mut controller = TurnController::new();
    let mut flips = Vec::new();
    let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = log.clone();
    controller.subscribe(move |event: &GameEvent| {
        if let GameEvent::TurnChanged { side } = event {
            sink.borrow_mut().push(*side);
        }
    });

    // Each move is followed by Black running out of time, so White moves again.
    let moves = [
        (Side::White, (4, 6), (4, 4)),
        (Side::White, (3, 6), (3, 4)),
        (Side::White, (6, 7), (5, 5)),
    ];
    for (side, from, to) in moves {
        controller
            .attempt_move(side, Cell::new(from.0, from.1), Cell::new(to.0, to.1))
            .expect("Valid move");
        flips.push(controller.current_turn());
        for _ in 0..60 {
            controller.tick();
        }
        flips.push(controller.current_turn());
    }

    assert_eq!(*log.borrow(), flips);
    for pair in flips.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn test_rejected_drag_release_is_idempotent() {
    let mut controller = TurnController::new();
    let rook = controller
        .board()
        .piece_at(Cell::new(0, 7))
        .expect("on board")
        .map(|piece| piece.id())
        .expect("rook");
    let before = controller.state().clone();

    let event = InputEvent::DragReleased {
        piece: rook,
        from: Cell::new(0, 7),
        to: Cell::new(1, 7),
    };
    for _ in 0..3 {
        assert_eq!(
            controller.handle(event),
            Err(MoveError::SelfCapture(Cell::new(1, 7)))
        );
        assert_eq!(controller.state(), &before);
    }
}
