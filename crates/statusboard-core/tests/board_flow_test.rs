//! End-to-end board scenarios through the public API.

use proptest::prelude::*;
use statusboard_core::{
    create_board, rebuild_board, within_budget, Actor, Board, BoardError, TOKEN_LIMIT,
};

fn alice() -> Actor {
    Actor::new(11, "Alice", "")
}

fn data_at(board: &Board, index: usize) -> String {
    board.keyboard.rows[0][index].data.clone()
}

#[test]
fn test_create_press_and_release() {
    let board = create_board(&["A", "B"]).unwrap();
    assert_eq!(board.text, "🟢A  🟢B");
    assert_eq!(board.keyboard.rows[0].len(), 3);
    assert_eq!(board.keyboard.rows[0][2].text, "⚡");

    let busy = rebuild_board(&board, &data_at(&board, 0), &alice()).unwrap();
    assert_eq!(busy.board.text, "🏗️A (Alice)  🟢B");

    let free = rebuild_board(&busy.board, &data_at(&busy.board, 0), &alice()).unwrap();
    assert_eq!(free.board.text, "🟢A  🟢B");
    assert_eq!(free.board, board);
}

#[test]
fn test_item_order_is_stable() {
    let board = create_board(&["C", "A", "B"]).unwrap();
    let rebuild = rebuild_board(&board, &data_at(&board, 1), &alice()).unwrap();

    let labels: Vec<&str> = rebuild
        .board
        .keyboard
        .buttons()
        .map(|b| b.text.as_str())
        .collect();
    assert_eq!(labels, vec!["🟢C", "🏗️A", "🟢B", "⚡"]);
}

#[test]
fn test_subscriber_is_notified_of_item_change() {
    let bob = Actor::new(22, "Bob", "");
    let board = create_board(&["A"]).unwrap();
    let board = rebuild_board(&board, &data_at(&board, 1), &bob).unwrap().board;

    let rebuild = rebuild_board(&board, &data_at(&board, 0), &alice()).unwrap();
    assert_eq!(rebuild.notifications.len(), 1);
    assert_eq!(rebuild.notifications[0].user_id, 22);
    assert_eq!(rebuild.notifications[0].text, "🏗️A updated by Alice");

    // Subscribers are not told about their own presses.
    let own = rebuild_board(&rebuild.board, &data_at(&rebuild.board, 0), &bob).unwrap();
    assert!(own.notifications.is_empty());
}

/// Two presses computed from the same message both start from the stale
/// board; whichever edit lands last replaces the other entirely.
#[test]
fn test_concurrent_presses_lose_an_update() {
    let bob = Actor::new(22, "Bob", "");
    let board = create_board(&["A", "B"]).unwrap();

    let first = rebuild_board(&board, &data_at(&board, 0), &alice()).unwrap();
    let second = rebuild_board(&board, &data_at(&board, 1), &bob).unwrap();

    assert_eq!(first.board.text, "🏗️A (Alice)  🟢B");
    assert_eq!(second.board.text, "🟢A  🏗️B (Bob)");
    // The second edit does not carry Alice's change.
    assert!(!second.board.text.contains("Alice"));
}

proptest! {
    #[test]
    fn prop_emitted_tokens_fit_budget(
        names in proptest::collection::vec("[a-zA-Zа-яЖ0-9_]{1,200}", 1..4),
        first in "[a-zA-Zа-я]{0,200}",
        last in "[a-zA-Zа-я]{0,200}",
        index in 0usize..4,
    ) {
        match create_board(names.as_slice()) {
            Ok(board) => {
                prop_assert!(board.keyboard.buttons().all(|b| within_budget(&b.data, TOKEN_LIMIT)));

                let row = &board.keyboard.rows[0];
                let pressed = row[index % row.len()].data.clone();
                let actor = Actor::new(5, first, last);
                match rebuild_board(&board, &pressed, &actor) {
                    Ok(rebuild) => {
                        prop_assert!(rebuild
                            .board
                            .keyboard
                            .buttons()
                            .all(|b| within_budget(&b.data, TOKEN_LIMIT)));
                    }
                    Err(BoardError::BudgetExceeded { .. }) => {}
                    Err(e) => prop_assert!(false, "unexpected error: {}", e),
                }
            }
            Err(BoardError::BudgetExceeded { length, limit, .. }) => {
                prop_assert!(length > limit);
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    #[test]
    fn prop_double_toggle_restores_board(
        names in proptest::collection::vec("[a-zA-Z0-9]{1,20}", 1..5),
        first in "[a-zA-Z]{0,60}",
        last in "[a-zA-Z]{0,60}",
        index in 0usize..5,
    ) {
        let board = create_board(names.as_slice()).unwrap();
        let index = index % names.len();
        let actor = Actor::new(9, first, last);

        let once = rebuild_board(&board, &data_at(&board, index), &actor).unwrap();
        let twice = rebuild_board(&once.board, &data_at(&once.board, index), &actor).unwrap();
        prop_assert_eq!(twice.board, board);
    }
}
