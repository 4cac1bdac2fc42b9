//! Property-based tests for MoveList registration and lookup.

use core_keystroke::{Keystroke, Symbol};
use core_moves::MoveList;
use proptest::prelude::*;

fn keystroke() -> impl Strategy<Value = Keystroke> {
    (0..Keystroke::COUNT).prop_map(|i| Keystroke::ALL[i])
}

fn sequence() -> impl Strategy<Value = Vec<Keystroke>> {
    prop::collection::vec(keystroke(), 1..8)
}

fn symbols(keys: &[Keystroke]) -> Vec<Symbol> {
    keys.iter()
        .enumerate()
        .map(|(i, k)| Symbol::new(i as f64 * 0.1, *k))
        .collect()
}

proptest! {
    // add followed by remove of the same move restores the previous structure
    #[test]
    fn add_remove_round_trip(base in prop::collection::vec(("[a-z]{1,6}", sequence()), 0..6),
                             name in "[A-Z]{1,6}",
                             seq in sequence()) {
        let mut moves = MoveList::new();
        for (n, s) in &base {
            moves.add_move(n, s).unwrap();
        }
        // Overwriting an existing terminal cannot be undone by a remove.
        prop_assume!(!is_terminal(&moves, &seq));

        let before = moves.clone();
        moves.add_move(&name, &seq).unwrap();
        moves.remove_move(&name, &seq).unwrap();
        prop_assert_eq!(moves, before);
    }

    // a registered move is always found in a queue holding exactly its keystrokes
    #[test]
    fn registered_move_matches_itself(seq in sequence()) {
        let mut moves = MoveList::new();
        moves.add_move("combo", &seq).unwrap();
        let mut queue = symbols(&seq);
        let found = moves.get_next_move(&mut queue).map(str::to_owned);
        prop_assert_eq!(found.as_deref(), Some("combo"));
        prop_assert!(queue.is_empty());
    }

    // surrounding symbols that never start a move are left in place
    #[test]
    fn dirty_input_survives_match(seq in sequence(), pad in 0usize..4) {
        let mut moves = MoveList::new();
        moves.add_move("combo", &seq).unwrap();
        prop_assume!(!seq.contains(&Keystroke::NeutralNeutral));
        let mut keys = vec![Keystroke::NeutralNeutral; pad];
        keys.extend_from_slice(&seq);
        keys.extend(std::iter::repeat_n(Keystroke::NeutralNeutral, pad));
        let mut queue = symbols(&keys);
        prop_assert_eq!(moves.get_next_move(&mut queue), Some("combo"));
        prop_assert_eq!(queue.len(), pad * 2);
        prop_assert!(queue.iter().all(|s| s.keystroke == Keystroke::NeutralNeutral));
    }

    // a miss never touches the queue
    #[test]
    fn miss_leaves_queue_untouched(seq in sequence(), keys in prop::collection::vec(keystroke(), 0..10)) {
        let mut moves = MoveList::new();
        moves.add_move("combo", &seq).unwrap();
        let mut queue = symbols(&keys);
        let before = queue.clone();
        if moves.get_next_move(&mut queue).is_none() {
            prop_assert_eq!(queue, before);
        }
    }
}

fn is_terminal(moves: &MoveList, seq: &[Keystroke]) -> bool {
    let Some(mut node) = moves.root(seq[0]) else {
        return false;
    };
    for k in &seq[1..] {
        match node.child(*k) {
            Some(child) => node = child,
            None => return false,
        }
    }
    node.move_name().is_some()
}
