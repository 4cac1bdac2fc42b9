//! core-moves: registry of named moves indexed as a keystroke trie.
//!
//! Every registered move is an ordered keystroke sequence. Sequences are
//! stored as one trie per first keystroke; lookups walk the queued input front
//! to back and consume exactly the symbols of the first move found.
//!
//! Registering the same path under a new name replaces the old name. Removing
//! a move that was never registered is a silent no-op.

mod node;

pub use node::MoveNode;

use core_keystroke::{Keystroke, Symbol};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

// -------------------------------------------------------------------------------------------------
// Errors
// -------------------------------------------------------------------------------------------------
/// Rejected registration arguments. Nothing is mutated when these are returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("invalid argument: move name is empty")]
    EmptyName,
    #[error("invalid argument: move `{name}` has no keystrokes")]
    EmptySequence { name: String },
}

fn validate(name: &str, keystrokes: &[Keystroke]) -> Result<(), MoveError> {
    if name.is_empty() {
        return Err(MoveError::EmptyName);
    }
    if keystrokes.is_empty() {
        return Err(MoveError::EmptySequence {
            name: name.to_string(),
        });
    }
    Ok(())
}

// -------------------------------------------------------------------------------------------------
// Move Definition
// -------------------------------------------------------------------------------------------------
/// A named keystroke sequence as handed over by a move-list loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveDefinition {
    pub name: String,
    pub keystrokes: Vec<Keystroke>,
}

impl MoveDefinition {
    pub fn new(name: impl Into<String>, keystrokes: impl Into<Vec<Keystroke>>) -> Self {
        Self {
            name: name.into(),
            keystrokes: keystrokes.into(),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Move List
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    roots: BTreeMap<Keystroke, MoveNode>,
}

impl MoveList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(definitions: &[MoveDefinition]) -> Result<Self, MoveError> {
        let mut list = Self::new();
        list.add_moves(definitions)?;
        Ok(list)
    }

    pub fn add_move(&mut self, name: &str, keystrokes: &[Keystroke]) -> Result<(), MoveError> {
        validate(name, keystrokes)?;
        let first = keystrokes[0];
        self.roots
            .entry(first)
            .or_insert_with(|| MoveNode::new(first))
            .add_move(0, name, keystrokes);
        debug!(target: "moves.trie", name, len = keystrokes.len(), first = %first, "move_added");
        Ok(())
    }

    pub fn remove_move(&mut self, name: &str, keystrokes: &[Keystroke]) -> Result<(), MoveError> {
        validate(name, keystrokes)?;
        let first = keystrokes[0];
        let Some(root) = self.roots.get_mut(&first) else {
            return Ok(());
        };
        if root.remove_move(0, name, keystrokes) {
            self.roots.remove(&first);
        }
        debug!(target: "moves.trie", name, len = keystrokes.len(), "move_removed");
        Ok(())
    }

    /// Register every definition in order, stopping at the first invalid one.
    pub fn add_moves(&mut self, definitions: &[MoveDefinition]) -> Result<(), MoveError> {
        for def in definitions {
            self.add_move(&def.name, &def.keystrokes)?;
        }
        Ok(())
    }

    pub fn remove_moves(&mut self, definitions: &[MoveDefinition]) -> Result<(), MoveError> {
        for def in definitions {
            self.remove_move(&def.name, &def.keystrokes)?;
        }
        Ok(())
    }

    /// Find the first move in `queue` and remove the symbols it consumed.
    ///
    /// Positions are tried from the front; at each one the trie rooted at that
    /// symbol is asked for a contiguous match. Returns `None` (queue untouched)
    /// when no position matches.
    pub fn get_next_move(&self, queue: &mut Vec<Symbol>) -> Option<&str> {
        for i in 0..queue.len() {
            let Some(root) = self.roots.get(&queue[i].keystroke) else {
                continue;
            };
            if let Some(name) = root.parse_input(queue, i) {
                debug!(target: "moves.trie", name, start = i, remaining = queue.len(), "move_matched");
                return Some(name);
            }
        }
        None
    }

    pub fn root(&self, keystroke: Keystroke) -> Option<&MoveNode> {
        self.roots.get(&keystroke)
    }

    pub fn roots(&self) -> impl Iterator<Item = &MoveNode> {
        self.roots.values()
    }

    /// Number of trie roots (distinct first keystrokes).
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.roots.values().map(MoveNode::node_count).sum()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use Keystroke::*;
    use pretty_assertions::assert_eq;

    fn fighter() -> MoveList {
        let mut moves = MoveList::new();
        moves.add_move("hadouken", &[Down, Forward, A]).unwrap();
        moves.add_move("hurricane kick", &[Down, Back, A]).unwrap();
        moves
    }

    fn queue(keys: &[Keystroke]) -> Vec<Symbol> {
        keys.iter().map(|k| Symbol::new(0.0, *k)).collect()
    }

    fn keys(queue: &[Symbol]) -> Vec<Keystroke> {
        queue.iter().map(|s| s.keystroke).collect()
    }

    #[test]
    fn add_builds_unnamed_path_with_named_leaf() {
        let moves = fighter();
        let down = moves.root(Down).expect("down root");
        assert_eq!(down.move_name(), None);
        let forward = down.child(Forward).expect("forward child");
        assert_eq!(forward.move_name(), None);
        assert_eq!(forward.keystroke(), Forward);
        let a = forward.child(A).expect("a child");
        assert_eq!(a.move_name(), Some("hadouken"));
        assert_eq!(down.child_count(), 2);
        assert_eq!(
            down.child(Back).and_then(|b| b.child(A)).and_then(MoveNode::move_name),
            Some("hurricane kick")
        );
        assert_eq!(moves.len(), 1);
        assert_eq!(moves.node_count(), 5);
    }

    #[test]
    fn rejects_empty_name_and_sequence() {
        let mut moves = MoveList::new();
        assert_eq!(moves.add_move("", &[A]), Err(MoveError::EmptyName));
        assert_eq!(
            moves.add_move("punch", &[]),
            Err(MoveError::EmptySequence {
                name: "punch".into()
            })
        );
        assert_eq!(moves.remove_move("", &[A]), Err(MoveError::EmptyName));
        assert!(moves.is_empty());
    }

    #[test]
    fn duplicate_path_last_write_wins() {
        let mut moves = MoveList::new();
        moves.add_move("jab", &[A]).unwrap();
        moves.add_move("punch", &[A]).unwrap();
        assert_eq!(moves.root(A).and_then(MoveNode::move_name), Some("punch"));
        assert_eq!(moves.node_count(), 1);
    }

    #[test]
    fn remove_simple() {
        let mut moves = MoveList::new();
        moves.add_move("punch", &[A]).unwrap();
        moves.add_move("kick", &[B]).unwrap();
        moves.remove_move("punch", &[A]).unwrap();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves.root(B).and_then(MoveNode::move_name), Some("kick"));
        moves.remove_move("kick", &[B]).unwrap();
        assert!(moves.is_empty());
    }

    #[test]
    fn remove_cascade_keeps_shared_prefix() {
        let mut moves = fighter();
        moves.remove_move("hadouken", &[Down, Forward, A]).unwrap();
        let down = moves.root(Down).expect("down root survives");
        assert_eq!(down.move_name(), None);
        assert_eq!(down.child_count(), 1);
        assert!(down.child(Forward).is_none());
        let back = down.child(Back).expect("back child");
        assert_eq!(back.move_name(), None);
        assert_eq!(back.child(A).and_then(MoveNode::move_name), Some("hurricane kick"));
    }

    #[test]
    fn remove_whole_path() {
        let mut moves = MoveList::new();
        moves.add_move("hadouken", &[Down, Forward, A]).unwrap();
        moves.add_move("kick", &[B]).unwrap();
        moves.remove_move("hadouken", &[Down, Forward, A]).unwrap();
        assert_eq!(moves.len(), 1);
        assert!(moves.root(Down).is_none());
    }

    #[test]
    fn remove_mismatch_is_noop() {
        let mut moves = fighter();
        let before = moves.clone();
        moves.remove_move("shoryuken", &[Down, Forward, A]).unwrap();
        moves.remove_move("hadouken", &[Down, Forward, B]).unwrap();
        moves.remove_move("hadouken", &[Down, Forward]).unwrap();
        moves.remove_move("hadouken", &[Up, Forward, A]).unwrap();
        assert_eq!(moves, before);
    }

    #[test]
    fn remove_prefix_move_keeps_longer_move() {
        let mut moves = MoveList::new();
        moves.add_move("jab", &[A]).unwrap();
        moves.add_move("chain", &[A, B]).unwrap();
        moves.remove_move("jab", &[A]).unwrap();
        let root = moves.root(A).expect("root kept for longer move");
        assert_eq!(root.move_name(), None);
        assert_eq!(root.child(B).and_then(MoveNode::move_name), Some("chain"));

        moves.remove_move("chain", &[A, B]).unwrap();
        assert!(moves.is_empty());
    }

    #[test]
    fn remove_longer_move_keeps_named_prefix() {
        let mut moves = MoveList::new();
        moves.add_move("jab", &[A]).unwrap();
        moves.add_move("chain", &[A, B]).unwrap();
        moves.remove_move("chain", &[A, B]).unwrap();
        let root = moves.root(A).expect("named root kept");
        assert_eq!(root.move_name(), Some("jab"));
        assert_eq!(root.child_count(), 0);
    }

    #[test]
    fn matches_hadouken_and_consumes_queue() {
        let moves = fighter();
        let mut q = queue(&[Down, Forward, A]);
        assert_eq!(moves.get_next_move(&mut q), Some("hadouken"));
        assert!(q.is_empty());
    }

    #[test]
    fn matches_hurricane_kick() {
        let moves = fighter();
        let mut q = queue(&[Down, Back, A]);
        assert_eq!(moves.get_next_move(&mut q), Some("hurricane kick"));
    }

    #[test]
    fn trailing_symbol_survives_match() {
        let moves = fighter();
        let mut q = queue(&[Down, Forward, A, A]);
        assert_eq!(moves.get_next_move(&mut q), Some("hadouken"));
        assert_eq!(keys(&q), vec![A]);
    }

    #[test]
    fn interleaved_dirty_input_blocks_match() {
        let mut moves = MoveList::new();
        moves.add_move("hadouken", &[Down, Forward, A]).unwrap();
        let mut q = queue(&[Down, Forward, Back, A]);
        assert_eq!(moves.get_next_move(&mut q), None);
        assert_eq!(q.len(), 4);

        let moves = fighter();
        assert_eq!(moves.get_next_move(&mut q), None);
        assert_eq!(keys(&q), vec![Down, Forward, Back, A]);
    }

    #[test]
    fn leading_dirty_input_is_preserved() {
        let moves = fighter();
        let mut q = queue(&[Down, Forward, Down, Back, A]);
        assert_eq!(moves.get_next_move(&mut q), Some("hurricane kick"));
        assert_eq!(keys(&q), vec![Down, Forward]);
    }

    #[test]
    fn trailing_dirty_input_is_preserved() {
        let moves = fighter();
        let mut q = queue(&[Down, Back, A, Down, Forward]);
        assert_eq!(moves.get_next_move(&mut q), Some("hurricane kick"));
        assert_eq!(keys(&q), vec![Down, Forward]);
    }

    #[test]
    fn each_match_is_returned_once() {
        let moves = fighter();
        let mut q = queue(&[Down, Forward, A, Down, Back, A]);
        assert_eq!(moves.get_next_move(&mut q), Some("hadouken"));
        assert_eq!(moves.get_next_move(&mut q), Some("hurricane kick"));
        assert_eq!(moves.get_next_move(&mut q), None);
        assert!(q.is_empty());
    }

    #[test]
    fn shorter_named_prefix_matches_first() {
        let mut moves = MoveList::new();
        moves.add_move("jab", &[A]).unwrap();
        moves.add_move("chain", &[A, B]).unwrap();
        let mut q = queue(&[A, B]);
        assert_eq!(moves.get_next_move(&mut q), Some("jab"));
        assert_eq!(keys(&q), vec![B]);
    }

    #[test]
    fn partial_pattern_at_end_waits() {
        let moves = fighter();
        let mut q = queue(&[Down, Forward]);
        assert_eq!(moves.get_next_move(&mut q), None);
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn bulk_definitions_round_trip() {
        let defs = vec![
            MoveDefinition::new("hadouken", [Down, Forward, A]),
            MoveDefinition::new("hurricane kick", [Down, Back, A]),
        ];
        let mut moves = MoveList::from_definitions(&defs).unwrap();
        assert_eq!(moves, fighter());
        moves.remove_moves(&defs).unwrap();
        assert!(moves.is_empty());

        let bad = vec![MoveDefinition::new("kick", [B]), MoveDefinition::new("", [A])];
        assert_eq!(MoveList::from_definitions(&bad), Err(MoveError::EmptyName));
    }
}
