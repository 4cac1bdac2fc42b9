//! Single node of the move trie.

use core_keystroke::{Keystroke, Symbol};
use std::collections::BTreeMap;
use tracing::trace;

/// A node owns its children outright; a node carrying `move_name` terminates
/// the path leading to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveNode {
    keystroke: Keystroke,
    children: BTreeMap<Keystroke, MoveNode>,
    move_name: Option<String>,
}

impl MoveNode {
    pub(crate) fn new(keystroke: Keystroke) -> Self {
        Self {
            keystroke,
            children: BTreeMap::new(),
            move_name: None,
        }
    }

    pub fn keystroke(&self) -> Keystroke {
        self.keystroke
    }

    pub fn move_name(&self) -> Option<&str> {
        self.move_name.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.move_name.is_some()
    }

    pub fn child(&self, keystroke: Keystroke) -> Option<&MoveNode> {
        self.children.get(&keystroke)
    }

    pub fn children(&self) -> impl Iterator<Item = &MoveNode> {
        self.children.values()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(MoveNode::node_count).sum::<usize>()
    }

    /// Walk/create the path below this node (which represents `keystrokes[index]`)
    /// and name its final node.
    pub(crate) fn add_move(&mut self, index: usize, name: &str, keystrokes: &[Keystroke]) {
        if index + 1 == keystrokes.len() {
            if let Some(previous) = self.move_name.as_deref()
                && previous != name
            {
                // Later registration wins.
                trace!(
                    target: "moves.trie",
                    keystroke = %self.keystroke,
                    previous,
                    name,
                    "terminal_override"
                );
            }
            self.move_name = Some(name.to_string());
            return;
        }
        let next = keystrokes[index + 1];
        self.children
            .entry(next)
            .or_insert_with(|| MoveNode::new(next))
            .add_move(index + 1, name, keystrokes);
    }

    /// Remove `name` from the terminal of the path below this node.
    ///
    /// Returns true when this node ended up with no children and no name of its
    /// own, meaning the parent may drop the edge to it. A path or name mismatch
    /// leaves the subtree untouched.
    pub(crate) fn remove_move(&mut self, index: usize, name: &str, keystrokes: &[Keystroke]) -> bool {
        if index + 1 == keystrokes.len() {
            if self.move_name.as_deref() != Some(name) {
                return false;
            }
            self.move_name = None;
            return self.children.is_empty();
        }
        let next = keystrokes[index + 1];
        let Some(child) = self.children.get_mut(&next) else {
            return false;
        };
        if child.remove_move(index + 1, name, keystrokes) {
            self.children.remove(&next);
            trace!(target: "moves.trie", keystroke = %next, depth = index + 1, "node_pruned");
            return self.children.is_empty() && self.move_name.is_none();
        }
        false
    }

    /// Try to match a move starting at `queue[index]`.
    ///
    /// On success every symbol on the matched path is removed from `queue`, one
    /// per level as the recursion unwinds; symbols before and after the match
    /// stay where they are. The path must be contiguous in the queue.
    pub(crate) fn parse_input(&self, queue: &mut Vec<Symbol>, index: usize) -> Option<&str> {
        debug_assert_eq!(queue[index].keystroke, self.keystroke);

        if let Some(name) = self.move_name.as_deref() {
            queue.remove(index);
            return Some(name);
        }
        if index + 1 >= queue.len() {
            return None;
        }
        let next = index + 1;
        let child = self.children.get(&queue[next].keystroke)?;
        let name = child.parse_input(queue, next)?;
        queue.remove(index);
        Some(name)
    }
}
