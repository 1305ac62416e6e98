//! Side-table metadata for syntax tree nodes.
//!
//! A node carries at most one opaque [`TagId`]; the id is allocated the first
//! time metadata is written for the node and indexes into the store's arena.
//! Nodes never written to stay untagged and read back as
//! [`Category::None`] at line 0.

use crate::Position;

use super::node::Node;

pub type TagId = usize;

/// Syntactic category recorded by the grammar for statement-level nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    None,
    FunDecl,
    Expression,
    Block,
    For,
    If,
    While,
    Return,
    Assignment,
    Declaration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tag {
    pub category: Category,
    pub position: Position,
}

#[derive(Debug, Default)]
pub struct TagStore {
    tags: Vec<Tag>,
}

impl TagStore {
    pub fn new() -> Self {
        TagStore { tags: vec![] }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn is_tagged(&self, node: &Node) -> bool {
        node.tag().is_some()
    }

    pub fn get(&self, node: &Node) -> Option<&Tag> {
        node.tag().and_then(|id| self.tags.get(id))
    }

    /// Returns the node's tag, allocating a fresh one on first access.
    pub fn get_mut(&mut self, node: &mut Node) -> &mut Tag {
        let id = match node.tag() {
            Some(id) => id,
            None => {
                self.tags.push(Tag::default());
                let id = self.tags.len() - 1;
                node.set_tag(Some(id));
                id
            }
        };
        &mut self.tags[id]
    }

    pub fn category(&self, node: &Node) -> Category {
        self.get(node).map_or(Category::None, |tag| tag.category)
    }

    pub fn position(&self, node: &Node) -> Position {
        self.get(node).map_or(Position::null(), |tag| tag.position)
    }

    pub fn line(&self, node: &Node) -> u32 {
        self.position(node).line
    }

    pub fn set_category(&mut self, node: &mut Node, category: Category) {
        self.get_mut(node).category = category;
    }

    pub fn set_position(&mut self, node: &mut Node, position: Position) {
        self.get_mut(node).position = position;
    }

    /// Makes `to` share `from`'s tag id, so both resolve to the same metadata.
    pub fn copy_tag(from: &Node, to: &mut Node) {
        to.set_tag(from.tag());
    }

    /// Copies only the source position, giving `to` its own tag if needed.
    pub fn copy_position(&mut self, from: &Node, to: &mut Node) {
        let position = self.position(from);
        self.set_position(to, position);
    }
}
