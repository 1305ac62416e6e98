//! The generic syntax tree.
//!
//! Every grammar rule produces a `Node`: either a scalar leaf or an ordered
//! list of child nodes. Rules are distinguished only by the shape they leave
//! behind (list arity and the kind of leaf in each slot), which the type
//! checker reads positionally. Per-node metadata lives in a [`TagStore`]
//! and is addressed through the node's optional tag id.

use std::fmt::Display;

use super::{
    tags::{TagId, TagStore},
    types::{Operator, Type},
};

#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    /// Placeholder for an optional part that did not match.
    Invalid,
    Bool(bool),
    Int(i32),
    Double(f64),
    String(String),
    /// Identifiers and keywords (`if`, `else`, `=`, ...).
    Symbol(String),
    Type(Type),
    Operator(Operator),
    List(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub value: NodeValue,
    tag: Option<TagId>,
}

impl Node {
    pub fn new(value: NodeValue) -> Self {
        Node { value, tag: None }
    }

    pub fn invalid() -> Self {
        Node::new(NodeValue::Invalid)
    }

    pub fn list(children: Vec<Node>) -> Self {
        Node::new(NodeValue::List(children))
    }

    pub fn symbol(name: &str) -> Self {
        Node::new(NodeValue::Symbol(name.to_string()))
    }

    pub fn tag(&self) -> Option<TagId> {
        self.tag
    }

    pub(crate) fn set_tag(&mut self, tag: Option<TagId>) {
        self.tag = tag;
    }

    pub fn is_list(&self) -> bool {
        matches!(self.value, NodeValue::List(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.value, NodeValue::Invalid)
    }

    /// Children of a list node; leaves have none.
    pub fn children(&self) -> &[Node] {
        match &self.value {
            NodeValue::List(children) => children,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.children().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.children().get(index)
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match &self.value {
            NodeValue::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<Type> {
        match self.value {
            NodeValue::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_operator(&self) -> Option<Operator> {
        match self.value {
            NodeValue::Operator(op) => Some(op),
            _ => None,
        }
    }

    /// Appends a child. An invalid node becomes an empty list first and any
    /// other leaf is uprooted into a one-element list.
    pub fn push(&mut self, child: Node) {
        match &mut self.value {
            NodeValue::List(children) => children.push(child),
            NodeValue::Invalid => self.value = NodeValue::List(vec![child]),
            _ => {
                self.uproot();
                self.push(child);
            }
        }
    }

    /// Removes a trailing placeholder left by an optional part that did not match.
    pub fn drop_invalid(&mut self) {
        if let NodeValue::List(children) = &mut self.value {
            if children.last().is_some_and(Node::is_invalid) {
                children.pop();
            }
        }
    }

    /// Moves the current node (with its tag) down to become the only child
    /// of a fresh, untagged list in its place.
    pub fn uproot(&mut self) {
        let child = std::mem::replace(self, Node::list(vec![]));
        self.push(child);
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            NodeValue::Invalid => write!(f, "<invalid>"),
            NodeValue::Bool(value) => write!(f, "{}", value),
            NodeValue::Int(value) => write!(f, "{}", value),
            NodeValue::Double(value) => write!(f, "{:?}", value),
            NodeValue::String(value) => write!(f, "\"{}\"", value),
            NodeValue::Symbol(name) => write!(f, "{}", name),
            NodeValue::Type(ty) => write!(f, "{}", ty),
            NodeValue::Operator(op) => write!(f, "{}", op),
            NodeValue::List(children) => {
                write!(f, "(")?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                write!(f, " )")
            }
        }
    }
}

/// The parser's output: the root node of a compilation unit together with
/// the tag store its nodes point into.
#[derive(Debug)]
pub struct SyntaxTree {
    pub root: Node,
    pub tags: TagStore,
}
