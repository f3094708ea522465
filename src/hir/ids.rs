//! Handles for declarations that may live in another file's tree.

use std::fmt;

use rowan::NodeOrToken;

use crate::base::{FileId, TextRange};
use crate::syntax::{NodeKind, SyntaxKind, SyntaxNode};

/// An ownership-free pointer to a declaration node.
///
/// Combines the file holding the declaration with the node's kind and
/// range. It never keeps a tree alive; [`DeclPtr::to_node`] re-finds the
/// node in whatever root the caller supplies for `file`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct DeclPtr {
    pub file: FileId,
    kind: SyntaxKind,
    range: TextRange,
}

impl DeclPtr {
    pub fn new(file: FileId, node: &SyntaxNode) -> Self {
        Self {
            file,
            kind: node.kind(),
            range: node.text_range(),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn node_kind(&self) -> NodeKind {
        NodeKind::of_kind(self.kind)
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Find the pointed-to node under `root`.
    ///
    /// Returns `None` when `root` is not a tree root or no longer contains a
    /// node of the same kind and range.
    pub fn to_node(&self, root: &SyntaxNode) -> Option<SyntaxNode> {
        if root.parent().is_some() || !root.text_range().contains_range(self.range) {
            return None;
        }
        let start = match root.covering_element(self.range) {
            NodeOrToken::Node(node) => node,
            NodeOrToken::Token(token) => token.parent()?,
        };
        start
            .ancestors()
            .find(|node| node.kind() == self.kind && node.text_range() == self.range)
    }
}

impl fmt::Debug for DeclPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclPtr({:?}:{:?}@{:?})", self.file, self.kind, self.range)
    }
}

/// A value together with the file it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InFile<T> {
    pub file: FileId,
    pub value: T,
}

impl<T> InFile<T> {
    pub fn new(file: FileId, value: T) -> Self {
        Self { file, value }
    }

    pub fn as_ref(&self) -> InFile<&T> {
        InFile::new(self.file, &self.value)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> InFile<U> {
        InFile::new(self.file, f(self.value))
    }
}
