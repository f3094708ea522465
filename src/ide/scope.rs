//! Scope walker: nearest enclosing node of a given kind.

use rowan::NodeOrToken;

use crate::syntax::{KindSet, NodeKind, SyntaxElement, SyntaxNode};

/// Walk from `start` (inclusive) towards the root.
///
/// Returns the first element whose kind is in `predicate`. An element whose
/// kind is in `stop_at` (and not in `predicate`) ends the walk with `None`,
/// as does running out of parents. Kinds in neither set are skipped. A token
/// start counts as a `Leaf`.
pub fn find_enclosing(start: &SyntaxElement, predicate: KindSet, stop_at: KindSet) -> Option<SyntaxElement> {
    let mut current = Some(start.clone());
    while let Some(element) = current {
        let kind = NodeKind::of_element(&element);
        if predicate.contains_kind(kind) {
            return Some(element);
        }
        if stop_at.contains_kind(kind) {
            return None;
        }
        current = element.parent().map(NodeOrToken::Node);
    }
    None
}

/// Innermost class-like declaration around `start`, never crossing the file.
///
/// With `allow_anonymous == false`, anonymous structures are walked past as
/// if they were plain nodes.
pub fn containing_class_of(start: &SyntaxElement, allow_anonymous: bool) -> Option<SyntaxNode> {
    let predicate = if allow_anonymous {
        KindSet::CLASS_LIKE
    } else {
        KindSet::CLASS_DECL
    };
    find_enclosing(start, predicate, KindSet::FILE).and_then(NodeOrToken::into_node)
}

/// The root `File` node of the tree containing `start`.
pub fn containing_file_of(start: &SyntaxElement) -> Option<SyntaxNode> {
    find_enclosing(start, KindSet::FILE, KindSet::empty()).and_then(NodeOrToken::into_node)
}
