//! Position locator, from a caret offset to a leaf or a semantic target.

use bitflags::bitflags;
use rowan::{NodeOrToken, TokenAtOffset};

use crate::base::{FilePosition, TextSize};
use crate::hir::InFile;
use crate::syntax::ast::{AstNode, Reference, SourceFile};
use crate::syntax::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

use super::context::Project;

bitflags! {
    /// Which meanings [`find_target_element`] may accept for the caret.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TargetFlags: u8 {
        /// The caret is on the name of a declaration.
        const ELEMENT_NAME = 1 << 0;
        /// The caret is on a reference that resolves to a declaration.
        const REFERENCED_ELEMENT = 1 << 1;
    }
}

/// The leaf token whose range contains `offset`.
///
/// Ranges are half-open, so at a boundary the token starting there wins and
/// the end of the file yields `None`.
pub fn node_at_position(file: &SourceFile, offset: TextSize) -> Option<SyntaxToken> {
    let root = file.syntax();
    if offset >= root.text_range().end() {
        return None;
    }
    match root.token_at_offset(offset) {
        TokenAtOffset::None => None,
        TokenAtOffset::Single(token) | TokenAtOffset::Between(_, token) => Some(token),
    }
}

/// [`node_at_position`] in the tree the project holds for `position.file`.
pub fn element_at(project: Project<'_>, position: FilePosition) -> Option<SyntaxToken> {
    let Some(tree) = project.trees().source_file(position.file) else {
        tracing::debug!(file = %position.file, "no tree for document");
        return None;
    };
    node_at_position(&tree, position.offset)
}

/// The declaration the caret designates, if any.
///
/// With `ELEMENT_NAME`, an identifier naming a declaration yields that
/// declaration. With `REFERENCED_ELEMENT`, an identifier inside a reference
/// yields the first candidate the project's resolver returns. A caret just
/// past an identifier still designates it.
pub fn find_target_element(
    project: Project<'_>,
    position: FilePosition,
    flags: TargetFlags,
) -> Option<SyntaxNode> {
    let token = ident_at(project, position)?;
    let parent = token.parent()?;

    let target = match parent.kind() {
        SyntaxKind::Name if flags.contains(TargetFlags::ELEMENT_NAME) => parent.parent(),
        SyntaxKind::Reference if flags.contains(TargetFlags::REFERENCED_ELEMENT) => {
            let reference = Reference::cast(parent)?;
            project
                .names()
                .resolve_reference(InFile::new(position.file, &reference))
                .into_iter()
                .find_map(|ptr| project.materialize(ptr))
        }
        _ => None,
    };

    tracing::trace!(
        %position,
        target = ?target.as_ref().map(|node| node.kind()),
        "find_target_element"
    );
    target
}

/// The identifier under the caret, or the one the caret sits right after.
fn ident_at(project: Project<'_>, position: FilePosition) -> Option<SyntaxToken> {
    if let Some(token) = element_at(project, position).filter(|t| t.kind() == SyntaxKind::Ident) {
        return Some(token);
    }
    let before = position.offset.checked_sub(TextSize::from(1))?;
    element_at(project, FilePosition::new(position.file, before))
        .filter(|t| t.kind() == SyntaxKind::Ident && t.text_range().end() == position.offset)
}

/// The semantic target at the caret, or the raw leaf when there is none.
pub fn target_element(project: Project<'_>, position: FilePosition) -> Option<SyntaxElement> {
    find_target_element(project, position, TargetFlags::all())
        .map(NodeOrToken::Node)
        .or_else(|| element_at(project, position).map(NodeOrToken::Token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FileId;
    use crate::hir::{DocumentStore, Resolver, SymbolIndex};
    use crate::syntax::parse;

    fn offset_of(text: &str, needle: &str) -> TextSize {
        TextSize::from(text.find(needle).unwrap() as u32)
    }

    #[test]
    fn test_node_at_position_inside_token() {
        let text = "class Foo {}";
        let file = parse(text).tree();
        let token = node_at_position(&file, offset_of(text, "oo")).unwrap();
        assert_eq!(token.text(), "Foo");
    }

    #[test]
    fn test_node_at_position_boundary_takes_right_token() {
        let text = "class Foo {}";
        let file = parse(text).tree();

        // "Foo| {": the whitespace starts here.
        let token = node_at_position(&file, offset_of(text, " {")).unwrap();
        assert_eq!(token.kind(), SyntaxKind::Whitespace);

        let token = node_at_position(&file, offset_of(text, "Foo")).unwrap();
        assert_eq!(token.text(), "Foo");
    }

    #[test]
    fn test_node_at_position_end_and_beyond() {
        let text = "class Foo {}";
        let file = parse(text).tree();
        let end = TextSize::of(text);

        assert_eq!(node_at_position(&file, end - TextSize::from(1)).unwrap().text(), "}");
        assert!(node_at_position(&file, end).is_none());
        assert!(node_at_position(&file, end + TextSize::from(1)).is_none());
    }

    #[test]
    fn test_node_at_position_empty_file() {
        let file = parse("").tree();
        assert!(node_at_position(&file, TextSize::from(0)).is_none());
    }

    #[test]
    fn test_target_element_flags() {
        let text = "class Foo { function bar() { Baz; } } class Baz {}";
        let store = DocumentStore::new();
        let file = store.file_id(std::path::Path::new("a.hx"));
        store.set_contents(file, text);
        let index = SymbolIndex::build(&store);
        let resolver = Resolver::new(&index);
        let project = Project::new(&store, &resolver, &resolver);

        let on_reference = FilePosition::new(file, offset_of(text, "Baz;"));
        let target = find_target_element(project, on_reference, TargetFlags::REFERENCED_ELEMENT).unwrap();
        assert_eq!(target.kind(), SyntaxKind::ClassDecl);
        assert!(find_target_element(project, on_reference, TargetFlags::ELEMENT_NAME).is_none());

        let on_name = FilePosition::new(file, offset_of(text, "bar"));
        let target = find_target_element(project, on_name, TargetFlags::ELEMENT_NAME).unwrap();
        assert_eq!(target.kind(), SyntaxKind::MethodDecl);

        let after_reference = FilePosition::new(file, offset_of(text, ";"));
        let target = find_target_element(project, after_reference, TargetFlags::REFERENCED_ELEMENT).unwrap();
        assert_eq!(target.kind(), SyntaxKind::ClassDecl);

        let after_brace = FilePosition::new(file, offset_of(text, "} class") + TextSize::from(1));
        assert!(find_target_element(project, after_brace, TargetFlags::all()).is_none());

        let on_keyword = FilePosition::new(file, offset_of(text, "function"));
        assert!(find_target_element(project, on_keyword, TargetFlags::all()).is_none());
        let fallback = target_element(project, on_keyword).unwrap();
        assert_eq!(fallback.kind(), SyntaxKind::FunctionKw);
    }

    #[test]
    fn test_element_at_unknown_document() {
        let store = DocumentStore::new();
        let index = SymbolIndex::new();
        let resolver = Resolver::new(&index);
        let project = Project::new(&store, &resolver, &resolver);

        assert!(element_at(project, FilePosition::new(FileId::new(7), 0u32)).is_none());
        assert!(target_element(project, FilePosition::new(FileId::new(7), 0u32)).is_none());
    }
}
