//! Hierarchy queries. These are the entry points type, call and method hierarchy
//! views use to find out what the user is pointing at.
//!
//! Everything here is a free function over a [`HierarchyContext`] or a
//! [`Project`]. Nothing is stored between calls; an absent project, editor,
//! tree or resolution result simply produces `None`.

use rowan::NodeOrToken;
use tracing::debug;

use crate::hir::{DeclPtr, InFile, MethodView};
use crate::syntax::ast::{AstNode, ClassDecl, ClassLike, MethodDecl, Reference, SourceFile, declaration_name};
use crate::syntax::{NodeKind, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

use super::context::{HierarchyContext, Project};
use super::position::{TargetFlags, element_at, find_target_element, node_at_position, target_element};
use super::scope::{containing_class_of, containing_file_of};

// ============================================================================
// REFERENCES
// ============================================================================

/// The first class-like declaration `reference` resolves to.
///
/// A reference without an identifier is `None` and the resolver is not
/// consulted.
pub fn resolve_to_class(project: Project<'_>, reference: InFile<&Reference>) -> Option<ClassLike> {
    reference.value.ident_token()?;
    let candidates = project.names().resolve_reference(reference);
    first_class_like(project, &candidates)
}

/// The class referenced by an identifier token.
///
/// The token must sit directly inside a reference. With several candidates
/// the first class-like one wins; a single candidate is materialized and
/// kept only if it is class-like.
pub fn find_referenced_class_for_id(project: Project<'_>, id: InFile<&SyntaxToken>) -> Option<ClassLike> {
    if id.value.kind() != SyntaxKind::Ident {
        return None;
    }
    let reference = id.value.parent().and_then(Reference::cast)?;
    let candidates = project
        .names()
        .resolve_reference(InFile::new(id.file, &reference));

    let class = match candidates.as_slice() {
        [] => None,
        [single] => project.materialize(*single).and_then(ClassLike::cast),
        many => first_class_like(project, many),
    };

    debug!(
        file = %id.file,
        name = id.value.text(),
        candidates = candidates.len(),
        found = class.is_some(),
        "find_referenced_class_for_id"
    );
    class
}

/// Resolve a reference expression with the project's class resolver.
pub fn resolve_class_reference(project: Project<'_>, expr: InFile<&Reference>) -> Option<ClassLike> {
    let resolution = project.classes().resolve_expression_to_class(expr)?;
    project.materialize(resolution.class).and_then(ClassLike::cast)
}

fn first_class_like(project: Project<'_>, candidates: &[DeclPtr]) -> Option<ClassLike> {
    candidates
        .iter()
        .filter(|ptr| ptr.node_kind().is_class_like())
        .find_map(|ptr| project.materialize(*ptr))
        .and_then(ClassLike::cast)
}

// ============================================================================
// STRUCTURE
// ============================================================================

/// Top-level classes of `file`, in source order. Nested classes are not
/// included.
pub fn class_list(file: &SourceFile) -> Vec<ClassDecl> {
    file.classes().collect()
}

/// The class the context points into.
///
/// With an editor, a caret on (a reference to) a class yields that class;
/// otherwise the innermost class around the caret. Without an editor, the
/// selected element if it is a class.
pub fn containing_class(ctx: &HierarchyContext<'_>, allow_anonymous: bool) -> Option<ClassLike> {
    let Some(project) = ctx.project() else {
        debug!("containing_class: no project");
        return None;
    };

    let Some(editor) = ctx.editor() else {
        let selection = ctx.selection()?;
        return selection.value.as_node().cloned().and_then(ClassLike::cast);
    };

    let position = editor.position();
    let Some(tree) = project.trees().source_file(position.file) else {
        debug!(%position, "containing_class: no tree for document");
        return None;
    };

    if let Some(NodeOrToken::Node(target)) = target_element(project, position) {
        if let Some(class) = ClassLike::cast(target) {
            debug!(%position, "containing_class: caret designates a class");
            return Some(class);
        }
    }

    let leaf = node_at_position(&tree, position.offset)?;
    let class = containing_class_of(&leaf.into(), allow_anonymous).and_then(ClassLike::cast);
    debug!(%position, allow_anonymous, found = class.is_some(), "containing_class");
    class
}

pub fn containing_file(ctx: &HierarchyContext<'_>) -> Option<SourceFile> {
    let element = element(ctx)?;
    containing_file_of(&element.value).and_then(SourceFile::cast)
}

/// The element the context points at: the leaf under the caret, or the
/// selection when there is no editor.
pub fn element(ctx: &HierarchyContext<'_>) -> Option<InFile<SyntaxElement>> {
    let project = ctx.project()?;
    match ctx.editor() {
        Some(editor) => {
            let position = editor.position();
            element_at(project, position).map(|token| InFile::new(position.file, token.into()))
        }
        None => ctx.selection().cloned(),
    }
}

// ============================================================================
// METHODS
// ============================================================================

/// Name node of the declaration designated by the caret, either directly or
/// through a reference. Declarations without a name come back whole.
pub fn referenced_element(ctx: &HierarchyContext<'_>) -> Option<SyntaxNode> {
    let project = ctx.project()?;
    let editor = ctx.editor()?;
    let target = find_target_element(project, editor.position(), TargetFlags::all())?;
    Some(match declaration_name(&target) {
        Some(name) => name.syntax().clone(),
        None => target,
    })
}

/// The method owning the referenced element.
pub fn target_method(ctx: &HierarchyContext<'_>) -> Option<MethodView> {
    let element = referenced_element(ctx)?;
    let parent = element.parent()?;
    if !NodeKind::of_node(&parent).is_method_like() {
        debug!(parent = ?parent.kind(), "target_method: not a method");
        return None;
    }
    MethodDecl::cast(parent).map(MethodView::new)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::path::Path;

    use rowan::GreenNodeBuilder;

    use super::*;
    use crate::base::{FileId, FilePosition, TextSize};
    use crate::hir::{
        ClassResolution, ClassResolver, DocumentStore, NameResolver, Resolver, SymbolIndex, TreeProvider,
    };
    use crate::ide::EditorState;
    use crate::syntax::{SyntaxNode, parse};

    struct Fixture {
        store: DocumentStore,
        index: SymbolIndex,
        file: FileId,
        text: &'static str,
    }

    impl Fixture {
        fn new(text: &'static str) -> Self {
            let store = DocumentStore::new();
            let file = store.file_id(Path::new("Main.hx"));
            store.set_contents(file, text);
            let index = SymbolIndex::build(&store);
            Self {
                store,
                index,
                file,
                text,
            }
        }

        fn at(&self, needle: &str) -> FilePosition {
            FilePosition::new(self.file, self.text.find(needle).unwrap() as u32)
        }
    }

    /// Hands out a fixed candidate list and counts calls.
    struct Scripted {
        candidates: Vec<DeclPtr>,
        calls: Cell<usize>,
    }

    impl NameResolver for Scripted {
        fn resolve_reference(&self, _reference: InFile<&Reference>) -> Vec<DeclPtr> {
            self.calls.set(self.calls.get() + 1);
            self.candidates.clone()
        }
    }

    impl ClassResolver for Scripted {
        fn resolve_expression_to_class(&self, _expr: InFile<&Reference>) -> Option<ClassResolution> {
            None
        }
    }

    #[test]
    fn test_class_list_is_top_level_only() {
        let file = parse("class A { class Nested {} } class B {} interface C {}").tree();
        let names: Vec<_> = class_list(&file)
            .iter()
            .map(|class| class.name().unwrap().text())
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn test_multi_reference_takes_first_class() {
        let fx = Fixture::new("class A { function m() {} function f() { X; } } class B {} class C {}");
        let tree = fx.store.source_file(fx.file).unwrap();
        let node = |kind: SyntaxKind, nth: usize| -> SyntaxNode {
            tree.syntax().descendants().filter(|n| n.kind() == kind).nth(nth).unwrap()
        };
        let scripted = Scripted {
            candidates: vec![
                DeclPtr::new(fx.file, &node(SyntaxKind::MethodDecl, 0)),
                DeclPtr::new(fx.file, &node(SyntaxKind::ClassDecl, 1)),
                DeclPtr::new(fx.file, &node(SyntaxKind::ClassDecl, 2)),
            ],
            calls: Cell::new(0),
        };
        let project = Project::new(&fx.store, &scripted, &scripted);

        let id = tree
            .syntax()
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.text() == "X")
            .unwrap();
        let class = find_referenced_class_for_id(project, InFile::new(fx.file, &id)).unwrap();
        assert_eq!(class.name().unwrap().text(), "B");
    }

    #[test]
    fn test_single_non_class_candidate_is_none() {
        let fx = Fixture::new("class A { function m() {} function f() { m; } }");
        let tree = fx.store.source_file(fx.file).unwrap();
        let resolver = Resolver::new(&fx.index);
        let project = Project::new(&fx.store, &resolver, &resolver);

        let id = tree
            .syntax()
            .descendants()
            .filter_map(Reference::cast)
            .find_map(|r| r.ident_token())
            .unwrap();
        assert!(find_referenced_class_for_id(project, InFile::new(fx.file, &id)).is_none());
    }

    #[test]
    fn test_reference_without_identifier_skips_resolver() {
        let mut builder = GreenNodeBuilder::new();
        builder.start_node(SyntaxKind::SourceFile.into());
        builder.start_node(SyntaxKind::Reference.into());
        builder.finish_node();
        builder.finish_node();
        let root = SyntaxNode::new_root(builder.finish());
        let reference = root.descendants().find_map(Reference::cast).unwrap();

        let store = DocumentStore::new();
        let scripted = Scripted {
            candidates: Vec::new(),
            calls: Cell::new(0),
        };
        let project = Project::new(&store, &scripted, &scripted);

        assert!(resolve_to_class(project, InFile::new(FileId::new(0), &reference)).is_none());
        assert_eq!(scripted.calls.get(), 0);
    }

    #[test]
    fn test_containing_class_requires_project() {
        let ctx = HierarchyContext::new().with_editor(EditorState::new(FilePosition::new(FileId::new(0), 0u32)));
        assert!(containing_class(&ctx, true).is_none());
        assert!(element(&ctx).is_none());
        assert!(containing_file(&ctx).is_none());
    }

    #[test]
    fn test_containing_class_from_caret() {
        let fx = Fixture::new("class Outer { class Inner { function f() { ; } } }");
        let resolver = Resolver::new(&fx.index);
        let project = Project::new(&fx.store, &resolver, &resolver);
        let ctx = HierarchyContext::new()
            .with_project(project)
            .with_editor(EditorState::new(fx.at("; }")));

        let class = containing_class(&ctx, false).unwrap();
        assert_eq!(class.name().unwrap().text(), "Inner");
    }

    #[test]
    fn test_containing_class_prefers_caret_target() {
        let fx = Fixture::new("class Foo { var b:Bar; } class Bar {}");
        let resolver = Resolver::new(&fx.index);
        let project = Project::new(&fx.store, &resolver, &resolver);
        let ctx = HierarchyContext::new()
            .with_project(project)
            .with_editor(EditorState::new(fx.at("Bar;")));

        let class = containing_class(&ctx, false).unwrap();
        assert_eq!(class.name().unwrap().text(), "Bar");
    }

    #[test]
    fn test_containing_class_from_selection() {
        let fx = Fixture::new("class Foo { function f() {} }");
        let tree = fx.store.source_file(fx.file).unwrap();
        let resolver = Resolver::new(&fx.index);
        let project = Project::new(&fx.store, &resolver, &resolver);

        let class = tree.syntax().first_child().unwrap();
        let ctx = HierarchyContext::new()
            .with_project(project)
            .with_selection(InFile::new(fx.file, class.into()));
        assert!(containing_class(&ctx, false).is_some());

        let method = tree.syntax().descendants().find(|n| n.kind() == SyntaxKind::MethodDecl).unwrap();
        let ctx = HierarchyContext::new()
            .with_project(project)
            .with_selection(InFile::new(fx.file, method.into()));
        assert!(containing_class(&ctx, false).is_none());
        assert_eq!(containing_file(&ctx).unwrap().syntax(), tree.syntax());
    }

    #[test]
    fn test_target_method_through_reference() {
        let fx = Fixture::new("class A { function callee() {} function caller() { callee(); } }");
        let resolver = Resolver::new(&fx.index);
        let project = Project::new(&fx.store, &resolver, &resolver);
        let ctx = HierarchyContext::new()
            .with_project(project)
            .with_editor(EditorState::new(fx.at("callee(); }")));

        let referenced = referenced_element(&ctx).unwrap();
        assert_eq!(referenced.kind(), SyntaxKind::Name);
        let method = target_method(&ctx).unwrap();
        assert_eq!(method.name().as_deref(), Some("callee"));
    }

    #[test]
    fn test_target_method_rejects_non_method() {
        let fx = Fixture::new("class A { var field:Int; function f() { field; } }");
        let resolver = Resolver::new(&fx.index);
        let project = Project::new(&fx.store, &resolver, &resolver);
        let ctx = HierarchyContext::new()
            .with_project(project)
            .with_editor(EditorState::new(fx.at("field;")));

        assert!(referenced_element(&ctx).is_some());
        assert!(target_method(&ctx).is_none());
    }

    #[test]
    fn test_referenced_element_needs_editor() {
        let fx = Fixture::new("class A {}");
        let resolver = Resolver::new(&fx.index);
        let project = Project::new(&fx.store, &resolver, &resolver);
        let ctx = HierarchyContext::new().with_project(project);
        assert!(referenced_element(&ctx).is_none());
        assert!(target_method(&ctx).is_none());
    }

    #[test]
    fn test_resolve_class_reference() {
        let fx = Fixture::new("class A { function f() { new B(); } } class B {}");
        let tree = fx.store.source_file(fx.file).unwrap();
        let resolver = Resolver::new(&fx.index);
        let project = Project::new(&fx.store, &resolver, &resolver);

        let reference = tree
            .syntax()
            .descendants()
            .filter_map(Reference::cast)
            .find(|r| r.text().as_deref() == Some("B"))
            .unwrap();
        let class = resolve_class_reference(project, InFile::new(fx.file, &reference)).unwrap();
        assert_eq!(class.name().unwrap().text(), "B");

        let offset = TextSize::from(fx.text.find("B()").unwrap() as u32);
        assert!(class.syntax().text_range().start() > offset);
    }
}
