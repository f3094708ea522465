//! The query context handed to hierarchy queries.
//!
//! A context mirrors what an editor action knows when it fires: maybe a
//! project (the capabilities to look trees up and resolve names), maybe an
//! editor with a caret, maybe an element the user selected in some other
//! view. Any of them can be absent; queries degrade to "not found".

use std::fmt;

use crate::base::{FileId, FilePosition, TextSize};
use crate::hir::{ClassResolver, DeclPtr, InFile, NameResolver, TreeProvider};
use crate::syntax::ast::AstNode;
use crate::syntax::{SyntaxElement, SyntaxNode};

/// The capabilities a query may call into.
#[derive(Clone, Copy)]
pub struct Project<'a> {
    trees: &'a dyn TreeProvider,
    names: &'a dyn NameResolver,
    classes: &'a dyn ClassResolver,
}

impl<'a> Project<'a> {
    pub fn new(
        trees: &'a dyn TreeProvider,
        names: &'a dyn NameResolver,
        classes: &'a dyn ClassResolver,
    ) -> Self {
        Self {
            trees,
            names,
            classes,
        }
    }

    pub fn trees(&self) -> &'a dyn TreeProvider {
        self.trees
    }

    pub fn names(&self) -> &'a dyn NameResolver {
        self.names
    }

    pub fn classes(&self) -> &'a dyn ClassResolver {
        self.classes
    }

    /// Turn a declaration pointer into a node of its file's current tree.
    pub fn materialize(&self, ptr: DeclPtr) -> Option<SyntaxNode> {
        let tree = self.trees.source_file(ptr.file)?;
        ptr.to_node(tree.syntax())
    }
}

impl fmt::Debug for Project<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project").finish_non_exhaustive()
    }
}

/// An open editor: the document and the caret offset in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditorState {
    pub document: FileId,
    pub caret: TextSize,
}

impl EditorState {
    pub fn new(position: FilePosition) -> Self {
        Self {
            document: position.file,
            caret: position.offset,
        }
    }

    pub fn offset(&self) -> TextSize {
        self.caret
    }

    pub fn position(&self) -> FilePosition {
        FilePosition::new(self.document, self.caret)
    }
}

#[derive(Debug, Clone, Default)]
pub struct HierarchyContext<'a> {
    project: Option<Project<'a>>,
    editor: Option<EditorState>,
    selection: Option<InFile<SyntaxElement>>,
}

impl<'a> HierarchyContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project: Project<'a>) -> Self {
        self.project = Some(project);
        self
    }

    pub fn with_editor(mut self, editor: EditorState) -> Self {
        self.editor = Some(editor);
        self
    }

    /// An element chosen outside an editor, e.g. from a tree view.
    pub fn with_selection(mut self, selection: InFile<SyntaxElement>) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn project(&self) -> Option<Project<'a>> {
        self.project
    }

    pub fn editor(&self) -> Option<EditorState> {
        self.editor
    }

    pub fn selection(&self) -> Option<&InFile<SyntaxElement>> {
        self.selection.as_ref()
    }
}
