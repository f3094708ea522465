//! AnalysisHost and Analysis — owned state and read-only snapshots.
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//! let file = host.set_file_content("src/Main.hx", "class Main {}");
//!
//! let analysis = host.analysis();
//! let ctx = analysis.context_at(FilePosition::new(file, 7u32));
//! let class = hierarchy::containing_class(&ctx, false);
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::base::{FileId, FilePosition};
use crate::hir::{DocumentStore, Resolver, SymbolIndex, TreeProvider};
use crate::syntax::ast::SourceFile;
use crate::syntax::{Parse, ParseError};

use super::context::{EditorState, HierarchyContext, Project};

/// Owns the documents and the symbol index built from them.
///
/// Apply changes via `set_file_content()` and `remove_file()`, then take a
/// snapshot with `analysis()`.
#[derive(Debug, Default)]
pub struct AnalysisHost {
    store: DocumentStore,
    index: SymbolIndex,
    index_dirty: bool,
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and store a document, returning its id.
    pub fn set_file_content(&mut self, path: impl AsRef<Path>, text: &str) -> FileId {
        let file = self.store.file_id(path.as_ref());
        self.store.set_contents(file, text);
        self.index_dirty = true;
        file
    }

    /// Store a document parsed elsewhere (the workspace loader parses in
    /// parallel).
    pub fn set_parsed(&mut self, path: impl AsRef<Path>, text: impl Into<Arc<str>>, parsed: Parse) -> FileId {
        let file = self.store.file_id(path.as_ref());
        self.store.set_parsed(file, text, parsed);
        self.index_dirty = true;
        file
    }

    pub fn remove_file(&mut self, path: impl AsRef<Path>) {
        let file = self.store.file_id(path.as_ref());
        self.store.remove(file);
        self.index_dirty = true;
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn file_count(&self) -> usize {
        self.store.len()
    }

    /// A consistent snapshot, rebuilding the index first if documents
    /// changed since the last one.
    pub fn analysis(&mut self) -> Analysis<'_> {
        if self.index_dirty {
            self.index = SymbolIndex::build(&self.store);
            self.index_dirty = false;
        }
        Analysis {
            store: &self.store,
            resolver: Resolver::new(&self.index),
        }
    }
}

/// Read-only view of an [`AnalysisHost`].
///
/// Shareable across threads; each thread builds its own [`Project`] from it.
#[derive(Debug, Clone, Copy)]
pub struct Analysis<'a> {
    store: &'a DocumentStore,
    resolver: Resolver<'a>,
}

impl<'a> Analysis<'a> {
    pub fn project(&self) -> Project<'_> {
        Project::new(self.store, &self.resolver, &self.resolver)
    }

    pub fn store(&self) -> &'a DocumentStore {
        self.store
    }

    pub fn source_file(&self, file: FileId) -> Option<SourceFile> {
        self.store.source_file(file)
    }

    pub fn parse_errors(&self, file: FileId) -> Arc<[ParseError]> {
        self.store.parse_errors(file)
    }

    /// A context with this snapshot's project and an editor caret at
    /// `position`.
    pub fn context_at(&self, position: FilePosition) -> HierarchyContext<'_> {
        HierarchyContext::new()
            .with_project(self.project())
            .with_editor(EditorState::new(position))
    }
}
