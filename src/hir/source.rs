//! Document storage and the tree-for-document capability.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rowan::GreenNode;

use crate::base::{FileId, FilePosition, LineCol, LineIndex};
use crate::syntax::ast::{AstNode, SourceFile};
use crate::syntax::{Parse, ParseError, SyntaxNode, parse};

/// Looks up the parsed tree of a document.
///
/// Returning `None` means "no tree for this document"; callers treat it as
/// "not found".
pub trait TreeProvider {
    fn source_file(&self, file: FileId) -> Option<SourceFile>;
}

/// Owns documents: path ↔ `FileId` mapping, text and parsed tree.
///
/// Trees are kept as green nodes so the store can be shared across
/// threads; every lookup hands out a fresh cursor root.
#[derive(Debug, Default)]
pub struct DocumentStore {
    inner: RwLock<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    path_to_id: IndexMap<PathBuf, FileId>,
    id_to_path: IndexMap<FileId, PathBuf>,
    documents: IndexMap<FileId, Document>,
    next_id: u32,
}

#[derive(Debug, Clone)]
struct Document {
    text: Arc<str>,
    green: GreenNode,
    errors: Arc<[ParseError]>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or assign the `FileId` for a path.
    pub fn file_id(&self, path: &Path) -> FileId {
        {
            let inner = self.inner.read();
            if let Some(&id) = inner.path_to_id.get(path) {
                return id;
            }
        }

        let mut inner = self.inner.write();
        if let Some(&id) = inner.path_to_id.get(path) {
            return id;
        }

        let id = FileId::new(inner.next_id);
        inner.next_id += 1;
        inner.path_to_id.insert(path.to_owned(), id);
        inner.id_to_path.insert(id, path.to_owned());
        id
    }

    pub fn path(&self, file: FileId) -> Option<PathBuf> {
        self.inner.read().id_to_path.get(&file).cloned()
    }

    /// Replace the text of a document and reparse it.
    pub fn set_contents(&self, file: FileId, text: impl Into<Arc<str>>) {
        let text = text.into();
        let parsed = parse(&text);
        self.set_parsed(file, text, parsed);
    }

    /// Store text that was already parsed elsewhere (e.g. on a worker thread).
    pub fn set_parsed(&self, file: FileId, text: impl Into<Arc<str>>, parsed: Parse) {
        let (green, errors) = parsed.into_parts();
        let document = Document {
            text: text.into(),
            green,
            errors: errors.into(),
        };
        tracing::trace!(%file, errors = document.errors.len(), "document updated");
        self.inner.write().documents.insert(file, document);
    }

    pub fn contents(&self, file: FileId) -> Option<Arc<str>> {
        self.inner.read().documents.get(&file).map(|doc| doc.text.clone())
    }

    pub fn parse_errors(&self, file: FileId) -> Arc<[ParseError]> {
        self.inner
            .read()
            .documents
            .get(&file)
            .map(|doc| doc.errors.clone())
            .unwrap_or_else(|| Arc::from([]))
    }

    /// Convert an editor line/column into a caret position.
    pub fn position(&self, file: FileId, line_col: LineCol) -> Option<FilePosition> {
        let text = self.contents(file)?;
        let offset = LineIndex::new(&text).offset(line_col)?;
        Some(FilePosition::new(file, offset))
    }

    pub fn remove(&self, file: FileId) {
        let mut inner = self.inner.write();
        if let Some(path) = inner.id_to_path.shift_remove(&file) {
            inner.path_to_id.shift_remove(&path);
        }
        inner.documents.shift_remove(&file);
    }

    pub fn len(&self) -> usize {
        self.inner.read().path_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Files that have a parsed document, in `FileId` order.
    pub fn files(&self) -> Vec<FileId> {
        let mut files: Vec<_> = self.inner.read().documents.keys().copied().collect();
        files.sort();
        files
    }
}

impl TreeProvider for DocumentStore {
    fn source_file(&self, file: FileId) -> Option<SourceFile> {
        let green = self.inner.read().documents.get(&file)?.green.clone();
        SourceFile::cast(SyntaxNode::new_root(green))
    }
}
