//! # hierarchy-base
//!
//! Structural queries behind type, call and method hierarchy views for Haxe
//! sources: which class encloses the caret, which class a reference names,
//! which method the caret designates.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project → Workspace loading, library references
//!   ↓
//! ide     → Hierarchy queries, scope walker, position locator
//!   ↓
//! hir     → Documents, name resolution, declaration pointers
//!   ↓
//! syntax  → Lexer + parser (rowan trees), typed AST wrappers
//!   ↓
//! base    → Primitives (FileId, positions, line index)
//! ```

/// Foundation types: FileId, positions, line index
pub mod base;

/// Haxe syntax: lossless trees, node kinds, typed wrappers
pub mod syntax;

/// Semantic layer: tree lookup and name resolution capabilities
pub mod hir;

/// Hierarchy queries over a caret or a selection
pub mod ide;

/// Workspace loading and project settings
pub mod project;

pub use base::{FileId, FilePosition, LineCol, LineIndex, TextRange, TextSize};
pub use ide::{AnalysisHost, HierarchyContext, hierarchy};
