//! Name resolution: mapping references to candidate declarations.
//!
//! The hierarchy queries consume resolution through two capabilities:
//!
//! - [`NameResolver`] returns *every* declaration a reference may denote,
//!   in priority order (a "multi-reference" when there is more than one);
//! - [`ClassResolver`] resolves a reference expression to a class only.
//!
//! [`Resolver`] implements both on top of a [`SymbolIndex`] of top-level
//! classes plus a lexical walk of the reference's enclosing scopes.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::FileId;
use crate::syntax::ast::{AstNode, ClassDecl, Member, MethodDecl, Reference, SourceFile};
use crate::syntax::{SyntaxKind, SyntaxNode};

use super::ids::{DeclPtr, InFile};
use super::source::{DocumentStore, TreeProvider};

// ============================================================================
// CAPABILITIES
// ============================================================================

/// Resolves a reference to all declarations it may denote.
///
/// An empty result means "unresolved", never an error.
pub trait NameResolver {
    fn resolve_reference(&self, reference: InFile<&Reference>) -> Vec<DeclPtr>;
}

/// Resolves a reference expression to the class it names.
pub trait ClassResolver {
    fn resolve_expression_to_class(&self, expr: InFile<&Reference>) -> Option<ClassResolution>;
}

/// Successful result of [`ClassResolver::resolve_expression_to_class`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassResolution {
    pub class: DeclPtr,
}

// ============================================================================
// SYMBOL INDEX
// ============================================================================

/// Top-level classes of every indexed file, by simple name.
///
/// Entries for one name are kept sorted by file and then by position, so
/// cross-file lookups are deterministic.
#[derive(Clone, Debug, Default)]
pub struct SymbolIndex {
    classes: FxHashMap<SmolStr, Vec<DeclPtr>>,
    files: Vec<FileId>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every document in `store`.
    pub fn build(store: &DocumentStore) -> Self {
        let mut index = Self::new();
        for file in store.files() {
            if let Some(tree) = store.source_file(file) {
                index.add_file(file, &tree);
            }
        }
        tracing::debug!(
            files = index.files.len(),
            names = index.classes.len(),
            "symbol index built"
        );
        index
    }

    /// Add (or replace) the top-level classes of one file.
    pub fn add_file(&mut self, file: FileId, tree: &SourceFile) {
        self.remove_file(file);
        self.files.push(file);

        for class in tree.classes() {
            let Some(name) = class.name() else { continue };
            let entries = self.classes.entry(name.text()).or_default();
            entries.push(DeclPtr::new(file, class.syntax()));
            entries.sort_by_key(|ptr| (ptr.file, ptr.range().start()));
        }
    }

    pub fn remove_file(&mut self, file: FileId) {
        if !self.files.contains(&file) {
            return;
        }
        self.files.retain(|&f| f != file);
        self.classes.retain(|_, entries| {
            entries.retain(|ptr| ptr.file != file);
            !entries.is_empty()
        });
    }

    /// Classes named `name`: those in `from` first, then the rest in file order.
    pub fn classes_named(&self, name: &str, from: FileId) -> Vec<DeclPtr> {
        let Some(entries) = self.classes.get(name) else {
            return Vec::new();
        };
        let (mut local, foreign): (Vec<_>, Vec<_>) =
            entries.iter().copied().partition(|ptr| ptr.file == from);
        local.extend(foreign);
        local
    }

    pub fn len(&self) -> usize {
        self.classes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Lexical resolver backed by a [`SymbolIndex`].
///
/// Lookup order for a reference `x`:
/// 1. parameters of each enclosing method, innermost first;
/// 2. members of each enclosing class body or anonymous structure,
///    innermost first;
/// 3. top-level classes of the reference's own file;
/// 4. top-level classes of the other indexed files, in file order.
///
/// Every match is returned, so one reference can yield several candidates.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    index: &'a SymbolIndex,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a SymbolIndex) -> Self {
        Self { index }
    }

    fn lexical_candidates(&self, file: FileId, reference: &SyntaxNode, name: &str) -> Vec<DeclPtr> {
        let mut candidates = Vec::new();
        for scope in reference.ancestors() {
            match scope.kind() {
                SyntaxKind::MethodDecl => {
                    let Some(method) = MethodDecl::cast(scope) else { continue };
                    candidates.extend(
                        method
                            .params()
                            .into_iter()
                            .filter(|param| param.name().is_some_and(|n| n.text() == name))
                            .map(|param| DeclPtr::new(file, param.syntax())),
                    );
                }
                SyntaxKind::ClassBody | SyntaxKind::AnonymousType => {
                    candidates.extend(
                        scope
                            .children()
                            .filter_map(Member::cast)
                            .filter(|member| member.name().is_some_and(|n| n.text() == name))
                            .map(|member| DeclPtr::new(file, member.syntax())),
                    );
                }
                _ => {}
            }
        }
        candidates
    }
}

impl NameResolver for Resolver<'_> {
    fn resolve_reference(&self, reference: InFile<&Reference>) -> Vec<DeclPtr> {
        let Some(name) = reference.value.text() else {
            return Vec::new();
        };

        let mut candidates = self.lexical_candidates(reference.file, reference.value.syntax(), &name);
        for ptr in self.index.classes_named(&name, reference.file) {
            if !candidates.contains(&ptr) {
                candidates.push(ptr);
            }
        }

        tracing::trace!(%name, candidates = candidates.len(), "resolved reference");
        candidates
    }
}

impl ClassResolver for Resolver<'_> {
    fn resolve_expression_to_class(&self, expr: InFile<&Reference>) -> Option<ClassResolution> {
        let name = expr.value.text()?;

        // Nested classes shadow top-level ones.
        let nested = expr
            .value
            .syntax()
            .ancestors()
            .filter(|scope| scope.kind() == SyntaxKind::ClassBody)
            .flat_map(|body| body.children().filter_map(ClassDecl::cast).collect::<Vec<_>>())
            .find(|class| class.name().is_some_and(|n| n.text() == name))
            .map(|class| DeclPtr::new(expr.file, class.syntax()));

        let class = nested.or_else(|| self.index.classes_named(&name, expr.file).into_iter().next())?;
        Some(ClassResolution { class })
    }
}
