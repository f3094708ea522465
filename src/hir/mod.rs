//! Semantic layer: the capabilities the hierarchy queries consume, and the
//! default implementations of them.
//!
//! - [`TreeProvider`] / [`DocumentStore`] - tree-for-document lookup
//! - [`NameResolver`], [`ClassResolver`] / [`Resolver`] - name resolution
//! - [`DeclPtr`], [`InFile`] - cross-file declaration handles
//! - [`MethodView`] - composite method value

mod ids;
mod method;
mod resolve;
mod source;

pub use ids::{DeclPtr, InFile};
pub use method::MethodView;
pub use resolve::{ClassResolution, ClassResolver, NameResolver, Resolver, SymbolIndex};
pub use source::{DocumentStore, TreeProvider};
