//! Project-level concerns outside the query path: loading a workspace from
//! disk and decoding library references from project settings.

mod library;
mod workspace_loader;

pub use library::{LibraryParseError, LibraryRef};
pub use workspace_loader::{HAXE_EXTENSION, LoadError, LoadReport, WorkspaceLoader};
