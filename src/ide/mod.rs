//! IDE features — the queries hierarchy views call.
//!
//! This module sits between the semantic layer (HIR) and whatever editor
//! integration drives it. Each public function answers one question about
//! a caret or a selection.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: take a context in, return a node out
//! 2. **No editor types**: carets are `FilePosition`s, selections are `InFile` elements
//! 3. **Composable**: built on the scope walker and the position locator
//!
//! ## Usage
//!
//! ```ignore
//! use hierarchy::ide::{AnalysisHost, hierarchy};
//!
//! let mut host = AnalysisHost::new();
//! let file = host.set_file_content("Main.hx", "class Main { function run() {} }");
//!
//! let analysis = host.analysis();
//! let ctx = analysis.context_at(FilePosition::new(file, 16u32));
//! let class = hierarchy::containing_class(&ctx, false);
//! ```

mod analysis;
mod context;
pub mod hierarchy;
mod position;
mod scope;

pub use analysis::{Analysis, AnalysisHost};
pub use context::{EditorState, HierarchyContext, Project};
pub use position::{TargetFlags, element_at, find_target_element, node_at_position, target_element};
pub use scope::{containing_class_of, containing_file_of, find_enclosing};
