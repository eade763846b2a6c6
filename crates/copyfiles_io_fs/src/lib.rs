//! `copyfiles_io_fs` v1:
//! Rust-side flattening copy engine.
//!
//! Modules:
//! - `copy`   : flatten run orchestration
//! - `walk`   : lazy source tree walk
//! - `layout` : `src`/`Files` resolution next to the program
//! - `spec`   : options/entries/errors
//! - `report` : run-time report model
//! - `util`   : path helpers and single-file copy

pub mod copy;
pub mod layout;
pub mod report;
pub mod spec;
mod util;
pub mod walk;

pub use copy::flatten_tree;
pub use layout::{C_NAME_DIR_DST, C_NAME_DIR_SRC, SpecFlattenLayout};
pub use report::{ReportCopy, ReportCopyBuilder};
pub use spec::{FlattenTreeError, SpecCopyTaskFile, SpecFileEntry, SpecFlattenOptions};
pub use util::{copy_file_with_metadata, derive_destination_path};
pub use walk::{WalkFiles, walk_files};
