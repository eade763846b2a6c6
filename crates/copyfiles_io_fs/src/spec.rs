//! Flatten-copy specification models and top-level error types.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region StructsInit

/// Input options for `flatten_tree`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFlattenOptions {
    /// Do not write files; report what would be copied.
    pub if_dry_run: bool,
    /// Carry permission bits, timestamps and extended attributes to the copy.
    pub if_preserve_metadata: bool,
}

impl Default for SpecFlattenOptions {
    fn default() -> Self {
        Self {
            if_dry_run: false,
            if_preserve_metadata: true,
        }
    }
}

/// One file discovered under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFileEntry {
    /// Full source path, rooted at the walked directory.
    pub path_file_src: PathBuf,
    /// Base name of the file; the only part kept in the destination.
    pub name_file: OsString,
}

/// Source/destination pair for one file copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCopyTaskFile {
    pub path_file_src: PathBuf,
    pub path_file_dst: PathBuf,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Any failure that aborts a flatten run.
///
/// Nothing is retried: the first error stops the walk and the destination is
/// left with whatever was copied before it.
#[derive(Debug, Error)]
pub enum FlattenTreeError {
    /// The running executable's directory could not be determined.
    #[error("Failed to resolve program location: {source}")]
    ProgramLocationUnavailable {
        #[source]
        source: io::Error,
    },

    /// Source and destination overlap (one contains the other).
    #[error(
        "Source and destination directories overlap: {} <-> {}",
        path_dir_src.display(),
        path_dir_dst.display()
    )]
    SourceDestinationOverlap {
        path_dir_src: PathBuf,
        path_dir_dst: PathBuf,
    },

    /// Destination directory could not be created.
    #[error("Failed to initialize destination {}: {source}", path.display())]
    DestinationInitFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory under the source root could not be listed.
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory entry's type or metadata could not be read.
    #[error("Failed to inspect {}: {source}", path.display())]
    InspectFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Copying one file failed.
    #[error(
        "Failed to copy {} -> {}: {source}",
        path_file_src.display(),
        path_file_dst.display()
    )]
    CopyFailed {
        path_file_src: PathBuf,
        path_file_dst: PathBuf,
        #[source]
        source: io::Error,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
