//! Source/destination directory layout next to the running program.

use std::io;
use std::path::{Path, PathBuf};

use crate::spec::FlattenTreeError;

/// Name of the source tree directory next to the program.
pub const C_NAME_DIR_SRC: &str = "src";
/// Name of the flat destination directory next to the program.
pub const C_NAME_DIR_DST: &str = "Files";

/// Resolved source root and destination directory for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFlattenLayout {
    pub path_dir_src: PathBuf,
    pub path_dir_dst: PathBuf,
}

impl SpecFlattenLayout {
    /// `<base>/src` and `<base>/Files`.
    pub fn from_base_dir<P: AsRef<Path>>(dir_base: P) -> Self {
        let path_dir_base = dir_base.as_ref();
        Self {
            path_dir_src: path_dir_base.join(C_NAME_DIR_SRC),
            path_dir_dst: path_dir_base.join(C_NAME_DIR_DST),
        }
    }

    /// Layout rooted at the directory holding the running executable.
    pub fn from_program_location() -> Result<Self, FlattenTreeError> {
        let path_exe = std::env::current_exe()
            .map_err(|e| FlattenTreeError::ProgramLocationUnavailable { source: e })?;
        let path_dir_base =
            path_exe
                .parent()
                .ok_or_else(|| FlattenTreeError::ProgramLocationUnavailable {
                    source: io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("no parent directory for {}", path_exe.display()),
                    ),
                })?;
        Ok(Self::from_base_dir(path_dir_base))
    }
}
