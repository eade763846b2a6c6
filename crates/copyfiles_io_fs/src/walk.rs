//! Lazy, depth-first file walk over a source tree.
//!
//! Directories are visited top-down: a directory's files are yielded before
//! any of its subdirectories is read, and entries inside one directory are
//! ordered by name so repeated runs see the same sequence.

use std::collections::VecDeque;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::spec::{FlattenTreeError, SpecFileEntry};

/// Iterator returned by [`walk_files`].
///
/// Directories are only read when the files already queued run out, so the
/// walk interleaves with whatever the caller does per entry.
#[derive(Debug)]
pub struct WalkFiles {
    l_dirs_pending: Vec<PathBuf>,
    l_files_ready: VecDeque<SpecFileEntry>,
    warnings: Vec<String>,
}

/// Start a lazy walk of every file under `dir_source`.
///
/// A missing source root (or one that is not a directory) yields no entries
/// and leaves a warning instead of failing.
pub fn walk_files<P: AsRef<Path>>(dir_source: P) -> WalkFiles {
    let path_dir_src = dir_source.as_ref();
    let mut walk = WalkFiles {
        l_dirs_pending: Vec::new(),
        l_files_ready: VecDeque::new(),
        warnings: Vec::new(),
    };

    match fs::metadata(path_dir_src) {
        Ok(meta) if meta.is_dir() => walk.l_dirs_pending.push(path_dir_src.to_path_buf()),
        Ok(_) => walk.warnings.push(format!(
            "Source root is not a directory: {}",
            path_dir_src.display()
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => walk.warnings.push(format!(
            "Source root not found: {}",
            path_dir_src.display()
        )),
        // Anything else (e.g. permission denied) surfaces on the first read.
        Err(_) => walk.l_dirs_pending.push(path_dir_src.to_path_buf()),
    }
    walk
}

impl WalkFiles {
    /// Drain warnings collected so far.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    fn read_directory(&mut self, path_root: &Path) -> Result<(), FlattenTreeError> {
        let iter_entries = fs::read_dir(path_root).map_err(|e| FlattenTreeError::ReadDirFailed {
            path: path_root.to_path_buf(),
            source: e,
        })?;

        let mut l_dirs: Vec<(OsString, PathBuf)> = Vec::new();
        let mut l_files: Vec<SpecFileEntry> = Vec::new();

        for entry_res in iter_entries {
            let entry = entry_res.map_err(|e| FlattenTreeError::ReadDirFailed {
                path: path_root.to_path_buf(),
                source: e,
            })?;
            let path_entry = entry.path();
            let name_entry = entry.file_name();
            let cfg_file_type = entry
                .file_type()
                .map_err(|e| FlattenTreeError::InspectFailed {
                    path: path_entry.clone(),
                    source: e,
                })?;

            if cfg_file_type.is_dir() {
                l_dirs.push((name_entry, path_entry));
                continue;
            }
            // Directory symlinks are listed but never entered nor copied.
            if cfg_file_type.is_symlink()
                && fs::metadata(&path_entry).is_ok_and(|meta| meta.is_dir())
            {
                self.warnings.push(format!(
                    "Directory symlink not followed: {}",
                    path_entry.display()
                ));
                continue;
            }
            // Everything else is a file entry, including broken links and
            // special files: the copy decides whether it can be read.
            l_files.push(SpecFileEntry {
                path_file_src: path_entry,
                name_file: name_entry,
            });
        }

        l_files.sort_by(|a, b| a.name_file.cmp(&b.name_file));
        l_dirs.sort_by(|a, b| a.0.cmp(&b.0));

        self.l_files_ready.extend(l_files);
        // Stack order: the first subdirectory by name is popped next.
        self.l_dirs_pending
            .extend(l_dirs.into_iter().rev().map(|(_, path_dir)| path_dir));
        Ok(())
    }
}

impl Iterator for WalkFiles {
    type Item = Result<SpecFileEntry, FlattenTreeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(spec_entry) = self.l_files_ready.pop_front() {
                return Some(Ok(spec_entry));
            }
            let path_dir = self.l_dirs_pending.pop()?;
            if let Err(e) = self.read_directory(&path_dir) {
                return Some(Err(e));
            }
        }
    }
}
