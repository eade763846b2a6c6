use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

////////////////////////////////////////////////////////////////////////////////
// #region PathUtilities

fn _absolutize_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(path)
}

/// Resolve symlinks through the deepest existing ancestor of `path`.
///
/// The destination usually does not exist yet, so plain `canonicalize`
/// would fail on it; the missing tail is appended back unchanged.
fn _normalize_path(path: &Path) -> PathBuf {
    let path_abs = _absolutize_path(path);
    let mut path_cursor = path_abs.as_path();
    let mut l_tail: Vec<&OsStr> = Vec::new();
    loop {
        if let Ok(resolved) = fs::canonicalize(path_cursor) {
            return l_tail
                .iter()
                .rev()
                .fold(resolved, |acc, part| acc.join(part));
        }
        match (path_cursor.parent(), path_cursor.file_name()) {
            (Some(parent), Some(name)) => {
                l_tail.push(name);
                path_cursor = parent;
            }
            _ => return path_abs,
        }
    }
}

pub(crate) fn is_overlap(src: &Path, dst: &Path) -> bool {
    let src_resolved = _normalize_path(src);
    let dst_resolved = _normalize_path(dst);
    dst_resolved.starts_with(&src_resolved) || src_resolved.starts_with(&dst_resolved)
}

/// Destination path for one file: the destination directory joined with the
/// file's base name. Source directory structure is discarded.
pub fn derive_destination_path(path_dir_dst: &Path, name_file: &OsStr) -> PathBuf {
    path_dir_dst.join(name_file)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FileCopy

/// Copy one file, replacing any existing destination file.
///
/// Symlinks are followed. Named pipes are refused with
/// `ErrorKind::InvalidInput` instead of being opened; other non-regular
/// sources (e.g. character devices) are read until end of file, and sources
/// that cannot be opened (sockets, broken links) fail with the open error.
///
/// With `if_preserve_metadata`, permission bits and access/modification times
/// follow the source, and on Linux extended attributes are carried on a best
/// effort basis. Without it only the bytes are written.
///
/// Returns the number of bytes copied.
pub fn copy_file_with_metadata(
    path_file_src: &Path,
    path_file_dst: &Path,
    if_preserve_metadata: bool,
) -> Result<u64, io::Error> {
    let stat_src = fs::metadata(path_file_src)?;
    if is_named_pipe(&stat_src) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("`{}` is a named pipe", path_file_src.display()),
        ));
    }

    let n_bytes = if if_preserve_metadata && stat_src.is_file() {
        fs::copy(path_file_src, path_file_dst)?
    } else {
        let mut file_src = fs::File::open(path_file_src)?;
        let mut file_dst = fs::File::create(path_file_dst)?;
        io::copy(&mut file_src, &mut file_dst)?
    };

    if if_preserve_metadata {
        apply_metadata(path_file_src, &stat_src, path_file_dst)?;
    }
    Ok(n_bytes)
}

#[cfg(unix)]
fn is_named_pipe(stat_src: &fs::Metadata) -> bool {
    use std::os::unix::fs::FileTypeExt;
    stat_src.file_type().is_fifo()
}

#[cfg(not(unix))]
fn is_named_pipe(_stat_src: &fs::Metadata) -> bool {
    false
}

fn apply_metadata(
    path_file_src: &Path,
    stat_src: &fs::Metadata,
    path_file_dst: &Path,
) -> Result<(), io::Error> {
    use filetime::{FileTime, set_file_times};

    #[cfg(target_os = "linux")]
    {
        // `fs::copy` already gave the copy the source mode; xattr writes need
        // owner-write until the final mode is applied below.
        use std::os::unix::fs::PermissionsExt;
        let mode_dst = fs::metadata(path_file_dst)?.permissions().mode();
        fs::set_permissions(path_file_dst, fs::Permissions::from_mode(mode_dst | 0o200))?;
        copy_xattrs_linux(path_file_src, path_file_dst);
    }
    #[cfg(not(target_os = "linux"))]
    let _ = path_file_src;

    let file_time_access = FileTime::from_last_access_time(stat_src);
    let file_time_modify = FileTime::from_last_modification_time(stat_src);
    set_file_times(path_file_dst, file_time_access, file_time_modify)?;

    fs::set_permissions(path_file_dst, stat_src.permissions())?;
    Ok(())
}

#[cfg(target_os = "linux")]
fn copy_xattrs_linux(path_file_src: &Path, path_file_dst: &Path) {
    let iter_xattr_names = match xattr::list(path_file_src) {
        Ok(v) => v,
        Err(_) => return,
    };

    for name in iter_xattr_names {
        let Some(raw_value) = xattr::get(path_file_src, &name).ok().flatten() else {
            continue;
        };
        let _ = xattr::set(path_file_dst, &name, &raw_value);
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
