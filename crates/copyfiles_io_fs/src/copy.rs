//! Flattening copy orchestration.

use std::fs;
use std::path::Path;

use crate::report::{ReportCopy, ReportCopyBuilder};
use crate::spec::{FlattenTreeError, SpecCopyTaskFile, SpecFlattenOptions};
use crate::util::{copy_file_with_metadata, derive_destination_path, is_overlap};
use crate::walk::walk_files;

/// Copy every file under `dir_source` into the flat directory
/// `dir_destination`.
///
/// This function performs:
/// 1. Overlap check between source and destination.
/// 2. Destination creation (with missing parents) when absent.
/// 3. A lazy walk of the source tree (see [`crate::walk_files`] for order).
/// 4. One copy per file to `dir_destination/<base name>`, overwriting any
///    file already there, followed by a call to `fn_on_copied`.
///
/// Files sharing a base name overwrite each other; the last one walked wins.
/// With `if_dry_run` nothing is written past step 2 and every entry is counted
/// as skipped, but `fn_on_copied` still sees each task.
///
/// The first failure aborts the run and is returned; files copied before it
/// stay in place.
pub fn flatten_tree<P, Q, F>(
    dir_source: P,
    dir_destination: Q,
    spec_options: &SpecFlattenOptions,
    mut fn_on_copied: F,
) -> Result<ReportCopy, FlattenTreeError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: FnMut(&SpecCopyTaskFile),
{
    let path_dir_src = dir_source.as_ref();
    let path_dir_dst = dir_destination.as_ref();

    if is_overlap(path_dir_src, path_dir_dst) {
        return Err(FlattenTreeError::SourceDestinationOverlap {
            path_dir_src: path_dir_src.to_path_buf(),
            path_dir_dst: path_dir_dst.to_path_buf(),
        });
    }
    fs::create_dir_all(path_dir_dst).map_err(|e| FlattenTreeError::DestinationInitFailed {
        path: path_dir_dst.to_path_buf(),
        source: e,
    })?;

    let mut builder_cp_report = ReportCopyBuilder::default();
    let mut iter_files = walk_files(path_dir_src);

    for spec_entry_res in iter_files.by_ref() {
        let spec_entry = spec_entry_res?;
        builder_cp_report.add_scanned();

        let spec_task = SpecCopyTaskFile {
            path_file_dst: derive_destination_path(path_dir_dst, &spec_entry.name_file),
            path_file_src: spec_entry.path_file_src,
        };

        if spec_options.if_dry_run {
            builder_cp_report.add_skipped();
            fn_on_copied(&spec_task);
            continue;
        }

        let n_bytes = copy_file_with_metadata(
            &spec_task.path_file_src,
            &spec_task.path_file_dst,
            spec_options.if_preserve_metadata,
        )
        .map_err(|e| FlattenTreeError::CopyFailed {
            path_file_src: spec_task.path_file_src.clone(),
            path_file_dst: spec_task.path_file_dst.clone(),
            source: e,
        })?;
        builder_cp_report.add_copied(n_bytes);
        fn_on_copied(&spec_task);
    }

    for warning in iter_files.take_warnings() {
        builder_cp_report.add_warning(warning);
    }
    Ok(builder_cp_report.build())
}
