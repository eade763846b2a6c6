mod cli;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use copyfiles_io_fs::{ReportCopy, flatten_tree};

use crate::cli::Args;

/// Resolve the layout, flatten the source tree and write one log line per
/// file to `out`.
fn run<W: Write>(args: &Args, out: &mut W) -> Result<ReportCopy> {
    let layout = args
        .resolve_layout()
        .context("Failed to resolve source and destination directories")?;
    let spec_options = args.to_options();
    let c_verb = if spec_options.if_dry_run {
        "Would copy"
    } else {
        "Copied"
    };

    let mut res_log: io::Result<()> = Ok(());
    let report = flatten_tree(
        &layout.path_dir_src,
        &layout.path_dir_dst,
        &spec_options,
        |spec_task| {
            if res_log.is_ok() {
                res_log = writeln!(
                    out,
                    "{c_verb}: {} -> {}",
                    spec_task.path_file_src.display(),
                    spec_task.path_file_dst.display()
                );
            }
        },
    )
    .with_context(|| {
        format!(
            "Failed to copy files from {} into {}",
            layout.path_dir_src.display(),
            layout.path_dir_dst.display()
        )
    })?;
    res_log.context("Failed to write copy log")?;

    Ok(report)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let report = run(&args, &mut io::stdout().lock())?;
    for warning in &report.warnings {
        eprintln!("[WARN] {warning}");
    }
    if args.summary {
        eprintln!("{report}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;

    use super::run;
    use crate::cli::Args;

    static N_TEST_DIR_SEQ: AtomicU64 = AtomicU64::new(0);

    struct TestDir {
        path: PathBuf,
    }

    impl TestDir {
        fn new() -> Self {
            let n = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos();
            let n_seq = N_TEST_DIR_SEQ.fetch_add(1, Ordering::Relaxed);
            let path = std::env::temp_dir().join(format!("copyfiles_cli_test_{n}_{n_seq}"));
            std::fs::create_dir_all(&path).expect("create test dir");
            Self { path }
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TestDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    fn write_text(path: &Path, txt: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, txt).expect("write text");
    }

    fn parse_base_dir(base: &Path, l_extra: &[&str]) -> Args {
        let mut l_argv = vec![
            "copyfiles".to_string(),
            "--base-dir".to_string(),
            base.display().to_string(),
        ];
        l_argv.extend(l_extra.iter().map(|s| s.to_string()));
        Args::try_parse_from(l_argv).expect("parse")
    }

    #[test]
    fn run_logs_one_line_per_copied_file() {
        let tmp = TestDir::new();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("Files");
        write_text(&src.join("a/x.txt"), "hello");
        write_text(&src.join("b/x.txt"), "world");

        let mut buf_out: Vec<u8> = Vec::new();
        let report = run(&parse_base_dir(tmp.path(), &[]), &mut buf_out).expect("run");

        let txt_out = String::from_utf8(buf_out).expect("utf8");
        let l_expected = [
            format!(
                "Copied: {} -> {}",
                src.join("a").join("x.txt").display(),
                dst.join("x.txt").display()
            ),
            format!(
                "Copied: {} -> {}",
                src.join("b").join("x.txt").display(),
                dst.join("x.txt").display()
            ),
        ];
        assert_eq!(txt_out.lines().collect::<Vec<_>>(), l_expected);
        assert_eq!(report.cnt_copied, 2);
        assert_eq!(
            std::fs::read_to_string(dst.join("x.txt")).expect("read"),
            "world"
        );
    }

    #[test]
    fn run_dry_run_logs_without_copying() {
        let tmp = TestDir::new();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("Files");
        write_text(&src.join("only.txt"), "x");

        let mut buf_out: Vec<u8> = Vec::new();
        run(&parse_base_dir(tmp.path(), &["--dry-run"]), &mut buf_out).expect("run");

        let txt_out = String::from_utf8(buf_out).expect("utf8");
        assert!(txt_out.starts_with("Would copy: "));
        assert!(dst.is_dir());
        assert!(!dst.join("only.txt").exists());
    }

    #[test]
    fn run_missing_source_creates_destination_and_logs_nothing() {
        let tmp = TestDir::new();

        let mut buf_out: Vec<u8> = Vec::new();
        let report = run(&parse_base_dir(tmp.path(), &[]), &mut buf_out).expect("run");

        assert!(buf_out.is_empty());
        assert!(tmp.path().join("Files").is_dir());
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn run_error_carries_context() {
        let tmp = TestDir::new();
        write_text(&tmp.path().join("src/a.txt"), "a");
        write_text(&tmp.path().join("Files"), "occupied by a file");

        let mut buf_out: Vec<u8> = Vec::new();
        let err = run(&parse_base_dir(tmp.path(), &[]), &mut buf_out).expect_err("must fail");

        let txt_err = format!("{err:#}");
        assert!(txt_err.starts_with("Failed to copy files from"));
        assert!(txt_err.contains("Failed to initialize destination"));
    }
}
