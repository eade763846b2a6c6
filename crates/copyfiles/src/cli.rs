use clap::Parser;
use copyfiles_io_fs::{FlattenTreeError, SpecFlattenLayout, SpecFlattenOptions};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "copyfiles")]
#[command(version)]
#[command(about = "Copy every file under `src` into the flat `Files` directory next to this program")]
pub struct Args {
    #[arg(
        long,
        value_name = "DIR",
        help = "Resolve `src` and `Files` relative to DIR instead of the program's directory"
    )]
    pub base_dir: Option<PathBuf>,
    #[arg(long, value_name = "DIR", help = "Source tree to walk (overrides `src`)")]
    pub source: Option<PathBuf>,
    #[arg(long, value_name = "DIR", help = "Flat destination directory (overrides `Files`)")]
    pub destination: Option<PathBuf>,
    #[arg(long, help = "Log what would be copied without writing files")]
    pub dry_run: bool,
    #[arg(long, help = "Copy file contents only, without permissions or timestamps")]
    pub no_preserve_metadata: bool,
    #[arg(long, help = "Print a one-line run report to stderr when done")]
    pub summary: bool,
}

impl Args {
    pub fn resolve_layout(&self) -> Result<SpecFlattenLayout, FlattenTreeError> {
        if let (Some(source), Some(destination)) = (&self.source, &self.destination) {
            return Ok(SpecFlattenLayout {
                path_dir_src: source.clone(),
                path_dir_dst: destination.clone(),
            });
        }

        let mut layout = match &self.base_dir {
            Some(dir_base) => SpecFlattenLayout::from_base_dir(dir_base),
            None => SpecFlattenLayout::from_program_location()?,
        };
        if let Some(source) = &self.source {
            layout.path_dir_src = source.clone();
        }
        if let Some(destination) = &self.destination {
            layout.path_dir_dst = destination.clone();
        }
        Ok(layout)
    }

    pub fn to_options(&self) -> SpecFlattenOptions {
        SpecFlattenOptions {
            if_dry_run: self.dry_run,
            if_preserve_metadata: !self.no_preserve_metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;

    use super::Args;

    #[test]
    fn no_arguments_means_program_layout_and_full_copy() {
        let args = Args::try_parse_from(["copyfiles"]).expect("parse");
        assert!(args.base_dir.is_none());
        assert!(args.source.is_none());
        assert!(args.destination.is_none());

        let spec_options = args.to_options();
        assert!(!spec_options.if_dry_run);
        assert!(spec_options.if_preserve_metadata);

        let layout = args.resolve_layout().expect("layout");
        assert!(layout.path_dir_src.ends_with("src"));
        assert!(layout.path_dir_dst.ends_with("Files"));
        assert_eq!(layout.path_dir_src.parent(), layout.path_dir_dst.parent());
    }

    #[test]
    fn base_dir_and_overrides_compose() {
        let args = Args::try_parse_from([
            "copyfiles",
            "--base-dir",
            "/work",
            "--destination",
            "/elsewhere/out",
        ])
        .expect("parse");

        let layout = args.resolve_layout().expect("layout");
        assert_eq!(layout.path_dir_src, Path::new("/work/src"));
        assert_eq!(layout.path_dir_dst, Path::new("/elsewhere/out"));
    }

    #[test]
    fn flags_map_onto_options() {
        let args = Args::try_parse_from(["copyfiles", "--dry-run", "--no-preserve-metadata"])
            .expect("parse");
        let spec_options = args.to_options();
        assert!(spec_options.if_dry_run);
        assert!(!spec_options.if_preserve_metadata);
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(Args::try_parse_from(["copyfiles", "somewhere"]).is_err());
    }
}
