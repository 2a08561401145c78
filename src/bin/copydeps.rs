extern crate copydeps;

use anyhow::Context;
use clap::{ArgAction, Parser};
use copydeps::{
    copy_dependencies, path_to_string, CopyQuery, InspectionFailurePolicy, Objdump, SearchPath,
};
use fs_err as fs;
use log::LevelFilter;
use std::ffi::OsString;
use std::path::PathBuf;

/// Copy the DLLs the binaries of a build directory depend on next to them
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Build output directory to scan and populate
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Introspection tool used to read the import tables
    #[arg(long, value_name = "OBJDUMP", default_value = "objdump")]
    objdump: OsString,

    /// Extra directories to search before PATH (same separator as PATH)
    #[arg(short = 'a', long, value_name = "PATH")]
    userpath: Option<OsString>,

    /// What to do when the introspection tool fails on a file
    #[arg(long, value_enum, default_value_t = InspectionFailurePolicy::Continue)]
    on_inspection_error: InspectionFailurePolicy,

    /// Path for the copy report in JSON format
    #[arg(short = 'j', long, value_name = "OUTPUT_JSON_PATH")]
    output_json_path: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.as_str()),
    );

    // Disable log context except at higher log levels.
    if log_level <= LevelFilter::Info {
        builder
            .format_timestamp(None)
            .format_level(false)
            .format_target(false);
    }

    builder.init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut search_path = SearchPath::from_env();
    if let Some(userpath) = &args.userpath {
        search_path.prepend_user_path(userpath);
    }

    let mut query = CopyQuery::new(&args.dir, search_path)
        .with_context(|| format!("cannot work on {}", path_to_string(&args.dir)))?;
    query.parameters.on_inspection_failure = args.on_inspection_error;

    let search_dirs: Vec<String> = query.search_path.dirs().map(path_to_string).collect();
    log::debug!("Search path: {}", search_dirs.join(", "));

    let objdump = Objdump::new(args.objdump);
    let report = copy_dependencies(&query, &objdump)?;

    log::debug!(
        "{} files checked, {} copied, {} not found, {} not inspectable",
        report.checked.len(),
        report.copied.len(),
        report.unresolved.len(),
        report.failed.len()
    );

    if let Some(json_output_path) = &args.output_json_path {
        let js = report.to_json().context("Error serializing")?;
        let display = json_output_path.display();
        fs::write(json_output_path, js).context(format!("couldn't write to {}", display))?;
        log::debug!("successfully wrote to {}", display);
    }

    Ok(())
}
