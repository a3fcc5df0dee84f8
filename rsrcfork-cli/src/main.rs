mod extract;
mod listing;


use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rsrcfork::{Error, ResourceFork};
use rsrcfork::version::Version;
use tracing::warn;
use tracing_subscriber::EnvFilter;


#[derive(Parser)]
#[command(name = "rsrcfork", about = "Lists and extracts the resources of a classic Mac OS resource fork")]
enum ProgMode {
    /// Lists the types and resources contained in the fork.
    List(ListArgs),

    /// Writes each resource into its own file below the output directory.
    Extract(ExtractArgs),

    /// Decodes the version resources of the fork.
    Version(InputFileOnlyArgs),
}

#[derive(Parser)]
struct ListArgs {
    pub input_file: PathBuf,

    /// Output a JSON document instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
struct ExtractArgs {
    pub output_dir: PathBuf,
    pub input_file: PathBuf,
}

#[derive(Parser)]
struct InputFileOnlyArgs {
    pub input_file: PathBuf,
}


fn open_fork(path: &Path) -> Result<ResourceFork<BufReader<File>>, ExitCode> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{}: failed to open: {}", path.display(), e);
            return Err(ExitCode::FAILURE);
        },
    };
    match ResourceFork::new(BufReader::new(file)) {
        Ok(fork) => Ok(fork),
        Err(Error::MalformedFork(reason)) => {
            eprintln!("{}: not a valid resource fork ({})", path.display(), reason);
            Err(ExitCode::FAILURE)
        },
        Err(e) => {
            eprintln!("{}: {}", path.display(), e);
            Err(ExitCode::FAILURE)
        },
    }
}

fn run_list(args: &ListArgs) -> Result<(), ExitCode> {
    let mut fork = open_fork(&args.input_file)?;
    let listings = listing::collect(&mut fork)
        .map_err(|e| report(&args.input_file, &e))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = if args.json {
        listing::write_json(&listings, &mut out)
    } else {
        listing::write_text(&listings, &mut out)
    };
    written.map_err(|e| report(&args.input_file, &e))
}

fn run_extract(args: &ExtractArgs) -> Result<(), ExitCode> {
    // refuse before even looking at the input
    if args.output_dir.exists() {
        eprintln!("{}: output directory already exists", args.output_dir.display());
        return Err(ExitCode::FAILURE);
    }

    let mut fork = open_fork(&args.input_file)?;
    let summary = extract::extract(&mut fork, &args.output_dir)
        .map_err(|e| report(&args.input_file, &e))?;
    if summary.skipped > 0 {
        warn!("{} of {} resources could not be extracted", summary.skipped, summary.skipped + summary.written);
    }
    Ok(())
}

fn run_version(args: &InputFileOnlyArgs) -> Result<(), ExitCode> {
    let mut fork = open_fork(&args.input_file)?;
    let table_opt = fork.type_table(Version::OS_TYPE)
        .map_err(|e| report(&args.input_file, &e))?;
    let Some(mut table) = table_opt else {
        println!("no version resources");
        return Ok(());
    };

    let ids = table.ids().to_vec();
    for id in ids {
        let data = match table.resource(id) {
            Ok(Some(d)) => d,
            Ok(None) => continue,
            Err(e) => {
                warn!("skipping version resource {}: {}", id, e);
                continue;
            },
        };
        match Version::from_bytes(&data) {
            Ok(version) => {
                println!("version resource {}:", id);
                println!("  version: {}", version);
                println!("  stage: {:?}", version.stage);
                println!("  region code: {}", version.region_code);
                println!("  version string: {}", version.version_string);
                println!("  version message: {}", version.version_message);
            },
            Err(e) => warn!("failed to decode version resource {}: {}", id, e),
        }
    }
    Ok(())
}

fn report(path: &Path, error: &dyn std::error::Error) -> ExitCode {
    eprintln!("{}: {}", path.display(), error);
    ExitCode::FAILURE
}


fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn"))
        )
        .with_writer(io::stderr)
        .init();

    let mode = ProgMode::parse();
    let result = match &mode {
        ProgMode::List(args) => run_list(args),
        ProgMode::Extract(args) => run_extract(args),
        ProgMode::Version(args) => run_version(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}
