mod bump;
mod inspect;
mod logging;
mod order;
mod satisfies;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use kp_version::VersionType;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "kpver")]
#[command(about = "Parse, compare and match semantic versions")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Grammar used to read versions and requirements
    #[arg(short = 't', long = "type", value_enum, default_value = "loose", global = true)]
    version_type: TypeArg,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides it.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the components of a version
    Parse(inspect::ParseArgs),

    /// Check that a version parses, optionally against a stricter grammar
    Validate(inspect::ValidateArgs),

    /// Compare two versions by precedence
    Compare(order::CompareArgs),

    /// Print the most significant component at which two versions differ
    Diff(order::CompareArgs),

    /// Check versions against a requirement
    Satisfies(satisfies::SatisfiesArgs),

    /// Sort versions by precedence
    Sort(order::SortArgs),

    /// Derive a new version (next major/minor/patch, new suffix or build)
    Bump(bump::BumpArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeArg {
    Strict,
    Loose,
    Npm,
    Cocoapods,
    Ivy,
}

impl From<TypeArg> for VersionType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Strict => VersionType::Strict,
            TypeArg::Loose => VersionType::Loose,
            TypeArg::Npm => VersionType::Npm,
            TypeArg::Cocoapods => VersionType::Cocoapods,
            TypeArg::Ivy => VersionType::Ivy,
        }
    }
}

fn run() -> Result<i32> {
    let args = Args::parse();
    logging::setup_logging(args.verbose);

    let version_type = VersionType::from(args.version_type);
    log::debug!("Using {} grammar", version_type);

    match args.command {
        Commands::Parse(parse_args) => inspect::execute_parse(parse_args, version_type),
        Commands::Validate(validate_args) => inspect::execute_validate(validate_args, version_type),
        Commands::Compare(compare_args) => order::execute_compare(compare_args, version_type),
        Commands::Diff(diff_args) => order::execute_diff(diff_args, version_type),
        Commands::Satisfies(satisfies_args) => satisfies::execute(satisfies_args, version_type),
        Commands::Sort(sort_args) => order::execute_sort(sort_args, version_type),
        Commands::Bump(bump_args) => bump::execute(bump_args, version_type),
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}
