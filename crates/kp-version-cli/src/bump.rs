//! Bump command - derive a new version from an existing one.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use kp_version::{Version, VersionType};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part {
    Major,
    Minor,
    Patch,
}

#[derive(Args, Debug)]
pub struct BumpArgs {
    /// Version to start from
    pub version: String,

    /// Component to bump. Without --by, lower components reset to 0 and the suffix is dropped.
    #[arg(value_enum)]
    pub part: Option<Part>,

    /// Add N to the component and keep everything else
    #[arg(long, value_name = "N", requires = "part")]
    pub by: Option<u64>,

    /// Replace the suffix (e.g. "rc.1")
    #[arg(long)]
    pub suffix: Option<String>,

    /// Replace the build metadata
    #[arg(long, conflicts_with = "clear_build")]
    pub build: Option<String>,

    /// Remove the build metadata
    #[arg(long)]
    pub clear_build: bool,

    /// Fill missing components with 0 and switch to the strict grammar
    #[arg(long)]
    pub strict: bool,
}

pub fn execute(args: BumpArgs, version_type: VersionType) -> Result<i32> {
    let version = Version::parse(&args.version, version_type)
        .with_context(|| format!("Failed to parse \"{}\"", args.version))?;
    println!("{}", bump(&version, &args)?);
    Ok(0)
}

fn bump(version: &Version, args: &BumpArgs) -> Result<Version> {
    let mut result = match (args.part, args.by) {
        (Some(Part::Major), Some(n)) => version.with_inc_major(n),
        (Some(Part::Minor), Some(n)) => version.with_inc_minor(n),
        (Some(Part::Patch), Some(n)) => version.with_inc_patch(n),
        (Some(Part::Major), None) => version.next_major(),
        (Some(Part::Minor), None) => version.next_minor(),
        (Some(Part::Patch), None) => version.next_patch(),
        (None, _) => version.clone(),
    };

    if let Some(suffix) = &args.suffix {
        result = result.with_suffix(suffix).context("Invalid --suffix")?;
    }
    if let Some(build) = &args.build {
        result = result.with_build(build).context("Invalid --build")?;
    }
    if args.clear_build {
        result = result.with_cleared_build();
    }
    if args.strict {
        result = result.to_strict();
    }

    log::debug!("Bumped {} to {}", version, result);
    Ok(result)
}
