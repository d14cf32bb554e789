//! Satisfies command - check versions against a requirement.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use kp_version::{Requirement, Version, VersionType};

#[derive(Args, Debug)]
pub struct SatisfiesArgs {
    /// Requirement, e.g. ">=1.2.3 <2.0.0 || ^3.1"
    pub requirement: String,

    /// Versions to check
    #[arg(required = true)]
    pub versions: Vec<String>,

    /// Only print the versions that satisfy the requirement
    #[arg(short, long)]
    pub quiet: bool,
}

/// Exit code 0 when every version satisfies the requirement, 1 otherwise
pub fn execute(args: SatisfiesArgs, version_type: VersionType) -> Result<i32> {
    let requirement = Requirement::parse(&args.requirement, version_type)
        .with_context(|| format!("Failed to parse requirement \"{}\"", args.requirement))?;

    let mut all_satisfied = true;
    for raw in &args.versions {
        let version = Version::parse(raw, version_type)
            .with_context(|| format!("Failed to parse version \"{}\"", raw))?;
        let satisfied = version.satisfies_requirement(&requirement);
        all_satisfied &= satisfied;

        if args.quiet {
            if satisfied {
                println!("{}", version);
            }
        } else {
            println!("{}", render_line(&version, &requirement, satisfied));
        }
    }

    Ok(if all_satisfied { 0 } else { 1 })
}

fn render_line(version: &Version, requirement: &Requirement, satisfied: bool) -> String {
    if satisfied {
        format!("{} {} satisfies {}", "✓".green(), version, requirement)
    } else {
        format!("{} {} does not satisfy {}", "✗".red(), version, requirement)
    }
}
