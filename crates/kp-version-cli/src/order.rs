//! Compare, diff and sort commands.

use std::cmp::Ordering;

use anyhow::{Context, Result};
use clap::Args;

use kp_version::{Version, VersionType};

#[derive(Args, Debug)]
pub struct CompareArgs {
    pub left: String,
    pub right: String,
}

#[derive(Args, Debug)]
pub struct SortArgs {
    /// Versions to sort; unparseable ones are dropped
    #[arg(required = true)]
    pub versions: Vec<String>,

    /// Sort in descending order
    #[arg(short, long)]
    pub reverse: bool,
}

fn parse_pair(args: &CompareArgs, version_type: VersionType) -> Result<(Version, Version)> {
    let left = Version::parse(&args.left, version_type)
        .with_context(|| format!("Failed to parse left version \"{}\"", args.left))?;
    let right = Version::parse(&args.right, version_type)
        .with_context(|| format!("Failed to parse right version \"{}\"", args.right))?;
    Ok((left, right))
}

pub fn execute_compare(args: CompareArgs, version_type: VersionType) -> Result<i32> {
    let (left, right) = parse_pair(&args, version_type)?;
    println!("{}", render_compare(&left, &right));
    Ok(0)
}

pub fn execute_diff(args: CompareArgs, version_type: VersionType) -> Result<i32> {
    let (left, right) = parse_pair(&args, version_type)?;
    println!("{}", left.diff(&right));
    Ok(0)
}

pub fn execute_sort(args: SortArgs, version_type: VersionType) -> Result<i32> {
    let versions: Vec<&str> = args.versions.iter().map(String::as_str).collect();
    let sorted = if args.reverse {
        kp_version::rsort(&versions, version_type)
    } else {
        kp_version::sort(&versions, version_type)
    };

    for version in sorted {
        println!("{}", version);
    }
    Ok(0)
}

fn render_compare(left: &Version, right: &Version) -> String {
    let symbol = match left.compare(right) {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    };
    format!("{} {} {}", left, symbol, right)
}
