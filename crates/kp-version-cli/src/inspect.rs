//! Parse and validate commands - show what a version literal is made of.

use anyhow::{Context, Result};
use clap::Args;

use kp_version::{Version, VersionType};

use crate::TypeArg;

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Version literal to parse
    pub version: String,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Version literal to check
    pub version: String,

    /// Grammar the version must satisfy, in addition to the one it is parsed with
    #[arg(long, value_enum)]
    pub require: Option<TypeArg>,
}

pub fn execute_parse(args: ParseArgs, version_type: VersionType) -> Result<i32> {
    if args.format != "text" && args.format != "json" {
        eprintln!("Error: Unsupported format '{}'. Use 'text' or 'json'.", args.format);
        return Ok(1);
    }

    let version = Version::parse(&args.version, version_type)
        .with_context(|| format!("Failed to parse \"{}\"", args.version))?;
    println!("{}", render(&version, &args.format)?);
    Ok(0)
}

pub fn execute_validate(args: ValidateArgs, version_type: VersionType) -> Result<i32> {
    let version = match Version::parse(&args.version, version_type) {
        Ok(version) => version,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(1);
        }
    };

    if let Some(required) = args.require {
        if let Err(e) = version.validate(required.into()) {
            eprintln!("{}", e);
            return Ok(1);
        }
    }

    println!("{}", version);
    Ok(0)
}

fn render(version: &Version, format: &str) -> Result<String> {
    if format == "json" {
        let json = serde_json::json!({
            "value": version.value(),
            "type": version.version_type().as_str(),
            "major": version.major(),
            "minor": version.minor(),
            "patch": version.patch(),
            "suffixes": version.suffixes(),
            "build": version.build(),
            "stable": version.is_stable(),
        });
        return Ok(serde_json::to_string_pretty(&json)?);
    }

    let optional = |n: Option<u64>| n.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());

    let mut lines = vec![
        format!("value    : {}", version.value()),
        format!("type     : {}", version.version_type()),
        format!("major    : {}", version.major()),
        format!("minor    : {}", optional(version.minor())),
        format!("patch    : {}", optional(version.patch())),
    ];
    if !version.suffixes().is_empty() {
        lines.push(format!("suffixes : {}", version.suffixes().join(", ")));
    }
    if let Some(build) = version.build() {
        lines.push(format!("build    : {}", build));
    }
    lines.push(format!("stable   : {}", version.is_stable()));

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text() {
        let version = Version::parse("1.2-beta.1+sha", VersionType::Loose).unwrap();
        let text = render(&version, "text").unwrap();
        assert!(text.contains("value    : 1.2-beta.1+sha"));
        assert!(text.contains("patch    : -"));
        assert!(text.contains("suffixes : beta, 1"));
        assert!(text.contains("stable   : false"));
    }

    #[test]
    fn test_render_json() {
        let version = Version::parse("v2.0.1", VersionType::Npm).unwrap();
        let json: serde_json::Value = serde_json::from_str(&render(&version, "json").unwrap()).unwrap();
        assert_eq!(json["value"], "2.0.1");
        assert_eq!(json["type"], "NPM");
        assert_eq!(json["patch"], 1);
        assert_eq!(json["build"], serde_json::Value::Null);
        assert_eq!(json["stable"], true);
    }
}
