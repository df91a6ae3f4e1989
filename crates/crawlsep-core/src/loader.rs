//! Reading and writing policy files.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::policy::{Policy, Rule};
use crate::shape::validate_shape;

/// Resolves a policy path against the current working directory.
///
/// Absolute paths are returned unchanged.
///
/// # Errors
///
/// Returns [`Error::MissingPath`] for an empty path, or
/// [`Error::WorkingDir`] if the working directory cannot be read.
pub fn resolve_policy_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::MissingPath);
    }
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(Error::WorkingDir)?;
    Ok(cwd.join(path))
}

/// Loads a policy file and validates its shape.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or
/// fails shape validation.
pub fn load_policy_from_file(path: impl AsRef<Path>) -> Result<Policy> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading policy");

    let source = fs::read_to_string(path).map_err(|source| Error::PolicyLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: Value = serde_json::from_str(&source)?;
    Ok(validate_shape(&raw)?)
}

/// Returns the sample policy written by `crawl-sep sample`.
#[must_use]
pub fn sample_policy() -> Policy {
    Policy::new("example.com")
        .with_extension("principle", "separation")
        .with_group("indexing", ["Googlebot", "Bingbot"])
        .with_group("training", ["Google-Extended", "CCBot"])
        .with_group("other", ["DuckDuckBot"])
        .with_rule(
            Rule::new("indexing")
                .with_allow(["/"])
                .with_disallow(["/private", "/paywall"]),
        )
        .with_rule(Rule::new("training").with_allow(["/public"]).with_disallow(["/"]))
        .with_rule(Rule::new("other").with_allow(["/"]).with_disallow(["/private"]))
}

/// Writes the sample policy as pretty-printed JSON with a trailing newline.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_sample(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut body = serde_json::to_string_pretty(&sample_policy())?;
    body.push('\n');

    fs::write(path, body).map_err(|source| Error::PolicyWrite {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "Sample policy written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rejects_empty_path() {
        assert!(matches!(resolve_policy_path(""), Err(Error::MissingPath)));
    }

    #[test]
    fn test_resolve_keeps_absolute_paths() {
        let absolute = std::env::temp_dir().join("policy.json");
        assert_eq!(resolve_policy_path(&absolute).unwrap(), absolute);
    }

    #[test]
    fn test_resolve_joins_relative_paths() {
        let resolved = resolve_policy_path("policies/site.json").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("policies/site.json"));
    }

    #[test]
    fn test_sample_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.json");

        write_sample(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("}\n"));
        assert!(written.contains("\n  \"principle\": \"separation\","));

        let loaded = load_policy_from_file(&path).unwrap();
        assert_eq!(loaded, sample_policy());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_policy_from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::PolicyLoad { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_policy_from_file(&path),
            Err(Error::PolicyParse(_))
        ));
    }

    #[test]
    fn test_load_reports_shape_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shape.json");
        fs::write(&path, r#"{"site":"x","userAgents":{"a":["x"]},"rules":"nope"}"#).unwrap();

        let err = load_policy_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Policy.rules"));
    }
}
