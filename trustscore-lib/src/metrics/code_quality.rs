//! Code quality: what the linked code repository does to keep itself healthy.
//!
//! Three signals, each worth a third, detected from the repository's file paths:
//! automated tests, continuous integration configuration, and lint or static analysis
//! configuration. A group without linked code scores 0.

use super::MetricValue;
use crate::Result;
use crate::facts::{GroupFacts, MetadataSource};

/// Directory components that hold tests
const TEST_DIRS: &[&str] = &["test", "tests", "__tests__", "spec", "testing"];

/// Path prefixes and file names of CI configuration
const CI_PREFIXES: &[&str] = &[".github/workflows/", ".circleci/", ".buildkite/", ".gitlab-ci.yml", ".travis.yml", "azure-pipelines.yml", "jenkinsfile", ".drone.yml"];

/// File names of linter and static analysis configuration
const LINT_FILES: &[&str] = &[
    ".flake8",
    ".pylintrc",
    "pylintrc",
    "ruff.toml",
    ".ruff.toml",
    "mypy.ini",
    ".mypy.ini",
    ".pre-commit-config.yaml",
    ".eslintrc",
    ".eslintrc.js",
    ".eslintrc.json",
    "eslint.config.js",
    "clippy.toml",
    ".clippy.toml",
    "rustfmt.toml",
    ".golangci.yml",
    ".golangci.yaml",
    ".editorconfig",
    "setup.cfg",
    "tox.ini",
];

fn is_test_path(path: &str) -> bool {
    let mut components = path.split('/');
    let file_name = components.next_back().unwrap_or_default();

    components.any(|dir| TEST_DIRS.contains(&dir))
        || file_name.starts_with("test_")
        || file_name.ends_with("_test.py")
        || file_name.ends_with("_test.go")
        || file_name.contains(".test.")
        || file_name.contains(".spec.")
}

fn is_ci_path(path: &str) -> bool {
    CI_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

fn is_lint_path(path: &str) -> bool {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    LINT_FILES.contains(&file_name)
}

/// Score a repository from its file listing.
#[must_use]
pub fn score_files<T: AsRef<str>>(files: &[T]) -> f64 {
    let lowered: Vec<String> = files.iter().map(|f| f.as_ref().to_ascii_lowercase()).collect();

    let signals = [
        lowered.iter().any(|p| is_test_path(p)),
        lowered.iter().any(|p| is_ci_path(p)),
        lowered.iter().any(|p| is_lint_path(p)),
    ];

    let present: u32 = signals.iter().map(|&s| u32::from(s)).sum();
    f64::from(present) / 3.0
}

pub async fn evaluate<S: MetadataSource>(facts: &GroupFacts<S>) -> Result<MetricValue> {
    let score = facts.repo_files().await?.map_or(0.0, score_files);
    Ok(MetricValue::Scalar(score))
}
