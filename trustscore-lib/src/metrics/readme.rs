//! Helpers for reading model READMEs (model cards).
//!
//! A model card may open with a YAML front matter block fenced by lines that are exactly
//! `---`. A leading block that does not parse as a YAML mapping is an ordinary markdown
//! horizontal rule and stays part of the body.

use crate::facts::hub::OneOrMany;
use serde::Deserialize;
use serde_yaml::Value;

const FENCE: &str = "---";

/// The parts of a model card's front matter that metrics read
#[derive(Debug, Default, Deserialize)]
pub struct FrontMatter {
    #[serde(default)]
    pub license: Option<OneOrMany>,
}

/// Split off a leading front matter block, returning its parsed YAML and the body.
fn split(readme: &str) -> Option<(Value, &str)> {
    let rest = readme.trim_start().strip_prefix(FENCE)?;
    let rest = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n"))?;

    let mut consumed = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let (yaml, tail) = rest.split_at(consumed);
            let body = tail.split_at(line.len()).1;
            let value = if yaml.trim().is_empty() {
                Value::Null
            } else {
                serde_yaml::from_str(yaml).ok()?
            };
            return matches!(value, Value::Mapping(_) | Value::Null).then_some((value, body));
        }
        consumed += line.len();
    }

    None
}

/// The README without its leading YAML front matter block, if any.
#[must_use]
pub fn body(readme: &str) -> &str {
    split(readme).map_or_else(|| readme.trim_start(), |(_, body)| body)
}

/// The README's front matter, if it has a well-formed one.
#[must_use]
pub fn front_matter(readme: &str) -> Option<FrontMatter> {
    match split(readme)? {
        (Value::Null, _) => Some(FrontMatter::default()),
        (value, _) => serde_yaml::from_value(value).ok(),
    }
}

/// Number of whitespace-separated words in the README body.
#[must_use]
pub fn word_count(readme: &str) -> usize {
    body(readme).split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn license(readme: &str) -> Option<String> {
        front_matter(readme)?.license?.first().map(str::to_string)
    }

    #[test]
    fn test_body_without_front_matter() {
        assert_eq!(body("# Title\n\ntext"), "# Title\n\ntext");
    }

    #[test]
    fn test_body_strips_front_matter() {
        let readme = "---\nlicense: mit\ntags:\n- a\n---\n# Title\nSome words here\n";
        assert_eq!(body(readme), "# Title\nSome words here\n");
        assert_eq!(word_count(readme), 5);
    }

    #[test]
    fn test_unterminated_front_matter_is_kept() {
        let readme = "---\nlicense: mit\n# Title";
        assert_eq!(body(readme), readme);
        assert!(front_matter(readme).is_none());
    }

    #[test]
    fn test_closing_fence_must_be_a_whole_line() {
        let readme = "---\nlicense: mit\n----\n# Title\n--- not a fence\n";
        assert_eq!(body(readme), readme);
        assert!(front_matter(readme).is_none());
    }

    #[test]
    fn test_leading_horizontal_rule_is_body() {
        let readme = "---\n# Introduction\nThis model classifies text.\n---\n## Usage\nCall it.\n";
        assert_eq!(body(readme), readme);
        assert_eq!(word_count(readme), 12);
        assert!(front_matter(readme).is_none());
    }

    #[test]
    fn test_scalar_license() {
        assert_eq!(license("---\nlanguage: en\nlicense: \"apache-2.0\"\n---\n# Title").as_deref(), Some("apache-2.0"));
        assert_eq!(license("---\nlanguage: en\n---\n# Title"), None);
        assert_eq!(license("# no front matter\nlicense: mit"), None);
    }

    #[test]
    fn test_list_license() {
        assert_eq!(license("---\nlicense:\n  - mit\n  - apache-2.0\n---\n# Model").as_deref(), Some("mit"));
    }

    #[test]
    fn test_license_comment_is_ignored() {
        assert_eq!(license("---\nlicense: mit # see LICENSE\n---\n").as_deref(), Some("mit"));
    }

    #[test]
    fn test_mistyped_license_is_not_declared() {
        assert!(front_matter("---\nlicense: { name: mit }\n---\n").is_none());
    }

    #[test]
    fn test_front_matter_only() {
        assert_eq!(body("---\nlicense: mit\n---"), "");
        assert_eq!(body("---\n---\n# Title"), "# Title");
        assert!(front_matter("---\n---\n").is_some_and(|fm| fm.license.is_none()));
        assert_eq!(word_count(""), 0);
    }
}
