//! License: how freely a model can be used, graded from its declared license.
//!
//! The declared identifier comes from the model card (or, failing that, the README's
//! front matter). Identifiers are resolved through the SPDX license list where possible,
//! then by well-known name fragments. A model that declares nothing but mentions a
//! license in its README earns [`README_MENTION_SCORE`].

use super::readme::{self, FrontMatter};
use super::MetricValue;
use crate::Result;
use crate::facts::{GroupFacts, MetadataSource, ModelInfo};

/// Score for a README that talks about licensing without declaring an identifier
pub const README_MENTION_SCORE: f64 = 0.5;

/// Compatibility tier of a license
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseClass {
    /// MIT, Apache, BSD, public-domain dedications and the like
    Permissive,

    /// The LGPL family, compatible with linking from any project
    Lgpl,

    /// File-level copyleft such as MPL or EPL
    WeakCopyleft,

    /// GPL and AGPL
    StrongCopyleft,

    /// Model licenses with use restrictions (RAIL, community licenses, non-commercial)
    Restricted,

    /// Anything not recognized, including the hub's `other`
    Unrecognized,
}

impl LicenseClass {
    #[must_use]
    pub const fn score(self) -> f64 {
        match self {
            Self::Permissive | Self::Lgpl => 1.0,
            Self::WeakCopyleft => 0.7,
            Self::StrongCopyleft => 0.3,
            Self::Restricted | Self::Unrecognized => 0.2,
        }
    }
}

/// Fragments of model-specific license ids (lowercase) that carry use restrictions
const RESTRICTED_FRAGMENTS: &[&str] = &["openrail", "-rail", "llama", "gemma", "cc-by-nc", "deepseek", "creativeml"];

const WEAK_COPYLEFT_PREFIXES: &[&str] = &["mpl", "epl", "cddl", "eupl", "osl", "ms-rl"];

const PERMISSIVE_PREFIXES: &[&str] = &[
    "mit", "apache", "bsd", "isc", "unlicense", "cc0", "cc-by", "zlib", "wtfpl", "afl", "bsl-1.0", "artistic", "pddl", "odc-by",
];

/// Grade a license identifier.
#[must_use]
pub fn classify(license: &str) -> LicenseClass {
    let lower = license.trim().to_ascii_lowercase();

    if lower.is_empty() || lower == "other" || lower == "unknown" {
        return LicenseClass::Unrecognized;
    }

    if RESTRICTED_FRAGMENTS.iter().any(|f| lower.contains(f)) {
        return LicenseClass::Restricted;
    }

    classify_spdx(license.trim()).unwrap_or_else(|| classify_by_name(&lower))
}

/// Resolve through the SPDX license list. For `OR` expressions the most permissive
/// alternative wins.
fn classify_spdx(license: &str) -> Option<LicenseClass> {
    let expr = spdx::Expression::parse_mode(license, spdx::ParseMode::LAX).ok()?;

    expr.requirements()
        .filter_map(|req| match &req.req.license {
            spdx::LicenseItem::Spdx { id, .. } => Some(classify_spdx_id(*id)),
            _ => None,
        })
        .max_by(|a, b| a.score().total_cmp(&b.score()))
}

fn classify_spdx_id(id: spdx::LicenseId) -> LicenseClass {
    let lower = id.name.to_ascii_lowercase();

    if lower.starts_with("lgpl") {
        LicenseClass::Lgpl
    } else if lower.starts_with("gpl") || lower.starts_with("agpl") {
        LicenseClass::StrongCopyleft
    } else if WEAK_COPYLEFT_PREFIXES.iter().any(|p| lower.starts_with(p)) || id.is_copyleft() {
        LicenseClass::WeakCopyleft
    } else if id.is_osi_approved() || id.is_fsf_free_libre() || PERMISSIVE_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        LicenseClass::Permissive
    } else {
        LicenseClass::Restricted
    }
}

fn classify_by_name(lower: &str) -> LicenseClass {
    if lower.contains("lgpl") {
        LicenseClass::Lgpl
    } else if lower.contains("gpl") {
        LicenseClass::StrongCopyleft
    } else if WEAK_COPYLEFT_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        LicenseClass::WeakCopyleft
    } else if PERMISSIVE_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        LicenseClass::Permissive
    } else {
        LicenseClass::Unrecognized
    }
}

fn mentions_license(readme: &str) -> bool {
    let lower = readme::body(readme).to_lowercase();
    lower.contains("license") || lower.contains("licence")
}

/// Score a declared license, falling back to what the README says.
#[must_use]
pub fn score(license: Option<&str>, readme: &str) -> f64 {
    match license {
        Some(id) => classify(id).score(),
        None if mentions_license(readme) => README_MENTION_SCORE,
        None => 0.0,
    }
}

pub async fn evaluate<S: MetadataSource>(facts: &GroupFacts<S>) -> Result<MetricValue> {
    let (info, readme) = tokio::join!(facts.model_info(), facts.model_readme());

    let readme = match (info.is_err(), readme) {
        (true, Err(e)) => return Err(e),
        (_, readme) => readme.unwrap_or_default(),
    };

    let front_matter = readme::front_matter(readme);
    let declared = declared_license(info.ok(), front_matter.as_ref());

    Ok(MetricValue::Scalar(score(declared, readme)))
}

/// The model card's license, else the first license named in the README front matter.
fn declared_license<'a>(info: Option<&'a ModelInfo>, front_matter: Option<&'a FrontMatter>) -> Option<&'a str> {
    info.and_then(|i| i.license.as_deref())
        .or_else(|| front_matter?.license.as_ref()?.first())
        .map(str::trim)
        .filter(|id| !id.is_empty())
}
