use super::{HubId, Locator, MalformedLine, MalformedReason, RepoSpec, ResourceGroup, ResourceKind, ResourceUrl};
use url::Url;

const LOG_TARGET: &str = "  classify";

/// Hosts serving the model hub
const HUB_HOSTS: &[&str] = &["huggingface.co", "hf.co"];

/// Hosts serving source code repositories
const CODE_HOSTS: &[&str] = &["github.com", "gitlab.com", "codeberg.org", "bitbucket.org"];

/// First path segments on the hub that are neither models nor datasets
const HUB_NON_REPO_PREFIXES: &[&str] = &[
    "spaces",
    "docs",
    "blog",
    "api",
    "organizations",
    "collections",
    "papers",
    "settings",
    "pricing",
    "login",
    "join",
];

/// The outcome of parsing a whole input file
#[derive(Debug, Default)]
pub struct ParsedInput {
    /// Well-formed lines, in input order
    pub groups: Vec<ResourceGroup>,

    /// Lines that were skipped, in input order
    pub malformed: Vec<MalformedLine>,
}

/// Parse every line of an input file. Blank lines are ignored.
#[must_use]
pub fn parse_input(text: &str) -> ParsedInput {
    let mut parsed = ParsedInput::default();

    for (index, line) in text.lines().enumerate() {
        match parse_line(index + 1, line) {
            Ok(Some(group)) => parsed.groups.push(group),
            Ok(None) => {}
            Err(malformed) => {
                log::debug!(target: LOG_TARGET, "skipping {malformed}");
                parsed.malformed.push(malformed);
            }
        }
    }

    log::info!(target: LOG_TARGET, "parsed {} resource group(s), skipped {} line(s)", parsed.groups.len(), parsed.malformed.len());
    parsed
}

/// Parse one input line of the form `code_url,dataset_url,model_url`.
///
/// Leading fields may be left empty or omitted altogether: the last field is always the
/// model. Returns `Ok(None)` for a blank line.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<ResourceGroup>, MalformedLine> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let malformed = |reason| MalformedLine { line: line_no, reason };

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let (code, dataset, model) = match fields.as_slice() {
        [code, dataset, model] => (*code, *dataset, *model),
        [dataset, model] => ("", *dataset, *model),
        [model] => ("", "", *model),
        _ => return Err(malformed(MalformedReason::TooManyFields(fields.len()))),
    };

    if model.is_empty() {
        return Err(malformed(MalformedReason::MissingModel));
    }

    let optional = |field: &str| (!field.is_empty()).then(|| classify_url(field));
    let group = ResourceGroup::new(line_no, optional(code), optional(dataset), classify_url(model));

    for slot in group.kind_mismatches() {
        if let Some(url) = group.url(slot) {
            log::warn!(target: LOG_TARGET, "line {line_no}: {slot} URL '{url}' looks like {}", url.kind());
        }
    }

    Ok(Some(group))
}

/// Classify a single URL by its host and path.
#[must_use]
pub fn classify_url(raw: &str) -> ResourceUrl {
    let raw = raw.trim();
    let unknown = || ResourceUrl::new(raw, ResourceKind::Unknown, Locator::Opaque);

    let Some(url) = parse_web_url(raw) else {
        return unknown();
    };

    let host = url.host_str().unwrap_or_default().trim_start_matches("www.").to_ascii_lowercase();

    if HUB_HOSTS.contains(&host.as_str()) {
        let segments: Vec<&str> = url.path_segments().map(|s| s.filter(|p| !p.is_empty()).collect()).unwrap_or_default();

        let (kind, id) = match segments.split_first() {
            Some((&"datasets", rest)) => (ResourceKind::Dataset, HubId::from_segments(rest)),
            Some((&"models", rest)) => (ResourceKind::Model, HubId::from_segments(rest)),
            Some((first, _)) if HUB_NON_REPO_PREFIXES.contains(first) => return unknown(),
            Some(_) => (ResourceKind::Model, HubId::from_segments(&segments)),
            None => return unknown(),
        };

        return id.map_or_else(unknown, |id| ResourceUrl::new(raw, kind, Locator::Hub(id)));
    }

    if CODE_HOSTS.contains(&host.as_str()) {
        return match RepoSpec::parse(&url) {
            Ok(spec) => ResourceUrl::new(raw, ResourceKind::Code, Locator::Repo(spec)),
            Err(e) => {
                log::debug!(target: LOG_TARGET, "'{raw}' is on a code host but is not a repository: {e}");
                unknown()
            }
        };
    }

    unknown()
}

/// Parse an http(s) URL, assuming `https://` when the scheme is missing.
fn parse_web_url(raw: &str) -> Option<Url> {
    let is_web = |u: &Url| matches!(u.scheme(), "http" | "https");

    match Url::parse(raw) {
        Ok(url) if is_web(&url) => Some(url),
        _ if !raw.contains("://") => Url::parse(&format!("https://{raw}")).ok().filter(is_web),
        _ => None,
    }
}
