//! Performance claims: whether the quality a model advertises is backed by evidence.
//!
//! Three signals, each worth a third: benchmark or evaluation vocabulary in the README,
//! concrete results (a markdown table with numbers, or structured evaluation results in
//! the model card), and a link to a paper.

use super::{MetricValue, readme};
use crate::Result;
use crate::facts::{GroupFacts, MetadataSource};
use regex::Regex;
use std::sync::LazyLock;

static BENCHMARK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(benchmarks?|evaluation|eval results|accuracy|f1[- ]?score|bleu|rouge|perplexity|mmlu|glue|squad|wer)\b")
        .expect("invalid regex")
});

static RESULTS_TABLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\|.*\|\s*\d+(\.\d+)?\s*%?\s*\|").expect("invalid regex"));

static PAPER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)arxiv\.org/(abs|pdf)/|doi\.org/10\.|@(article|inproceedings|misc)\s*\{").expect("invalid regex"));

/// Score from the README and whether the model card has structured evaluation results.
#[must_use]
pub fn score(readme: &str, has_eval_results: bool) -> f64 {
    let body = readme::body(readme);

    let signals = [
        BENCHMARK_REGEX.is_match(body),
        has_eval_results || RESULTS_TABLE_REGEX.is_match(body),
        PAPER_REGEX.is_match(readme),
    ];

    let present: u32 = signals.iter().map(|&s| u32::from(s)).sum();
    f64::from(present) / 3.0
}

pub async fn evaluate<S: MetadataSource>(facts: &GroupFacts<S>) -> Result<MetricValue> {
    let (readme, info) = tokio::join!(facts.model_readme(), facts.model_info());
    let readme = readme?;

    // a missing model card only drops the structured-results signal
    let has_eval_results = info.map(|i| i.has_eval_results).unwrap_or_default();

    Ok(MetricValue::Scalar(score(readme, has_eval_results)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_evidence() {
        assert_eq!(score("A model that does things.", false), 0.0);
    }

    #[test]
    fn test_keywords_only() {
        assert!((score("We report accuracy on our internal set.", false) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_results_table() {
        let readme = "\
## Evaluation

| Task | Score |
|------|-------|
| SQuAD | 88.5 |
";
        assert!((score(readme, false) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_card_eval_results_count_as_results() {
        assert!((score("", true) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_signals() {
        let readme = "\
Benchmarks below; see https://arxiv.org/abs/1810.04805 for details.

| Model | GLUE |
|-------|------|
| base  | 79.6 |
";
        assert_eq!(score(readme, false), 1.0);
    }

    #[test]
    fn test_bibtex_counts_as_paper() {
        assert!((score("@inproceedings{devlin2019,\n title={BERT}}", false) - 1.0 / 3.0).abs() < 1e-9);
    }
}
