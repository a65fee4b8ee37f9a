//! Knowledge-test answer scoring.
//!
//! A submitted answer is compared against the configured correct answer in
//! two ways:
//! - edit distance over the raw strings ([`distance::damerau_levenshtein`])
//! - Jaccard overlap of the decoded object and verb tokens ([`similarity::jaccard`])
//!
//! [`combine`] folds both into a single total error where lower is better.

pub mod codec;
pub mod distance;
pub mod similarity;

use serde::Serialize;
use thiserror::Error;

use crate::knowledge_test::TestDefinition;

pub use codec::{decode, TokenSequences};
pub use distance::damerau_levenshtein;
pub use similarity::jaccard;

/// Reserved token marking an answer as invalid
pub const INVALID_MARKER: char = 'l';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
  #[error("knowledge test configuration is not loaded")]
  ConfigNotLoaded,

  #[error("both similarities are zero (edit distance {edit_distance}), total error is unbounded")]
  DegenerateSimilarity { edit_distance: usize },
}

/// Metrics for one submitted answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
  /// `f64::INFINITY` when neither objects nor verbs overlap the correct answer
  pub total_error: f64,
  pub edit_distance: usize,
  pub jaccard_objects: f64,
  pub jaccard_verbs: f64,
  pub invalid: bool,
}

impl ScoreResult {
  /// True when the total error hit the zero-similarity policy
  pub fn is_degenerate(&self) -> bool {
    self.total_error.is_infinite()
  }

  /// Total error rounded for storage, `None` when unbounded
  pub fn rounded_total_error(&self) -> Option<i64> {
    if self.total_error.is_finite() {
      Some(self.total_error.round() as i64)
    } else {
      None
    }
  }
}

/// `edit_distance / mean(jaccard_objects, jaccard_verbs)`.
///
/// A zero distance is a perfect answer and scores `0.0` regardless of the
/// similarities. Otherwise a zero mean similarity has no finite total.
pub fn combine(
  edit_distance: usize,
  jaccard_objects: f64,
  jaccard_verbs: f64,
) -> Result<f64, ScoringError> {
  if edit_distance == 0 {
    return Ok(0.0);
  }

  let mean_similarity = 0.5 * (jaccard_objects + jaccard_verbs);
  if mean_similarity <= 0.0 {
    return Err(ScoringError::DegenerateSimilarity { edit_distance });
  }

  Ok(edit_distance as f64 / mean_similarity)
}

/// Whether an answer carries the reserved invalid token
pub fn is_invalid(answer: &str) -> bool {
  answer.contains(INVALID_MARKER)
}

/// Scores answers against one loaded test definition.
///
/// The correct answer is decoded once here and reused for every request.
#[derive(Debug, Clone)]
pub struct Scorer {
  definition: TestDefinition,
  correct: TokenSequences,
}

impl Scorer {
  pub fn new(definition: TestDefinition) -> Self {
    let correct = decode(&definition.correct_answer);
    Self { definition, correct }
  }

  pub fn definition(&self) -> &TestDefinition {
    &self.definition
  }

  pub fn score_answer(&self, answer: &str) -> ScoreResult {
    let edit_distance = damerau_levenshtein(answer, &self.definition.correct_answer);

    let submitted = decode(answer);
    let jaccard_objects = jaccard(&submitted.objects, &self.correct.objects);
    let jaccard_verbs = jaccard(&submitted.verbs, &self.correct.verbs);

    let total_error = match combine(edit_distance, jaccard_objects, jaccard_verbs) {
      Ok(total) => total,
      Err(e) => {
        tracing::warn!("{}; scoring as maximal error", e);
        f64::INFINITY
      }
    };

    ScoreResult {
      total_error,
      edit_distance,
      jaccard_objects,
      jaccard_verbs,
      invalid: is_invalid(answer),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn scorer(correct_answer: &str) -> Scorer {
    Scorer::new(TestDefinition {
      card_pool: Vec::new(),
      correct_answer: correct_answer.to_string(),
    })
  }

  #[test]
  fn test_exact_answer() {
    let result = scorer("AbCd").score_answer("AbCd");
    assert_eq!(result.edit_distance, 0);
    assert_eq!(result.jaccard_objects, 1.0);
    assert_eq!(result.jaccard_verbs, 1.0);
    assert_eq!(result.total_error, 0.0);
    assert!(!result.invalid);
    assert!(!result.is_degenerate());
    assert_eq!(result.rounded_total_error(), Some(0));
  }

  #[test]
  fn test_completely_wrong_answer_is_degenerate() {
    let result = scorer("AbCd").score_answer("XyZw");
    assert_eq!(result.edit_distance, 4);
    assert_eq!(result.jaccard_objects, 0.0);
    assert_eq!(result.jaccard_verbs, 0.0);
    assert!(!result.total_error.is_nan());
    assert_eq!(result.total_error, f64::INFINITY);
    assert!(result.is_degenerate());
    assert_eq!(result.rounded_total_error(), None);
  }

  #[test]
  fn test_partial_answer() {
    // Objects {A, C} vs {A, C} = 1.0, verbs {b, x} vs {b, d} = 1/3
    let result = scorer("AbCd").score_answer("AbCx");
    assert_eq!(result.edit_distance, 1);
    assert_eq!(result.jaccard_objects, 1.0);
    assert!((result.jaccard_verbs - 1.0 / 3.0).abs() < 1e-12);
    assert!((result.total_error - 1.5).abs() < 1e-12);
    assert_eq!(result.rounded_total_error(), Some(2));
  }

  #[test]
  fn test_swapped_pair_keeps_token_sets() {
    // Swapping two non-adjacent objects leaves both sets unchanged
    let result = scorer("AbCdEf").score_answer("AbEdCf");
    assert_eq!(result.edit_distance, 2);
    assert_eq!(result.jaccard_objects, 1.0);
    assert_eq!(result.jaccard_verbs, 1.0);
    assert_eq!(result.total_error, 2.0);
  }

  #[test]
  fn test_empty_answer_against_empty_key() {
    let result = scorer("").score_answer("");
    assert_eq!(result.edit_distance, 0);
    assert_eq!(result.jaccard_objects, 0.0);
    assert_eq!(result.jaccard_verbs, 0.0);
    assert_eq!(result.total_error, 0.0);
  }

  #[test]
  fn test_empty_answer_is_degenerate() {
    let result = scorer("AbCd").score_answer("");
    assert_eq!(result.edit_distance, 4);
    assert!(result.is_degenerate());
  }

  #[test]
  fn test_invalid_marker() {
    assert!(scorer("AbCd").score_answer("alpha").invalid);
    assert!(!scorer("AbCd").score_answer("AbCd").invalid);
    // Case-sensitive
    assert!(!scorer("AbCd").score_answer("ALPHA").invalid);
    assert!(is_invalid("l"));
    assert!(!is_invalid(""));
  }

  #[test]
  fn test_invalid_does_not_change_metrics() {
    let s = scorer("AbCd");
    let marked = s.score_answer("AbCl");
    let unmarked = s.score_answer("AbCx");
    assert!(marked.invalid);
    assert!(!unmarked.invalid);
    assert_eq!(marked.edit_distance, unmarked.edit_distance);
    assert_eq!(marked.total_error, unmarked.total_error);
  }

  #[test]
  fn test_scoring_is_deterministic() {
    let s = scorer("AbCdEfG");
    for answer in ["", "AbCdEfG", "GfEdCbA", "alpha", "AbCd"] {
      assert_eq!(s.score_answer(answer), s.score_answer(answer));
    }
  }

  #[test]
  fn test_scorer_keeps_definition() {
    let s = scorer("AbCdE");
    assert_eq!(s.definition().correct_answer, "AbCdE");

    let score = s.score_answer("AbCdE");
    assert_eq!(score.jaccard_objects, 1.0);
    assert_eq!(score.jaccard_verbs, 1.0);
  }

  #[test]
  fn test_combine_policy() {
    assert_eq!(combine(0, 0.0, 0.0), Ok(0.0));
    assert_eq!(combine(3, 1.0, 1.0), Ok(3.0));
    assert_eq!(combine(3, 0.5, 0.0), Ok(12.0));
    assert_eq!(
      combine(4, 0.0, 0.0),
      Err(ScoringError::DegenerateSimilarity { edit_distance: 4 })
    );
  }
}
