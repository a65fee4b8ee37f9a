//! Jaccard set similarity over answer tokens.

use std::collections::HashSet;

/// `|A ∩ B| / |A ∪ B|` over the distinct tokens of each side.
///
/// Two empty inputs have an empty union; that case is defined as `0.0`.
pub fn jaccard(a: &[char], b: &[char]) -> f64 {
  let set_a: HashSet<char> = a.iter().copied().collect();
  let set_b: HashSet<char> = b.iter().copied().collect();

  let union = set_a.union(&set_b).count();
  if union == 0 {
    return 0.0;
  }

  let intersection = set_a.intersection(&set_b).count();
  intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_both_empty_is_zero() {
    let result = jaccard(&[], &[]);
    assert_eq!(result, 0.0);
    assert!(!result.is_nan());
  }

  #[test]
  fn test_one_side_empty() {
    assert_eq!(jaccard(&['A', 'C'], &[]), 0.0);
    assert_eq!(jaccard(&[], &['A']), 0.0);
  }

  #[test]
  fn test_identical_sets() {
    assert_eq!(jaccard(&['A', 'C'], &['A', 'C']), 1.0);
  }

  #[test]
  fn test_order_does_not_matter() {
    assert_eq!(jaccard(&['C', 'A'], &['A', 'C']), 1.0);
  }

  #[test]
  fn test_duplicates_collapse() {
    assert_eq!(jaccard(&['A', 'A', 'A'], &['A']), 1.0);
    // {A, B} vs {A}: 1 / 2
    assert!((jaccard(&['A', 'B', 'B'], &['A', 'A']) - 0.5).abs() < f64::EPSILON);
  }

  #[test]
  fn test_partial_overlap() {
    // {A, C} vs {A, E}: 1 / 3
    let result = jaccard(&['A', 'C'], &['A', 'E']);
    assert!((result - 1.0 / 3.0).abs() < 1e-12);
  }

  #[test]
  fn test_disjoint() {
    assert_eq!(jaccard(&['A', 'C'], &['X', 'Z']), 0.0);
  }

  #[test]
  fn test_case_sensitive() {
    assert_eq!(jaccard(&['a'], &['A']), 0.0);
  }
}
