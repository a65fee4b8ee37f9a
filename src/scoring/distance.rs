//! Damerau-Levenshtein edit distance over raw answer strings.

/// Edit distance counting insertions, deletions, substitutions and swaps of
/// two adjacent characters, each as one operation.
///
/// This is the restricted (optimal string alignment) form: a transposed
/// pair is not edited again afterwards. Operates on `char`s, so multi-byte
/// tokens count once. Working memory grows with the length of `b` only.
pub fn damerau_levenshtein(a: &str, b: &str) -> usize {
  strsim::osa_distance(a, b)
}
