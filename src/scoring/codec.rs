//! Interleaved answer encoding.
//!
//! A knowledge-test answer alternates object and verb tokens, one character
//! each: `"AbCd"` reads as object `A`, verb `b`, object `C`, verb `d`.
//! The string may end on an object with no verb.

/// Object and verb tokens of one answer, in answer order (duplicates kept)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequences {
  pub objects: Vec<char>,
  pub verbs: Vec<char>,
}

/// Split an answer into objects (even positions) and verbs (odd positions).
pub fn decode(answer: &str) -> TokenSequences {
  let mut tokens = TokenSequences::default();

  for (i, c) in answer.chars().enumerate() {
    if i % 2 == 0 {
      tokens.objects.push(c);
    } else {
      tokens.verbs.push(c);
    }
  }

  tokens
}
