//! Application state shared by all handlers.

use std::sync::Arc;

use crate::db::DbPool;
use crate::knowledge_test::{Card, TestDefinition};
use crate::scoring::{Scorer, ScoringError};

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
  /// Study database (users, VR nugget and knowledge test results)
  pub db: DbPool,

  /// Knowledge test scorer, absent when the definition failed to load
  scorer: Option<Arc<Scorer>>,
}

impl AppState {
  pub fn new(db: DbPool, definition: Option<TestDefinition>) -> Self {
    Self {
      db,
      scorer: definition.map(|d| Arc::new(Scorer::new(d))),
    }
  }

  /// Scorer for the loaded knowledge test
  pub fn scorer(&self) -> Result<&Scorer, ScoringError> {
    self.scorer.as_deref().ok_or(ScoringError::ConfigNotLoaded)
  }

  /// Card pool of the loaded knowledge test (empty when not loaded)
  pub fn card_pool(&self) -> &[Card] {
    self
      .scorer
      .as_deref()
      .map(|s| s.definition().card_pool.as_slice())
      .unwrap_or(&[])
  }
}
