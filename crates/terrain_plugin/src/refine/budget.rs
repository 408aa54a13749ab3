//! Rate limiting configuration for tree refinement.
//!
//! A conforming split can cascade across many neighbors; budgets cap how
//! many policy-requested operations run per update so a fast-moving camera
//! cannot stall a frame. Cascade-forced splits are never counted against the
//! budget - they are mandatory for correctness.

/// Rate limiting configuration for refinement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefinementBudget {
  /// Maximum policy-requested splits per update (0 = unlimited).
  pub max_splits: usize,
  /// Maximum policy-requested merges per update (0 = unlimited).
  pub max_merges: usize,
}

impl RefinementBudget {
  /// Default budget with reasonable limits.
  pub const DEFAULT: Self = Self {
    max_splits: 64,
    max_merges: 64,
  };

  /// Unlimited budget for tests or offline refinement.
  pub const UNLIMITED: Self = Self {
    max_splits: usize::MAX,
    max_merges: usize::MAX,
  };

  /// Check if more splits can be performed.
  #[inline]
  pub fn can_split(&self, performed: usize) -> bool {
    self.max_splits == 0 || performed < self.max_splits
  }

  /// Check if more merges can be performed.
  #[inline]
  pub fn can_merge(&self, performed: usize) -> bool {
    self.max_merges == 0 || performed < self.max_merges
  }
}

impl Default for RefinementBudget {
  fn default() -> Self {
    Self::DEFAULT
  }
}

/// Statistics from one refinement update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefinementStats {
  /// Policy-requested splits applied.
  pub splits_performed: usize,
  /// Policy-requested merges applied (refused merges are not counted).
  pub merges_performed: usize,
  /// Merges the diamond gate refused this update.
  pub merges_refused: usize,
}

impl RefinementStats {
  /// Total mutations applied this update.
  #[inline]
  pub fn total_transitions(&self) -> usize {
    self.splits_performed + self.merges_performed
  }
}
