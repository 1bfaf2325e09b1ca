//! Bottom-bar coverage by child navigation
//!
//! ```text
//! Uncovered
//!   ↓ push (hides bar)
//! Covered
//!   ↓ pop, interactive      → UncoverPending
//!   ↓ pop, not interactive  → Uncovered
//! UncoverPending
//!   ↓ gesture finished  → Uncovered
//!   ↓ gesture cancelled → Covered
//! ```

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Coverage {
    #[default]
    Uncovered,
    Covered,
    /// Still covered until the interactive transition settles
    UncoverPending,
}

impl Coverage {
    pub fn is_covered(&self) -> bool {
        !matches!(self, Coverage::Uncovered)
    }

    /// Set coverage outright, dropping any deferred uncover.
    pub fn reset(covered: bool) -> Self {
        if covered {
            Coverage::Covered
        } else {
            Coverage::Uncovered
        }
    }

    pub fn request_uncover(self, interactive: bool) -> Self {
        match (self, interactive) {
            (Coverage::Uncovered, _) => Coverage::Uncovered,
            (_, true) => Coverage::UncoverPending,
            (_, false) => Coverage::Uncovered,
        }
    }

    pub fn finish_interactive(self, cancelled: bool) -> Self {
        match self {
            Coverage::UncoverPending if cancelled => Coverage::Covered,
            Coverage::UncoverPending => Coverage::Uncovered,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncover_waits_for_gesture() {
        let pending = Coverage::Covered.request_uncover(true);
        assert_eq!(pending, Coverage::UncoverPending);
        assert!(pending.is_covered());

        assert_eq!(pending.finish_interactive(false), Coverage::Uncovered);
        assert_eq!(pending.finish_interactive(true), Coverage::Covered);
    }

    #[test]
    fn test_immediate_uncover() {
        assert_eq!(Coverage::Covered.request_uncover(false), Coverage::Uncovered);
        assert_eq!(Coverage::Uncovered.request_uncover(true), Coverage::Uncovered);
        assert_eq!(
            Coverage::Covered.finish_interactive(false),
            Coverage::Covered
        );
    }
}
