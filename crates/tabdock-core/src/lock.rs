//! Re-entrant layout lock
//!
//! A counter rather than a flag: overlapping transitions each acquire and
//! release once, and the lock is engaged while any of them holds it.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutLock {
    count: usize,
}

impl LayoutLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self) {
        self.count += 1;
        tracing::debug!(count = self.count, "Layout lock acquired");
    }

    /// Unbalanced releases are ignored; the counter never goes negative.
    pub fn release(&mut self) {
        if self.count == 0 {
            tracing::warn!("Layout lock released without a matching acquire");
            return;
        }
        self.count -= 1;
        tracing::debug!(count = self.count, "Layout lock released");
    }

    pub fn set(&mut self, locked: bool) {
        if locked {
            self.acquire();
        } else {
            self.release();
        }
    }

    pub fn is_locked(&self) -> bool {
        self.count > 0
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_lock() {
        let mut lock = LayoutLock::new();
        lock.set(true);
        lock.set(true);
        lock.set(false);
        assert!(lock.is_locked());

        lock.set(false);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_unbalanced_release_saturates() {
        let mut lock = LayoutLock::new();
        lock.release();
        assert_eq!(lock.count(), 0);

        lock.acquire();
        assert!(lock.is_locked());
    }
}
