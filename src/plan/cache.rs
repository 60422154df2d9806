//! Compute-once plan cache keyed by window length.

use std::sync::{Arc, OnceLock};

use fxhash::FxHashMap;
use parking_lot::Mutex;
use tracing::trace;

use super::builder::MoveTreeBuilder;
use super::types::WindowPlan;
use crate::error::PlanError;

type Slot = Arc<Mutex<Option<Arc<WindowPlan>>>>;

/// Holds at most one built [`WindowPlan`] per window length.
///
/// Concurrent first requests for the same length build it once; the others
/// wait on that length's slot. Requests for different lengths never block
/// each other while building. Failed builds leave the slot empty.
#[derive(Debug, Default)]
pub struct PlanCache {
    slots: Mutex<FxHashMap<usize, Slot>>,
}

impl PlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache shared by every optimizer.
    pub fn global() -> &'static PlanCache {
        static GLOBAL: OnceLock<PlanCache> = OnceLock::new();
        GLOBAL.get_or_init(PlanCache::new)
    }

    /// Returns the plan for `length` if it has been built.
    pub fn get(&self, length: usize) -> Option<Arc<WindowPlan>> {
        let slot = self.slots.lock().get(&length).cloned()?;
        let plan = slot.lock().clone();
        plan
    }

    /// Returns the plan for `length`, building it on first request.
    pub fn get_or_build(&self, length: usize) -> Result<Arc<WindowPlan>, PlanError> {
        let builder = MoveTreeBuilder::new(length)?;
        let slot = self.slots.lock().entry(length).or_default().clone();

        let mut guard = slot.lock();
        if let Some(plan) = guard.as_ref() {
            trace!(length, "window plan cache hit");
            return Ok(Arc::clone(plan));
        }

        trace!(length, "window plan cache miss");
        let plan = Arc::new(builder.build()?);
        *guard = Some(Arc::clone(&plan));
        Ok(plan)
    }

    /// Builds every listed length up front.
    #[cfg(not(feature = "parallel"))]
    pub fn prewarm(&self, lengths: &[usize]) -> Result<(), PlanError> {
        for &length in lengths {
            self.get_or_build(length)?;
        }
        Ok(())
    }

    /// Builds every listed length up front, in parallel.
    #[cfg(feature = "parallel")]
    pub fn prewarm(&self, lengths: &[usize]) -> Result<(), PlanError> {
        use rayon::prelude::*;

        lengths
            .par_iter()
            .try_for_each(|&length| self.get_or_build(length).map(|_| ()))
    }

    /// Number of lengths with a built plan.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.lock().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached plan. Plans already handed out stay alive.
    pub fn clear(&self) {
        self.slots.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_builds_once_and_reuses() {
        let cache = PlanCache::new();
        assert!(cache.get(4).is_none());
        let first = cache.get_or_build(4).unwrap();
        let second = cache.get_or_build(4).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &cache.get(4).unwrap()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalid_length_is_not_cached() {
        let cache = PlanCache::new();
        assert!(cache.get_or_build(0).is_err());
        assert!(cache.get_or_build(99).is_err());
        assert!(cache.is_empty());
        assert!(cache.slots.lock().is_empty());
    }

    #[test]
    fn test_concurrent_first_requests_share_one_plan() {
        let cache = PlanCache::new();
        let plans: Vec<Arc<WindowPlan>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| cache.get_or_build(6).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for plan in &plans[1..] {
            assert!(Arc::ptr_eq(&plans[0], plan));
        }
    }

    #[test]
    fn test_prewarm_builds_all() {
        let cache = PlanCache::new();
        cache.prewarm(&[2, 3, 5]).unwrap();
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(5).unwrap().len(), 120);
    }

    #[test]
    fn test_prewarm_reports_invalid_length() {
        let cache = PlanCache::new();
        assert!(cache.prewarm(&[3, 0]).is_err());
    }

    #[test]
    fn test_clear_keeps_handed_out_plans() {
        let cache = PlanCache::new();
        let plan = cache.get_or_build(3).unwrap();
        cache.clear();
        assert!(cache.get(3).is_none());
        assert_eq!(plan.len(), 6);
    }
}
