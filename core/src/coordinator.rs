use crate::model::Target;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Shared state touched by concurrent detection calls: the monotonic id
/// counter and the detector's result list.
///
/// Extraction tasks never lock; their candidates are collected after the join
/// and numbered and appended here in one step.
pub struct Coordinator {
    next_id: AtomicU64,
    results: Mutex<Vec<Target>>,
}

impl Coordinator {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            results: Mutex::new(Vec::new()),
        }
    }

    /// Hands out the next id. Ids start at 1 and are never reused.
    pub fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Numbers `targets` in order.
    pub fn assign_ids(&self, targets: &mut [Target]) {
        for target in targets.iter_mut() {
            target.id = self.next_id();
        }
    }

    pub fn append(&self, targets: &[Target]) {
        self.results().extend_from_slice(targets);
    }

    pub fn push(&self, target: Target) {
        self.results().push(target);
    }

    pub fn replace(&self, targets: Vec<Target>) {
        *self.results() = targets;
    }

    pub fn snapshot(&self) -> Vec<Target> {
        self.results().clone()
    }

    pub fn len(&self) -> usize {
        self.results().len()
    }

    pub fn is_empty(&self) -> bool {
        self.results().is_empty()
    }

    pub fn clear(&self) {
        self.results().clear();
    }

    fn results(&self) -> MutexGuard<'_, Vec<Target>> {
        self.results.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Modality;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn ids_are_monotonic_and_start_at_one() {
        let coordinator = Coordinator::new();
        let mut targets = vec![
            Target::new(Modality::Radar, [0.0; 3], 0.0, 0.5),
            Target::new(Modality::Thermal, [0.0; 3], 0.0, 0.5),
        ];
        coordinator.assign_ids(&mut targets);
        assert_eq!(targets[0].id, 1);
        assert_eq!(targets[1].id, 2);
        assert_eq!(coordinator.next_id(), 3);
    }

    #[test]
    fn concurrent_allocation_never_repeats() {
        let coordinator = Arc::new(Coordinator::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let coordinator = Arc::clone(&coordinator);
                thread::spawn(move || (0..250).map(|_| coordinator.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn result_list_append_and_clear() {
        let coordinator = Coordinator::new();
        coordinator.append(&[Target::new(Modality::Radar, [0.0; 3], 0.0, 0.5)]);
        coordinator.push(Target::new(Modality::Optical, [0.0; 3], 0.0, 0.5));
        assert_eq!(coordinator.len(), 2);
        coordinator.clear();
        assert!(coordinator.is_empty());
    }
}
