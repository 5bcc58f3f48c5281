use crate::model::Target;
use crate::prelude::EvictionPolicy;
use crate::telemetry::log::LogManager;
use std::collections::{BTreeMap, HashMap};

struct HistoryEntry {
    snapshot: Target,
    stamp: u64,
}

/// Per-id position history used to derive velocity between scan cycles.
pub struct Tracker {
    history: HashMap<u64, HistoryEntry>,
    /// Update stamp -> id, oldest first.
    recency: BTreeMap<u64, u64>,
    next_stamp: u64,
    capacity: usize,
    policy: EvictionPolicy,
    logger: LogManager,
}

impl Tracker {
    pub fn new(capacity: usize, policy: EvictionPolicy) -> Self {
        Self {
            history: HashMap::new(),
            recency: BTreeMap::new(),
            next_stamp: 0,
            capacity: capacity.max(1),
            policy,
            logger: LogManager::new(),
        }
    }

    /// Updates velocities of targets seen before and records every target's
    /// current snapshot. A non-positive `dt_seconds` leaves velocities as they
    /// are. Returns how many velocities were recomputed.
    pub fn track(&mut self, targets: &mut [Target], dt_seconds: f64) -> usize {
        let mut updated = 0;
        for target in targets.iter_mut() {
            if let Some(previous) = self.history.get(&target.id) {
                if dt_seconds > 0.0 {
                    let distance = target.distance_to(&previous.snapshot);
                    target.set_velocity(distance / dt_seconds);
                    updated += 1;
                }
            }
            target.touch();
            self.remember(target.clone());
        }

        if self.history.len() > self.capacity {
            self.evict();
        }
        self.logger.debug(&format!(
            "tracker updated {} velocities, history holds {}",
            updated,
            self.history.len()
        ));
        updated
    }

    fn remember(&mut self, snapshot: Target) {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        let id = snapshot.id;
        if let Some(old) = self.history.insert(id, HistoryEntry { snapshot, stamp }) {
            self.recency.remove(&old.stamp);
        }
        self.recency.insert(stamp, id);
    }

    fn evict(&mut self) {
        match self.policy {
            EvictionPolicy::BulkClear => {
                self.logger.debug(&format!(
                    "history exceeded {} entries, clearing {}",
                    self.capacity,
                    self.history.len()
                ));
                self.clear();
            }
            EvictionPolicy::LeastRecentlyUsed => {
                let mut evicted = 0;
                while self.history.len() > self.capacity {
                    let Some((_, id)) = self.recency.pop_first() else {
                        break;
                    };
                    self.history.remove(&id);
                    evicted += 1;
                }
                self.logger
                    .debug(&format!("history evicted {} stale entries", evicted));
            }
        }
    }

    pub fn knows(&self, id: u64) -> bool {
        self.history.contains_key(&id)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.recency.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Modality, ThreatLevel};

    fn numbered(id: u64, position: [f64; 3]) -> Target {
        let mut target = Target::new(Modality::Radar, position, 0.0, 0.4);
        target.id = id;
        target
    }

    #[test]
    fn velocity_derived_from_displacement() {
        let mut tracker = Tracker::new(10, EvictionPolicy::LeastRecentlyUsed);
        let mut first = vec![numbered(1, [0.0, 0.0, 0.0])];
        assert_eq!(tracker.track(&mut first, 1.0), 0);

        let mut second = vec![numbered(1, [300.0, 400.0, 0.0])];
        assert_eq!(tracker.track(&mut second, 2.0), 1);
        assert_eq!(second[0].velocity, 250.0);
        assert_eq!(second[0].threat_level, ThreatLevel::Critical);
    }

    #[test]
    fn non_positive_dt_leaves_velocity() {
        let mut tracker = Tracker::new(10, EvictionPolicy::LeastRecentlyUsed);
        tracker.track(&mut [numbered(1, [0.0; 3])], 1.0);

        let mut moved = vec![numbered(1, [10.0, 0.0, 0.0])];
        moved[0].set_velocity(3.0);
        assert_eq!(tracker.track(&mut moved, 0.0), 0);
        assert_eq!(moved[0].velocity, 3.0);
        assert_eq!(tracker.track(&mut moved, -1.0), 0);
        assert_eq!(moved[0].velocity, 3.0);
    }

    #[test]
    fn unknown_ids_only_populate_history() {
        let mut tracker = Tracker::new(10, EvictionPolicy::LeastRecentlyUsed);
        let mut targets = vec![numbered(4, [1.0; 3]), numbered(5, [2.0; 3])];
        tracker.track(&mut targets, 1.0);
        assert!(tracker.knows(4));
        assert!(tracker.knows(5));
        assert_eq!(targets[0].velocity, 0.0);
    }

    #[test]
    fn bulk_clear_forgets_everything_past_capacity() {
        let mut tracker = Tracker::new(3, EvictionPolicy::BulkClear);
        let mut targets: Vec<Target> = (1..=3).map(|id| numbered(id, [0.0; 3])).collect();
        tracker.track(&mut targets, 1.0);
        assert_eq!(tracker.history_len(), 3);

        tracker.track(&mut [numbered(4, [0.0; 3])], 1.0);
        assert_eq!(tracker.history_len(), 0);
    }

    #[test]
    fn lru_evicts_the_stalest_entries() {
        let mut tracker = Tracker::new(3, EvictionPolicy::LeastRecentlyUsed);
        let mut targets: Vec<Target> = (1..=3).map(|id| numbered(id, [0.0; 3])).collect();
        tracker.track(&mut targets, 1.0);
        // Refresh id 1 so id 2 becomes the oldest entry.
        tracker.track(&mut [numbered(1, [0.0; 3])], 1.0);
        tracker.track(&mut [numbered(4, [0.0; 3])], 1.0);

        assert_eq!(tracker.history_len(), 3);
        assert!(tracker.knows(1));
        assert!(!tracker.knows(2));
        assert!(tracker.knows(3));
        assert!(tracker.knows(4));
    }
}
