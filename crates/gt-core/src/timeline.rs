//! Per-entity ground-truth timelines with point-in-time lookup.
//!
//! Recording appends in O(1) and marks the entity dirty; the first lookup
//! after a batch of inserts sorts that entity's list once, then every lookup
//! binary-searches in O(log n). The sort cost amortizes across however many
//! records arrived between lookups.

use std::collections::HashMap;

use crate::types::{GroundTruth, GroundTruthEvent, ValidationError, ensure_finite};

/// Sort state for one entity's event list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortState {
    /// Events were appended since the last sort.
    Dirty,
    /// Events are ordered by (timestamp, insertion sequence).
    Sorted,
}

/// One entity's event list plus its sort state.
#[derive(Debug)]
struct EntityTimeline {
    events: Vec<Entry>,
    state: SortState,
}

#[derive(Debug, Clone)]
struct Entry {
    event: GroundTruthEvent,
    /// Insertion sequence; breaks ties between events at the same timestamp
    /// so the last-inserted event wins.
    seq: u64,
}

impl EntityTimeline {
    fn ensure_sorted(&mut self) {
        if self.state == SortState::Dirty {
            self.events.sort_by(|a, b| {
                a.event
                    .timestamp_s
                    .total_cmp(&b.event.timestamp_s)
                    .then_with(|| a.seq.cmp(&b.seq))
            });
            self.state = SortState::Sorted;
        }
    }
}

/// Append-only ground-truth event sequences, one per entity.
#[derive(Debug, Default)]
pub struct Timeline {
    entities: HashMap<String, EntityTimeline>,
    next_seq: u64,
}

impl Timeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a ground-truth event for an entity.
    ///
    /// Appending never sorts; the entity is marked dirty and re-sorted on its
    /// next lookup. `category: None` records that the entity was nominal.
    pub fn record(
        &mut self,
        entity_id: &str,
        timestamp_s: f64,
        category: Option<&str>,
        confidence: f64,
    ) -> Result<(), ValidationError> {
        if entity_id.is_empty() {
            return Err(ValidationError::Empty { field: "entity_id" });
        }
        ensure_finite("timestamp_s", timestamp_s)?;
        ensure_finite("confidence", confidence)?;

        let seq = self.next_seq;
        self.next_seq += 1;

        let entity = self
            .entities
            .entry(entity_id.to_string())
            .or_insert_with(|| EntityTimeline {
                events: Vec::new(),
                state: SortState::Sorted,
            });
        entity.events.push(Entry {
            event: GroundTruthEvent {
                timestamp_s,
                entity_id: entity_id.to_string(),
                expected_category: category.map(String::from),
                confidence,
            },
            seq,
        });
        entity.state = SortState::Dirty;
        Ok(())
    }

    /// Returns the ground truth in effect for `entity_id` at `timestamp_s`.
    ///
    /// The effective event is the one with the largest timestamp at or before
    /// the query time; ties resolve to the most recently inserted event. An
    /// entity with no events at or before the query time has no known ground
    /// truth and yields [`GroundTruth::Unknown`].
    ///
    /// Takes `&mut self` because a dirty entity is sorted on first lookup.
    pub fn lookup(&mut self, entity_id: &str, timestamp_s: f64) -> GroundTruth {
        let Some(entity) = self.entities.get_mut(entity_id) else {
            return GroundTruth::Unknown;
        };
        entity.ensure_sorted();

        let idx = entity
            .events
            .partition_point(|e| e.event.timestamp_s <= timestamp_s);
        if idx == 0 {
            return GroundTruth::Unknown;
        }

        match &entity.events[idx - 1].event.expected_category {
            None => GroundTruth::Nominal,
            Some(category) => GroundTruth::Category(category.clone()),
        }
    }

    /// Total number of recorded events across all entities.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.entities.values().map(|e| e.events.len()).sum()
    }

    /// Removes every event for every entity.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.next_seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str) -> GroundTruth {
        GroundTruth::Category(name.to_string())
    }

    #[test]
    fn unknown_entity_yields_unknown() {
        let mut timeline = Timeline::new();
        assert_eq!(timeline.lookup("SAT-9", 100.0), GroundTruth::Unknown);
    }

    #[test]
    fn query_before_first_event_yields_unknown() {
        let mut timeline = Timeline::new();
        timeline.record("SAT-1", 10.0, Some("thermal"), 1.0).unwrap();
        assert_eq!(timeline.lookup("SAT-1", 9.9), GroundTruth::Unknown);
    }

    #[test]
    fn nominal_event_is_distinct_from_no_history() {
        let mut timeline = Timeline::new();
        timeline.record("SAT-1", 0.0, None, 1.0).unwrap();
        assert_eq!(timeline.lookup("SAT-1", 5.0), GroundTruth::Nominal);
        assert_eq!(timeline.lookup("SAT-2", 5.0), GroundTruth::Unknown);
    }

    #[test]
    fn lookup_picks_latest_event_at_or_before_query() {
        let mut timeline = Timeline::new();
        timeline.record("SAT-1", 0.0, None, 1.0).unwrap();
        timeline.record("SAT-1", 10.0, Some("thermal"), 1.0).unwrap();
        timeline.record("SAT-1", 20.0, Some("power"), 1.0).unwrap();

        assert_eq!(timeline.lookup("SAT-1", 5.0), GroundTruth::Nominal);
        assert_eq!(timeline.lookup("SAT-1", 10.0), category("thermal"));
        assert_eq!(timeline.lookup("SAT-1", 15.0), category("thermal"));
        assert_eq!(timeline.lookup("SAT-1", 500.0), category("power"));
    }

    #[test]
    fn lookup_is_independent_of_insertion_order() {
        let forward = [(0.0, "a"), (10.0, "b"), (20.0, "c")];

        let mut sorted = Timeline::new();
        for (ts, cat) in forward {
            sorted.record("SAT-1", ts, Some(cat), 1.0).unwrap();
        }

        let mut shuffled = Timeline::new();
        for (ts, cat) in [(20.0, "c"), (0.0, "a"), (10.0, "b")] {
            shuffled.record("SAT-1", ts, Some(cat), 1.0).unwrap();
        }

        for t in [0.0, 5.0, 10.0, 15.0, 20.0, 25.0] {
            assert_eq!(sorted.lookup("SAT-1", t), shuffled.lookup("SAT-1", t));
        }
    }

    #[test]
    fn equal_timestamps_resolve_to_last_inserted() {
        let mut timeline = Timeline::new();
        timeline.record("SAT-1", 10.0, Some("first"), 1.0).unwrap();
        timeline.record("SAT-1", 10.0, Some("second"), 1.0).unwrap();
        assert_eq!(timeline.lookup("SAT-1", 10.0), category("second"));

        // Still holds when a sort already happened in between.
        assert_eq!(timeline.lookup("SAT-1", 11.0), category("second"));
        timeline.record("SAT-1", 10.0, Some("third"), 1.0).unwrap();
        assert_eq!(timeline.lookup("SAT-1", 10.0), category("third"));
    }

    #[test]
    fn records_interleaved_with_lookups_stay_consistent() {
        let mut timeline = Timeline::new();
        timeline.record("SAT-1", 0.0, Some("a"), 1.0).unwrap();
        assert_eq!(timeline.lookup("SAT-1", 0.0), category("a"));

        timeline.record("SAT-1", 5.0, Some("b"), 1.0).unwrap();
        timeline.record("SAT-1", 2.0, Some("c"), 1.0).unwrap();
        assert_eq!(timeline.lookup("SAT-1", 3.0), category("c"));
        assert_eq!(timeline.lookup("SAT-1", 6.0), category("b"));
    }

    #[test]
    fn entities_do_not_interfere() {
        let mut timeline = Timeline::new();
        timeline.record("SAT-1", 0.0, Some("thermal"), 1.0).unwrap();
        timeline.record("SAT-2", 0.0, Some("power"), 1.0).unwrap();

        assert_eq!(timeline.lookup("SAT-1", 1.0), category("thermal"));
        assert_eq!(timeline.lookup("SAT-2", 1.0), category("power"));
    }

    #[test]
    fn record_rejects_invalid_input_without_storing() {
        let mut timeline = Timeline::new();
        assert_eq!(
            timeline.record("", 0.0, None, 1.0),
            Err(ValidationError::Empty { field: "entity_id" })
        );
        assert!(timeline.record("SAT-1", f64::NAN, None, 1.0).is_err());
        assert!(timeline.record("SAT-1", 0.0, None, f64::INFINITY).is_err());
        assert_eq!(timeline.event_count(), 0);
    }

    #[test]
    fn clear_removes_all_events() {
        let mut timeline = Timeline::new();
        timeline.record("SAT-1", 0.0, Some("thermal"), 1.0).unwrap();
        timeline.record("SAT-2", 1.0, None, 1.0).unwrap();
        assert_eq!(timeline.event_count(), 2);

        timeline.clear();
        assert_eq!(timeline.event_count(), 0);
        assert_eq!(timeline.lookup("SAT-1", 100.0), GroundTruth::Unknown);
    }
}
