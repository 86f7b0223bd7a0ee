//! Published index snapshots
//!
//! Readers load an `Arc<Snapshot>` without locking and keep it as long as
//! they like. A rebuild publishes a complete replacement with one atomic
//! pointer swap, so a reader sees either the old snapshot or the new one.
//!
//! @module index/store

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::ops::Deref;
use std::sync::Arc;

use super::model::{Index, Point, Source};

/// An immutable, versioned index
#[derive(Debug, Default)]
pub struct Snapshot {
    /// 0 for the initial empty snapshot, then one per publication
    pub generation: u64,
    pub published_at: Option<DateTime<Utc>>,
    pub index: Index,
}

impl Deref for Snapshot {
    type Target = Index;

    fn deref(&self) -> &Index {
        &self.index
    }
}

/// Holder of the current snapshot
#[derive(Debug, Default)]
pub struct IndexStore {
    current: ArcSwap<Snapshot>,
    /// Serializes publishers so generations stay unique
    publish_lock: Mutex<()>,
}

impl IndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the current snapshot
    #[inline]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Replace the current snapshot; returns the new generation
    pub fn publish(&self, index: Index) -> u64 {
        let _guard = self.publish_lock.lock();
        let generation = self.current.load().generation + 1;
        self.current.store(Arc::new(Snapshot {
            generation,
            published_at: Some(Utc::now()),
            index,
        }));
        generation
    }

    pub fn lookup_source(&self, id: &str) -> Option<Source> {
        self.current.load().source(id).cloned()
    }

    pub fn lookup_point(&self, source_id: &str, addr: &str) -> Option<Point> {
        self.current.load().point(source_id, addr).cloned()
    }

    pub fn lookup_point_by_id(&self, id: &str) -> Option<Point> {
        self.current
            .load()
            .point_by_id(id)
            .map(|(_, point)| point.clone())
    }

    pub fn source_count(&self) -> usize {
        self.current.load().num_sources()
    }

    pub fn point_count(&self) -> usize {
        self.current.load().num_points()
    }

    pub fn generation(&self) -> u64 {
        self.current.load().generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::PointKind;

    fn index_with(source_id: &str, points: &[&str]) -> Index {
        let mut index = Index::new();
        index.add_source(Source::new(
            source_id.to_string(),
            source_id.to_string(),
            format!("/{}", source_id),
            format!("slot:/{}", source_id),
            format!("h:{}", source_id),
        ));
        for (i, addr) in points.iter().enumerate() {
            index
                .add_point(
                    source_id,
                    Point {
                        id: format!("pt:{}{}", source_id, i),
                        name: addr.to_string(),
                        addr: addr.to_string(),
                        kind: PointKind::AnalogInput,
                        enums: None,
                        unit: None,
                        node: format!("h:{}{}", source_id, i),
                    },
                )
                .unwrap();
        }
        index
    }

    #[test]
    fn test_initial_snapshot_is_empty() {
        let store = IndexStore::new();
        assert_eq!(store.generation(), 0);
        assert_eq!(store.source_count(), 0);
        assert!(store.snapshot().published_at.is_none());
    }

    #[test]
    fn test_publish_bumps_generation() {
        let store = IndexStore::new();
        assert_eq!(store.publish(index_with("a", &["ai.x"])), 1);
        assert_eq!(store.publish(index_with("b", &["ai.y", "ai.z"])), 2);
        assert_eq!(store.generation(), 2);
        assert_eq!(store.point_count(), 2);
        assert!(store.lookup_source("a").is_none());
        assert_eq!(store.lookup_point("b", "ai.z").unwrap().id, "pt:b1");
        assert_eq!(store.lookup_point_by_id("pt:b0").unwrap().addr, "ai.y");
    }

    #[test]
    fn test_pinned_snapshot_survives_publish() {
        let store = IndexStore::new();
        store.publish(index_with("old", &["ai.a", "ai.b"]));

        let pinned = store.snapshot();
        store.publish(index_with("new", &["ai.c"]));

        // The pinned reader still sees the complete old snapshot
        assert_eq!(pinned.generation, 1);
        assert_eq!(pinned.num_points(), 2);
        assert!(pinned.source("old").is_some());
        assert!(pinned.source("new").is_none());

        // A fresh load sees the new one
        let fresh = store.snapshot();
        assert_eq!(fresh.generation, 2);
        assert!(fresh.source("new").is_some());
    }

    #[test]
    fn test_concurrent_readers_see_whole_snapshots() {
        let store = Arc::new(IndexStore::new());
        store.publish(index_with("s", &["ai.0"]));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        let snap = store.snapshot();
                        // Each generation n publishes exactly n points
                        assert_eq!(snap.num_points() as u64, snap.generation);
                    }
                })
            })
            .collect();

        for n in 2..=50u64 {
            let addrs: Vec<String> = (0..n).map(|i| format!("ai.{}", i)).collect();
            let refs: Vec<&str> = addrs.iter().map(String::as_str).collect();
            store.publish(index_with("s", &refs));
        }

        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(store.generation(), 50);
    }
}
