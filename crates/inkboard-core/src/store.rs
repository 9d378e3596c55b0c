//! Ordered, keyed collection of committed shapes.

use crate::shapes::{Shape, ShapeId, ShapeRecord};
use kurbo::Point;
use std::collections::HashMap;
use thiserror::Error;

/// Errors for whole-document import.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of a batch import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Committed shapes keyed by id, in insertion order (back to front).
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    /// All shapes, keyed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Insertion order of shapes (back to front).
    order: Vec<ShapeId>,
}

impl ShapeStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape. An id collision replaces the previous shape in place.
    pub fn add(&mut self, shape: Shape) {
        let id = shape.id().to_string();
        if self.shapes.insert(id.clone(), shape).is_none() {
            self.order.push(id);
        }
    }

    /// Swap in an edited copy of an existing shape, keeping its position in
    /// the order. Returns `false` (and stores nothing) if the id is unknown.
    pub fn replace(&mut self, shape: Shape) -> bool {
        match self.shapes.get_mut(shape.id()) {
            Some(slot) => {
                *slot = shape;
                true
            }
            None => false,
        }
    }

    /// Remove a shape. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Shape> {
        let removed = self.shapes.remove(id)?;
        self.order.retain(|shape_id| shape_id != id);
        Some(removed)
    }

    pub fn get(&self, id: &str) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.shapes.contains_key(id)
    }

    /// Shapes in insertion order (back to front).
    pub fn list(&self) -> impl DoubleEndedIterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Remove every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Topmost shape hit at `point`, scanning front to back.
    pub fn shape_at(&self, point: Point, tolerance: f64) -> Option<&Shape> {
        self.list().rev().find(|s| s.hit_test(point, tolerance))
    }

    /// Structural form of every shape, in insertion order.
    pub fn to_records(&self) -> Vec<ShapeRecord> {
        self.list().map(Shape::to_record).collect()
    }

    /// Add every valid record, logging and skipping the rest.
    pub fn import_records(&mut self, records: &[ShapeRecord]) -> ImportReport {
        let mut report = ImportReport::default();
        for record in records {
            match Shape::from_record(record) {
                Ok(shape) => {
                    self.add(shape);
                    report.imported += 1;
                }
                Err(e) => {
                    log::warn!("Skipping shape record {}: {}", record.id, e);
                    report.skipped += 1;
                }
            }
        }
        report
    }

    /// Serialize the store as a JSON array of records.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_records())
    }

    /// Add the records of a JSON array. Only a malformed document is an
    /// error; individual bad records are skipped.
    pub fn import_json(&mut self, json: &str) -> Result<ImportReport, ImportError> {
        let records: Vec<ShapeRecord> = serde_json::from_str(json)?;
        Ok(self.import_records(&records))
    }
}
