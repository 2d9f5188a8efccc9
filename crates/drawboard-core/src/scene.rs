//! The ordered list of committed drawing objects.

use crate::error::BoardResult;
use crate::geometry::{boxes_intersect, point_in_box};
use crate::shapes::{DrawingObject, TextMeasure};
use kurbo::{Point, Rect};
use std::sync::Arc;

/// Committed objects in paint order: later entries are painted on top and
/// hit-tested first.
///
/// Clones share the underlying allocation. The first mutation after a clone
/// copies the list, so history snapshots stay cheap and never alias the live
/// scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    objects: Arc<Vec<DrawingObject>>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene from existing objects.
    pub fn from_objects(objects: Vec<DrawingObject>) -> Self {
        Self {
            objects: Arc::new(objects),
        }
    }

    /// Append an object on top of everything else.
    pub fn append_object(&mut self, object: DrawingObject) {
        Arc::make_mut(&mut self.objects).push(object);
    }

    /// Replace the whole list.
    pub fn replace_all(&mut self, objects: Vec<DrawingObject>) {
        self.objects = Arc::new(objects);
    }

    /// Remove every object whose index is in `indices`.
    ///
    /// Out-of-range indices are ignored. Returns `true` if anything was removed.
    pub fn remove_at(&mut self, indices: &[usize]) -> bool {
        if !indices.iter().any(|&i| i < self.objects.len()) {
            return false;
        }
        let objects = Arc::make_mut(&mut self.objects);
        let mut index = 0;
        objects.retain(|_| {
            let keep = !indices.contains(&index);
            index += 1;
            keep
        });
        true
    }

    /// Overwrite the object at `index`.
    ///
    /// Rejects out-of-range indices and replacements of a different kind; the
    /// scene is untouched in both cases.
    pub fn update_at(&mut self, index: usize, object: DrawingObject) -> bool {
        match self.objects.get(index) {
            Some(existing) if existing.kind() == object.kind() => {
                Arc::make_mut(&mut self.objects)[index] = object;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&DrawingObject> {
        self.objects.get(index)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate in paint order (bottom to top).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DrawingObject> {
        self.objects.iter()
    }

    pub fn objects(&self) -> &[DrawingObject] {
        &self.objects
    }

    /// A snapshot sharing storage with this scene.
    pub fn snapshot(&self) -> Scene {
        self.clone()
    }

    /// Topmost object whose bounds, inflated by `tolerance`, contain `point`.
    pub fn hit_test(&self, point: Point, tolerance: f64, measure: &dyn TextMeasure) -> Option<usize> {
        self.objects
            .iter()
            .enumerate()
            .rev()
            .find(|(_, object)| {
                point_in_box(point, object.bounds(measure).inflate(tolerance, tolerance))
            })
            .map(|(index, _)| index)
    }

    /// Indices of every object whose bounds overlap `rect` at all.
    pub fn indices_in_rect(&self, rect: Rect, measure: &dyn TextMeasure) -> Vec<usize> {
        let rect = rect.abs();
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, object)| boxes_intersect(object.bounds(measure), rect))
            .map(|(index, _)| index)
            .collect()
    }

    /// Serialize the objects to JSON.
    pub fn to_json(&self) -> BoardResult<String> {
        Ok(serde_json::to_string(self.objects.as_slice())?)
    }

    /// Deserialize a scene from JSON produced by [`Scene::to_json`].
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let objects: Vec<DrawingObject> = serde_json::from_str(json)?;
        Ok(Self::from_objects(objects))
    }

    /// Whether two scenes share the same allocation.
    pub fn shares_storage_with(&self, other: &Scene) -> bool {
        Arc::ptr_eq(&self.objects, &other.objects)
    }
}

impl FromIterator<DrawingObject> for Scene {
    fn from_iter<I: IntoIterator<Item = DrawingObject>>(iter: I) -> Self {
        Self::from_objects(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ApproxTextMeasure, Figure, FigureKind, SerializableColor, Stroke, StrokeTool};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> DrawingObject {
        Figure::between(
            FigureKind::Rectangle,
            Point::new(x0, y0),
            Point::new(x1, y1),
            SerializableColor::black(),
            2.0,
        )
        .into()
    }

    fn dot(x: f64, y: f64) -> DrawingObject {
        Stroke::new(Point::new(x, y), SerializableColor::black(), 2.0, StrokeTool::Pen).into()
    }

    #[test]
    fn test_append_and_get() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());
        scene.append_object(rect(0.0, 0.0, 10.0, 10.0));
        scene.append_object(dot(5.0, 5.0));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(1), Some(&dot(5.0, 5.0)));
        assert!(scene.get(2).is_none());
    }

    #[test]
    fn test_snapshot_isolated_from_mutation() {
        let mut scene = Scene::new();
        scene.append_object(dot(1.0, 1.0));
        let snapshot = scene.snapshot();
        assert!(scene.shares_storage_with(&snapshot));

        scene.append_object(dot(2.0, 2.0));
        assert!(!scene.shares_storage_with(&snapshot));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_remove_at() {
        let mut scene: Scene = (0..4).map(|i| dot(i as f64, 0.0)).collect();
        assert!(scene.remove_at(&[1, 3, 99]));
        assert_eq!(scene.objects(), &[dot(0.0, 0.0), dot(2.0, 0.0)]);
        assert!(!scene.remove_at(&[10]));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_update_at_rejects_kind_change() {
        let mut scene: Scene = [rect(0.0, 0.0, 1.0, 1.0)].into_iter().collect();
        assert!(!scene.update_at(0, dot(0.0, 0.0)));
        assert!(!scene.update_at(5, rect(0.0, 0.0, 2.0, 2.0)));
        assert!(scene.update_at(0, rect(0.0, 0.0, 2.0, 2.0)));
        assert_eq!(scene.get(0), Some(&rect(0.0, 0.0, 2.0, 2.0)));
    }

    #[test]
    fn test_hit_test_topmost_first() {
        let scene: Scene = [rect(0.0, 0.0, 100.0, 100.0), rect(40.0, 40.0, 60.0, 60.0)]
            .into_iter()
            .collect();
        let measure = ApproxTextMeasure;
        assert_eq!(scene.hit_test(Point::new(50.0, 50.0), 0.0, &measure), Some(1));
        assert_eq!(scene.hit_test(Point::new(10.0, 10.0), 0.0, &measure), Some(0));
        assert_eq!(scene.hit_test(Point::new(103.0, 50.0), 5.0, &measure), Some(0));
        assert_eq!(scene.hit_test(Point::new(200.0, 200.0), 5.0, &measure), None);
    }

    #[test]
    fn test_indices_in_rect_any_overlap() {
        let scene: Scene = [
            rect(0.0, 0.0, 10.0, 10.0),
            rect(50.0, 50.0, 60.0, 60.0),
            dot(8.0, 30.0),
        ]
        .into_iter()
        .collect();
        let measure = ApproxTextMeasure;
        // Dragged from bottom-right to top-left.
        let hits = scene.indices_in_rect(Rect::new(12.0, 35.0, 5.0, 5.0), &measure);
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn test_json_roundtrip() {
        let scene: Scene = [rect(0.0, 0.0, 10.0, 10.0), dot(3.0, 4.0)].into_iter().collect();
        let json = scene.to_json().unwrap();
        let back = Scene::from_json(&json).unwrap();
        assert_eq!(back, scene);
        assert!(Scene::from_json("{").is_err());
    }
}
