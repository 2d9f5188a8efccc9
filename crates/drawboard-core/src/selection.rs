//! Selection set, resize handles and move/resize transforms.

use crate::config::BoardConfig;
use crate::geometry::{is_resizable, point_in_box};
use crate::scene::Scene;
use crate::shapes::DrawingObject;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Indices of selected objects in the current scene.
///
/// Order is kept (the first entry anchors drags) but duplicates are not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: Vec<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with `indices`.
    pub fn replace(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.indices.clear();
        for index in indices {
            if !self.indices.contains(&index) {
                self.indices.push(index);
            }
        }
    }

    /// Add `index` if absent, remove it otherwise.
    pub fn toggle(&mut self, index: usize) {
        if let Some(pos) = self.indices.iter().position(|&i| i == index) {
            self.indices.remove(pos);
        } else {
            self.indices.push(index);
        }
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// The lead selected object.
    pub fn first(&self) -> Option<usize> {
        self.indices.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Select every index of a scene with `len` objects.
    pub fn set_all(&mut self, len: usize) {
        self.indices = (0..len).collect();
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }
}

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// This corner of `rect`.
    pub fn of(self, rect: Rect) -> Point {
        match self {
            Corner::TopLeft => Point::new(rect.x0, rect.y0),
            Corner::TopRight => Point::new(rect.x1, rect.y0),
            Corner::BottomLeft => Point::new(rect.x0, rect.y1),
            Corner::BottomRight => Point::new(rect.x1, rect.y1),
        }
    }

    /// The diagonally opposite corner.
    pub fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }
}

/// A square resize handle at one corner of the selection overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub corner: Corner,
    /// Handle square in document coordinates.
    pub rect: Rect,
}

impl Handle {
    /// Whether `point` is on the handle, allowing `slop` extra on every side.
    pub fn hit_test(&self, point: Point, slop: f64) -> bool {
        point_in_box(point, self.rect.inflate(slop, slop))
    }
}

/// The four corner handles for a selection with `bounds`.
///
/// Handles are `size × size` squares centred on the corners of `bounds`
/// grown by `margin`.
pub fn selection_handles(bounds: Rect, margin: f64, size: f64) -> [Handle; 4] {
    let outer = bounds.inflate(margin, margin);
    let half = size / 2.0;
    Corner::ALL.map(|corner| {
        let center = corner.of(outer);
        Handle {
            corner,
            rect: Rect::new(center.x - half, center.y - half, center.x + half, center.y + half),
        }
    })
}

/// Corner handle under `point`, if any. Degenerate bounds have no handles.
pub fn hit_test_handles(bounds: Rect, point: Point, config: &BoardConfig) -> Option<Corner> {
    if !is_resizable(bounds) {
        return None;
    }
    selection_handles(bounds, config.handle_margin, config.handle_size)
        .into_iter()
        .find(|handle| handle.hit_test(point, config.handle_slop))
        .map(|handle| handle.corner)
}

/// New selection box when `corner` is dragged by `delta`.
///
/// The opposite corner stays fixed; the dragged corner cannot cross it and
/// both sides stay at least `min_extent` long.
///
/// `delta` is the pointer's offset from where the handle was pressed, not
/// from the corner itself. Handles sit outside the bounds by the overlay
/// margin, so snapping the corner to the pointer would jump the box by that
/// margin on the first move.
pub fn resize_box(original: Rect, corner: Corner, delta: Vec2, min_extent: f64) -> Rect {
    let anchor = corner.opposite().of(original);
    let free = corner.of(original) + delta;

    let x = match corner {
        Corner::TopLeft | Corner::BottomLeft => free.x.min(anchor.x - min_extent),
        Corner::TopRight | Corner::BottomRight => free.x.max(anchor.x + min_extent),
    };
    let y = match corner {
        Corner::TopLeft | Corner::TopRight => free.y.min(anchor.y - min_extent),
        Corner::BottomLeft | Corner::BottomRight => free.y.max(anchor.y + min_extent),
    };

    Rect::from_points(anchor, Point::new(x, y))
}

/// Per-axis scale from `original` to `resized`, each clamped to
/// `[min_scale, max_scale]`.
pub fn resize_scale(original: Rect, resized: Rect, min_scale: f64, max_scale: f64) -> Vec2 {
    Vec2::new(
        (resized.width() / original.width()).clamp(min_scale, max_scale),
        (resized.height() / original.height()).clamp(min_scale, max_scale),
    )
}

/// Scale an object about `anchor`.
///
/// Every point maps to `anchor + (point - anchor) * scale`. Text keeps its
/// content; its font size scales by the mean of both factors within
/// `font_range`.
pub fn scale_object_about(
    object: &DrawingObject,
    anchor: Point,
    scale: Vec2,
    font_range: (f64, f64),
) -> DrawingObject {
    let mut scaled = object.clone();
    scaled.map_points(|p| {
        Point::new(
            anchor.x + (p.x - anchor.x) * scale.x,
            anchor.y + (p.y - anchor.y) * scale.y,
        )
    });
    if let DrawingObject::Text(text) = &mut scaled {
        let factor = (scale.x + scale.y) / 2.0;
        text.font_size = (text.font_size * factor).clamp(font_range.0, font_range.1);
    }
    scaled
}

/// Copy of `object` moved by `delta`.
pub fn translate_object(object: &DrawingObject, delta: Vec2) -> DrawingObject {
    let mut moved = object.clone();
    moved.translate(delta);
    moved
}

/// State of an in-progress move.
///
/// Geometry is always recomputed from the originals captured at press time,
/// so the whole selection moves rigidly.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Pointer minus the lead object's reference point, at press time.
    pub offset: Vec2,
    /// Reference point of the lead object at press time.
    pub reference: Point,
    /// Pre-drag copies of every selected object.
    pub originals: Vec<(usize, DrawingObject)>,
    /// Whether the pointer moved since the press.
    pub moved: bool,
}

impl DragSession {
    /// Capture the selected objects of `scene`, anchored on the `lead` object
    /// under the pointer. `None` if nothing valid is selected.
    pub fn begin(scene: &Scene, selection: &Selection, lead: usize, pointer: Point) -> Option<Self> {
        let reference = scene.get(lead)?.reference_point();
        let originals = capture(scene, selection);
        if originals.is_empty() {
            return None;
        }
        Some(Self {
            offset: pointer - reference,
            reference,
            originals,
            moved: false,
        })
    }

    /// Translation to apply for the current pointer.
    pub fn delta(&self, pointer: Point) -> Vec2 {
        pointer - self.reference - self.offset
    }

    /// Move every captured object to follow `pointer`.
    pub fn apply(&mut self, scene: &mut Scene, pointer: Point) {
        let delta = self.delta(pointer);
        self.moved |= delta != Vec2::ZERO;
        for (index, original) in &self.originals {
            scene.update_at(*index, translate_object(original, delta));
        }
    }

    /// Put every captured object back.
    pub fn restore(&self, scene: &mut Scene) {
        restore(scene, &self.originals);
    }
}

/// State of an in-progress corner resize.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub corner: Corner,
    /// Pointer position at press time.
    pub press: Point,
    /// Selection bounds at press time.
    pub original_bounds: Rect,
    /// Pre-resize copies of every selected object.
    pub originals: Vec<(usize, DrawingObject)>,
    /// Whether any resize was applied since the press.
    pub resized: bool,
}

impl ResizeSession {
    pub fn begin(
        scene: &Scene,
        selection: &Selection,
        corner: Corner,
        press: Point,
        original_bounds: Rect,
    ) -> Self {
        Self {
            corner,
            press,
            original_bounds,
            originals: capture(scene, selection),
            resized: false,
        }
    }

    /// Fixed corner of the resize.
    pub fn anchor(&self) -> Point {
        self.corner.opposite().of(self.original_bounds)
    }

    /// Clamped scale for the current pointer.
    pub fn scale_for(&self, pointer: Point, config: &BoardConfig) -> Vec2 {
        let resized = resize_box(
            self.original_bounds,
            self.corner,
            pointer - self.press,
            config.min_resize_extent,
        );
        resize_scale(self.original_bounds, resized, config.min_scale, config.max_scale)
    }

    /// Rescale every captured object for the current pointer.
    pub fn apply(&mut self, scene: &mut Scene, pointer: Point, config: &BoardConfig) {
        if pointer == self.press && !self.resized {
            return;
        }
        let scale = self.scale_for(pointer, config);
        let anchor = self.anchor();
        let font_range = (config.min_font_size, config.max_font_size);
        for (index, original) in &self.originals {
            scene.update_at(*index, scale_object_about(original, anchor, scale, font_range));
        }
        self.resized = true;
    }

    pub fn restore(&self, scene: &mut Scene) {
        restore(scene, &self.originals);
    }
}

fn capture(scene: &Scene, selection: &Selection) -> Vec<(usize, DrawingObject)> {
    selection
        .iter()
        .filter_map(|index| scene.get(index).map(|object| (index, object.clone())))
        .collect()
}

fn restore(scene: &mut Scene, originals: &[(usize, DrawingObject)]) {
    for (index, original) in originals {
        scene.update_at(*index, original.clone());
    }
}
