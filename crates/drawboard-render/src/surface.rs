//! Drawing surface abstraction.

use kurbo::{Affine, BezPath, Point, Size, Stroke};
use peniko::Color;

/// A 2D drawing surface with canvas-style state.
///
/// `save`/`restore` push and pop the transform and global alpha. Paths are
/// given in the coordinate space set by the current transform.
pub trait Surface {
    /// Surface size in pixels.
    fn size(&self) -> Size;

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    /// Paint `color` over the whole surface, ignoring the transform.
    fn fill_all(&mut self, color: Color);

    fn save(&mut self);

    fn restore(&mut self);

    fn set_transform(&mut self, transform: Affine);

    fn transform(&self) -> Affine;

    /// Global alpha applied to every subsequent paint.
    fn set_alpha(&mut self, alpha: f64);

    fn alpha(&self) -> f64;

    fn stroke_path(&mut self, path: &BezPath, style: &Stroke, color: Color);

    fn fill_path(&mut self, path: &BezPath, color: Color);

    /// Fill `text` with its baseline-left corner at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, font_family: &str, color: Color);
}

/// One recorded paint operation with the state it was issued under.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Clear,
    FillAll {
        color: Color,
        alpha: f64,
    },
    Stroke {
        path: BezPath,
        style: Stroke,
        color: Color,
        transform: Affine,
        alpha: f64,
    },
    Fill {
        path: BezPath,
        color: Color,
        transform: Affine,
        alpha: f64,
    },
    Text {
        text: String,
        origin: Point,
        font_size: f64,
        font_family: String,
        color: Color,
        transform: Affine,
        alpha: f64,
    },
}

/// A surface that records commands instead of drawing.
///
/// Hosts can replay the commands into their own backend.
#[derive(Debug, Clone)]
pub struct DisplayList {
    size: Size,
    transform: Affine,
    alpha: f64,
    stack: Vec<(Affine, f64)>,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            transform: Affine::IDENTITY,
            alpha: 1.0,
            stack: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Depth of the save stack.
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }
}

impl Surface for DisplayList {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_all(&mut self, color: Color) {
        self.commands.push(DrawCommand::FillAll {
            color,
            alpha: self.alpha,
        });
    }

    fn save(&mut self) {
        self.stack.push((self.transform, self.alpha));
    }

    fn restore(&mut self) {
        if let Some((transform, alpha)) = self.stack.pop() {
            self.transform = transform;
            self.alpha = alpha;
        }
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn transform(&self) -> Affine {
        self.transform
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn stroke_path(&mut self, path: &BezPath, style: &Stroke, color: Color) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            style: style.clone(),
            color,
            transform: self.transform,
            alpha: self.alpha,
        });
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            color,
            transform: self.transform,
            alpha: self.alpha,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, font_size: f64, font_family: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            font_size,
            font_family: font_family.to_string(),
            color,
            transform: self.transform,
            alpha: self.alpha,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_restore_state() {
        let mut list = DisplayList::new(Size::new(10.0, 10.0));
        list.save();
        list.set_transform(Affine::scale(2.0));
        list.set_alpha(0.5);
        list.fill_path(&BezPath::new(), Color::from_rgba8(0, 0, 0, 255));
        list.restore();

        assert_eq!(list.transform(), Affine::IDENTITY);
        assert!((list.alpha() - 1.0).abs() < f64::EPSILON);
        assert_eq!(list.save_depth(), 0);
        match &list.commands()[0] {
            DrawCommand::Fill { transform, alpha, .. } => {
                assert_eq!(*transform, Affine::scale(2.0));
                assert!((alpha - 0.5).abs() < f64::EPSILON);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unbalanced_restore_is_ignored() {
        let mut list = DisplayList::new(Size::new(10.0, 10.0));
        list.set_alpha(0.3);
        list.restore();
        assert!((list.alpha() - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_take_commands() {
        let mut list = DisplayList::new(Size::new(10.0, 10.0));
        list.clear();
        assert_eq!(list.take_commands().len(), 1);
        assert!(list.commands().is_empty());
    }
}
