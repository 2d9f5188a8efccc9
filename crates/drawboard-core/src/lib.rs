//! Drawboard Core Library
//!
//! Platform-agnostic drawing-and-editing engine for the Drawboard whiteboard:
//! scene model, bounds, history, selection transforms, viewport and the
//! interaction controller.

pub mod board;
pub mod camera;
pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod input;
pub mod scene;
pub mod selection;
pub mod shapes;
pub mod tools;

pub use board::{Board, Gesture};
pub use camera::Camera;
pub use config::BoardConfig;
pub use error::{BoardError, BoardResult};
pub use history::History;
pub use input::{Modifiers, PointerEvent, Touch, TouchEvent};
pub use scene::Scene;
pub use selection::{Corner, DragSession, Handle, ResizeSession, Selection};
pub use shapes::{
    ApproxTextMeasure, DrawingObject, Figure, FigureKind, ObjectKind, SerializableColor, Stroke,
    StrokeTool, TextMeasure, TextObject,
};
pub use tools::{ToolCategory, ToolKind, ToolSettings};
