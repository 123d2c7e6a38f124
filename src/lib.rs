//! Editable shapes with move/resize handles, and the tool settings that
//! persist between sessions. The `shapedit` binary wires these into an
//! eframe window.

pub mod canvas;
pub mod color;
pub mod handle;
pub mod icons;
pub mod input;
pub mod primitive;
pub mod settings;
pub mod shape;

pub use canvas::Canvas;
pub use handle::{Handle, HandleRole, PointerEvent};
pub use settings::{ConfigError, ToolSettings};
pub use shape::{BoundedShape, ShapeKind};
