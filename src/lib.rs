pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod image_source;
pub mod input;
pub mod points;
pub mod selection;
pub mod serializer;
pub mod viewport;

pub use error::{AnnotateError, Result};
pub use input::{Action, InputEvent, Session};
pub use points::{Point, PointStore};
pub use viewport::Viewport;
