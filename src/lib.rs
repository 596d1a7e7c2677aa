#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod controller;
pub mod error;
pub mod file_handler;
pub mod geometry;
pub mod history;
pub mod image;
pub mod input;
pub mod tools;

pub use app::PaintApp;
pub use canvas::Canvas;
pub use controller::CanvasController;
pub use error::ImageLoadError;
pub use history::{Snapshot, SnapshotHistory};
pub use crate::image::LoadedImage;
pub use input::{InputHandler, PointerEvent};
pub use tools::{DrawingStyle, ToolMode};
