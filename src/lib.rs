//! Overlay Menu
//!
//! Keyboard-driven, stack-based menus drawn over a running real-time scene.
//! The host owns the window and the frame loop; each frame it routes raw input
//! through an [`EventRouter`], feeds the commands to a [`MenuController`] and
//! asks the controller to render on top of its own drawing.
//!
//! Rendering goes through the [`Surface`] trait. With the `sdl` feature,
//! `sdl2::render::Canvas<Window>` implements it directly; without it the
//! [`RecordingSurface`] is available for tests and headless hosts.

pub mod app;
pub mod color;
pub mod config;
pub mod gui;
pub mod input_system;
pub mod logging;
pub mod surface;
pub mod text;

pub use color::Color;
pub use config::{AppConfig, Args, ConfigFileError};
pub use gui::*;
pub use input_system::{EventRouter, InputEvent, Key, MenuInput};
pub use surface::{DrawOp, RecordingSurface, Rect, Surface};
pub use text::{draw_text, text_height, text_width};
