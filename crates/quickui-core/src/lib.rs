//! Hardware-independent core of the quickui window toolkit
//!
//! A small retained-mode windowing layer for embedded displays: a tree of
//! rectangular windows painted through a display [`Driver`], dirty-driven
//! repaint, a single modal dialog and touch routing with capture.
//!
//! It is `#![no_std]` with `extern crate alloc` so it builds for embedded
//! targets and for desktop hosts (the simulator and tests).
//!
//! # Layout
//!
//! - [`app`] - the [`Application`] coordinator and the [`Ui`] callback context
//! - [`window`] - window ids, the [`WindowHandler`] trait and the window tree
//! - [`surface`] - the drawing and input contract a driver implements
//! - [`driver`] - a [`Driver`] over any `embedded-graphics` draw target
//! - [`assets`] - palettes, images, fonts and the sources they load from
//! - [`timer`] - per-window timers
//! - [`widgets`] - label, button and message box handlers

#![no_std]

extern crate alloc;

pub mod app;
pub mod assets;
pub mod colors;
pub mod driver;
pub mod error;
pub mod event;
pub mod framebuffer;
pub mod geometry;
pub mod resources;
pub mod surface;
pub mod timer;
pub mod widgets;
pub mod window;

#[cfg(test)]
mod testing;

pub use app::{AppHandler, Application, LoopControl, Ui};
pub use error::{AssetError, UiError, UiResult};
pub use event::{TouchEvent, TouchKind};
pub use geometry::{Dimension, Point, Rectangle};
pub use resources::SystemResources;
pub use surface::{Driver, Surface};
pub use window::{Canvas, WindowHandler, WindowId, WindowKind, WindowTree};
