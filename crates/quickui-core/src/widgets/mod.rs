//! Ready-made window handlers

pub mod button;
pub mod label;
pub mod message_box;

pub use button::{Button, ButtonState};
pub use label::Label;
pub use message_box::MessageBox;
