//! Domain objects owned by the explanation flow.
//!
//! - [`InputState`] - Text, image and language the user is about to submit

pub mod input;

pub use input::{ImageUpload, InputState, Submission};
