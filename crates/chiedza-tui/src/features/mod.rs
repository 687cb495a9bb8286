//! Feature slices. Each owns its state, reducer helpers and renderer.

pub mod navigation;
pub mod sections;
pub mod session;
pub mod settings;
