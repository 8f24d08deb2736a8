//! User-facing surfaces
//!
//! - `render`: state → text, shared by every command
//! - `cli`: one-shot commands driving the view flows

pub mod cli;
pub mod render;
