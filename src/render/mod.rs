//! Rendering module
//!
//! Turns scene state into a flat, depth-sorted sprite list. The host owns
//! the actual drawing surface.

pub mod sprite;

pub use sprite::{DrawList, SpriteInstance, build_draw_list, flags};
