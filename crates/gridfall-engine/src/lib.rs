//! Fixed-size grid simulation of rigid shapes dropped straight down onto a
//! board, resolved against the existing terrain, with filled rows cleared in
//! place.
//!
//! The engine is purely in-process and deterministic: build a [`Shape`] once,
//! then call [`Board::drop`] as often as needed and read back
//! [`Board::fill_height`].

pub use self::core::*;

pub mod core;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("shapes must have at least one filled cell")]
pub struct EmptyShapeError;
