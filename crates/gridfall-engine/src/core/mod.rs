pub use self::{board::*, packed_row::*, shape::*};

pub(crate) mod board;
pub(crate) mod packed_row;
pub(crate) mod shape;

/// Board width in columns.
pub const BOARD_WIDTH: usize = 10;
/// Board height in rows.
pub const BOARD_HEIGHT: usize = 100;
