//! Text formats at the edges of a run
//!
//! - `loader`: newline-delimited input into a [`WorkBatch`](crate::batch::WorkBatch)
//! - `writer`: a completed batch back out as newline-delimited text

pub mod loader;
pub mod writer;

pub use loader::load;
pub use writer::write;
