//! Command implementations

pub mod index;
pub mod inspect;
pub mod resolve;

pub use index::*;
pub use inspect::*;
pub use resolve::*;
