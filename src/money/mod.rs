//! Currency display and conversion

mod context;
mod format;

pub use context::*;
pub use format::*;
