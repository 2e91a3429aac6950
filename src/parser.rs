mod builder;
mod error;

pub(crate) use builder::*;
pub use error::*;
