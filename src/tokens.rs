mod model;
mod scanner;

pub(crate) use model::*;
pub(crate) use scanner::*;
