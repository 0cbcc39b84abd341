pub mod diag;
pub mod domain;
pub mod keys;
mod util;

pub use diag::*;
pub use domain::*;
pub use util::*;
