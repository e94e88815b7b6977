mod discovery;
mod driver;
mod ups;

pub use discovery::scan;
pub use driver::Ina219;
pub use ups::{poll, Ups};
