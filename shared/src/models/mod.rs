//! Domain models for the Farmsight crop monitoring platform

mod band;
mod classification;
mod crop;
mod index;
mod plot;
mod sustainability;

pub use band::*;
pub use classification::*;
pub use crop::*;
pub use index::*;
pub use plot::*;
pub use sustainability::*;
