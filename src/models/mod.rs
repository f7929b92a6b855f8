pub mod constellation;
pub mod globe;
pub mod satellite;

pub use constellation::{Constellation, Frame};
pub use globe::Globe;
pub use satellite::{advance, compute_position, create_orbit, Satellite};
