pub mod scenario;
pub mod tle;
