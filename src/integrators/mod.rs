pub mod stepping;
