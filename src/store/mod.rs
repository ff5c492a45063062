pub mod fixture;

pub use fixture::{load, LoadError, ReportSource};
