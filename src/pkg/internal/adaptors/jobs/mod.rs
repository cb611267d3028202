pub mod error;
pub mod selectors;
pub mod spec;
