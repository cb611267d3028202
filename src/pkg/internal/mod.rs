pub mod adaptors;
pub mod api;
pub mod display;
pub mod store;
