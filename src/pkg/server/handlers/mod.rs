pub mod probes;
pub mod ui;
