//! Library components for the EXI analyser binary.

pub mod logging;
pub mod paths;
pub mod pipeline;
pub mod types;
