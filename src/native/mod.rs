//! Native Rust implementation of the fixed-point cascade
pub mod cascade;
pub mod fixed;
pub mod quantizer;
pub mod sos;
