// Auto generated code does not follow these...
#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

//! Rust bindings to the C reference kernel in `csrc/sos_fixed.h`.
//!
//! Only built with the `c-reference` feature. The native implementation is
//! checked sample by sample against it.
include!(concat!(env!("OUT_DIR"), "/bindings.rs"));
pub mod sos;
