//! # fixed-sos-rs
//!
//! `fixed-sos-rs` is a bit-exact fixed-point IIR filter: a cascade of
//! second-order sections (biquads) in Direct Form II Transposed, for targets
//! where floating point is unavailable or too costly.
//!
//! ---
//! Samples are 16 bit: the input is Q1.15 and the output Q2.14. Internally
//! every signal is a Q2.30 word with wrap-around overflow and truncation,
//! and coefficients are 16 bit (feed-forward Q-5.21, feedback Q1.15).
//!
//! This crate provides both:
//! - A **native** Rust implementation of the kernel
//! - A **wrapper** around a C reference of the same kernel using `bindgen`
//!   (feature `c-reference`), used to cross-check bit-exactness
//!
//! ---
//! ### Included:
//! - [X] Compile-time sized cascade ([`native::sos`])
//! - [X] Load-time sized cascade on caller-owned state ([`native::cascade`])
//! - [X] Overflow monitoring
//! - [X] Fixed-point model and sample conversions ([`native::quantizer`])
//!
//! ### Example
//! ```
//! use fixed_sos_rs::native::{
//!     quantizer::{output_to_real, quantize_input},
//!     sos::{REFERENCE_LOWPASS, Sos},
//! };
//!
//! // Create the state and bind it to the coefficients
//! let mut sos = Sos::new(&REFERENCE_LOWPASS);
//!
//! // Processing, one sample at a time
//! let y = sos.process1(quantize_input(0.5));
//! assert_eq!(y, 71);
//! assert!(output_to_real(y) > 0.0);
//!
//! // Back to a zeroed state
//! sos.reset();
//! ```
#[cfg(feature = "c-reference")]
#[allow(clippy::all)]
// Silence clippy warnings for the wrapper
pub mod c_wrapper;
pub(crate) mod global;
pub mod native;
