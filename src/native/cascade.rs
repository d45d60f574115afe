//! Cascade whose section count is only known at load time.
//!
//! [`SosCascade`] owns its coefficient tables and works on delay lines owned
//! by the caller, as flat `[i32]` buffers of two words per section. Every
//! entry point checks the buffer length before touching it.

use super::sos::{Overflow, SosCoeffs, process1_sections, process1_sections_monitored};
use crate::global::{assert_len, assert_multiple_of};

/// # Example
/// ```
/// use fixed_sos_rs::native::cascade::SosCascade;
///
/// let cascade = SosCascade::new(vec![18_287, 18_287, 0], vec![-32_197, 0]);
/// let mut state = cascade.create_state();
///
/// assert_eq!(cascade.process1(&mut state, i16::MAX), 142);
/// assert_eq!(cascade.process1(&mut state, 0), 283);
///
/// cascade.reset_state(&mut state);
/// assert_eq!(&*state, &[0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SosCascade {
    coef_b: Box<[i16]>,
    coef_a: Box<[i16]>,
}

impl SosCascade {
    /// Loads a coefficient table, section after section:
    /// `coef_b = [b0, b1, b2, b0, ...]` (Q-5.21) and `coef_a = [a1, a2, a1, ...]` (Q1.15).
    ///
    /// # Panics
    /// If `coef_a` is empty, its length is odd, or `coef_b` does not hold
    /// exactly three coefficients per section.
    pub fn new(coef_b: Vec<i16>, coef_a: Vec<i16>) -> Self {
        assert_multiple_of("coef_a", 2, coef_a.len());
        assert_len("coef_b", 3 * (coef_a.len() / 2), coef_b.len());

        Self {
            coef_b: coef_b.into_boxed_slice(),
            coef_a: coef_a.into_boxed_slice(),
        }
    }

    #[inline(always)]
    pub fn n_sections(&self) -> usize {
        self.coef_a.len() / 2
    }

    /// Length of the delay line, in words.
    #[inline(always)]
    pub fn n_states(&self) -> usize {
        2 * self.n_sections()
    }

    #[inline(always)]
    pub fn get_coef_b(&self) -> &[i16] {
        &self.coef_b
    }

    #[inline(always)]
    pub fn get_coef_a(&self) -> &[i16] {
        &self.coef_a
    }

    /// Allocates a zeroed delay line for this cascade.
    #[inline(always)]
    pub fn create_state(&self) -> Box<[i32]> {
        vec![0; self.n_states()].into_boxed_slice()
    }

    #[inline(always)]
    pub fn reset_state(&self, state: &mut [i32]) {
        assert_len("state", self.n_states(), state.len());
        state.fill(0);
    }

    /// # Panics
    /// If `state.len()` is not two words per section.
    #[inline(always)]
    pub fn process1(&self, state: &mut [i32], x: i16) -> i16 {
        assert_len("state", self.n_states(), state.len());
        process1_sections(&self.coef_b, &self.coef_a, state, x)
    }

    /// Same as [`SosCascade::process1`], adding to `overflow` the quantizers
    /// that wrapped while computing this sample.
    #[inline(always)]
    pub fn process1_monitored(&self, state: &mut [i32], x: i16, overflow: &mut Overflow) -> i16 {
        assert_len("state", self.n_states(), state.len());
        process1_sections_monitored(&self.coef_b, &self.coef_a, state, x, overflow)
    }
}

impl<const N_SECTIONS: usize> From<&SosCoeffs<N_SECTIONS>> for SosCascade {
    fn from(coeffs: &SosCoeffs<N_SECTIONS>) -> Self {
        Self::new(coeffs.get_coef_b().to_vec(), coeffs.get_coef_a().to_vec())
    }
}
