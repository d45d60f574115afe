use bitflags::bitflags;

use super::fixed::{
    mult_a, mult_b, narrow_output, overflowing_mult_a, widen_input, wrap_sum,
};
use crate::global::assert_len;

/// Fixed-point cascade of second-order sections in Direct Form II Transposed.
///
/// A `Sos` binds a shared, immutable coefficient table to its own delay
/// line. Any number of instances may borrow the same [`SosCoeffs`].
///
/// # Example
/// ```
/// use fixed_sos_rs::native::sos::{REFERENCE_LOWPASS, Sos};
///
/// let mut left = Sos::new(&REFERENCE_LOWPASS);
/// let mut right = Sos::new(&REFERENCE_LOWPASS);
///
/// let impulse = [i16::MAX, 0, 0, 0];
/// let y: Vec<i16> = impulse.iter().map(|&x| left.process1(x)).collect();
/// assert_eq!(y, [142, 283, 278, 273]);
///
/// // `right` has its own state and is not affected by `left`
/// assert_eq!(right.process1(0), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Sos<'c, const N_SECTIONS: usize> {
    coeffs: &'c SosCoeffs<N_SECTIONS>,
    state: SosState<N_SECTIONS>,
    overflow: Overflow,
}

impl<'c, const N_SECTIONS: usize> Sos<'c, N_SECTIONS> {
    /// Creates a filter bound to `coeffs`, with zeroed state.
    #[inline(always)]
    pub fn new(coeffs: &'c SosCoeffs<N_SECTIONS>) -> Self {
        Self {
            coeffs,
            state: SosState::new(),
            overflow: Overflow::empty(),
        }
    }

    /// Zeroes the delay line and clears the recorded overflows.
    #[inline(always)]
    pub fn reset(&mut self) {
        self.coeffs.reset_state(&mut self.state);
        self.overflow = Overflow::empty();
    }

    #[inline(always)]
    pub fn process1(&mut self, x: i16) -> i16 {
        self.coeffs.process1(&mut self.state, x)
    }

    /// Same as [`Sos::process1`], also recording which quantizers wrapped.
    /// The recorded set is available through [`Sos::get_overflow`] until the
    /// next [`Sos::reset`].
    #[inline(always)]
    pub fn process1_monitored(&mut self, x: i16) -> i16 {
        self.coeffs
            .process1_monitored(&mut self.state, x, &mut self.overflow)
    }

    #[inline(always)]
    pub fn get_coeffs(&self) -> &'c SosCoeffs<N_SECTIONS> {
        self.coeffs
    }

    #[inline(always)]
    pub fn get_state(&self) -> &SosState<N_SECTIONS> {
        &self.state
    }

    #[inline(always)]
    pub fn get_overflow(&self) -> Overflow {
        self.overflow
    }
}

/// Coefficient table of a cascade of `N_SECTIONS` sections.
///
/// Per section, `b` holds the three feed-forward coefficients in Q-5.21 and
/// `a` the two feedback coefficients in Q1.15 (the leading `a0 = 1` is
/// implicit and the signs are the usual `1 + a1 z^-1 + a2 z^-2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SosCoeffs<const N_SECTIONS: usize> {
    b: [[i16; 3]; N_SECTIONS],
    a: [[i16; 2]; N_SECTIONS],
}

/// Single section lowpass: `b = [18287, 18287, 0]`, `a = [-32197, 0]`.
pub const REFERENCE_LOWPASS: SosCoeffs<1> = SosCoeffs::new([[18_287, 18_287, 0]], [[-32_197, 0]]);

impl<const N_SECTIONS: usize> SosCoeffs<N_SECTIONS> {
    #[inline(always)]
    pub const fn new(b: [[i16; 3]; N_SECTIONS], a: [[i16; 2]; N_SECTIONS]) -> Self {
        assert!(N_SECTIONS > 0, "a cascade needs at least one section");
        Self { b, a }
    }

    /// Builds the table from flat coefficient lists, section after section:
    /// `coef_b = [b0, b1, b2, b0, ...]` and `coef_a = [a1, a2, a1, ...]`.
    ///
    /// # Panics
    /// If `coef_b.len() != 3 * N_SECTIONS` or `coef_a.len() != 2 * N_SECTIONS`.
    pub fn from_flat(coef_b: &[i16], coef_a: &[i16]) -> Self {
        assert_len("coef_b", 3 * N_SECTIONS, coef_b.len());
        assert_len("coef_a", 2 * N_SECTIONS, coef_a.len());

        Self::new(
            std::array::from_fn(|section| {
                std::array::from_fn(|k| coef_b[3 * section + k])
            }),
            std::array::from_fn(|section| {
                std::array::from_fn(|k| coef_a[2 * section + k])
            }),
        )
    }

    #[inline(always)]
    pub const fn n_sections(&self) -> usize {
        N_SECTIONS
    }

    #[inline(always)]
    pub fn get_coef_b(&self) -> &[i16] {
        self.b.as_flattened()
    }

    #[inline(always)]
    pub fn get_coef_a(&self) -> &[i16] {
        self.a.as_flattened()
    }

    #[inline(always)]
    pub fn reset_state(&self, state: &mut SosState<N_SECTIONS>) {
        state.reset();
    }

    #[inline(always)]
    pub fn process1(&self, state: &mut SosState<N_SECTIONS>, x: i16) -> i16 {
        process1_sections(
            self.get_coef_b(),
            self.get_coef_a(),
            state.as_words_mut(),
            x,
        )
    }

    /// Same as [`SosCoeffs::process1`], adding to `overflow` the quantizers
    /// that wrapped while computing this sample.
    #[inline(always)]
    pub fn process1_monitored(
        &self,
        state: &mut SosState<N_SECTIONS>,
        x: i16,
        overflow: &mut Overflow,
    ) -> i16 {
        process1_sections_monitored(
            self.get_coef_b(),
            self.get_coef_a(),
            state.as_words_mut(),
            x,
            overflow,
        )
    }
}

/// Delay line of a cascade: two Q2.30 words per section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SosState<const N_SECTIONS: usize> {
    z: [[i32; 2]; N_SECTIONS],
}

impl<const N_SECTIONS: usize> SosState<N_SECTIONS> {
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            z: [[0; 2]; N_SECTIONS],
        }
    }

    #[inline(always)]
    pub fn reset(&mut self) {
        self.z = [[0; 2]; N_SECTIONS];
    }

    /// The delay words in their flat layout: `[z1_0, z2_0, z1_1, z2_1, ...]`.
    #[inline(always)]
    pub fn as_words(&self) -> &[i32] {
        self.z.as_flattened()
    }

    #[inline(always)]
    pub(crate) fn as_words_mut(&mut self) -> &mut [i32] {
        self.z.as_flattened_mut()
    }
}

impl<const N_SECTIONS: usize> Default for SosState<N_SECTIONS> {
    fn default() -> Self {
        Self::new()
    }
}

bitflags! {
    /// Quantizers that wrapped around while filtering.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Overflow: u8 {
        /// A feedback product did not fit Q2.30.
        const PRODUCT = 1;
        /// A section output or a delay register did not fit Q2.30.
        const SUM = 1 << 1;
    }
}

// Kernel shared by the compile-time and the runtime sized cascades.
// Lengths are checked by the callers.
#[inline(always)]
pub(crate) fn process1_sections(coef_b: &[i16], coef_a: &[i16], state: &mut [i32], x: i16) -> i16 {
    debug_assert_eq!(coef_b.len() / 3, state.len() / 2);
    debug_assert_eq!(coef_a.len(), state.len());

    let mut acc = widen_input(x);
    coef_b
        .chunks_exact(3)
        .zip(coef_a.chunks_exact(2))
        .zip(state.chunks_exact_mut(2))
        .for_each(|((b, a), z)| {
            let xb = acc;
            acc = mult_b(xb, b[0]).wrapping_add(z[0]);
            let xa = acc;

            z[0] = z[1]
                .wrapping_add(mult_b(xb, b[1]))
                .wrapping_sub(mult_a(xa, a[0]));
            z[1] = mult_b(xb, b[2]).wrapping_sub(mult_a(xa, a[1]));
        });
    narrow_output(acc)
}

#[inline(always)]
pub(crate) fn process1_sections_monitored(
    coef_b: &[i16],
    coef_a: &[i16],
    state: &mut [i32],
    x: i16,
    overflow: &mut Overflow,
) -> i16 {
    debug_assert_eq!(coef_b.len() / 3, state.len() / 2);
    debug_assert_eq!(coef_a.len(), state.len());

    let mut acc = widen_input(x);
    coef_b
        .chunks_exact(3)
        .zip(coef_a.chunks_exact(2))
        .zip(state.chunks_exact_mut(2))
        .for_each(|((b, a), z)| {
            let xb = acc;
            let (sum, wrapped) = wrap_sum(mult_b(xb, b[0]) as i64 + z[0] as i64);
            if wrapped {
                overflow.insert(Overflow::SUM);
            }
            acc = sum;
            let xa = acc;

            let (prod_a1, wrapped_a1) = overflowing_mult_a(xa, a[0]);
            let (prod_a2, wrapped_a2) = overflowing_mult_a(xa, a[1]);
            if wrapped_a1 || wrapped_a2 {
                overflow.insert(Overflow::PRODUCT);
            }

            let (z1, wrapped_z1) =
                wrap_sum(z[1] as i64 + mult_b(xb, b[1]) as i64 - prod_a1 as i64);
            let (z2, wrapped_z2) = wrap_sum(mult_b(xb, b[2]) as i64 - prod_a2 as i64);
            if wrapped_z1 || wrapped_z2 {
                overflow.insert(Overflow::SUM);
            }
            z[0] = z1;
            z[1] = z2;
        });
    narrow_output(acc)
}
