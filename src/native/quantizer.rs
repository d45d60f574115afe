//! Fixed-point model of the filter.
//!
//! Every signal in the cascade goes through one of eight quantizers. Each
//! quantizer is described by its word length, its integer word length (the
//! number of bits left of the binary point, sign included, possibly negative)
//! and what it does on overflow and on round-off.
//!
//! The shift amounts used by the kernel in [`crate::native::fixed`] are not
//! magic numbers: they are the differences between the fractional bits of
//! the quantizers involved, and are computed here at compile time.

/// What a quantizer does when a value falls outside its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowMode {
    /// Clamp to the nearest representable extreme.
    Saturation,
    /// Keep the low `word_length` bits, two's complement.
    Wrap,
}

/// What a quantizer does with the bits below its least significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundMode {
    /// Round to nearest, ties away from zero.
    Nearest,
    /// Round toward minus infinity (drop the bits).
    Truncation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    pub word_length: u32,
    pub integer_word_length: i32,
    pub overflow: OverflowMode,
    pub round: RoundMode,
}

impl Quantizer {
    /// Feed-forward coefficients, Q-5.21.
    pub const COEF_B: Self = Self::new(16, -5, OverflowMode::Saturation, RoundMode::Nearest);
    /// Feedback coefficients, Q1.15.
    pub const COEF_A: Self = Self::new(16, 1, OverflowMode::Saturation, RoundMode::Nearest);
    pub const INPUT: Self = Self::new(16, 1, OverflowMode::Saturation, RoundMode::Nearest);
    pub const OUTPUT: Self = Self::new(16, 2, OverflowMode::Wrap, RoundMode::Truncation);
    pub const MULTIPLICAND: Self = Self::new(32, 2, OverflowMode::Wrap, RoundMode::Truncation);
    pub const PRODUCT: Self = Self::new(32, 2, OverflowMode::Wrap, RoundMode::Truncation);
    pub const SUM: Self = Self::new(32, 2, OverflowMode::Wrap, RoundMode::Truncation);
    pub const DELAY: Self = Self::new(32, 2, OverflowMode::Wrap, RoundMode::Truncation);

    pub const fn new(
        word_length: u32,
        integer_word_length: i32,
        overflow: OverflowMode,
        round: RoundMode,
    ) -> Self {
        assert!(word_length >= 2 && word_length <= 32);
        Self {
            word_length,
            integer_word_length,
            overflow,
            round,
        }
    }

    #[inline(always)]
    pub const fn frac_bits(&self) -> i32 {
        self.word_length as i32 - self.integer_word_length
    }

    #[inline(always)]
    pub const fn min_raw(&self) -> i64 {
        -(1i64 << (self.word_length - 1))
    }

    #[inline(always)]
    pub const fn max_raw(&self) -> i64 {
        (1i64 << (self.word_length - 1)) - 1
    }

    /// Returns the raw integer representing `value`, after applying this
    /// quantizer's round-off and overflow modes.
    ///
    /// `value` must not be NaN.
    pub fn quantize(&self, value: f64) -> i64 {
        debug_assert!(!value.is_nan(), "value must not be NaN");

        let scaled = value * (self.frac_bits() as f64).exp2();
        let rounded = match self.round {
            RoundMode::Nearest => scaled.round(),
            RoundMode::Truncation => scaled.floor(),
        };
        match self.overflow {
            // `as` saturates on the way to i64, clamp does the rest
            OverflowMode::Saturation => (rounded as i64).clamp(self.min_raw(), self.max_raw()),
            OverflowMode::Wrap => self.wrap(rounded as i64),
        }
    }

    /// Returns the real value represented by the raw integer `raw`.
    #[inline(always)]
    pub fn to_real(&self, raw: i64) -> f64 {
        raw as f64 * (-self.frac_bits() as f64).exp2()
    }

    #[inline(always)]
    fn wrap(&self, raw: i64) -> i64 {
        let unused = 64 - self.word_length;
        (raw << unused) >> unused
    }
}

// Q1.15 -> Q2.30
pub const IN2SUM: u32 = (Quantizer::SUM.frac_bits() - Quantizer::INPUT.frac_bits()) as u32;
// Q2.30 -> Q2.14
pub const SUM2OUT: u32 = (Quantizer::SUM.frac_bits() - Quantizer::OUTPUT.frac_bits()) as u32;
// Extra right shift after the 16 bit half split, Q-5.21 has 5 more fractional bits than Q1.15
pub const COEF_B_SHIFT: u32 =
    (Quantizer::COEF_B.frac_bits() + Quantizer::MULTIPLICAND.frac_bits()
        - Quantizer::PRODUCT.frac_bits()
        - 16) as u32;
// Left shift of the high half product, Q1.15 has one fractional bit less than a 16 bit half
pub const COEF_A_SHIFT: u32 =
    (16 - (Quantizer::COEF_A.frac_bits() + Quantizer::MULTIPLICAND.frac_bits()
        - Quantizer::PRODUCT.frac_bits())) as u32;

/// Converts a real sample in [-1, 1) to the Q1.15 input format, saturating
/// and rounding to nearest.
#[inline(always)]
pub fn quantize_input(x: f32) -> i16 {
    Quantizer::INPUT.quantize(x as f64) as i16
}

/// Converts a filter output sample (Q2.14) to its real value.
#[inline(always)]
pub fn output_to_real(y: i16) -> f32 {
    Quantizer::OUTPUT.to_real(y as i64) as f32
}
