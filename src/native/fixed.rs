//! Fixed-point arithmetic primitives of the cascade.
//!
//! All 32 bit signals are Q2.30 with wrap-around overflow and truncation.
//! The multiplications split the Q2.30 operand in a signed high half and an
//! unsigned low half so that every partial product fits 32 bits, exactly like
//! a 16x16 -> 32 multiplier would do it.

use super::quantizer::{COEF_A_SHIFT, COEF_B_SHIFT, IN2SUM, SUM2OUT};

/// Promotes a Q1.15 input sample to the Q2.30 accumulator format.
#[inline(always)]
pub fn widen_input(x: i16) -> i32 {
    (x as i32) << IN2SUM
}

/// Demotes the Q2.30 accumulator to the Q2.14 output format: arithmetic
/// shift, then truncation to 16 bits with wrap-around.
///
/// A 32 bit value shifted right by 16 always fits 16 bits, so the wrap
/// stage of the output quantizer can never trigger here.
#[inline(always)]
pub fn narrow_output(acc: i32) -> i16 {
    (acc >> SUM2OUT) as i16
}

/// Q2.30 * Q-5.21 => Q2.30
///
/// Neither partial product nor their sum can leave the 32 bit range for any
/// 16 bit coefficient, so this product never wraps.
#[inline(always)]
pub fn mult_b(x: i32, coef: i16) -> i32 {
    let coef = coef as i32;
    let high = (x >> 16) * coef;
    let low = ((x & 0xffff) * coef) >> 16;
    (high + low) >> COEF_B_SHIFT
}

/// Q2.30 * Q1.15 => Q2.30
///
/// The high half product is shifted left by one, which wraps when both the
/// operand and the coefficient sit at the negative extreme.
#[inline(always)]
pub fn mult_a(x: i32, coef: i16) -> i32 {
    let coef = coef as i32;
    let high = ((x >> 16) * coef) << COEF_A_SHIFT;
    let low = ((x & 0xffff) * coef) >> (16 - COEF_A_SHIFT);
    high.wrapping_add(low)
}

/// Same as [`mult_a`], also telling whether the product wrapped.
#[inline(always)]
pub fn overflowing_mult_a(x: i32, coef: i16) -> (i32, bool) {
    let prod = mult_a(x, coef);
    let exact = (x as i64 * coef as i64) >> (16 - COEF_A_SHIFT);
    (prod, exact != prod as i64)
}

/// Wraps an exact (64 bit) sum of Q2.30 terms to 32 bits, telling whether it
/// left the 32 bit range.
#[inline(always)]
pub fn wrap_sum(exact: i64) -> (i32, bool) {
    (exact as i32, i32::try_from(exact).is_err())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPERANDS: [i32; 12] = [
        i32::MIN,
        i32::MIN + 1,
        -(1 << 30),
        -65_537,
        -65_536,
        -1,
        0,
        1,
        0xffff,
        1 << 16,
        1 << 30,
        i32::MAX,
    ];
    const COEFFS: [i16; 9] = [i16::MIN, -32_197, -1, 0, 1, 255, 16_384, 18_287, i16::MAX];

    // Single 64 bit product, same shift, wrapping truncation to 32 bits
    fn wide_mult_b(x: i32, coef: i16) -> i32 {
        ((x as i64 * coef as i64) >> 21) as i32
    }

    fn wide_mult_a(x: i32, coef: i16) -> i32 {
        ((x as i64 * coef as i64) >> 15) as i32
    }

    // Small deterministic LCG, enough to sweep operands
    fn lcg(seed: &mut u32) -> u32 {
        *seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        *seed
    }

    #[test]
    fn widen_input() {
        assert_eq!(super::widen_input(0), 0);
        assert_eq!(super::widen_input(1), 1 << 15);
        assert_eq!(super::widen_input(i16::MAX), 0x3fff_8000);
        assert_eq!(super::widen_input(i16::MIN), -(1 << 30));
    }

    #[test]
    fn narrow_output_truncates() {
        assert_eq!(narrow_output(0xffff), 0);
        assert_eq!(narrow_output(0x1_0000), 1);
        // toward minus infinity, not toward zero
        assert_eq!(narrow_output(-1), -1);
        assert_eq!(narrow_output(-0x1_0000), -1);
        assert_eq!(narrow_output(-0x1_0001), -2);
        assert_eq!(narrow_output(i32::MAX), i16::MAX);
        assert_eq!(narrow_output(i32::MIN), i16::MIN);
    }

    #[test]
    fn mult_b_matches_wide_product() {
        OPERANDS.iter().for_each(|&x| {
            COEFFS.iter().for_each(|&c| {
                assert_eq!(mult_b(x, c), wide_mult_b(x, c), "x = {x}, coef = {c}");
            });
        });
        let mut seed = 0x1234_5678;
        (0..10_000).for_each(|_| {
            let x = lcg(&mut seed) as i32;
            let c = (lcg(&mut seed) >> 16) as i16;
            assert_eq!(mult_b(x, c), wide_mult_b(x, c), "x = {x}, coef = {c}");
        });
    }

    #[test]
    fn mult_a_matches_wide_product() {
        OPERANDS.iter().for_each(|&x| {
            COEFFS.iter().for_each(|&c| {
                assert_eq!(mult_a(x, c), wide_mult_a(x, c), "x = {x}, coef = {c}");
            });
        });
        let mut seed = 0x9e37_79b9;
        (0..10_000).for_each(|_| {
            let x = lcg(&mut seed) as i32;
            let c = (lcg(&mut seed) >> 16) as i16;
            assert_eq!(mult_a(x, c), wide_mult_a(x, c), "x = {x}, coef = {c}");
        });
    }

    #[test]
    fn mult_known_values() {
        assert_eq!(mult_b(1 << 30, 18_287), 9_362_944);
        assert_eq!(mult_a(1 << 30, -32_197), -1_055_031_296);
        assert_eq!(mult_a(1 << 30, i16::MAX), 1_073_709_056);
        assert_eq!(mult_b(i32::MIN, i16::MIN), 33_554_432);
    }

    #[test]
    fn mult_a_wraps_at_negative_extremes() {
        // -2.0 * -1.0 = 2.0 is not representable in Q2.30
        assert_eq!(mult_a(i32::MIN, i16::MIN), i32::MIN);
        assert_eq!(overflowing_mult_a(i32::MIN, i16::MIN), (i32::MIN, true));
        assert_eq!(overflowing_mult_a(1 << 30, -32_197), (-1_055_031_296, false));
    }

    #[test]
    fn wrap_sum_reports_wrap() {
        assert_eq!(wrap_sum(1 + 2 - 3), (0, false));
        assert_eq!(wrap_sum(i32::MAX as i64 + 1), (i32::MIN, true));
        assert_eq!(wrap_sum(i32::MIN as i64 - 1), (i32::MAX, true));
        // 0 - (-2^31) = 2^31
        assert_eq!(wrap_sum(-(i32::MIN as i64)), (i32::MIN, true));
        assert_eq!(wrap_sum(i32::MIN as i64), (i32::MIN, false));
    }

    #[cfg(feature = "c-reference")]
    mod c_reference {
        use super::*;
        use crate::c_wrapper::sos::{mult_a as c_mult_a, mult_b as c_mult_b};

        #[test]
        fn mult_b() {
            OPERANDS.iter().for_each(|&x| {
                COEFFS.iter().for_each(|&c| {
                    assert_eq!(super::mult_b(x, c), c_mult_b(x, c), "x = {x}, coef = {c}");
                });
            });
            let mut seed = 0x0bad_f00d;
            (0..10_000).for_each(|_| {
                let x = lcg(&mut seed) as i32;
                let c = (lcg(&mut seed) >> 16) as i16;
                assert_eq!(super::mult_b(x, c), c_mult_b(x, c), "x = {x}, coef = {c}");
            });
        }

        #[test]
        fn mult_a() {
            OPERANDS.iter().for_each(|&x| {
                COEFFS.iter().for_each(|&c| {
                    assert_eq!(super::mult_a(x, c), c_mult_a(x, c), "x = {x}, coef = {c}");
                });
            });
            let mut seed = 0x0bad_f00d;
            (0..10_000).for_each(|_| {
                let x = lcg(&mut seed) as i32;
                let c = (lcg(&mut seed) >> 16) as i16;
                assert_eq!(super::mult_a(x, c), c_mult_a(x, c), "x = {x}, coef = {c}");
            });
        }
    }
}
