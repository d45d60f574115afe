use super::*;
use crate::native::sos::SosCoeffs;

/// Fixed-point cascade of second-order sections: Rust binding to the C reference kernel.
///
/// # Example
/// ```
/// use fixed_sos_rs::c_wrapper::sos::Sos;
/// use fixed_sos_rs::native::sos::REFERENCE_LOWPASS;
///
/// let mut sos = Sos::new(&REFERENCE_LOWPASS);
/// assert_eq!(sos.process1(i16::MAX), 142);
/// ```
///
/// # Notes
/// This module provides Rust bindings to the C implementation.
/// For the native Rust implementation with the same interface, see [crate::native::sos].
#[derive(Debug, Clone)]
pub struct Sos<const N_SECTIONS: usize> {
    pub(crate) coeffs: SosCoeffs<N_SECTIONS>,
    pub(crate) state: [[i32; 2]; N_SECTIONS],
}

impl<const N_SECTIONS: usize> Sos<N_SECTIONS> {
    pub fn new(coeffs: &SosCoeffs<N_SECTIONS>) -> Self {
        let mut sos = Sos {
            coeffs: *coeffs,
            state: [[-1; 2]; N_SECTIONS],
        };
        sos.reset();
        sos
    }

    pub fn reset(&mut self) {
        unsafe {
            sos_fixed_init_state(self.state.as_flattened_mut().as_mut_ptr(), N_SECTIONS);
        }
    }

    pub fn process1(&mut self, x: i16) -> i16 {
        unsafe {
            sos_fixed_process1(
                self.coeffs.get_coef_b().as_ptr(),
                self.coeffs.get_coef_a().as_ptr(),
                self.state.as_flattened_mut().as_mut_ptr(),
                N_SECTIONS,
                x,
            )
        }
    }

    pub fn get_state(&self) -> &[i32] {
        self.state.as_flattened()
    }
}

/// Q2.30 * Q-5.21 product of the C reference.
pub fn mult_b(x: i32, coef: i16) -> i32 {
    unsafe { sos_fixed_mult_b(x, coef) }
}

/// Q2.30 * Q1.15 product of the C reference.
pub fn mult_a(x: i32, coef: i16) -> i32 {
    unsafe { sos_fixed_mult_a(x, coef) }
}
