//! C ABI exports of the integrands.
//!
//! The symbols use the `double f(int n, double x)` and
//! `double f(int n, double *args)` signatures that low-level quadrature
//! callbacks expect, so the shared library can be loaded with ctypes and
//! handed to a QUADPACK-style driver.

use crate::integrand::{integrand1_nd, integrand2_nd, Integrand2Args};
use core::ffi::c_int;

/// cos(x) / x^3. `n` is ignored.
#[no_mangle]
pub extern "C" fn integrand(n: c_int, x: f64) -> f64 {
    integrand1_nd(n, x)
}

/// cos(a * x) / x^b with `args = [x, a, b]`.
///
/// # Safety
///
/// `args` must point to at least three readable doubles. A null pointer
/// returns NaN.
#[no_mangle]
pub unsafe extern "C" fn integrand2(n: c_int, args: *const f64) -> f64 {
    if args.is_null() {
        return f64::NAN;
    }
    let packed: Integrand2Args = *args.cast::<Integrand2Args>();
    integrand2_nd(n, &packed)
}

#[test]
fn test_ffi_matches_rust() {
    use crate::utils;

    for x in utils::get_special_test_values() {
        assert_eq!(integrand(1, x).to_bits(), crate::integrand1(x).to_bits());
    }

    let args = [2., 1., 0.];
    let res = unsafe { integrand2(3, args.as_ptr()) };
    assert_eq!(res, 2f64.cos());

    let args = [-1., 0., 2.];
    assert_eq!(unsafe { integrand2(3, args.as_ptr()) }, 1.);
}

#[test]
fn test_ffi_null_args() {
    assert!(unsafe { integrand2(3, core::ptr::null()) }.is_nan());
}

#[test]
fn test_ffi_longer_vector() {
    // Only the first three entries are read.
    let args = [1.5, 2., 0.5, 99., 99.];
    let res = unsafe { integrand2(5, args.as_ptr()) };
    assert_eq!(res.to_bits(), crate::integrand2(1.5, 2., 0.5).to_bits());
}
