//! The two integrands, in plain form and in the dimension-count calling
//! convention used by low-level quadrature callbacks.

/// The packed parameter vector of the second integrand: `[x, a, b]`.
pub type Integrand2Args = [f64; 3];

/// Number of scalars in [`Integrand2Args`].
pub const INTEGRAND2_ARITY: usize = 3;

/// Computes cos(x) / x^3.
///
/// The cube is evaluated as `x * x * x`. At zero the result is +inf or -inf
/// depending on the sign of the zero, and NaN propagates.
#[inline]
pub fn integrand1(x: f64) -> f64 {
    x.cos() / (x * x * x)
}

/// Computes cos(a * x) / x^b.
///
/// A negative `x` with a non-integer `b` gives NaN, and `x == 0` with a
/// positive `b` gives an infinity. Nothing is validated.
#[inline]
pub fn integrand2(x: f64, a: f64, b: f64) -> f64 {
    (a * x).cos() / x.powf(b)
}

/// Same as [`integrand1`], with the leading dimension count that quadrature
/// callbacks pass. The count is ignored.
#[inline]
pub fn integrand1_nd(_n: i32, x: f64) -> f64 {
    integrand1(x)
}

/// Same as [`integrand2`], taking the parameters packed as `[x, a, b]`.
/// The count is ignored; the array type already fixes the arity.
#[inline]
pub fn integrand2_nd(_n: i32, args: &Integrand2Args) -> f64 {
    let [x, a, b] = *args;
    integrand2(x, a, b)
}

#[cfg(test)]
fn rel_err(a: f64, b: f64) -> f64 {
    if a == b {
        return 0.;
    }
    ((a - b) / b).abs()
}

#[test]
fn test_integrand1_values() {
    use crate::utils::Lfsr;

    fn check(x: f64) {
        let expected = x.cos() / x.powi(3);
        assert!(rel_err(integrand1(x), expected) < 1e-12, "x = {}", x);
    }
    check(1.);
    check(-1.);
    check(std::f64::consts::PI);
    check(2. * std::f64::consts::PI);
    check(0.001);
    check(123.456);

    let mut lfsr = Lfsr::new();
    for _ in 0..5000 {
        check(lfsr.next_in_range(-50., 50.));
    }

    // cos(pi) = -1.
    let pi3 = std::f64::consts::PI.powi(3);
    assert!(rel_err(integrand1(std::f64::consts::PI), -1. / pi3) < 1e-14);
}

#[test]
fn test_integrand1_zero() {
    assert_eq!(integrand1(0.), f64::INFINITY);
    assert_eq!(integrand1(-0.), f64::NEG_INFINITY);
    assert!(integrand1(f64::NAN).is_nan());
    // cos(inf) is NaN.
    assert!(integrand1(f64::INFINITY).is_nan());
}

#[test]
fn test_integrand2_values() {
    use crate::utils::Lfsr;

    assert_eq!(integrand2(-1., 0., 2.), 1.);
    assert_eq!(integrand2(2., 1., 0.), 2f64.cos());
    assert!((integrand2(2., 1., 0.) - -0.4161468365).abs() < 1e-10);

    let mut lfsr = Lfsr::new_with_seed(7);
    for _ in 0..5000 {
        let x = lfsr.next_in_range(1e-3, 20.);
        let a = lfsr.next_in_range(-10., 10.);
        let b = lfsr.next_in_range(-4., 4.);
        let expected = (a * x).cos() / x.powf(b);
        assert!(rel_err(integrand2(x, a, b), expected) < 1e-12);

        // cos is even.
        assert_eq!(integrand2(x, a, b), integrand2(x, -a, b));
    }
}

#[test]
fn test_integrand2_domain() {
    // Negative base, fractional exponent.
    assert!(integrand2(-2., 1., 0.5).is_nan());
    // Negative base, integer exponent is fine.
    assert!(integrand2(-2., 1., 3.).is_finite());
    assert_eq!(integrand2(0., 1., 2.), f64::INFINITY);
    assert_eq!(integrand2(0., 1., 3.), f64::INFINITY);
    assert_eq!(integrand2(-0., 1., 3.), f64::NEG_INFINITY);
    // 0^0 is 1.
    assert_eq!(integrand2(0., 5., 0.), 1.);
    // 0^-1 is inf.
    assert_eq!(integrand2(0., 5., -1.), 0.);
}

#[test]
fn test_integrand2_matches_integrand1() {
    use crate::utils::Lfsr;

    let mut lfsr = Lfsr::new_with_seed(3);
    for _ in 0..1000 {
        let x = lfsr.next_in_range(0.01, 100.);
        assert!(rel_err(integrand2(x, 1., 3.), integrand1(x)) < 1e-14);
    }
}

#[test]
fn test_calling_convention() {
    use crate::utils;

    for x in utils::get_special_test_values() {
        let a = integrand1_nd(1, x);
        let b = integrand1(x);
        assert_eq!(a.to_bits(), b.to_bits());
        // The count does not matter.
        assert_eq!(integrand1_nd(0, x).to_bits(), b.to_bits());
        assert_eq!(integrand1_nd(-7, x).to_bits(), b.to_bits());
    }

    let args = [1.5, 2.5, 0.75];
    assert_eq!(
        integrand2_nd(INTEGRAND2_ARITY as i32, &args).to_bits(),
        integrand2(1.5, 2.5, 0.75).to_bits()
    );
    // Order matters: [x, a, b].
    assert_ne!(integrand2_nd(3, &[2.5, 1.5, 0.75]), integrand2_nd(3, &args));
}

#[test]
fn test_repeatable() {
    use crate::utils;

    for x in utils::get_special_test_values() {
        for b in [0., 1., 2.5, -3.] {
            let r0 = integrand2(x, 1.25, b);
            let r1 = integrand2(x, 1.25, b);
            assert_eq!(r0.to_bits(), r1.to_bits());
        }
        assert_eq!(integrand1(x).to_bits(), integrand1(x).to_bits());
    }
}
