//! Adaptive Gauss-Kronrod quadrature over a finite interval.
//!
//! The driver follows the globally adaptive strategy of QUADPACK's QAG: the
//! range starts as one panel, and the panel with the largest error estimate
//! is bisected until the total error meets the tolerance or the panel limit
//! is reached. Each panel is integrated with the 21-point Kronrod rule, and
//! the embedded 10-point Gauss rule provides the error estimate.

use crate::error::{QuadError, Result};
use crate::integrand::{integrand1, integrand2};
use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Options for adaptive quadrature.
#[derive(Debug, Clone)]
pub struct QuadOptions {
    /// Absolute tolerance (default: 1.49e-8)
    pub epsabs: f64,
    /// Relative tolerance (default: 1.49e-8)
    pub epsrel: f64,
    /// Maximum number of panels (default: 50)
    pub limit: usize,
}

impl Default for QuadOptions {
    fn default() -> Self {
        Self {
            epsabs: 1.49e-8,
            epsrel: 1.49e-8,
            limit: 50,
        }
    }
}

/// Result of adaptive quadrature.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadResult {
    /// Computed integral value
    pub value: f64,
    /// Estimated absolute error
    pub abserr: f64,
    /// Number of integrand evaluations
    pub neval: usize,
    /// Number of panels in the final partition
    pub intervals: usize,
    /// Whether the error estimate met the tolerance
    pub converged: bool,
}

// Kronrod abscissae on [-1, 1], descending. The odd entries are the
// 10-point Gauss abscissae.
const XGK: [f64; 11] = [
    0.995657163025808080735527280689003,
    0.973906528517171720077964012084452,
    0.930157491355708226001207180059508,
    0.865063366688984510732096688423493,
    0.780817726586416897063717578345042,
    0.679409568299024406234327365114874,
    0.562757134668604683339000099272694,
    0.433395394129247190799265943165784,
    0.294392862701460198131126603103866,
    0.148874338981631210884826001129720,
    0.000000000000000000000000000000000,
];

const WGK: [f64; 11] = [
    0.011694638867371874278064396062192,
    0.032558162307964727478818972459390,
    0.054755896574351996031381300244580,
    0.075039674810919952767043140916190,
    0.093125454583697605535065465083366,
    0.109387158802297641899210590325805,
    0.123491976262065851077600525478610,
    0.134709217311473325928054001771707,
    0.142775938577060080797094273138717,
    0.147739104901338491374841515972068,
    0.149445554002916905664936468389821,
];

const WG: [f64; 5] = [
    0.066671344308688137593568809893332,
    0.149451349150580593145776339657697,
    0.219086362515982043995534934228163,
    0.269266719309996355091226921569469,
    0.295524224714752870173892994651338,
];

/// Evaluations per panel.
pub const KRONROD_POINTS: usize = 21;

/// One subinterval with its Kronrod estimate and error.
#[derive(Debug, Clone, Copy)]
struct Panel {
    lo: f64,
    hi: f64,
    value: f64,
    error: f64,
}

// The heap is ordered by error so that the worst panel is popped first.
impl PartialEq for Panel {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Panel {}
impl PartialOrd for Panel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Panel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error.total_cmp(&other.error)
    }
}

impl Panel {
    /// Apply the 21-point Kronrod rule on [lo, hi].
    fn evaluate<F: Fn(f64) -> f64>(f: &F, lo: f64, hi: f64) -> Result<Panel> {
        // Halve before combining so wide finite ranges do not overflow.
        let center = 0.5 * lo + 0.5 * hi;
        let half = 0.5 * hi - 0.5 * lo;

        let fc = f(center);
        let mut res_k = WGK[10] * fc;
        let mut res_g = 0.;
        let mut res_abs = res_k.abs();
        let mut fv1 = [0.; 10];
        let mut fv2 = [0.; 10];

        for j in 0..10 {
            let dx = half * XGK[j];
            let f1 = f(center - dx);
            let f2 = f(center + dx);
            fv1[j] = f1;
            fv2[j] = f2;
            res_k += WGK[j] * (f1 + f2);
            res_abs += WGK[j] * (f1.abs() + f2.abs());
            if j % 2 == 1 {
                res_g += WG[j / 2] * (f1 + f2);
            }
        }

        if !res_k.is_finite() {
            return Err(QuadError::NonFiniteValue { lo, hi });
        }

        // Integral of |f - mean| over the panel, used to scale the raw
        // Gauss/Kronrod difference.
        let mean = 0.5 * res_k;
        let mut res_asc = WGK[10] * (fc - mean).abs();
        for j in 0..10 {
            res_asc += WGK[j] * ((fv1[j] - mean).abs() + (fv2[j] - mean).abs());
        }

        let value = res_k * half;
        let res_abs = res_abs * half.abs();
        let res_asc = res_asc * half.abs();
        let mut error = ((res_k - res_g) * half).abs();

        if res_asc != 0. && error != 0. {
            error = res_asc * f64::min(1., (200. * error / res_asc).powf(1.5));
        }
        if res_abs > f64::MIN_POSITIVE / (50. * f64::EPSILON) {
            error = f64::max(50. * f64::EPSILON * res_abs, error);
        }

        if !value.is_finite() || !error.is_finite() {
            return Err(QuadError::NonFiniteValue { lo, hi });
        }

        Ok(Panel {
            lo,
            hi,
            value,
            error,
        })
    }
}

fn check_options(lo: f64, hi: f64, opts: &QuadOptions) -> Result<()> {
    if !lo.is_finite() || !hi.is_finite() {
        return Err(QuadError::InvalidBounds { lo, hi });
    }
    let (epsabs, epsrel) = (opts.epsabs, opts.epsrel);
    let bad = epsabs.is_nan()
        || epsrel.is_nan()
        || epsabs < 0.
        || epsrel < 0.
        || (epsabs == 0. && epsrel < 50. * f64::EPSILON);
    if bad {
        return Err(QuadError::InvalidTolerance { epsabs, epsrel });
    }
    if opts.limit == 0 {
        return Err(QuadError::InvalidLimit);
    }
    Ok(())
}

/// Integrate `f` over [lo, hi].
///
/// Reversed bounds integrate over [hi, lo] and negate the value. Hitting the
/// panel limit is not an error; the result is returned with
/// `converged == false`.
pub fn quad<F: Fn(f64) -> f64>(
    f: F,
    lo: f64,
    hi: f64,
    opts: &QuadOptions,
) -> Result<QuadResult> {
    check_options(lo, hi, opts)?;

    if lo == hi {
        return Ok(QuadResult {
            value: 0.,
            abserr: 0.,
            neval: 0,
            intervals: 0,
            converged: true,
        });
    }
    if lo > hi {
        let mut res = integrate(&f, hi, lo, opts)?;
        res.value = -res.value;
        return Ok(res);
    }
    integrate(&f, lo, hi, opts)
}

fn integrate<F: Fn(f64) -> f64>(
    f: &F,
    lo: f64,
    hi: f64,
    opts: &QuadOptions,
) -> Result<QuadResult> {
    let tolerance = |value: f64| f64::max(opts.epsabs, opts.epsrel * value.abs());

    let first = Panel::evaluate(f, lo, hi)?;
    let mut neval = KRONROD_POINTS;
    let mut value = first.value;
    let mut error = first.error;

    let mut panels = BinaryHeap::new();
    panels.push(first);

    while error > tolerance(value) && panels.len() < opts.limit {
        let Some(worst) = panels.pop() else { break };
        let mid = 0.5 * worst.lo + 0.5 * worst.hi;

        // The panel can no longer be split in floating point.
        if !(worst.lo < mid && mid < worst.hi) {
            warn!("panel [{}, {}] is too narrow to bisect", worst.lo, worst.hi);
            panels.push(worst);
            break;
        }

        let left = Panel::evaluate(f, worst.lo, mid)?;
        let right = Panel::evaluate(f, mid, worst.hi)?;
        neval += 2 * KRONROD_POINTS;

        value += left.value + right.value - worst.value;
        error += left.error + right.error - worst.error;
        debug!(
            "bisect [{}, {}] at {}: value = {}, error = {}",
            worst.lo, worst.hi, mid, value, error
        );

        panels.push(left);
        panels.push(right);
    }

    // Re-sum to drop the drift from the running updates.
    value = panels.iter().map(|p| p.value).sum();
    error = panels.iter().map(|p| p.error).sum();
    if !value.is_finite() || !error.is_finite() {
        return Err(QuadError::NonFiniteValue { lo, hi });
    }
    let converged = error <= tolerance(value);
    if !converged {
        warn!(
            "quad did not converge on [{}, {}] with {} panels: error = {}",
            lo,
            hi,
            panels.len(),
            error
        );
    }

    Ok(QuadResult {
        value,
        abserr: error,
        neval,
        intervals: panels.len(),
        converged,
    })
}

/// Integrate cos(x) / x^3 over [lo, hi].
pub fn quad_integrand1(lo: f64, hi: f64, opts: &QuadOptions) -> Result<QuadResult> {
    quad(integrand1, lo, hi, opts)
}

/// Integrate cos(a * x) / x^b over [lo, hi].
pub fn quad_integrand2(
    lo: f64,
    hi: f64,
    a: f64,
    b: f64,
    opts: &QuadOptions,
) -> Result<QuadResult> {
    quad(|x| integrand2(x, a, b), lo, hi, opts)
}

#[test]
fn test_reference_integral() {
    use core::f64::consts::PI;

    let res = quad_integrand1(PI, 2. * PI, &QuadOptions::default()).unwrap();
    assert!(res.converged);
    assert!((res.value - -0.0152114528800756).abs() < 1e-10, "{}", res.value);
    assert!(res.abserr <= 1.49e-8);
    assert_eq!(res.neval % KRONROD_POINTS, 0);

    // Same integral through the general integrand.
    let res2 = quad_integrand2(PI, 2. * PI, 1., 3., &QuadOptions::default()).unwrap();
    assert!((res.value - res2.value).abs() < 1e-14);
}

#[test]
fn test_polynomials() {
    let opts = QuadOptions::default();

    // The Kronrod rule is exact for low-degree polynomials.
    let res = quad(|x| x * x, 0., 1., &opts).unwrap();
    assert!((res.value - 1. / 3.).abs() < 1e-15);
    assert!(res.converged);
    assert_eq!(res.neval, KRONROD_POINTS);
    assert_eq!(res.intervals, 1);

    let res = quad(|x| 3. * x * x - 2. * x + 1., -2., 3., &opts).unwrap();
    // [x^3 - x^2 + x] from -2 to 3 = 21 - (-14) = 35.
    assert!((res.value - 35.).abs() < 1e-12);
}

#[test]
fn test_trig() {
    use core::f64::consts::PI;

    let opts = QuadOptions::default();
    let res = quad(f64::cos, 0., PI, &opts).unwrap();
    assert!(res.value.abs() < 1e-12);
    let res = quad(f64::sin, 0., PI, &opts).unwrap();
    assert!((res.value - 2.).abs() < 1e-12);

    // cos(40x) over [0.5, 1].
    let res = quad_integrand2(0.5, 1., 40., 0., &opts).unwrap();
    let expected = ((40f64).sin() - (20f64).sin()) / 40.;
    assert!(res.converged);
    assert!((res.value - expected).abs() < 1e-10);
}

#[test]
fn test_bounds_order() {
    use core::f64::consts::PI;

    let opts = QuadOptions::default();
    let fwd = quad_integrand1(PI, 2. * PI, &opts).unwrap();
    let rev = quad_integrand1(2. * PI, PI, &opts).unwrap();
    assert_eq!(fwd.value, -rev.value);
    assert_eq!(fwd.abserr, rev.abserr);

    let empty = quad_integrand1(1., 1., &opts).unwrap();
    assert_eq!(empty.value, 0.);
    assert_eq!(empty.neval, 0);
    assert!(empty.converged);
}

#[test]
fn test_invalid_options() {
    let opts = QuadOptions::default();
    assert_eq!(
        quad_integrand1(0., f64::INFINITY, &opts),
        Err(QuadError::InvalidBounds {
            lo: 0.,
            hi: f64::INFINITY
        })
    );
    assert!(matches!(
        quad_integrand1(f64::NAN, 1., &opts),
        Err(QuadError::InvalidBounds { .. })
    ));

    let bad = QuadOptions {
        epsabs: 0.,
        epsrel: 0.,
        ..QuadOptions::default()
    };
    assert!(matches!(
        quad_integrand1(1., 2., &bad),
        Err(QuadError::InvalidTolerance { .. })
    ));

    let bad = QuadOptions {
        epsabs: -1.,
        ..QuadOptions::default()
    };
    assert!(matches!(
        quad_integrand1(1., 2., &bad),
        Err(QuadError::InvalidTolerance { .. })
    ));

    let bad = QuadOptions {
        limit: 0,
        ..QuadOptions::default()
    };
    assert_eq!(quad_integrand1(1., 2., &bad), Err(QuadError::InvalidLimit));

    // With no absolute tolerance the relative one must stay above the
    // rounding floor of 50 ulps.
    let tight = QuadOptions {
        epsabs: 0.,
        epsrel: 1e-15,
        ..QuadOptions::default()
    };
    assert_eq!(
        quad(|x| x, 0., 1., &tight),
        Err(QuadError::InvalidTolerance {
            epsabs: 0.,
            epsrel: 1e-15
        })
    );
    let relative_only = QuadOptions {
        epsabs: 0.,
        epsrel: 1e-12,
        ..QuadOptions::default()
    };
    let res = quad(|x| x, 0., 1., &relative_only).unwrap();
    assert!((res.value - 0.5).abs() < 1e-15);
}

#[test]
fn test_pole() {
    // The center node of the first panel lands on the pole at zero.
    let res = quad_integrand1(-1., 1., &QuadOptions::default());
    assert_eq!(res, Err(QuadError::NonFiniteValue { lo: -1., hi: 1. }));

    // Negative base with a fractional exponent is NaN everywhere.
    let res = quad_integrand2(-2., -1., 1., 0.5, &QuadOptions::default());
    assert!(matches!(res, Err(QuadError::NonFiniteValue { .. })));

    // A pole that no node lands on shows up as a failure to converge.
    let res = quad_integrand1(-1., 2., &QuadOptions::default()).unwrap();
    assert!(!res.converged);
}

#[test]
fn test_wide_range() {
    let opts = QuadOptions::default();

    // The width overflows but the half-width does not.
    let res = quad(|x| (-x * x).exp(), -1e308, 1e308, &opts).unwrap();
    assert!(res.value.is_finite());
    assert!(res.abserr.is_finite());

    // The integral itself is beyond f64.
    let res = quad(|_| 1e300, -1e308, 1e308, &opts);
    assert_eq!(
        res,
        Err(QuadError::NonFiniteValue {
            lo: -1e308,
            hi: 1e308
        })
    );
}

#[test]
fn test_cancelling_huge_values() {
    // The samples cancel in the sum, but their magnitudes overflow.
    let step = |x: f64| if x < 0.5 { -1.7e308 } else { 1.7e308 };
    let res = quad(step, 0., 1., &QuadOptions::default());
    assert_eq!(res, Err(QuadError::NonFiniteValue { lo: 0., hi: 1. }));
}

#[test]
fn test_limit_reached() {
    let opts = QuadOptions {
        limit: 1,
        ..QuadOptions::default()
    };
    let res = quad_integrand2(1., 100., 50., 1., &opts).unwrap();
    assert!(!res.converged);
    assert_eq!(res.intervals, 1);
    assert_eq!(res.neval, KRONROD_POINTS);

    let opts = QuadOptions {
        limit: 4,
        ..QuadOptions::default()
    };
    let res = quad_integrand2(1., 100., 50., 1., &opts).unwrap();
    assert!(res.intervals <= 4);
    assert!(!res.converged);
}
