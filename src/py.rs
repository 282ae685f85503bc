use crate::error::QuadError;
use crate::quad::QuadOptions;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::cell::RefCell;

impl From<QuadError> for PyErr {
    fn from(err: QuadError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn options(epsabs: f64, epsrel: f64, limit: usize) -> QuadOptions {
    QuadOptions {
        epsabs,
        epsrel,
        limit,
    }
}

/// Returns cos(x) / x^3.
#[pyfunction]
fn integrand1(x: f64) -> f64 {
    crate::integrand1(x)
}

/// Returns cos(a * x) / x^b.
#[pyfunction]
fn integrand2(x: f64, a: f64, b: f64) -> f64 {
    crate::integrand2(x, a, b)
}

/// Integrates a Python callable over [lo, hi].
///
/// Args:
///     func: A callable taking and returning a float
///     lo, hi: Finite integration bounds
///     epsabs, epsrel: Absolute and relative tolerance
///     limit: Maximum number of subintervals
///
/// Returns (value, abserr). Exceptions raised by `func` are re-raised.
#[pyfunction]
#[pyo3(signature = (func, lo, hi, epsabs=1.49e-8, epsrel=1.49e-8, limit=50))]
fn quad(
    func: &Bound<'_, PyAny>,
    lo: f64,
    hi: f64,
    epsabs: f64,
    epsrel: f64,
    limit: usize,
) -> PyResult<(f64, f64)> {
    // The driver takes an infallible closure, so the first Python error is
    // stashed and the sample turned into NaN, which stops the driver.
    let failure: RefCell<Option<PyErr>> = RefCell::new(None);
    let f = |x: f64| -> f64 {
        if failure.borrow().is_some() {
            return f64::NAN;
        }
        match func.call1((x,)).and_then(|v| v.extract::<f64>()) {
            Ok(v) => v,
            Err(err) => {
                *failure.borrow_mut() = Some(err);
                f64::NAN
            }
        }
    };
    let res = crate::quad(f, lo, hi, &options(epsabs, epsrel, limit));
    if let Some(err) = failure.into_inner() {
        return Err(err);
    }
    let res = res?;
    Ok((res.value, res.abserr))
}

/// Integrates cos(x) / x^3 over [lo, hi] without calling back into Python.
#[pyfunction]
#[pyo3(signature = (lo, hi, epsabs=1.49e-8, epsrel=1.49e-8, limit=50))]
fn quad_integrand1(
    lo: f64,
    hi: f64,
    epsabs: f64,
    epsrel: f64,
    limit: usize,
) -> PyResult<(f64, f64)> {
    let res = crate::quad_integrand1(lo, hi, &options(epsabs, epsrel, limit))?;
    Ok((res.value, res.abserr))
}

/// Integrates cos(a * x) / x^b over [lo, hi] without calling back into
/// Python.
#[pyfunction]
#[pyo3(signature = (lo, hi, a, b, epsabs=1.49e-8, epsrel=1.49e-8, limit=50))]
fn quad_integrand2(
    lo: f64,
    hi: f64,
    a: f64,
    b: f64,
    epsabs: f64,
    epsrel: f64,
    limit: usize,
) -> PyResult<(f64, f64)> {
    let opts = options(epsabs, epsrel, limit);
    let res = crate::quad_integrand2(lo, hi, a, b, &opts)?;
    Ok((res.value, res.abserr))
}

#[pymodule]
fn _integrands(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(integrand1, m)?)?;
    m.add_function(wrap_pyfunction!(integrand2, m)?)?;
    m.add_function(wrap_pyfunction!(quad, m)?)?;
    m.add_function(wrap_pyfunction!(quad_integrand1, m)?)?;
    m.add_function(wrap_pyfunction!(quad_integrand2, m)?)?;
    Ok(())
}
