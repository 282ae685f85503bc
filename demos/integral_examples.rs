use integrands::{quad_integrand1, QuadOptions};
use std::f64::consts::PI;
use std::time::Instant;

///! Integrates cos(x)/x^3 over [pi, 2pi] (about -0.0152115) many times and
///! prints the elapsed seconds.
///!  cargo run --example integral_examples --release -- 100000

fn main() {
    env_logger::init();

    let iterations: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(100000);

    let opts = QuadOptions::default();
    let start = Instant::now();
    let mut last = None;
    for _ in 0..iterations {
        last = Some(quad_integrand1(PI, 2. * PI, &opts));
    }
    let elapsed = start.elapsed();

    match last {
        Some(Ok(res)) => {
            println!("value = {}, abserr = {:e}", res.value, res.abserr)
        }
        Some(Err(err)) => eprintln!("error: {}", err),
        None => {}
    }
    println!("{}", elapsed.as_secs_f64());
}
