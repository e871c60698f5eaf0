//! Plots a curve defined with the `bezier!` macro.
//!
//! The control points are checked at compile time: swapping the two middle
//! x values below turns this file into a compile error.

use haptic_dynamics::{CubicBezier, SampledCurve, bezier};

const BOW: CubicBezier = bezier!((0, 0), (89, 73.95), (99, 140.25), (100, 255));
const EASE: CubicBezier = bezier!((0, 0), (42, 0), (58, 255), (100, 255));

const COLUMNS: i32 = 50;

fn plot(name: &str, bezier: &CubicBezier) {
    let curve = SampledCurve::build(bezier, 100);
    println!("{name}");
    for x in (0..=100).step_by(5) {
        match curve.lookup(x) {
            Some(y) => {
                let width = (y * COLUMNS / 255).max(0) as usize;
                println!("{:>4} {:>4} {}", x, y, "*".repeat(width));
            }
            None => println!("{:>4}    - (no sample within tolerance)", x),
        }
    }
    println!();
}

fn main() {
    plot("Bow drag", &BOW);
    plot("Ease in-out", &EASE);
}
