//! Duration Rendering
//!
//! Renders a measurement as `value±error` with a unit chosen from the
//! value's magnitude, both numbers in that unit (`22.2±0.41ms` style).

use benchdiff_core::Estimate;

/// Render an estimate in the unit matching its magnitude.
pub fn format_measurement(estimate: &Estimate) -> String {
    let (scale, unit) = unit_for(estimate.seconds);
    format!(
        "{:.1}±{:.2}{}",
        estimate.seconds * scale,
        estimate.std_err * scale,
        unit
    )
}

fn unit_for(seconds: f64) -> (f64, &'static str) {
    let magnitude = seconds.abs();
    if magnitude >= 1.0 {
        (1.0, "s")
    } else if magnitude >= 1e-3 {
        (1e3, "ms")
    } else if magnitude >= 1e-6 {
        (1e6, "µs")
    } else {
        (1e9, "ns")
    }
}
