//! Wavelength to RGB mapping
//!
//! Piecewise nm → RGB over an extended false-color range so extreme
//! red/blueshift stays visually distinguishable instead of clipping to
//! black. The visible 380-780 nm segments follow the standard
//! physiologically-motivated piecewise-linear approximation with
//! edge-intensity tapering and a ^0.8 gamma correction; UV fades to
//! white-blue, IR fades through red to dark brown.

/// Gamma applied to the visible-range channels
const GAMMA: f64 = 0.8;

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Map a wavelength in nm to linear RGB channels in [0, 1].
pub fn wavelength_to_rgb(nm: f64) -> [f32; 3] {
    // Extreme UV: flat white-blue
    if nm < 300.0 {
        return [0.59, 0.78, 1.0];
    }
    // Near UV: fade from white-blue into the violet edge
    if nm < 380.0 {
        let t = (nm - 300.0) / 80.0;
        return [
            lerp(0.59, 0.29, t) as f32,
            lerp(0.78, 0.0, t) as f32,
            1.0,
        ];
    }
    // Near IR: fade the tapered red edge through dark brown
    if nm >= 780.0 {
        if nm >= 1200.0 {
            return [0.10, 0.04, 0.0];
        }
        let t = (nm - 780.0) / 420.0;
        return [lerp(0.38, 0.12, t) as f32, (0.05 * t) as f32, 0.0];
    }

    // Visible range: piecewise-linear hue bands
    let (r, g, b) = if nm < 440.0 {
        ((440.0 - nm) / 60.0, 0.0, 1.0)
    } else if nm < 490.0 {
        (0.0, (nm - 440.0) / 50.0, 1.0)
    } else if nm < 510.0 {
        (0.0, 1.0, (510.0 - nm) / 20.0)
    } else if nm < 580.0 {
        ((nm - 510.0) / 70.0, 1.0, 0.0)
    } else if nm < 645.0 {
        (1.0, (645.0 - nm) / 65.0, 0.0)
    } else {
        (1.0, 0.0, 0.0)
    };

    // Intensity tapers off toward the edges of perception
    let taper = if nm < 420.0 {
        0.3 + 0.7 * (nm - 380.0) / 40.0
    } else if nm > 700.0 {
        0.3 + 0.7 * (780.0 - nm) / 80.0
    } else {
        1.0
    };

    [
        (r * taper).powf(GAMMA) as f32,
        (g * taper).powf(GAMMA) as f32,
        (b * taper).powf(GAMMA) as f32,
    ]
}
