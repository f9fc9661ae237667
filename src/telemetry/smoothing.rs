use super::sample::TelemetrySample;

/// Widest moving-average window, samples.
pub const MAX_WINDOW: usize = 9;

/// Moving-average window for a series of `len` samples: `min(9, len / 10)`,
/// bumped to the next odd number.
pub fn window_size(len: usize) -> usize {
    let w = MAX_WINDOW.min(len / 10);
    if w % 2 == 0 {
        w + 1
    } else {
        w
    }
}

/// Centred moving average of orbital speed. The `window / 2` samples at each
/// end keep their raw values; series of fewer than 6 samples are returned
/// unchanged.
pub fn smooth_speeds(samples: &[TelemetrySample]) -> Vec<f64> {
    let raw: Vec<f64> = samples.iter().map(|s| s.orbital_speed).collect();
    if raw.len() < 6 {
        return raw;
    }
    let window = window_size(raw.len());
    let edge = window / 2;
    let mut smooth = raw.clone();
    for i in edge..raw.len() - edge {
        let sum: f64 = raw[i - edge..=i + edge].iter().sum();
        smooth[i] = sum / window as f64;
    }
    smooth
}
