use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::sample::TelemetrySample;
use super::smoothing::smooth_speeds;
use crate::error::{require_positive, ConfigError, SignatureError};

// ---------------------------------------------------------------------------
// Booster separation from a recorded thrust trace
// ---------------------------------------------------------------------------

/// Thrust-drop heuristic for finding booster cutoff in recorded telemetry.
///
/// A separation is sample `i` where thrust falls below `drop_ratio` of the
/// previous sample while staying positive, and `lookahead` samples later it
/// has recovered above `recovery_ratio` times the dip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureDetector {
    pub drop_ratio: f64,
    pub recovery_ratio: f64,
    pub lookahead: usize,      // samples
    pub warmup: usize,         // samples skipped at the start of the trace
    pub min_samples: usize,    // traces of this length or shorter are not searched
    pub fallback_time: f64,    // s, calibrated from earlier flights
}

impl Default for SignatureDetector {
    fn default() -> Self {
        Self {
            drop_ratio: 0.4,
            recovery_ratio: 1.5,
            lookahead: 10,
            warmup: 20,
            min_samples: 50,
            fallback_time: 76.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeparationSource {
    Detected,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeparationEstimate {
    pub time: f64,
    /// Detected sample, or the one nearest the fallback time.
    pub index: Option<usize>,
    /// Smoothed orbital speed at `index`.
    pub speed: Option<f64>,
    pub source: SeparationSource,
}

impl SignatureDetector {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("signature.drop_ratio", self.drop_ratio)?;
        if self.drop_ratio >= 1.0 {
            return Err(ConfigError::out_of_range("signature.drop_ratio", self.drop_ratio, "< 1"));
        }
        require_positive("signature.recovery_ratio", self.recovery_ratio)?;
        if self.lookahead == 0 {
            return Err(ConfigError::out_of_range("signature.lookahead", 0.0, ">= 1"));
        }
        if self.warmup == 0 {
            return Err(ConfigError::out_of_range("signature.warmup", 0.0, ">= 1"));
        }
        require_positive("signature.fallback_time", self.fallback_time)?;
        Ok(())
    }

    /// Index of the first sample matching the separation signature.
    pub fn find_signature(&self, samples: &[TelemetrySample]) -> Result<usize, SignatureError> {
        if samples.len() <= self.min_samples {
            return Err(SignatureError::TooFewSamples {
                got: samples.len(),
                need: self.min_samples,
            });
        }
        let start = self.warmup.max(1);
        let end = samples.len().saturating_sub(self.lookahead);
        (start..end)
            .find(|&i| {
                let dip = samples[i].thrust;
                dip > 0.0
                    && dip < samples[i - 1].thrust * self.drop_ratio
                    && samples[i + self.lookahead].thrust > dip * self.recovery_ratio
            })
            .ok_or(SignatureError::NotFound { samples: samples.len() })
    }

    /// Separation estimate that never fails: a missing signature resolves to
    /// the fallback time, marked as such and logged.
    pub fn detect(&self, samples: &[TelemetrySample]) -> SeparationEstimate {
        let speeds = smooth_speeds(samples);
        match self.find_signature(samples) {
            Ok(i) => {
                debug!(
                    "booster separation detected at sample {} (t={:.1}s, thrust {:.0} -> {:.0} N)",
                    i,
                    samples[i].mission_time,
                    samples[i - 1].thrust,
                    samples[i].thrust
                );
                SeparationEstimate {
                    time: samples[i].mission_time,
                    index: Some(i),
                    speed: speeds.get(i).copied(),
                    source: SeparationSource::Detected,
                }
            }
            Err(err) => {
                warn!("{}; using fallback separation time {:.1}s", err, self.fallback_time);
                let index = nearest_time_index(samples, self.fallback_time);
                SeparationEstimate {
                    time: self.fallback_time,
                    index,
                    speed: index.and_then(|i| speeds.get(i).copied()),
                    source: SeparationSource::Fallback,
                }
            }
        }
    }
}

fn nearest_time_index(samples: &[TelemetrySample], time: f64) -> Option<usize> {
    samples
        .iter()
        .enumerate()
        .min_by(|a, b| {
            let da = (a.1.mission_time - time).abs();
            let db = (b.1.mission_time - time).abs();
            da.total_cmp(&db)
        })
        .map(|(i, _)| i)
}
