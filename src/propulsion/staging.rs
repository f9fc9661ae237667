use crate::dynamics::state::VehicleState;
use crate::telemetry::{SeparationEstimate, SeparationSource};
use crate::vehicle::StageSpec;

/// What a staging policy sees when deciding whether the active burn ends.
#[derive(Debug, Clone, Copy)]
pub struct StagingContext<'a> {
    pub stage_index: usize,
    pub stage: &'a StageSpec,
    pub stage_elapsed: f64, // s since this stage ignited
    pub state: &'a VehicleState,
}

/// Trait for staging policies.
///
/// Implement this to decide when the active stage stops burning; the
/// propulsion model then separates it (or enters burnout after the last
/// stage). Selected once per run and consulted at the start of every step.
pub trait StagingPolicy {
    /// Whether the active stage's burn is over at the current state.
    fn should_end_burn(&mut self, ctx: &StagingContext) -> bool;

    /// Reset internal state before a new run.
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

// ---------------------------------------------------------------------------
// Time-triggered: each stage burns for its precomputed duration
// ---------------------------------------------------------------------------

/// Ends a burn once the stage has fired for `propellant / mass_flow` seconds
/// (or its explicit burn time).
#[derive(Debug, Clone, Copy, Default)]
pub struct BurnTimeStaging;

impl StagingPolicy for BurnTimeStaging {
    fn should_end_burn(&mut self, ctx: &StagingContext) -> bool {
        ctx.stage_elapsed >= ctx.stage.burn_time()
    }

    fn name(&self) -> &str {
        "BurnTimeStaging"
    }
}

// ---------------------------------------------------------------------------
// Scheduled: burn ends at fixed mission times (e.g. derived from telemetry)
// ---------------------------------------------------------------------------

/// Ends stage `i`'s burn at mission time `end_times[i]`. Stages without a
/// scheduled time fall back to their burn duration.
#[derive(Debug, Clone, Default)]
pub struct ScheduledStaging {
    pub end_times: Vec<f64>,
    pub fallback_used: bool,
}

impl ScheduledStaging {
    pub fn new(end_times: Vec<f64>) -> Self {
        Self { end_times, fallback_used: false }
    }

    /// Booster cutoff at the time recovered from recorded telemetry.
    pub fn from_estimate(estimate: &SeparationEstimate) -> Self {
        Self {
            end_times: vec![estimate.time],
            fallback_used: estimate.source == SeparationSource::Fallback,
        }
    }
}

impl StagingPolicy for ScheduledStaging {
    fn should_end_burn(&mut self, ctx: &StagingContext) -> bool {
        match self.end_times.get(ctx.stage_index) {
            Some(&t) => ctx.state.time >= t,
            None => ctx.stage_elapsed >= ctx.stage.burn_time(),
        }
    }

    fn name(&self) -> &str {
        if self.fallback_used {
            "ScheduledStaging (fallback)"
        } else {
            "ScheduledStaging"
        }
    }
}
