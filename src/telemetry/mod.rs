pub mod sample;
pub mod signature;
pub mod smoothing;

pub use sample::{read_telemetry, read_telemetry_csv, TelemetrySample};
pub use signature::{SeparationEstimate, SeparationSource, SignatureDetector};
pub use smoothing::smooth_speeds;
