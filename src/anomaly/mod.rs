mod detector;
mod forest;

pub use detector::{AnomalyDetector, Classification, DetectorError};
