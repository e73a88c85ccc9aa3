use crate::config::Metric;
use crate::role::RoleCategory;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("weight for {0:?} must be a finite, non-negative number")]
    InvalidWeight(Metric),
    #[error("perfect value for {0:?} must be positive while the metric carries weight")]
    InvalidPerfect(Metric),
    #[error("multiplier for {metric:?} as {role:?} must be a finite, non-negative number")]
    InvalidMultiplier { role: RoleCategory, metric: Metric },
    #[error("bad performance threshold ({bad}) is above good performance threshold ({good})")]
    InvertedPerformanceThresholds { bad: f64, good: f64 },
    #[error("luck normalization factor must be finite")]
    InvalidLuckFactor,
}
