//! Metrics module for zones and session summaries.

pub mod summary;
pub mod zones;

pub use summary::{AerobicPlan, AerobicSummary, AutoplayPlan, AutoplaySummary, StrictPlan, StrictSummary};
pub use zones::{IntensityZone, ZoneTime};
