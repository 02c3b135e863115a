//! Container state classification and aggregation.
//!
//! Every container reported by the runtime lands in exactly one
//! [`MetricBucket`]. Non-running lifecycle states map to a bucket of the same
//! name. Running containers are split further by the health check suffix of
//! their status text (see [`HealthStatus`]).
//!
//! [`aggregate`] tallies a whole snapshot into a [`MetricSet`] and derives the
//! optional `total` and `failing` rollups.
mod aggregate;
mod bucket;
mod classify;
mod error;
mod health;

pub use aggregate::{MetricSet, aggregate};
pub use bucket::{METRIC_FAILING, METRIC_TOTAL, MetricBucket};
pub use classify::classify;
pub use error::{Error, Result};
pub use health::{HealthStatus, SUFFIX_HEALTHY, SUFFIX_STARTING, SUFFIX_UNHEALTHY};
