//! Engine policies.

use serde::{Deserialize, Serialize};

/// What to do with a repeating definition that has no `repeat_until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnboundedHorizon {
    /// Treat the series as open-ended, bounded only by the query window.
    #[default]
    ClampToQueryWindow,
    /// Treat the series as covering its start date only.
    StartDateOnly,
}

/// How an accepted create request is written back to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Materialization {
    /// One non-repeating definition per occurrence date, linked by a shared series id.
    #[default]
    PerOccurrence,
    /// The request is stored as a single (possibly repeating) definition.
    Series,
}

/// Tunable behaviour of the booking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineOptions {
    pub unbounded_horizon: UnboundedHorizon,
    pub materialization: Materialization,
}
