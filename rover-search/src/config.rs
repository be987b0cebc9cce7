//! Tunable runtime parameters for the search driver.

use std::time::Duration;

use env_param::EnvParam;

use rover_core::limits::DEFAULT_TIMEOUT_SECS;

/// How many nodes to generate between wall-clock timeout checks.
static TIMEOUT_CHECK_PERIOD: EnvParam<u64> = EnvParam::new("ROVER_TIMEOUT_CHECK_PERIOD", "1000");

/// Wall-clock budget for a single search, in seconds. Overrides the
/// default compiled into `rover_core::limits::DEFAULT_TIMEOUT_SECS`.
static TIMEOUT_SECS: EnvParam<u64> = EnvParam::new("ROVER_TIMEOUT_SECS", "0");

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Method {
    /// Greedy best-first search: `f := h`. Fast, not guaranteed optimal.
    Satisficing,
    /// Weighted A*: `f := g + h`, admissible `h` ⇒ optimal plan.
    Optimal,
}

impl Method {
    pub fn parse(s: &str) -> Option<Method> {
        match s {
            "best" => Some(Method::Satisficing),
            "astar" => Some(Method::Optimal),
            _ => None,
        }
    }
}

pub struct Cfg {
    pub method: Method,
    pub timeout: Duration,
    pub timeout_check_period: u64,
}

impl Cfg {
    pub fn new(method: Method) -> Self {
        let configured = TIMEOUT_SECS.get();
        let timeout_secs = if configured == 0 { DEFAULT_TIMEOUT_SECS } else { configured };
        Cfg {
            method,
            timeout: Duration::from_secs(timeout_secs),
            timeout_check_period: TIMEOUT_CHECK_PERIOD.get(),
        }
    }
}
