//! Deterministic fault injection for the simulated processing service
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: No randomness; faults fire in plan order
//! - **Composable**: Multiple faults can be combined in one plan
//! - **Test-focused**: Not intended for production use
//!
//! ## Example
//!
//! ```
//! use sim_firmware::fault_injection::{FaultPlan, ServiceFault};
//! use firmware_types::Status;
//!
//! let plan = FaultPlan::new()
//!     .with_service_fault(ServiceFault::FailNext { count: 2, status: Status::DeviceError })
//!     .with_service_fault(ServiceFault::FailAbove { limit: 0x1000, status: Status::BadBufferSize });
//! ```

use firmware_types::Status;

/// A fault to inject into processing calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceFault {
    /// Fail the next N calls with `status`, before any validation
    FailNext { count: usize, status: Status },

    /// Fail every call whose length exceeds `limit`
    FailAbove { limit: u64, status: Status },
}

/// A plan describing all faults to inject
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    service_faults: Vec<ServiceFault>,
}

impl FaultPlan {
    /// Creates a new empty fault plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a service fault to the plan
    pub fn with_service_fault(mut self, fault: ServiceFault) -> Self {
        self.service_faults.push(fault);
        self
    }

    /// Returns a reference to the service faults
    pub fn service_faults(&self) -> &[ServiceFault] {
        &self.service_faults
    }
}

/// Applies a [`FaultPlan`] to a stream of processing calls
#[derive(Debug)]
pub struct FaultInjector {
    plan: FaultPlan,
    calls_seen: usize,
    remaining: Vec<usize>,
}

impl FaultInjector {
    /// Creates a new fault injector with the given plan
    pub fn new(plan: FaultPlan) -> Self {
        let remaining = plan
            .service_faults()
            .iter()
            .map(|fault| match fault {
                ServiceFault::FailNext { count, .. } => *count,
                ServiceFault::FailAbove { .. } => 0,
            })
            .collect();
        Self {
            plan,
            calls_seen: 0,
            remaining,
        }
    }

    /// Returns the forced status for a call with `length`, if any
    ///
    /// Faults are checked in plan order; the first that fires wins.
    pub fn check_call(&mut self, length: u64) -> Option<Status> {
        self.calls_seen += 1;
        for (index, fault) in self.plan.service_faults().iter().enumerate() {
            match *fault {
                ServiceFault::FailNext { status, .. } => {
                    if self.remaining[index] > 0 {
                        self.remaining[index] -= 1;
                        return Some(status);
                    }
                }
                ServiceFault::FailAbove { limit, status } => {
                    if length > limit {
                        return Some(status);
                    }
                }
            }
        }
        None
    }

    /// Number of calls checked so far
    pub fn calls_seen(&self) -> usize {
        self.calls_seen
    }

    pub fn plan(&self) -> &FaultPlan {
        &self.plan
    }
}
