//! Envelope Types
//!
//! Per-sample flags only. No evaluation logic here.

use serde::{Deserialize, Serialize};

/// Which monitored quantities sit inside their envelope for one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvelopeFlags {
    /// Engine under load (throttle gate)
    pub throttle_active: bool,
    pub mixture_ok: bool,
    pub fuel_ok: bool,
    pub intake_ok: bool,
    pub coolant_ok: bool,
}

impl EnvelopeFlags {
    /// Every monitored quantity is inside its envelope
    pub fn all_ok(&self) -> bool {
        self.mixture_ok && self.fuel_ok && self.intake_ok && self.coolant_ok
    }

    /// Envelope breach while under load. Idling out of envelope never counts.
    pub fn raw_violation(&self) -> bool {
        self.throttle_active && !self.all_ok()
    }

    /// Names of the quantities currently out of envelope
    pub fn breaches(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if !self.mixture_ok {
            out.push("mixture");
        }
        if !self.fuel_ok {
            out.push("fuel_pressure");
        }
        if !self.intake_ok {
            out.push("intake_air_temp");
        }
        if !self.coolant_ok {
            out.push("coolant_temp");
        }
        out
    }
}
