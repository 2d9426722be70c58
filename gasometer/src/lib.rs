//! Step budget metering for RainVM.

#![cfg_attr(not(feature = "std"), no_std)]

mod costs;

pub use crate::costs::step_cost;

use rainvm_core::{ExitError, Opcode};

macro_rules! log_cost {
	( $used:expr, $cost:expr, $limit:expr ) => {
		#[cfg(feature = "force-debug")]
		log::trace!(target: "rainvm", "Recording cost: used={}, cost={}, limit={}", $used, $cost, $limit);
	};
}

/// Tracks how many steps an evaluation has consumed against a fixed budget.
/// Once the budget is exceeded every further record fails.
#[derive(Clone, Debug)]
pub struct Gasometer {
	limit: u64,
	inner: Result<u64, ExitError>,
}

impl Gasometer {
	pub fn new(limit: u64) -> Self {
		Self {
			limit,
			inner: Ok(0),
		}
	}

	pub fn limit(&self) -> u64 {
		self.limit
	}

	/// Steps used so far. A failed gasometer reports the whole budget as used.
	pub fn used(&self) -> u64 {
		match self.inner {
			Ok(used) => used,
			Err(_) => self.limit,
		}
	}

	pub fn remaining(&self) -> u64 {
		self.limit - self.used()
	}

	pub fn is_exhausted(&self) -> bool {
		self.inner.is_err()
	}

	/// Record the cost of executing `opcode` with `operand`.
	pub fn record_step(&mut self, opcode: Opcode, operand: u8) -> Result<(), ExitError> {
		self.record_cost(step_cost(opcode, operand))
	}

	pub fn record_cost(&mut self, cost: u64) -> Result<(), ExitError> {
		let used = self.inner?;
		log_cost!(used, cost, self.limit);

		match used.checked_add(cost) {
			Some(all) if all <= self.limit => {
				self.inner = Ok(all);
				Ok(())
			}
			_ => Err(self.fail()),
		}
	}

	pub fn fail(&mut self) -> ExitError {
		self.inner = Err(ExitError::ResourceExhausted);
		ExitError::ResourceExhausted
	}
}
