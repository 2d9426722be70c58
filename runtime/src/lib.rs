//! Runtime layer of RainVM, resolving the store and debug opcodes the core
//! machine traps on.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod eval;
mod handler;
pub mod tracing;

pub use rainvm_core::*;

pub use crate::handler::{DebugStyle, Handler};

use crate::tracing::Event;
use primitive_types::U256;

macro_rules! step {
	( $self:expr, $handler:expr, $return:tt $($err:path)?; $($ok:path)? ) => ({
		if let Some((instruction, stack)) = $self.machine.inspect() {
			Event::Step {
				namespace: $self.namespace,
				instruction,
				stack,
			}.emit();

			match $handler.pre_validate(instruction, stack) {
				Ok(()) => (),
				Err(error) => {
					$self.machine.exit(error.into());
					$self.status = Err(error.into());
				},
			}
		}

		match $self.status {
			Ok(()) => (),
			Err(exit) => {
				#[allow(unused_parens)]
				$return $($err)*(exit)
			},
		}

		match $self.machine.step() {
			Ok(()) => $($ok)?(()),
			Err(Capture::Exit(exit)) => {
				$self.status = Err(exit);
				#[allow(unused_parens)]
				$return $($err)*(exit)
			},
			Err(Capture::Trap(instruction)) => {
				match eval::eval($self, instruction, $handler) {
					eval::Control::Continue => $($ok)?(()),
					eval::Control::Exit(exit) => {
						$self.machine.exit(exit);
						$self.status = Err(exit);
						#[allow(unused_parens)]
						$return $($err)*(exit)
					},
				}
			},
		}
	});
}

/// Drives a [`Machine`] for one evaluation, handing store and debug
/// instructions to a [`Handler`].
pub struct Runtime<'a> {
	machine: Machine<'a>,
	/// Store namespace of the logical owner of this evaluation.
	namespace: U256,
	status: Result<(), ExitReason>,
}

impl<'a> Runtime<'a> {
	pub fn new(machine: Machine<'a>, namespace: U256) -> Self {
		Self {
			machine,
			namespace,
			status: Ok(()),
		}
	}

	pub fn machine(&self) -> &Machine<'a> {
		&self.machine
	}

	pub fn namespace(&self) -> U256 {
		self.namespace
	}

	pub fn into_machine(self) -> Machine<'a> {
		self.machine
	}

	/// Step the runtime by one instruction.
	pub fn step<H: Handler>(&mut self, handler: &mut H) -> Result<(), ExitReason> {
		step!(self, handler, return Err; Ok)
	}

	/// Loop stepping the runtime until it exits.
	pub fn run<H: Handler>(&mut self, handler: &mut H) -> ExitReason {
		loop {
			step!(self, handler, return;)
		}
	}
}
