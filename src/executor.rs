//! # Executor
//!
//! The executor hooks the gasometer, the store and the runtime together. It is
//! the [`Handler`] every evaluation runs with.

use crate::backend::Store;
use crate::gasometer::Gasometer;
use crate::{DebugStyle, ExitError, ExitReason, Handler, Instruction, Machine, Runtime, Stack};
use primitive_types::U256;

pub struct Executor<S> {
	store: S,
	gasometer: Gasometer,
}

impl<S: Store> Executor<S> {
	pub fn new(store: S, step_limit: u64) -> Self {
		Self {
			store,
			gasometer: Gasometer::new(step_limit),
		}
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	pub fn gasometer(&self) -> &Gasometer {
		&self.gasometer
	}

	pub fn into_store(self) -> S {
		self.store
	}

	/// Run `runtime` to completion.
	pub fn execute(&mut self, runtime: &mut Runtime) -> ExitReason {
		let reason = runtime.run(self);
		log::debug!(
			target: "rainvm",
			"Evaluation in namespace {} exited after {} steps: {:?}",
			runtime.namespace(),
			self.gasometer.used(),
			reason,
		);
		reason
	}
}

impl<S: Store> Handler for Executor<S> {
	fn get(&mut self, namespace: U256, key: U256) -> Result<U256, ExitError> {
		Ok(self.store.get(namespace, key))
	}

	fn set(&mut self, namespace: U256, key: U256, value: U256) -> Result<(), ExitError> {
		self.store.set(namespace, key, value)
	}

	fn pre_validate(&mut self, instruction: Instruction, stack: &Stack) -> Result<(), ExitError> {
		log::trace!(
			target: "rainvm",
			"Running opcode: {:?}, operand: {}, stack height: {}, steps left: {}",
			instruction.opcode,
			instruction.operand,
			stack.len(),
			self.gasometer.remaining(),
		);

		self.gasometer
			.record_step(instruction.opcode, instruction.operand)
	}

	fn debug(&mut self, style: DebugStyle, machine: &Machine<'_>) -> Result<(), ExitError> {
		match style {
			DebugStyle::Stack => {
				let base = machine.frame().map_or(0, |frame| frame.base);
				let data = machine.stack().data();
				log::debug!(target: "rainvm", "Stack: {:?}", data.get(base..).unwrap_or_default());
			}
			DebugStyle::Constants => {
				log::debug!(target: "rainvm", "Constants: {:?}", machine.program().constants);
			}
			DebugStyle::Context => {
				log::debug!(target: "rainvm", "Context: {:?}", machine.context().columns());
			}
			DebugStyle::Source => {
				if let Some(frame) = machine.frame() {
					log::debug!(
						target: "rainvm",
						"Source {} at position {}, frame base {}",
						frame.source,
						frame.position,
						frame.base,
					);
				}
			}
		}

		Ok(())
	}
}
