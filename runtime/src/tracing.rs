//! Allows to listen to runtime events.

use crate::{Instruction, Stack};
use primitive_types::U256;

#[cfg(feature = "tracing")]
environmental::environmental!(hook: dyn EventListener + 'static);

#[cfg(feature = "tracing")]
pub trait EventListener {
	fn event(&mut self, event: Event);
}

#[derive(Debug, Copy, Clone)]
pub enum Event<'a> {
	Step {
		namespace: U256,
		instruction: Instruction,
		stack: &'a Stack,
	},
	Get {
		namespace: U256,
		key: U256,
		value: U256,
	},
	Set {
		namespace: U256,
		key: U256,
		value: U256,
	},
}

impl<'a> Event<'a> {
	#[cfg(feature = "tracing")]
	pub(crate) fn emit(self) {
		hook::with(|hook| hook.event(self));
	}

	#[cfg(not(feature = "tracing"))]
	pub(crate) fn emit(self) {
		// no op.
	}
}

/// Run closure with provided listener.
#[cfg(feature = "tracing")]
pub fn using<R, F: FnOnce() -> R>(listener: &mut (dyn EventListener + 'static), f: F) -> R {
	hook::using(listener, f)
}
