use super::Control;
use crate::tracing::Event;
use crate::{DebugStyle, ExitError, Handler, Runtime};

pub fn get<H: Handler>(runtime: &mut Runtime, handler: &mut H) -> Control {
	pop_u256!(runtime, key);
	let value = try_or_fail!(handler.get(runtime.namespace, key));
	push_u256!(runtime, value);

	Event::Get {
		namespace: runtime.namespace,
		key,
		value,
	}
	.emit();

	Control::Continue
}

/// The value is the top of the stack, its key directly below.
pub fn set<H: Handler>(runtime: &mut Runtime, handler: &mut H) -> Control {
	pop_u256!(runtime, value, key);
	try_or_fail!(handler.set(runtime.namespace, key, value));

	Event::Set {
		namespace: runtime.namespace,
		key,
		value,
	}
	.emit();

	Control::Continue
}

pub fn debug<H: Handler>(runtime: &mut Runtime, operand: u8, handler: &mut H) -> Control {
	let style = try_or_fail!(DebugStyle::from_u8(operand).ok_or(ExitError::OperandOutOfBounds));
	try_or_fail!(handler.debug(style, &runtime.machine));

	Control::Continue
}
