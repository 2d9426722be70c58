//! Allows to listen to interpreter events.

use crate::{ContextBounds, Program};

environmental::environmental!(listener: dyn EventListener + 'static);

pub trait EventListener {
	fn event(&mut self, event: Event);
}

#[derive(Debug, Copy, Clone)]
pub enum Event<'a> {
	/// A program passed certification and became an expression.
	Deploy {
		program: &'a Program,
		bounds: &'a ContextBounds,
		outputs: &'a [usize],
		heights: &'a [usize],
	},
}

impl<'a> Event<'a> {
	pub(crate) fn emit(self) {
		listener::with(|listener| listener.event(self));
	}
}

/// Run closure with provided listener.
pub fn using<R, F: FnOnce() -> R>(new: &mut (dyn EventListener + 'static), f: F) -> R {
	listener::using(new, f)
}
