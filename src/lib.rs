//! RainVM: an embeddable, deterministic expression interpreter.
//!
//! Programs are certified once with [`Interpreter::deploy`] and can then be
//! evaluated any number of times against a context grid and a [`Store`].

#![forbid(unsafe_code, unused_variables)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use rainvm_core::*;
pub use rainvm_gasometer as gasometer;
pub use rainvm_runtime as runtime;
pub use rainvm_runtime::*;

#[cfg(feature = "tracing")]
pub mod tracing;

#[cfg(feature = "tracing")]
macro_rules! event {
	($x:expr) => {
		use crate::tracing::Event::*;
		$x.emit();
	};
}

#[cfg(not(feature = "tracing"))]
macro_rules! event {
	($x:expr) => {};
}

pub mod backend;
mod config;
pub mod executor;
mod interpreter;

pub use crate::backend::{MemoryStore, Store};
pub use crate::config::Config;
pub use crate::executor::Executor;
pub use crate::interpreter::{Expression, Interpreter};
