//! # Store backends
//!
//! Backends persist the values written by `SET` and read by `GET`. Each
//! evaluation addresses the store through a namespace chosen by the host, so
//! logical owners never see each other's keys.

mod memory;

pub use self::memory::MemoryStore;

use crate::ExitError;
use primitive_types::U256;

/// Persistent `(namespace, key) -> value` store.
#[auto_impl::auto_impl(&mut, Box)]
pub trait Store {
	/// Value at `key` in `namespace`, zero when never set.
	fn get(&self, namespace: U256, key: U256) -> U256;
	/// Write `value` at `key` in `namespace`.
	fn set(&mut self, namespace: U256, key: U256, value: U256) -> Result<(), ExitError>;
}
