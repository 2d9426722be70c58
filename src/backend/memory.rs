use super::Store;
use crate::ExitError;
use alloc::collections::BTreeMap;
use primitive_types::U256;

/// Memory store, keeping all values in a `BTreeMap` keyed by
/// `(namespace, key)`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MemoryStore {
	state: BTreeMap<(U256, U256), U256>,
}

impl MemoryStore {
	/// Create a new memory store.
	pub fn new(state: BTreeMap<(U256, U256), U256>) -> Self {
		Self { state }
	}

	/// Get the underlying `BTreeMap` storing the state.
	pub fn state(&self) -> &BTreeMap<(U256, U256), U256> {
		&self.state
	}

	/// Keys and values set in `namespace`, ordered by key.
	pub fn namespace(&self, namespace: U256) -> impl Iterator<Item = (U256, U256)> + '_ {
		self.state
			.range((namespace, U256::zero())..=(namespace, U256::MAX))
			.map(|(&(_, key), &value)| (key, value))
	}
}

impl Store for MemoryStore {
	fn get(&self, namespace: U256, key: U256) -> U256 {
		self.state
			.get(&(namespace, key))
			.copied()
			.unwrap_or_default()
	}

	/// Zero values are removed, missing keys already read as zero.
	fn set(&mut self, namespace: U256, key: U256, value: U256) -> Result<(), ExitError> {
		if value.is_zero() {
			self.state.remove(&(namespace, key));
		} else {
			self.state.insert((namespace, key), value);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_keys_read_zero() {
		let store = MemoryStore::default();
		assert_eq!(store.get(U256::one(), U256::from(7)), U256::zero());
	}

	#[test]
	fn namespaces_are_isolated() {
		let mut store = MemoryStore::default();
		store.set(U256::from(1), U256::from(7), U256::from(100)).unwrap();
		store.set(U256::from(2), U256::from(7), U256::from(200)).unwrap();

		assert_eq!(store.get(U256::from(1), U256::from(7)), U256::from(100));
		assert_eq!(store.get(U256::from(2), U256::from(7)), U256::from(200));
		assert_eq!(
			store.namespace(U256::from(1)).collect::<Vec<_>>(),
			vec![(U256::from(7), U256::from(100))]
		);
	}

	#[test]
	fn zero_clears() {
		let mut store = MemoryStore::default();
		store.set(U256::one(), U256::one(), U256::from(5)).unwrap();
		store.set(U256::one(), U256::one(), U256::zero()).unwrap();
		assert!(store.state().is_empty());
	}

	#[test]
	fn mutable_reference_is_a_store() {
		fn write<S: Store>(mut store: S) {
			store.set(U256::one(), U256::one(), U256::from(9)).unwrap();
		}

		let mut store = MemoryStore::default();
		write(&mut store);
		assert_eq!(store.get(U256::one(), U256::one()), U256::from(9));
	}
}
