extern crate rainvm;

use std::collections::BTreeMap;

use primitive_types::U256;
use rainvm::backend::Store;
use rainvm::ExitError;

/// Store recording every write, optionally refusing them.
#[derive(Clone, Debug, Default)]
pub struct MockStore {
	pub state: BTreeMap<(U256, U256), U256>,
	pub writes: Vec<(U256, U256, U256)>,
	pub read_only: bool,
}

impl MockStore {
	pub fn read_only() -> Self {
		Self {
			read_only: true,
			..Default::default()
		}
	}
}

impl Store for MockStore {
	fn get(&self, namespace: U256, key: U256) -> U256 {
		self.state
			.get(&(namespace, key))
			.copied()
			.unwrap_or_default()
	}

	fn set(&mut self, namespace: U256, key: U256, value: U256) -> Result<(), ExitError> {
		if self.read_only {
			return Err(ExitError::Other("read-only store"));
		}
		self.writes.push((namespace, key, value));
		self.state.insert((namespace, key), value);
		Ok(())
	}
}
