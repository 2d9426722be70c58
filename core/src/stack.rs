use alloc::vec::Vec;
use primitive_types::U256;

use crate::ExitError;

/// Machine stack, allocated up front to exactly its certified height.
#[derive(Clone, Debug)]
pub struct Stack {
	data: Vec<U256>,
	limit: usize,
}

impl Stack {
	/// Create a new stack with given limit.
	#[must_use]
	pub fn new(limit: usize) -> Self {
		Self {
			data: Vec::with_capacity(limit),
			limit,
		}
	}

	/// Stack limit.
	#[inline]
	#[must_use]
	pub const fn limit(&self) -> usize {
		self.limit
	}

	/// Stack length.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize {
		self.data.len()
	}

	/// Whether the stack is empty.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Stack data, bottom first.
	#[inline]
	#[must_use]
	pub fn data(&self) -> &[U256] {
		&self.data
	}

	/// Pop a value from the stack. If the stack is already empty, returns the
	/// `StackUnderflow` error.
	///
	/// # Errors
	/// Return `ExitError`
	#[inline]
	pub fn pop(&mut self) -> Result<U256, ExitError> {
		self.data.pop().ok_or(ExitError::StackUnderflow)
	}

	/// Drop the top `n` values.
	///
	/// # Errors
	/// Return `ExitError`
	#[inline]
	pub fn discard(&mut self, n: usize) -> Result<(), ExitError> {
		if n > self.data.len() {
			return Err(ExitError::StackUnderflow);
		}
		self.data.truncate(self.data.len() - n);
		Ok(())
	}

	/// Push a new value into the stack. If it will exceed the stack limit,
	/// returns `StackOverflow` error and leaves the stack unchanged.
	///
	/// # Errors
	/// Return `ExitError`
	#[inline]
	pub fn push(&mut self, value: U256) -> Result<(), ExitError> {
		if self.data.len() + 1 > self.limit {
			return Err(ExitError::StackOverflow);
		}
		self.data.push(value);
		Ok(())
	}

	/// Peek a value at given index for the stack, where the top of
	/// the stack is at index `0`. If the index is too large,
	/// `StackUnderflow` is returned.
	///
	/// # Errors
	/// Return `ExitError`
	#[inline]
	pub fn peek(&self, no_from_top: usize) -> Result<U256, ExitError> {
		if self.data.len() > no_from_top {
			Ok(self.data[self.data.len() - no_from_top - 1])
		} else {
			Err(ExitError::StackUnderflow)
		}
	}

	/// Read a value by absolute index from the bottom.
	///
	/// # Errors
	/// Return `ExitError`
	#[inline]
	pub fn get(&self, index: usize) -> Result<U256, ExitError> {
		self.data.get(index).copied().ok_or(ExitError::OperandOutOfBounds)
	}

	/// The top `n` values, bottom first.
	///
	/// # Errors
	/// Return `ExitError`
	pub fn top(&self, n: usize) -> Result<&[U256], ExitError> {
		if n > self.data.len() {
			return Err(ExitError::StackUnderflow);
		}
		Ok(&self.data[self.data.len() - n..])
	}

	pub fn into_vec(self) -> Vec<U256> {
		self.data
	}
}
