use alloc::vec::Vec;
use primitive_types::U256;

/// Per-evaluation read-only input grid, addressed as `(column, row)`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Context {
	columns: Vec<Vec<U256>>,
}

impl Context {
	pub fn new(columns: Vec<Vec<U256>>) -> Self {
		Self { columns }
	}

	pub fn empty() -> Self {
		Self::default()
	}

	#[inline]
	pub fn get(&self, column: usize, row: usize) -> Option<U256> {
		self.columns.get(column).and_then(|c| c.get(row)).copied()
	}

	pub fn columns(&self) -> &[Vec<U256>] {
		&self.columns
	}

	/// Tightest bounds this context satisfies.
	pub fn bounds(&self) -> ContextBounds {
		ContextBounds::new(self.columns.iter().map(Vec::len).collect())
	}
}

/// Shape a program is allowed to address: `rows[column]` rows per column.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContextBounds {
	rows: Vec<usize>,
}

impl ContextBounds {
	pub fn new(rows: Vec<usize>) -> Self {
		Self { rows }
	}

	/// No context access allowed.
	pub fn none() -> Self {
		Self::default()
	}

	#[inline]
	pub fn contains(&self, column: usize, row: usize) -> bool {
		self.rows.get(column).map_or(false, |rows| row < *rows)
	}

	/// Whether every declared cell is present in `context`.
	pub fn is_satisfied_by(&self, context: &Context) -> bool {
		self.rows.len() <= context.columns.len()
			&& self
				.rows
				.iter()
				.zip(context.columns.iter())
				.all(|(rows, column)| *rows <= column.len())
	}

	pub fn rows(&self) -> &[usize] {
		&self.rows
	}
}
