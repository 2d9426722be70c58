use core::fmt;

use crate::ExitError;

/// Opcode. One-to-one corresponding to an `u8` value.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Opcode(pub u8);

/// Stack effect of an opcode as a pure function of its operand, returning
/// `(pops, pushes)`.
pub type Effect = fn(u8) -> Result<(usize, usize), ExitError>;

/// Invokes `$m` with the full opcode list. Every consumer of the list (the
/// opcode constants, the stack effect table and the evaluation table) is
/// generated from here so they cannot drift apart.
///
/// Each entry is `NAME = id, "mnemonic", effect, eval;`. Eval paths are
/// resolved relative to the `eval` module; `external` marks opcodes the core
/// machine traps on and the runtime resolves.
macro_rules! for_each_opcode {
	($m:ident) => {
		$m! {
			/// `CONSTANT`: push `constants[operand]`.
			CONSTANT = 0x00, "constant", effect::fixed::<0, 1>, misc::constant;
			/// `STACK`: copy the frame-relative stack slot `operand` to the top.
			STACK = 0x01, "stack", effect::fixed::<0, 1>, misc::stack;
			/// `CONTEXT`: push `context[operand >> 4][operand & 0x0f]`.
			CONTEXT = 0x02, "context", effect::fixed::<0, 1>, misc::context;
			/// `CALL`: run source `operand & 0x0f` over the top `operand >> 6`
			/// values, leaving `(operand >> 4) & 0x03` outputs.
			CALL = 0x03, "call", effect::call, misc::call;
			/// `DEBUG`: dump machine state, style selected by operand.
			DEBUG = 0x04, "debug", effect::debug, external;
			/// `HASH`: keccak256 of the top `operand` words.
			HASH = 0x05, "hash", effect::variadic, misc::hash;

			/// `ADD`: checked n-ary addition.
			ADD = 0x10, "add", effect::variadic, arithmetic::add;
			/// `SUB`: checked n-ary subtraction in push order.
			SUB = 0x11, "sub", effect::variadic, arithmetic::sub;
			/// `MUL`: checked n-ary multiplication.
			MUL = 0x12, "mul", effect::variadic, arithmetic::mul;
			/// `DIV`: n-ary division, zero divisor rejects.
			DIV = 0x13, "div", effect::variadic, arithmetic::div;
			/// `MOD`: n-ary remainder, zero divisor rejects.
			MOD = 0x14, "mod", effect::variadic, arithmetic::rem;
			/// `EXP`: checked n-ary exponentiation.
			EXP = 0x15, "exp", effect::variadic, arithmetic::exp;
			/// `MIN`
			MIN = 0x16, "min", effect::variadic, arithmetic::min;
			/// `MAX`
			MAX = 0x17, "max", effect::variadic, arithmetic::max;
			/// `SATURATING_ADD`: clamps at `U256::MAX`.
			SATURATING_ADD = 0x18, "saturating-add", effect::variadic, arithmetic::saturating_add;
			/// `SATURATING_SUB`: floors at zero.
			SATURATING_SUB = 0x19, "saturating-sub", effect::variadic, arithmetic::saturating_sub;
			/// `SATURATING_MUL`: clamps at `U256::MAX`.
			SATURATING_MUL = 0x1a, "saturating-mul", effect::variadic, arithmetic::saturating_mul;

			/// `ISZERO`
			ISZERO = 0x20, "is-zero", effect::fixed::<1, 1>, logic::iszero;
			/// `EQUAL_TO`
			EQUAL_TO = 0x21, "equal-to", effect::fixed::<2, 1>, logic::equal_to;
			/// `LESS_THAN`
			LESS_THAN = 0x22, "less-than", effect::fixed::<2, 1>, logic::less_than;
			/// `GREATER_THAN`
			GREATER_THAN = 0x23, "greater-than", effect::fixed::<2, 1>, logic::greater_than;
			/// `EVERY`: last-pushed value if all are non-zero, else zero.
			EVERY = 0x24, "every", effect::variadic, logic::every;
			/// `ANY`: first non-zero value scanning from the top, else zero.
			ANY = 0x25, "any", effect::variadic, logic::any;
			/// `EAGER_IF`: `condition, then, else`.
			EAGER_IF = 0x26, "eager-if", effect::fixed::<3, 1>, logic::eager_if;
			/// `ENSURE`: abort with the operand as code if the top is zero.
			ENSURE = 0x27, "ensure", effect::fixed::<1, 0>, logic::ensure;

			/// `GET`: read `key` from the store.
			GET = 0x30, "get", effect::fixed::<1, 1>, external;
			/// `SET`: write `key, value` to the store.
			SET = 0x31, "set", effect::fixed::<2, 0>, external;

			/// `SATURATING_DIFF`: per-tier `newer - older`, floored at zero.
			SATURATING_DIFF = 0x40, "saturating-diff", effect::fixed::<2, 1>, tier::saturating_diff;
			/// `SELECT_LTE`: combine `len` reports against a reference time.
			SELECT_LTE = 0x41, "select-lte", effect::select_lte, tier::select_lte;
			/// `UPDATE_TIMES_FOR_TIER_RANGE`: set a tier range of a report to a time.
			UPDATE_TIMES_FOR_TIER_RANGE = 0x42, "update-times-for-tier-range", effect::tier_range, tier::update_times_for_tier_range;
		}
	};
}

/// Static description of an opcode.
#[derive(Clone, Copy)]
pub struct OpcodeInfo {
	pub name: &'static str,
	pub effect: Effect,
}

impl fmt::Debug for OpcodeInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OpcodeInfo").field("name", &self.name).finish()
	}
}

macro_rules! define_opcodes {
	( $( $(#[$doc:meta])* $name:ident = $id:literal, $mnemonic:literal, $effect:expr, $eval:path; )* ) => {
		impl Opcode {
			$(
				$(#[$doc])*
				pub const $name: Opcode = Opcode($id);
			)*
		}

		static INFO: [Option<OpcodeInfo>; 256] = {
			let mut table: [Option<OpcodeInfo>; 256] = [None; 256];
			$(
				table[$id] = Some(OpcodeInfo { name: $mnemonic, effect: $effect });
			)*
			table
		};
	};
}

for_each_opcode!(define_opcodes);

impl Opcode {
	#[inline]
	pub const fn as_u8(&self) -> u8 {
		self.0
	}

	#[inline]
	pub const fn as_usize(&self) -> usize {
		self.0 as usize
	}

	/// Table entry for this opcode, `None` if the id is unassigned.
	#[inline]
	pub fn info(&self) -> Option<&'static OpcodeInfo> {
		INFO[self.as_usize()].as_ref()
	}

	pub fn name(&self) -> Option<&'static str> {
		self.info().map(|info| info.name)
	}

	/// Look up an opcode by its mnemonic.
	pub fn from_name(name: &str) -> Option<Opcode> {
		INFO.iter()
			.position(|info| matches!(info, Some(info) if info.name == name))
			.map(|id| Opcode(id as u8))
	}

	/// Number of values consumed and produced by this opcode with the given
	/// operand. Never executes anything.
	#[inline]
	pub fn stack_effect(&self, operand: u8) -> Result<(usize, usize), ExitError> {
		let info = self.info().ok_or(ExitError::UnknownOpcode(*self))?;
		(info.effect)(operand)
	}
}

impl fmt::Debug for Opcode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.name() {
			Some(name) => f.write_str(name),
			None => write!(f, "Opcode(0x{:02x})", self.0),
		}
	}
}

/// Free-standing form of [`Opcode::stack_effect`].
#[inline]
pub fn stack_effect(opcode: Opcode, operand: u8) -> Result<(usize, usize), ExitError> {
	opcode.stack_effect(operand)
}

/// Operand layouts shared by the effect table, the integrity checker and
/// the evaluation functions.
pub mod operand {
	/// Maximum number of tiers in a report.
	pub const MAX_TIER: u8 = 8;

	#[inline]
	pub const fn context(operand: u8) -> (usize, usize) {
		((operand >> 4) as usize, (operand & 0x0f) as usize)
	}

	/// `(source, inputs, outputs)`.
	#[inline]
	pub const fn call(operand: u8) -> (usize, usize, usize) {
		(
			(operand & 0x0f) as usize,
			(operand >> 6) as usize,
			((operand >> 4) & 0x03) as usize,
		)
	}

	/// `(logic, mode, len)`.
	#[inline]
	pub const fn select_lte(operand: u8) -> (u8, u8, usize) {
		(operand >> 7, (operand >> 5) & 0x03, (operand & 0x1f) as usize)
	}

	/// `(start, end)`.
	#[inline]
	pub const fn tier_range(operand: u8) -> (u8, u8) {
		(operand & 0x0f, operand >> 4)
	}
}

pub(crate) mod effect {
	use super::operand;
	use crate::ExitError;

	pub fn fixed<const POPS: usize, const PUSHES: usize>(
		_operand: u8,
	) -> Result<(usize, usize), ExitError> {
		Ok((POPS, PUSHES))
	}

	/// Arity carried in the operand, always one output.
	pub fn variadic(operand: u8) -> Result<(usize, usize), ExitError> {
		if operand == 0 {
			return Err(ExitError::OperandOutOfBounds);
		}
		Ok((operand as usize, 1))
	}

	pub fn call(operand: u8) -> Result<(usize, usize), ExitError> {
		let (_, inputs, outputs) = operand::call(operand);
		Ok((inputs, outputs))
	}

	pub fn debug(operand: u8) -> Result<(usize, usize), ExitError> {
		if operand > 3 {
			return Err(ExitError::OperandOutOfBounds);
		}
		Ok((0, 0))
	}

	pub fn select_lte(operand: u8) -> Result<(usize, usize), ExitError> {
		let (_, mode, len) = operand::select_lte(operand);
		if len == 0 || mode > 2 {
			return Err(ExitError::OperandOutOfBounds);
		}
		Ok((len + 1, 1))
	}

	pub fn tier_range(operand: u8) -> Result<(usize, usize), ExitError> {
		let (start, end) = operand::tier_range(operand);
		if start > end || end > operand::MAX_TIER {
			return Err(ExitError::OperandOutOfBounds);
		}
		Ok((2, 1))
	}
}
