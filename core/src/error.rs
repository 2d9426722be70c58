use core::fmt;

use crate::{Instruction, Opcode};

/// Instruction the machine cannot resolve on its own. Its position has
/// already been advanced past it.
pub type Trap = Instruction;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Capture<E, T> {
	Exit(E),
	Trap(T),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExitReason {
	Succeed(ExitSucceed),
	Error(ExitError),
}

impl ExitReason {
	pub fn is_succeed(&self) -> bool {
		match self {
			ExitReason::Succeed(_) => true,
			ExitReason::Error(_) => false,
		}
	}

	pub fn is_error(&self) -> bool {
		match self {
			ExitReason::Succeed(_) => false,
			ExitReason::Error(_) => true,
		}
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExitSucceed {
	/// The entry source ran to its end.
	Stopped,
}

impl From<ExitSucceed> for ExitReason {
	fn from(exit: ExitSucceed) -> ExitReason {
		ExitReason::Succeed(exit)
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExitError {
	/// Opcode id has no entry in the opcode table.
	UnknownOpcode(Opcode),
	StackUnderflow,
	StackOverflow,
	/// Operand addresses a constant, context cell, stack slot or source
	/// that does not exist, or cannot describe a stack effect.
	OperandOutOfBounds,
	/// A source finished with a different height than its call site declared.
	StackMismatch { expected: usize, actual: usize },
	/// An `ENSURE` saw a zero condition. Carries the operand code.
	EnsureFailed(u8),
	MalformedEncoding,
	ResourceExhausted,
	/// Checked arithmetic overflowed or underflowed.
	Overflow,
	DivisionByZero,

	Other(&'static str),
}

impl ExitError {
	/// Whether the error means a certified invariant was bypassed, as
	/// opposed to an abort the program expressed itself.
	pub fn is_fatal(&self) -> bool {
		!matches!(
			self,
			ExitError::EnsureFailed(_) | ExitError::Overflow | ExitError::DivisionByZero
		)
	}
}

impl From<ExitError> for ExitReason {
	fn from(exit: ExitError) -> ExitReason {
		ExitReason::Error(exit)
	}
}

impl fmt::Display for ExitError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ExitError::UnknownOpcode(opcode) => write!(f, "unknown opcode 0x{:02x}", opcode.0),
			ExitError::StackUnderflow => write!(f, "stack underflow"),
			ExitError::StackOverflow => write!(f, "stack overflow"),
			ExitError::OperandOutOfBounds => write!(f, "operand out of bounds"),
			ExitError::StackMismatch { expected, actual } => {
				write!(f, "stack mismatch: expected {} values, found {}", expected, actual)
			}
			ExitError::EnsureFailed(code) => write!(f, "ensure failed with code {}", code),
			ExitError::MalformedEncoding => write!(f, "malformed encoding"),
			ExitError::ResourceExhausted => write!(f, "resource exhausted"),
			ExitError::Overflow => write!(f, "arithmetic overflow"),
			ExitError::DivisionByZero => write!(f, "division by zero"),
			ExitError::Other(reason) => f.write_str(reason),
		}
	}
}

#[cfg(feature = "std")]
impl std::error::Error for ExitError {}

/// Rejection raised while certifying a program, located at the byte
/// offset of the offending instruction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerificationFault {
	pub source: usize,
	pub position: usize,
	pub error: ExitError,
}

impl fmt::Display for VerificationFault {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"source {} at offset {}: {}",
			self.source, self.position, self.error
		)
	}
}

#[cfg(feature = "std")]
impl std::error::Error for VerificationFault {}
