//! Binary form of a [`Program`], the SCALE encoding of its fields.
//!
//! ```text
//! compact source count
//!     compact byte length, bytes   (per source)
//! compact constant count
//!     32 byte little-endian word   (per constant)
//! ```
//!
//! Decoding does not certify the result.

use alloc::vec::Vec;
use scale_codec::{DecodeAll, Encode};

use crate::program::INSTRUCTION_WIDTH;
use crate::{ExitError, Program};

pub fn encode(program: &Program) -> Vec<u8> {
	program.encode()
}

/// Decode a whole program. Truncated input, trailing bytes and sources that
/// are not a whole number of instructions are `MalformedEncoding`.
pub fn decode(input: &[u8]) -> Result<Program, ExitError> {
	let program =
		Program::decode_all(&mut &input[..]).map_err(|_| ExitError::MalformedEncoding)?;

	if program
		.sources
		.iter()
		.any(|source| source.len() % INSTRUCTION_WIDTH != 0)
	{
		return Err(ExitError::MalformedEncoding);
	}

	Ok(program)
}
