use honggfuzz::fuzz;
use primitive_types::U256;
use rainvm::backend::MemoryStore;
use rainvm::{codec, Context, ExitError, Interpreter};

const DELIMITER: [u8; 4] = [0xde, 0xad, 0xbe, 0xef];

/// Split fuzz input into encoded program and context bytes.
fn split_input(sequence: &[u8]) -> (&[u8], &[u8]) {
	match sequence
		.windows(DELIMITER.len())
		.position(|window| window == DELIMITER)
	{
		Some(index) => (&sequence[..index], &sequence[index + DELIMITER.len()..]),
		None => (sequence, &[][..]),
	}
}

fn handle_data(sequence: &[u8]) {
	let (code, data) = split_input(sequence);
	let program = match codec::decode(code) {
		Ok(program) => program,
		Err(_) => return,
	};
	assert_eq!(codec::encode(&program), code);

	let row = data
		.chunks(32)
		.map(U256::from_big_endian)
		.collect::<Vec<_>>();
	let context = Context::new(vec![row.clone(), row]);
	let interpreter = Interpreter::default();

	for outputs in 0..4 {
		let expression = match interpreter.deploy(program.clone(), context.bounds(), &[outputs]) {
			Ok(expression) => expression,
			Err(_) => continue,
		};
		let mut store = MemoryStore::default();
		let res = interpreter.evaluate_with_limit(&expression, 0, &context, &mut store, U256::zero(), 10_000);
		match res {
			Ok(ref stack) => assert_eq!(stack.len(), outputs),
			Err(e) => assert!(
				!e.is_fatal() || e == ExitError::ResourceExhausted,
				"certified program failed with {:?}",
				e
			),
		}
		#[cfg(not(fuzzing))]
		{
			println!("Result: {:?}", res);
		}
	}
}

fn main() {
	#[cfg(fuzzing)]
	{
		loop {
			fuzz!(|data: &[u8]| {
				handle_data(data);
			});
		}
	}
	#[cfg(not(fuzzing))]
	{
		// replay saved inputs: files or directories of files
		for argument in std::env::args().skip(1) {
			let path = std::path::Path::new(&argument);
			let files = if path.is_dir() {
				std::fs::read_dir(path)
					.unwrap()
					.map(|entry| entry.unwrap().path())
					.collect::<Vec<_>>()
			} else {
				vec![path.to_path_buf()]
			};
			for file in files {
				println!("Replaying {}", file.display());
				handle_data(&std::fs::read(&file).unwrap());
			}
		}
	}
}
