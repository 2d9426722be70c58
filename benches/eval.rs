use criterion::{black_box, criterion_group, criterion_main, Criterion};
use primitive_types::U256;
use rainvm::backend::MemoryStore;
use rainvm::{op, source, Context, ContextBounds, Interpreter, Opcode, Program};

fn arithmetic_program() -> Program {
	let mut code = Vec::new();
	for _ in 0..64 {
		code.push(op(Opcode::CONSTANT, 0));
		code.push(op(Opcode::CONSTANT, 1));
		code.push(op(Opcode::MUL, 2));
		code.push(op(Opcode::CONSTANT, 2));
		code.push(op(Opcode::SATURATING_SUB, 2));
		code.push(op(Opcode::ENSURE, 1));
	}
	code.push(op(Opcode::CONSTANT, 0));
	Program::new(
		vec![source(&code)],
		vec![U256::from(3), U256::from(5), U256::from(1)],
	)
}

fn tier_program() -> Program {
	// every, max, two reports
	let select = (1 << 5) | 2;
	let mut code = vec![op(Opcode::CONTEXT, 0x00)];
	for _ in 0..32 {
		code.push(op(Opcode::CONTEXT, 0x10));
		code.push(op(Opcode::CONTEXT, 0x00));
		code.push(op(Opcode::SELECT_LTE, select));
	}
	Program::new(vec![source(&code)], Vec::new())
}

fn bench_eval(c: &mut Criterion) {
	let interpreter = Interpreter::default();
	let context = Context::new(vec![vec![U256::from(100)], vec![U256::zero()]]);

	let arithmetic = interpreter
		.deploy(arithmetic_program(), ContextBounds::none(), &[1])
		.unwrap();
	c.bench_function("eval arithmetic", |b| {
		b.iter(|| {
			interpreter.evaluate_top(
				black_box(&arithmetic),
				0,
				&context,
				&mut MemoryStore::default(),
				U256::zero(),
			)
		})
	});

	let tier = interpreter
		.deploy(tier_program(), ContextBounds::new(vec![1, 1]), &[1])
		.unwrap();
	c.bench_function("eval select_lte", |b| {
		b.iter(|| {
			interpreter.evaluate_top(
				black_box(&tier),
				0,
				&context,
				&mut MemoryStore::default(),
				U256::zero(),
			)
		})
	});
}

criterion_group!(benches, bench_eval);
criterion_main!(benches);
