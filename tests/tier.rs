use primitive_types::U256;
use rainvm::backend::MemoryStore;
use rainvm::tier_report::TIERS;
use rainvm::{
	op, source, Context, ContextBounds, Expression, Interpreter, Opcode, Program, ReportLayout,
};

fn hex(value: &str) -> U256 {
	U256::from_str_radix(value, 16).unwrap()
}

/// Report from times listed tier 8 first, as fixtures are written.
fn report(fields: [u64; TIERS]) -> U256 {
	fields
		.iter()
		.fold(U256::zero(), |acc, field| (acc << 32) | U256::from(*field))
}

fn evaluate(expression: &Expression, context: &Context) -> U256 {
	Interpreter::default()
		.evaluate_top(expression, 0, context, &mut MemoryStore::default(), U256::zero())
		.unwrap()
}

#[test]
fn diff_of_reports() {
	let expression = Interpreter::default()
		.deploy(
			Program::new(
				vec![source(&[
					op(Opcode::CONSTANT, 0),
					op(Opcode::CONSTANT, 1),
					op(Opcode::SATURATING_DIFF, 0),
				])],
				vec![
					report([0, 1, 2, 3, 4, 5, 6, 7]),
					report([2, 0, 4, 0, 6, 0, 8, 0]),
				],
			),
			ContextBounds::none(),
			&[1],
		)
		.unwrap();

	assert_eq!(
		evaluate(&expression, &Context::empty()),
		hex("01000000000000000300000000000000050000000000000007")
	);
}

#[test]
fn diff_is_floored_per_tier() {
	let layout = ReportLayout::STANDARD;
	let diff = |newer: u64, older: u64| {
		let expression = Interpreter::default()
			.deploy(
				Program::new(
					vec![source(&[
						op(Opcode::CONSTANT, 0),
						op(Opcode::CONSTANT, 1),
						op(Opcode::SATURATING_DIFF, 0),
					])],
					vec![report([newer; TIERS]), report([older; TIERS])],
				),
				ContextBounds::none(),
				&[1],
			)
			.unwrap();
		layout.tier_time(evaluate(&expression, &Context::empty()), 1)
	};

	assert_eq!(diff(5, 9), U256::zero());
	assert_eq!(diff(9, 5), U256::from(4));
}

/// Claim amount per tier: blocks elapsed since the later of reaching the
/// tier and the last claim, or zero for tiers never reached.
#[test]
fn claim_report_since_every_lte_max() {
	let layout = ReportLayout::STANDARD;
	// every, max, two reports
	let select = (1 << 5) | 2;
	// tiers 0 to 8
	let range = 8 << 4;

	let expression = Interpreter::default()
		.deploy(
			Program::new(
				vec![source(&[
					op(Opcode::CONSTANT, 0),
					op(Opcode::CONTEXT, 0x00),
					op(Opcode::UPDATE_TIMES_FOR_TIER_RANGE, range),
					op(Opcode::CONTEXT, 0x10),
					op(Opcode::CONTEXT, 0x11),
					op(Opcode::CONTEXT, 0x00),
					op(Opcode::SELECT_LTE, select),
					op(Opcode::SATURATING_DIFF, 0),
				])],
				vec![layout.never()],
			),
			ContextBounds::new(vec![1, 2]),
			&[1],
		)
		.unwrap();
	assert_eq!(expression.max_stack_height(0), Some(4));

	let tier_report = (0..4).fold(layout.never(), |report, index| {
		layout.update_time_at_tier(report, index, U256::from(2 + index as u64))
	});
	let last_claim = U256::zero();
	let block = U256::from(10);
	let context = Context::new(vec![vec![block], vec![tier_report, last_claim]]);

	assert_eq!(
		evaluate(&expression, &context),
		report([0, 0, 0, 0, 5, 6, 7, 8])
	);
}

#[test]
fn select_lte_any_min() {
	// any, min, two reports
	let select = (1 << 7) | 2;
	let expression = Interpreter::default()
		.deploy(
			Program::new(
				vec![source(&[
					op(Opcode::CONSTANT, 0),
					op(Opcode::CONSTANT, 1),
					op(Opcode::CONSTANT, 2),
					op(Opcode::SELECT_LTE, select),
				])],
				vec![
					report([9, 9, 9, 9, 9, 9, 5, 3]),
					report([9, 9, 9, 9, 9, 9, 2, 4]),
					U256::from(6),
				],
			),
			ContextBounds::none(),
			&[1],
		)
		.unwrap();

	let result = evaluate(&expression, &Context::empty());
	let layout = ReportLayout::STANDARD;
	assert_eq!(layout.tier_time(result, 1), U256::from(3));
	assert_eq!(layout.tier_time(result, 2), U256::from(2));
	assert_eq!(layout.tier_time(result, 3), U256::from(0xffff_ffffu64));
}

#[test]
fn bad_tier_operands_are_rejected_at_deploy() {
	let deploy = |code: Vec<u8>| {
		Interpreter::default().deploy(
			Program::new(vec![code], vec![U256::zero()]),
			ContextBounds::none(),
			&[1],
		)
	};

	// start above end
	assert!(deploy(source(&[
		op(Opcode::CONSTANT, 0),
		op(Opcode::CONSTANT, 0),
		op(Opcode::UPDATE_TIMES_FOR_TIER_RANGE, 0x12),
	]))
	.is_err());
	// end past the last tier
	assert!(deploy(source(&[
		op(Opcode::CONSTANT, 0),
		op(Opcode::CONSTANT, 0),
		op(Opcode::UPDATE_TIMES_FOR_TIER_RANGE, 0x90),
	]))
	.is_err());
	// mode 3 does not exist
	assert!(deploy(source(&[
		op(Opcode::CONSTANT, 0),
		op(Opcode::CONSTANT, 0),
		op(Opcode::SELECT_LTE, (3 << 5) | 1),
	]))
	.is_err());
}
