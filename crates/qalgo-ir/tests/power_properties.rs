//! Property tests for composite blocks: power, control and freezing.

use proptest::prelude::*;
use qalgo_ir::{Circuit, Gate, QubitId};

const BLOCK_WIDTH: u32 = 3;

/// One primitive application on a three-qubit block.
#[derive(Debug, Clone)]
enum Op {
    X(u32),
    H(u32),
    Z(u32),
    Cx(u32, u32),
    Mcz,
}

fn arb_op() -> impl Strategy<Value = Op> {
    let q = 0..BLOCK_WIDTH;
    prop_oneof![
        q.clone().prop_map(Op::X),
        q.clone().prop_map(Op::H),
        q.clone().prop_map(Op::Z),
        (0..BLOCK_WIDTH, 1..BLOCK_WIDTH).prop_map(|(c, d)| Op::Cx(c, (c + d) % BLOCK_WIDTH)),
        Just(Op::Mcz),
    ]
}

fn build_block(ops: &[Op]) -> Circuit {
    let mut block = Circuit::with_size("block", BLOCK_WIDTH, 0);
    for op in ops {
        match *op {
            Op::X(q) => block.x(QubitId(q)),
            Op::H(q) => block.h(QubitId(q)),
            Op::Z(q) => block.z(QubitId(q)),
            Op::Cx(c, t) => block.cx(QubitId(c), QubitId(t)),
            Op::Mcz => block.mcz([QubitId(0), QubitId(1)], QubitId(2)),
        }
        .unwrap();
    }
    block
}

/// A permutation of four qubits restricted to its first three entries.
fn arb_mapping() -> impl Strategy<Value = Vec<QubitId>> {
    Just((0..4).map(QubitId).collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(|mut qubits| {
            qubits.truncate(BLOCK_WIDTH as usize);
            qubits
        })
}

proptest! {
    #[test]
    fn power_flattens_to_sequential_compose(
        ops in prop::collection::vec(arb_op(), 0..8),
        k in 0u32..5,
        mapping in arb_mapping(),
    ) {
        let block = build_block(&ops);
        let gate = block.to_gate("B").unwrap();

        let mut powered = Circuit::with_size("main", 4, 0);
        powered.append(gate.power(k), mapping.clone()).unwrap();

        let mut sequential = Circuit::with_size("main", 4, 0);
        for _ in 0..k {
            sequential.compose(&block, mapping.clone()).unwrap();
        }

        prop_assert_eq!(powered.flatten(), sequential);
    }

    #[test]
    fn control_adds_controls_to_every_primitive(
        ops in prop::collection::vec(arb_op(), 1..8),
        extra in 1u32..3,
    ) {
        let gate = build_block(&ops).to_gate("B").unwrap();
        let controlled = gate.control(extra);
        prop_assert_eq!(controlled.num_qubits(), BLOCK_WIDTH + extra);

        let mut circuit = Circuit::with_size("main", BLOCK_WIDTH + extra, 0);
        circuit
            .append(controlled, QubitId::range(0..BLOCK_WIDTH + extra))
            .unwrap();
        let flat = circuit.flatten();

        prop_assert_eq!(flat.num_ops(), ops.len());
        for inst in flat.instructions() {
            let Some(Gate::Standard(g)) = inst.as_gate() else {
                return Err(TestCaseError::fail("expected a primitive gate"));
            };
            prop_assert!(g.num_controls() >= extra);
            let controls: Vec<_> = inst.qubits[..extra as usize].to_vec();
            prop_assert_eq!(controls, QubitId::range(0..extra).collect::<Vec<_>>());
        }
    }

    #[test]
    fn frozen_gate_ignores_later_edits(
        ops in prop::collection::vec(arb_op(), 0..6),
        more in prop::collection::vec(arb_op(), 1..6),
    ) {
        let mut block = build_block(&ops);
        let gate = block.to_gate("B").unwrap();
        let before = gate.clone();

        for op in &more {
            let step = build_block(std::slice::from_ref(op));
            block.compose(&step, QubitId::range(0..BLOCK_WIDTH)).unwrap();
        }

        prop_assert_eq!(gate.clone(), before);
        prop_assert_eq!(
            gate.as_composite().map(|g| g.body().len()),
            Some(ops.len())
        );
    }
}
