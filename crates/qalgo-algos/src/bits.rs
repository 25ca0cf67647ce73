use qalgo_ir::QubitId;

/// Qubits in `[0, width)` whose bit in `state` is zero.
///
/// Flipping these maps `|state⟩` onto the all-ones basis state, where a
/// multi-controlled gate over the whole block fires.
pub(crate) fn zero_qubits(state: u64, width: u32) -> Vec<QubitId> {
    QubitId::range(0..width)
        .filter(|q| (state >> q.0) & 1 == 0)
        .collect()
}
