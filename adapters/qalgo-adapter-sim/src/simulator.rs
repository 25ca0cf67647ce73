//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use qalgo_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, Job, JobId, JobStatus, ValidationResult,
};
use qalgo_ir::{Circuit, ClbitId, Instruction, InstructionKind, QubitId};

use crate::statevector::Statevector;

const DEFAULT_MAX_QUBITS: u32 = 20;

/// Widest register the statevector can hold (16 GiB of amplitudes).
pub const MAX_SIMULATED_QUBITS: u32 = 30;

/// Primitive gates a circuit may expand to.
pub const MAX_EXPANDED_GATES: u64 = 50_000_000;

/// Finished jobs kept before the oldest is evicted.
pub const DEFAULT_JOB_RETENTION: usize = 1024;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
    /// Submission order, used for eviction.
    seq: u64,
}

/// A circuit expanded to primitives and split at its measurements.
struct Program {
    gates: Vec<Instruction>,
    measurements: Vec<(QubitId, ClbitId)>,
}

/// Local simulator backend.
///
/// Runs circuits on a statevector of up to `max_qubits` qubits. Gates are
/// applied once per job and every shot is sampled from the final state, so
/// measurements must come after all gates on the measured qubit.
///
/// Only the most recent `job_retention` jobs are kept; older ones report
/// [`HalError::JobNotFound`].
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Capabilities, fixed at construction.
    capabilities: Capabilities,
    /// Jobs by id.
    jobs: Arc<Mutex<FxHashMap<JobId, SimJob>>>,
    /// Maximum number of qubits supported.
    max_qubits: u32,
    /// Jobs kept in `jobs`.
    job_retention: usize,
    next_seq: AtomicU64,
    /// Sampling source.
    rng: Mutex<StdRng>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::build(
            BackendConfig::new("simulator"),
            DEFAULT_MAX_QUBITS,
            StdRng::from_entropy(),
        )
    }

    /// Create a simulator with custom max qubits, capped at [`MAX_SIMULATED_QUBITS`].
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self::build(
            BackendConfig::new("simulator"),
            max_qubits,
            StdRng::from_entropy(),
        )
    }

    /// Create a simulator whose sampling is reproducible from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(
            BackendConfig::new("simulator"),
            DEFAULT_MAX_QUBITS,
            StdRng::seed_from_u64(seed),
        )
    }

    /// Keep at most `retention` jobs (at least one).
    #[must_use]
    pub fn with_job_retention(mut self, retention: usize) -> Self {
        self.job_retention = retention.max(1);
        self
    }

    fn build(config: BackendConfig, max_qubits: u32, rng: StdRng) -> Self {
        let max_qubits = max_qubits.min(MAX_SIMULATED_QUBITS);
        let capabilities = Capabilities::simulator(max_qubits).with_name(config.name.clone());
        Self {
            config,
            capabilities,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            max_qubits,
            job_retention: DEFAULT_JOB_RETENTION,
            next_seq: AtomicU64::new(0),
            rng: Mutex::new(rng),
        }
    }

    /// Store a job, evicting the oldest ones beyond the retention limit.
    fn store(&self, job_id: JobId, sim_job: SimJob) {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        while jobs.len() >= self.job_retention {
            let Some(oldest) = jobs
                .iter()
                .min_by_key(|(_, j)| j.seq)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            jobs.remove(&oldest);
            debug!(job = %oldest, "Evicted job");
        }
        jobs.insert(job_id, sim_job);
    }

    /// Flatten the circuit and check it can be simulated.
    fn prepare(&self, circuit: &Circuit) -> HalResult<Program> {
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(HalError::TooManyQubits {
                required: circuit.num_qubits(),
                supported: self.max_qubits,
            });
        }

        let expanded = circuit
            .instructions()
            .iter()
            .map(Instruction::num_primitives)
            .fold(0u64, u64::saturating_add);
        if expanded > MAX_EXPANDED_GATES {
            return Err(HalError::InvalidCircuit(format!(
                "Circuit expands to {expanded} gates, limit is {MAX_EXPANDED_GATES}"
            )));
        }

        let flat = circuit.flatten();
        let mut gates = Vec::new();
        let mut measurements = Vec::new();
        for inst in flat.instructions() {
            check_operands(inst, circuit)?;
            if inst.is_measure() {
                measurements.extend(inst.qubits.iter().copied().zip(inst.clbits.iter().copied()));
                continue;
            }
            if !self.capabilities.gate_set.contains(inst.name()) {
                return Err(HalError::InvalidCircuit(format!(
                    "Unsupported gate '{}'",
                    inst.name()
                )));
            }
            if let Some((q, _)) = measurements.iter().find(|(q, _)| inst.qubits.contains(q)) {
                return Err(HalError::InvalidCircuit(format!(
                    "Gate '{}' acts on {q} after it was measured",
                    inst.name()
                )));
            }
            gates.push(inst.clone());
        }

        Ok(Program {
            gates,
            measurements,
        })
    }

    /// Render an outcome as a key over `width` classical bits, bit 0 rightmost.
    fn outcome_key(state: usize, measurements: &[(QubitId, ClbitId)], width: usize) -> String {
        let mut key = vec!['0'; width];
        for (q, c) in measurements {
            if (state >> q.index()) & 1 == 1 {
                key[width - 1 - c.index()] = '1';
            }
        }
        key.into_iter().collect()
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit, program))]
    fn run_simulation(
        &self,
        circuit: &Circuit,
        program: &Program,
        shots: u32,
    ) -> HalResult<ExecutionResult> {
        let start = Instant::now();

        let num_qubits = circuit.num_qubits();
        debug!(
            "Starting simulation: {} qubits, {} gates, {} shots",
            num_qubits,
            program.gates.len(),
            shots
        );

        let mut sv = Statevector::new(num_qubits);
        for inst in &program.gates {
            sv.apply(inst);
        }

        let dist = WeightedIndex::new(sv.probabilities())
            .map_err(|e| HalError::Sampling(e.to_string()))?;

        let mut outcomes: FxHashMap<usize, u64> = FxHashMap::default();
        {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            for _ in 0..shots {
                *outcomes.entry(dist.sample(&mut *rng)).or_insert(0) += 1;
            }
        }

        // Without measurements every qubit is reported, qubit i as bit i.
        let width = if program.measurements.is_empty() {
            num_qubits
        } else {
            circuit.num_clbits()
        };
        let counts: Counts = outcomes
            .into_iter()
            .map(|(state, n)| {
                let key = if program.measurements.is_empty() {
                    Counts::format_bits(state as u64, width)
                } else {
                    Self::outcome_key(state, &program.measurements, width)
                };
                (key, n)
            })
            .collect();

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        match self.prepare(circuit) {
            Ok(_) => Ok(ValidationResult::Valid),
            Err(e @ (HalError::TooManyQubits { .. } | HalError::InvalidCircuit(_))) => {
                Ok(ValidationResult::Invalid {
                    reasons: vec![e.to_string()],
                })
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if !self.capabilities.accepts_shots(shots) {
            return Err(HalError::InvalidShots {
                shots,
                max: self.capabilities.max_shots,
            });
        }
        let program = self.prepare(circuit)?;

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let mut job = Job::new(job_id.clone(), self.name(), circuit.name(), shots);
        job.transition(JobStatus::Running);
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.store(
            job_id.clone(),
            SimJob {
                job,
                result: None,
                seq,
            },
        );
        debug!(job = %job_id, "Submitted job");

        let outcome = self.run_simulation(circuit, &program, shots);

        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sim_job) = jobs.get_mut(&job_id) {
            match outcome {
                Ok(result) => {
                    if sim_job.job.transition(JobStatus::Completed) {
                        sim_job.result = Some(result);
                    }
                }
                Err(e) => {
                    sim_job.job.transition(JobStatus::Failed(e.to_string()));
                }
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        jobs.get(job_id)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let sim_job = jobs
            .get(job_id)
            .ok_or_else(|| HalError::JobNotFound(job_id.clone()))?;
        match (&sim_job.job.status, &sim_job.result) {
            (JobStatus::Completed, Some(result)) => Ok(result.clone()),
            (JobStatus::Failed(reason), _) => Err(HalError::JobFailed {
                job: job_id.clone(),
                reason: reason.clone(),
            }),
            (JobStatus::Cancelled, _) => Err(HalError::JobCancelled(job_id.clone())),
            (status, _) => Err(HalError::NotFinished {
                job: job_id.clone(),
                status: status.to_string(),
            }),
        }
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        // Jobs finish inside `submit`, so cancelling a known job is a no-op.
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        if jobs.contains_key(job_id) {
            Ok(())
        } else {
            Err(HalError::JobNotFound(job_id.clone()))
        }
    }
}

/// Reject operands outside the circuit's registers or gates on the wrong
/// number of qubits.
fn check_operands(inst: &Instruction, circuit: &Circuit) -> HalResult<()> {
    if let Some(q) = inst.qubits.iter().find(|q| q.index() >= circuit.num_qubits()) {
        return Err(HalError::InvalidCircuit(format!(
            "'{}' uses {q}, but the register has {} qubits",
            inst.name(),
            circuit.num_qubits()
        )));
    }
    if let Some(c) = inst.clbits.iter().find(|c| c.index() >= circuit.num_clbits()) {
        return Err(HalError::InvalidCircuit(format!(
            "Measurement writes {c}, but the classical register has {} bits",
            circuit.num_clbits()
        )));
    }
    match &inst.kind {
        InstructionKind::Gate(gate) if gate.num_qubits() as usize != inst.qubits.len() => {
            Err(HalError::InvalidCircuit(format!(
                "'{}' acts on {} qubits, got {}",
                gate.name(),
                gate.num_qubits(),
                inst.qubits.len()
            )))
        }
        InstructionKind::Measure if inst.qubits.len() != inst.clbits.len() => Err(
            HalError::InvalidCircuit("Measurement arity mismatch".into()),
        ),
        _ => Ok(()),
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.extra_u64("max_qubits")? {
            None => DEFAULT_MAX_QUBITS,
            Some(v) if (1..=u64::from(MAX_SIMULATED_QUBITS)).contains(&v) => v as u32,
            Some(v) => {
                return Err(HalError::Configuration(format!(
                    "'max_qubits' must be between 1 and {MAX_SIMULATED_QUBITS}, got {v}"
                )));
            }
        };
        let job_retention = match config.extra_u64("job_retention")? {
            None => DEFAULT_JOB_RETENTION,
            Some(0) => {
                return Err(HalError::Configuration(
                    "'job_retention' must be at least 1".into(),
                ));
            }
            Some(v) => usize::try_from(v).unwrap_or(usize::MAX),
        };
        let rng = match config.extra_u64("seed")? {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!(name = %config.name, max_qubits, job_retention, "Creating simulator from config");

        Ok(Self::build(config, max_qubits, rng).with_job_retention(job_retention))
    }
}
