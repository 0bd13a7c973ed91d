//! Coordinator that fans a batch out to worker threads and waits for all of them.

use crate::batch::{Mode, RangeView, SlotOutcome, WordSlot, WorkBatch};
use crate::error::ShuffleError;
use crate::parallel::channel::{
    CoordinatorChannels, WorkerChannels, WorkerMessage, create_channels,
};
use crate::parallel::config::ParallelConfig;
use crate::parallel::partition::{WorkRange, partition};
use crate::parallel::report::{FailureCause, RangeFailure, RunReport, RunState, WorkerStatistics};
use crate::permutation::{self, derive_worker_seed, fresh_run_seed, worker_rng};
use crossbeam_channel::RecvTimeoutError;
use log::{debug, info, warn};
use rand::Rng;
use std::any::Any;
use std::thread;
use std::time::{Duration, Instant};

/// How often the coordinator wakes to check the run deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Value returned by a worker thread that exits normally.
#[derive(Debug)]
enum WorkerOutcome {
    Completed(WorkerStatistics),
    Abandoned,
}

/// Transform every slot of `batch` in place using a pool of worker threads.
///
/// Each worker owns one contiguous range of the batch for the whole run. The
/// batch is readable again only when this returns, at which point every
/// worker has been joined. A returned report may still be `PartiallyFailed`;
/// the ranges of failed workers are left exactly as they were loaded.
pub fn run(batch: &mut WorkBatch, config: &ParallelConfig) -> Result<RunReport, ShuffleError> {
    let start_time = Instant::now();
    let mut state = RunState::Unpartitioned;

    if batch.is_empty() {
        return Err(ShuffleError::EmptyBatch);
    }

    let ranges = partition(batch.len(), config.num_workers)?;
    advance(&mut state, RunState::Partitioned);

    let run_seed = config.base_seed.unwrap_or_else(fresh_run_seed);
    let mode = batch.mode();
    let slots_total = batch.len();
    let num_workers = ranges.len();
    info!(
        "Dispatching {} slots to {} workers ({} mode, run seed {})",
        slots_total, num_workers, mode, run_seed
    );

    // A timeout too large to represent as an instant never expires
    let deadline = config.timeout.and_then(|t| start_time.checked_add(t));
    let (coordinator, worker_channels) = create_channels(num_workers);
    let views = batch.split_ranges_mut(&ranges);

    let (workers, failures) = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(num_workers);

        for (worker_id, (view, channels)) in views.into_iter().zip(worker_channels).enumerate() {
            let range = view.range();
            let seed = derive_worker_seed(run_seed, worker_id);
            let spawned = thread::Builder::new()
                .name(format!("wordshuffle-worker-{}", worker_id))
                .spawn_scoped(scope, move || run_worker(worker_id, view, mode, seed, channels));

            match spawned {
                Ok(handle) => {
                    debug!("Worker {} dispatched on {} (seed {})", worker_id, range, seed);
                    handles.push((worker_id, range, handle));
                }
                Err(source) => {
                    // Stop and reap what is already running before giving up
                    coordinator.stop.signal_stop();
                    for (_, _, handle) in handles {
                        let _ = handle.join();
                    }
                    return Err(ShuffleError::Spawn { worker_id, source });
                }
            }
        }
        advance(&mut state, RunState::Dispatched);

        advance(&mut state, RunState::AwaitingCompletion);
        await_workers(&coordinator, handles.len(), deadline);

        let mut workers = Vec::with_capacity(handles.len());
        let mut failures = Vec::new();
        for (worker_id, range, handle) in handles {
            match classify(worker_id, range, handle.join()) {
                Ok(stats) => workers.push(stats),
                Err(failure) => {
                    warn!("Range {} was not processed: {}", failure.range, failure.cause);
                    failures.push(failure);
                }
            }
        }
        Ok((workers, failures))
    })?;

    let report = RunReport::new(
        run_seed,
        slots_total,
        num_workers,
        workers,
        failures,
        start_time.elapsed(),
    );
    advance(&mut state, report.state);
    info!(
        "Run finished: {}/{} slots processed in {:?}",
        report.statistics.slots_processed, slots_total, report.statistics.elapsed_time
    );

    Ok(report)
}

fn advance(state: &mut RunState, next: RunState) {
    debug_assert!(!state.is_terminal(), "run already finished as {:?}", state);
    debug!("Run state {:?} -> {:?}", state, next);
    *state = next;
}

/// Block until every worker has reported or dropped its channel.
///
/// Once the deadline passes the stop signal is raised; workers notice it
/// between slots and report back as abandoned.
fn await_workers(channels: &CoordinatorChannels, expected: usize, deadline: Option<Instant>) {
    let mut reported = 0;

    while reported < expected {
        if let Some(deadline) = deadline
            && Instant::now() >= deadline
            && !channels.stop.should_stop()
        {
            warn!(
                "Run deadline passed with {} of {} workers outstanding",
                expected - reported,
                expected
            );
            channels.stop.signal_stop();
        }

        match channels.from_workers.recv_timeout(POLL_INTERVAL) {
            Ok(WorkerMessage::Finished {
                worker_id,
                processed,
                elapsed,
            }) => {
                reported += 1;
                debug!(
                    "Worker {} finished {} slots in {:?}",
                    worker_id, processed, elapsed
                );
            }
            Ok(WorkerMessage::Abandoned { worker_id }) => {
                reported += 1;
                debug!("Worker {} abandoned its range", worker_id);
            }
            Err(RecvTimeoutError::Timeout) => {}
            // Every sender is gone: the rest panicked before reporting
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

/// Map a joined worker to its statistics or to the failure of its range.
fn classify(
    worker_id: usize,
    range: WorkRange,
    joined: thread::Result<WorkerOutcome>,
) -> Result<WorkerStatistics, RangeFailure> {
    let cause = match joined {
        Ok(WorkerOutcome::Completed(stats)) => return Ok(stats),
        Ok(WorkerOutcome::Abandoned) => FailureCause::TimedOut,
        Err(payload) => FailureCause::Panicked(panic_message(payload.as_ref())),
    };

    Err(RangeFailure {
        worker_id,
        range,
        cause,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Process one range: compute every outcome first, then commit them together.
fn run_worker(
    worker_id: usize,
    view: RangeView<'_>,
    mode: Mode,
    seed: u64,
    channels: WorkerChannels,
) -> WorkerOutcome {
    let start_time = Instant::now();
    let mut rng = worker_rng(seed);
    let mut staged = Vec::with_capacity(view.len());
    let mut malformed = 0;

    for slot in view.slots() {
        if channels.stop.should_stop() {
            let _ = channels
                .to_coordinator
                .send(WorkerMessage::Abandoned { worker_id });
            return WorkerOutcome::Abandoned;
        }

        let outcome = process_slot(slot, mode, &mut rng);
        if matches!(outcome, SlotOutcome::Malformed(_)) {
            malformed += 1;
        }
        staged.push(outcome);
    }

    let range = view.range();
    let processed = staged.len();
    view.commit(staged);

    let elapsed = start_time.elapsed();
    let _ = channels.to_coordinator.send(WorkerMessage::Finished {
        worker_id,
        processed,
        elapsed,
    });

    WorkerOutcome::Completed(WorkerStatistics {
        worker_id,
        range,
        processed,
        malformed,
        elapsed_time: elapsed,
    })
}

fn process_slot<R: Rng>(slot: &WordSlot, mode: Mode, rng: &mut R) -> SlotOutcome {
    match mode {
        Mode::Encrypt => {
            let shuffled = permutation::generate(slot.original(), rng);
            SlotOutcome::Encrypted {
                result: shuffled.word,
                permutation: shuffled.permutation,
            }
        }
        Mode::Decrypt => match permutation::invert(slot.original(), slot.permutation()) {
            Ok(result) => SlotOutcome::Decrypted { result },
            Err(err) => SlotOutcome::Malformed(err),
        },
    }
}
