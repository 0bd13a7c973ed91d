//! Completion channel and stop signal shared between workers and coordinator.

use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Message sent from a worker to the coordinator as it terminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Worker committed its whole range.
    Finished {
        worker_id: usize,
        processed: usize,
        elapsed: Duration,
    },
    /// Worker saw the stop signal and left its range untouched.
    Abandoned { worker_id: usize },
}

/// Flag raised by the coordinator to make workers give up their ranges.
#[derive(Debug, Default)]
pub struct StopSignal {
    stop: AtomicBool,
}

impl StopSignal {
    /// Check if workers should stop.
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Signal all workers to stop.
    pub fn signal_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

/// Channel endpoints for a worker.
pub struct WorkerChannels {
    /// Send completion messages to the coordinator.
    pub to_coordinator: Sender<WorkerMessage>,
    /// Shared stop flag.
    pub stop: Arc<StopSignal>,
}

/// Channel endpoints for the coordinator.
pub struct CoordinatorChannels {
    /// Receive completion messages from workers.
    pub from_workers: Receiver<WorkerMessage>,
    /// Shared stop flag.
    pub stop: Arc<StopSignal>,
}

/// Create channels for `num_workers` workers.
///
/// The coordinator keeps no sender, so its receiver disconnects once every
/// worker endpoint has been dropped, including those of workers that panicked
/// or were never spawned.
pub fn create_channels(num_workers: usize) -> (CoordinatorChannels, Vec<WorkerChannels>) {
    let stop = Arc::new(StopSignal::default());
    let (worker_tx, coordinator_rx) = unbounded();

    let worker_channels = (0..num_workers)
        .map(|_| WorkerChannels {
            to_coordinator: worker_tx.clone(),
            stop: Arc::clone(&stop),
        })
        .collect();

    let coordinator = CoordinatorChannels {
        from_workers: coordinator_rx,
        stop,
    };

    (coordinator, worker_channels)
}
