//! Parallel execution of a batch across a fixed pool of workers.
//!
//! # Architecture
//!
//! - The **partitioner** splits the batch into contiguous, disjoint ranges
//! - The **coordinator** hands each worker an exclusive view of one range,
//!   then blocks until every worker has terminated
//! - A **channel** carries completion messages back, and a shared stop flag
//!   lets the coordinator abandon stragglers when a deadline is set
//!
//! Workers never lock anything: the only shared structure is the batch, and
//! each worker holds a `&mut` borrow of a range nobody else can reach.
//!
//! # Example
//!
//! ```ignore
//! let config = ParallelConfig::default().with_workers(4).with_seed(42);
//! let report = run(&mut batch, &config)?;
//! report.ensure_complete()?;
//! ```

pub mod channel;
pub mod config;
pub mod coordinator;
pub mod partition;
pub mod report;

pub use config::ParallelConfig;
pub use coordinator::run;
pub use report::RunReport;
