//! Match job worker.
//!
//! Claims queued match jobs in small FIFO batches and runs each one by
//! calling the matching API. Polls run on a fixed interval and whenever
//! Postgres signals a newly queued job; an in-process guard keeps polls
//! from overlapping. Failed jobs are retried with exponential backoff
//! until they run out of attempts and are marked dead.

pub mod client;
pub mod config;
pub mod processor;
pub mod queue;
pub mod retry;
pub mod scheduler;
pub mod wakeup;
