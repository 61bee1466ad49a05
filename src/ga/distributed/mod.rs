//! Distributed evaluation over message links.
//!
//! The coordinator owns the population. Each generation it scatters
//! contiguous slices of the batch to the workers, scores its own slice, then
//! gathers the workers' scores in rank order. Workers hold a copy of the
//! problem and nothing else; they loop until they receive an empty slice.
//!
//! Links are abstract ([`Link`]) so the same protocol runs over in-process
//! channels ([`ChannelLink`]) or byte streams such as TCP sockets
//! ([`StreamLink`]).

mod coordinator;
pub mod transport;
pub mod wire;
mod worker;

pub use coordinator::DistributedExecutor;
pub use transport::{ChannelLink, Link, StreamLink, MAX_FRAME_BYTES};
pub use worker::{serve, spawn_local_workers, LocalWorkers};
