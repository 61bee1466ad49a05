//! Coordinator side of the scatter/gather protocol.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::transport::Link;
use super::wire;
use crate::error::GaError;
use crate::ga::executor::{Executor, Sequential};
use crate::ga::types::{GaProblem, Individual};

/// Distributed strategy: fitness evaluation is scattered across the
/// coordinator (rank 0) and one remote worker per link (ranks 1..).
///
/// A batch of `n` chromosomes is cut into `links + 1` contiguous slices of
/// `ceil(n / (links + 1))`; rank `r` gets `[r * per, (r + 1) * per)` clipped
/// to `n`. Crossover and mutation stay on the coordinator.
///
/// When a batch is shorter than the number of ranks, trailing ranks get no
/// slice and are simply not contacted for that round. Neither is a rank
/// whose slice is already fully scored. The empty slice is reserved for the
/// stop signal sent by [`shutdown`](Executor::shutdown).
pub struct DistributedExecutor<L: Link> {
    links: Vec<L>,
    stopped: bool,
}

impl<L: Link> DistributedExecutor<L> {
    pub fn new(links: Vec<L>) -> Self {
        Self {
            links,
            stopped: false,
        }
    }

    /// Number of ranks, coordinator included.
    pub fn ranks(&self) -> usize {
        self.links.len() + 1
    }

    fn slice_bounds(&self, n: usize, rank: usize) -> (usize, usize) {
        let per = n.div_ceil(self.ranks());
        ((rank * per).min(n), ((rank + 1) * per).min(n))
    }
}

impl<L: Link> std::fmt::Debug for DistributedExecutor<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistributedExecutor")
            .field("workers", &self.links.len())
            .field("stopped", &self.stopped)
            .finish()
    }
}

impl<P, L> Executor<P> for DistributedExecutor<L>
where
    P: GaProblem,
    P::Individual: Serialize + DeserializeOwned,
    L: Link,
{
    fn name(&self) -> &'static str {
        "distributed"
    }

    fn evaluate(&mut self, problem: &P, batch: &mut [P::Individual]) -> Result<(), GaError> {
        if self.stopped {
            return Err(GaError::Disconnected);
        }
        let n = batch.len();

        // Scatter.
        let mut pending = Vec::with_capacity(self.links.len());
        for rank in 1..self.ranks() {
            let (lo, hi) = self.slice_bounds(n, rank);
            if batch[lo..hi].iter().all(|ind| ind.fitness().is_some()) {
                continue;
            }
            self.links[rank - 1].send(wire::encode_slice(&batch[lo..hi])?)?;
            pending.push(rank);
        }
        debug!(batch = n, remote = pending.len(), "slices dispatched");

        let (lo, hi) = self.slice_bounds(n, 0);
        Sequential.evaluate(problem, &mut batch[lo..hi])?;

        // Gather, in rank order.
        for rank in pending {
            let (lo, hi) = self.slice_bounds(n, rank);
            let scores = wire::decode_scores(&self.links[rank - 1].recv()?)?;
            if scores.len() != hi - lo {
                return Err(GaError::Protocol {
                    worker: rank,
                    expected: hi - lo,
                    received: scores.len(),
                });
            }
            for (ind, score) in batch[lo..hi].iter_mut().zip(scores) {
                if ind.fitness().is_none() {
                    ind.set_fitness(score);
                }
            }
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), GaError> {
        if self.stopped {
            return Ok(());
        }
        self.stopped = true;
        let stop = wire::stop_frame()?;
        for (i, link) in self.links.iter_mut().enumerate() {
            if let Err(e) = link.send(stop.clone()) {
                warn!(worker = i + 1, error = %e, "failed to deliver stop signal");
            }
        }
        Ok(())
    }
}
