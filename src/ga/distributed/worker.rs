//! Worker side of the scatter/gather protocol.

use std::thread::JoinHandle;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::transport::{ChannelLink, Link};
use super::wire;
use crate::error::GaError;
use crate::ga::types::{GaProblem, Individual};

/// Runs a worker's service loop until the coordinator sends an empty slice.
///
/// Each dispatch frame is answered with one score per chromosome: the cached
/// fitness when the chromosome already has one, a fresh evaluation
/// otherwise. Returns the number of slices served.
#[instrument(level = "debug", skip_all)]
pub fn serve<P, L>(problem: &P, link: &mut L) -> Result<usize, GaError>
where
    P: GaProblem,
    P::Individual: DeserializeOwned,
    L: Link,
{
    let mut served = 0usize;
    loop {
        let frame = link.recv()?;
        let slice: Vec<P::Individual> = wire::decode_slice(&frame)?;
        if slice.is_empty() {
            debug!(served, "stop signal received");
            return Ok(served);
        }

        let scores: Vec<f64> = slice
            .iter()
            .map(|ind| ind.fitness().unwrap_or_else(|| problem.evaluate(ind)))
            .collect();
        link.send(wire::encode_scores(&scores)?)?;
        served += 1;
    }
}

/// Starts `workers` in-process worker threads, each serving its own clone of
/// `problem`, and returns the coordinator ends of their links.
pub fn spawn_local_workers<P>(problem: &P, workers: usize) -> Result<LocalWorkers, GaError>
where
    P: GaProblem + Clone + 'static,
    P::Individual: DeserializeOwned,
{
    let mut links = Vec::with_capacity(workers);
    let mut handles = Vec::with_capacity(workers);
    for rank in 1..=workers {
        let (coordinator_end, mut worker_end) = ChannelLink::pair();
        let problem = problem.clone();
        let handle = std::thread::Builder::new()
            .name(format!("ga-remote-{rank}"))
            .spawn(move || serve(&problem, &mut worker_end))?;
        links.push(coordinator_end);
        handles.push(handle);
    }
    Ok((links, handles))
}

/// Coordinator-side links plus the join handles of their worker threads.
pub type LocalWorkers = (Vec<ChannelLink>, Vec<JoinHandle<Result<usize, GaError>>>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::timetable::{DomainData, TimetableChromosome, TimetableProblem};

    fn problem() -> TimetableProblem {
        TimetableProblem::new(DomainData::uniform(4, 5, 2, 3, 8, 12)).unwrap()
    }

    #[test]
    fn test_serve_scores_then_stops() {
        let p = problem();
        let (mut coordinator, mut worker) = ChannelLink::pair();
        let worker_problem = p.clone();
        let handle = std::thread::spawn(move || serve(&worker_problem, &mut worker));

        let mut rng = create_rng(Some(3));
        let mut slice: Vec<_> = (0..4).map(|_| p.create_individual(&mut rng)).collect();
        slice[3].set_fitness(12.5);

        coordinator.send(wire::encode_slice(&slice).unwrap()).unwrap();
        let scores = wire::decode_scores(&coordinator.recv().unwrap()).unwrap();
        assert_eq!(scores.len(), 4);
        for (ind, score) in slice.iter().take(3).zip(&scores) {
            assert_eq!(p.evaluate(ind), *score);
        }
        assert_eq!(scores[3], 12.5);

        coordinator.send(wire::stop_frame().unwrap()).unwrap();
        assert_eq!(handle.join().unwrap().unwrap(), 1);
    }

    #[test]
    fn test_serve_reports_disconnect() {
        let p = problem();
        let (coordinator, mut worker) = ChannelLink::pair();
        drop(coordinator);
        assert!(matches!(serve(&p, &mut worker), Err(GaError::Disconnected)));
    }

    #[test]
    fn test_serve_rejects_garbage_frame() {
        let p = problem();
        let (mut coordinator, mut worker) = ChannelLink::pair();
        coordinator.send(vec![0xc1]).unwrap();
        let result = serve::<TimetableProblem, _>(&p, &mut worker);
        assert!(matches!(result, Err(GaError::Decode(_))));
    }

    #[test]
    fn test_serve_returns_cached_fitness_without_evaluating() {
        let p = problem();
        let (mut coordinator, mut worker) = ChannelLink::pair();
        let mut cached = TimetableChromosome::from_genes(vec![]);
        cached.set_fitness(-3.0);
        coordinator.send(wire::encode_slice(&[cached]).unwrap()).unwrap();
        coordinator.send(wire::stop_frame().unwrap()).unwrap();

        assert_eq!(serve(&p, &mut worker).unwrap(), 1);
        assert_eq!(wire::decode_scores(&coordinator.recv().unwrap()).unwrap(), vec![-3.0]);
    }

    #[test]
    fn test_spawn_local_workers_stop_on_empty_slice() {
        let p = problem();
        let (mut links, handles) = spawn_local_workers(&p, 3).unwrap();
        assert_eq!(links.len(), 3);
        for link in &mut links {
            link.send(wire::stop_frame().unwrap()).unwrap();
        }
        for h in handles {
            assert_eq!(h.join().unwrap().unwrap(), 0);
        }
    }
}
