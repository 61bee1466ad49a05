//! Frame payloads exchanged with workers, encoded as MessagePack.
//!
//! Dispatch frames carry a slice of individuals (genes plus any cached
//! fitness); an empty slice means "stop". Reply frames carry one score per
//! individual of the slice, in the same order.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::GaError;

pub fn encode_slice<I: Serialize>(slice: &[I]) -> Result<Vec<u8>, GaError> {
    Ok(rmp_serde::to_vec(slice)?)
}

pub fn decode_slice<I: DeserializeOwned>(frame: &[u8]) -> Result<Vec<I>, GaError> {
    Ok(rmp_serde::from_slice(frame)?)
}

/// The dispatch frame that tells a worker to leave its service loop.
pub fn stop_frame() -> Result<Vec<u8>, GaError> {
    encode_slice::<()>(&[])
}

pub fn encode_scores(scores: &[f64]) -> Result<Vec<u8>, GaError> {
    Ok(rmp_serde::to_vec(scores)?)
}

pub fn decode_scores(frame: &[u8]) -> Result<Vec<f64>, GaError> {
    Ok(rmp_serde::from_slice(frame)?)
}
