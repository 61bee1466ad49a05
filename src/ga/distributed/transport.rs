//! Worker links.
//!
//! A [`Link`] is one duplex, ordered, frame-oriented connection between the
//! coordinator and a single worker. Frames are opaque bytes; see
//! [`wire`](super::wire) for what goes in them.
//!
//! - [`ChannelLink`]: in-process, backed by crossbeam channels
//! - [`StreamLink`]: any `Read + Write` byte stream (TCP socket, pipe pair),
//!   with `u32` big-endian length prefixes

use std::io::{self, Read, Write};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::error::GaError;

/// Largest frame a [`StreamLink`] accepts.
pub const MAX_FRAME_BYTES: usize = 64 * 1024 * 1024;

/// Ordered frame delivery to and from one peer.
pub trait Link: Send {
    fn send(&mut self, frame: Vec<u8>) -> Result<(), GaError>;

    /// Blocks until the next frame arrives.
    fn recv(&mut self) -> Result<Vec<u8>, GaError>;
}

/// In-process link: one channel per direction.
#[derive(Debug)]
pub struct ChannelLink {
    tx: Sender<Vec<u8>>,
    rx: Receiver<Vec<u8>>,
    timeout: Option<Duration>,
}

impl ChannelLink {
    /// Creates a connected pair: `(coordinator end, worker end)`.
    pub fn pair() -> (ChannelLink, ChannelLink) {
        let (dispatch_tx, dispatch_rx) = crossbeam_channel::unbounded();
        let (collect_tx, collect_rx) = crossbeam_channel::unbounded();
        (
            ChannelLink {
                tx: dispatch_tx,
                rx: collect_rx,
                timeout: None,
            },
            ChannelLink {
                tx: collect_tx,
                rx: dispatch_rx,
                timeout: None,
            },
        )
    }

    /// Bounds how long [`recv`](Link::recv) waits; expiry is reported as a
    /// [`GaError::Transport`] with kind `TimedOut`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Link for ChannelLink {
    fn send(&mut self, frame: Vec<u8>) -> Result<(), GaError> {
        self.tx.send(frame).map_err(|_| GaError::Disconnected)
    }

    fn recv(&mut self) -> Result<Vec<u8>, GaError> {
        match self.timeout {
            None => self.rx.recv().map_err(|_| GaError::Disconnected),
            Some(timeout) => self.rx.recv_timeout(timeout).map_err(|e| match e {
                RecvTimeoutError::Timeout => GaError::Transport(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("no frame within {timeout:?}"),
                )),
                RecvTimeoutError::Disconnected => GaError::Disconnected,
            }),
        }
    }
}

/// Length-prefixed frames over a byte stream.
///
/// Each frame is written with a single `write_all`. For TCP, also consider
/// `TcpStream::set_nodelay(true)` on both ends.
#[derive(Debug)]
pub struct StreamLink<S> {
    stream: S,
}

impl<S: Read + Write + Send> StreamLink<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Write + Send> Link for StreamLink<S> {
    fn send(&mut self, frame: Vec<u8>) -> Result<(), GaError> {
        let len = u32::try_from(frame.len())
            .ok()
            .filter(|&n| n as usize <= MAX_FRAME_BYTES)
            .ok_or_else(|| {
                GaError::Transport(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("frame of {} bytes exceeds limit", frame.len()),
                ))
            })?;
        // One write per frame; a separate header write stalls TCP on
        // Nagle plus delayed ACK.
        let mut buf = Vec::with_capacity(4 + frame.len());
        buf.extend_from_slice(&len.to_be_bytes());
        buf.extend_from_slice(&frame);
        self.stream.write_all(&buf)?;
        self.stream.flush()?;
        Ok(())
    }

    fn recv(&mut self) -> Result<Vec<u8>, GaError> {
        let mut header = [0u8; 4];
        match self.stream.read_exact(&mut header) {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(GaError::Disconnected)
            }
            other => other?,
        }
        let len = u32::from_be_bytes(header) as usize;
        if len > MAX_FRAME_BYTES {
            return Err(GaError::Transport(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("incoming frame of {len} bytes exceeds limit"),
            )));
        }
        let mut frame = vec![0u8; len];
        self.stream.read_exact(&mut frame)?;
        Ok(frame)
    }
}
