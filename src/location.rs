//! Single-shot device position requests.
//!
//! The current position is only ever used to re-center the map view, never to
//! add a vertex. A request is a one-off future with an explicit deadline: it
//! resolves once, times out, or is cancelled by dropping it. There is no
//! retry and no long-lived callback registration.

use crate::constants::LOCATION_TIMEOUT;
use crate::types::Coordinate;
use futures::channel::oneshot;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Why a position request produced no coordinate.
///
/// All of these are purely informational; no other state is affected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    /// No answer arrived before the deadline.
    #[error("position request timed out")]
    TimedOut,
    /// The user or platform denied access to the device position.
    #[error("position access denied")]
    Denied,
    /// The provider gave up without an answer.
    #[error("position unavailable")]
    Unavailable,
}

/// A source of single-shot position requests.
pub trait LocationProvider {
    /// Starts one position request.
    ///
    /// The provider answers at most once through the returned request's
    /// channel; dropping the request cancels the attempt.
    fn request_position(&mut self) -> PositionRequest;
}

/// An in-flight position request with a bounded deadline.
pub struct PositionRequest {
    receiver: oneshot::Receiver<Result<Coordinate, LocationError>>,
    deadline: Instant,
}

impl PositionRequest {
    /// Wraps a provider's answer channel with a deadline of `timeout` from
    /// now.
    pub fn new(
        receiver: oneshot::Receiver<Result<Coordinate, LocationError>>,
        timeout: Duration,
    ) -> Self {
        Self {
            receiver,
            deadline: Instant::now() + timeout,
        }
    }

    /// Checks whether the request has resolved.
    ///
    /// Returns `None` while still pending; once this returns `Some`, the
    /// request is finished and should not be polled again. A request whose
    /// deadline has passed resolves to [`LocationError::TimedOut`]; a
    /// provider that dropped its end without answering resolves to
    /// [`LocationError::Unavailable`].
    pub fn poll_result(&mut self) -> Option<Result<Coordinate, LocationError>> {
        match self.receiver.try_recv() {
            Ok(Some(answer)) => Some(answer),
            Ok(None) => {
                if Instant::now() >= self.deadline {
                    Some(Err(LocationError::TimedOut))
                } else {
                    None
                }
            }
            Err(oneshot::Canceled) => Some(Err(LocationError::Unavailable)),
        }
    }

    /// Abandons the request; the provider sees the channel close.
    pub fn cancel(self) {}
}

/// A provider that answers immediately with a fixed position, or denies when
/// it has none.
///
/// Stands in for a real platform geolocation source in the bundled shell and
/// in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLocationProvider {
    position: Option<Coordinate>,
}

impl StaticLocationProvider {
    /// A provider that always answers with `position`.
    pub fn fixed(position: Coordinate) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// A provider that always denies access.
    pub fn denied() -> Self {
        Self { position: None }
    }
}

impl LocationProvider for StaticLocationProvider {
    fn request_position(&mut self) -> PositionRequest {
        let (sender, receiver) = oneshot::channel();
        let answer = match self.position {
            Some(position) => Ok(position),
            None => Err(LocationError::Denied),
        };
        // A closed channel reports as Unavailable, which is also correct.
        let _ = sender.send(answer);
        PositionRequest::new(receiver, LOCATION_TIMEOUT)
    }
}
