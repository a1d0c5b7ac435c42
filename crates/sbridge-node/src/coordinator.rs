//! Publish/confirm coordination.
//!
//! A state-report broadcast and its host-facing acknowledgment complete
//! at different times: the mesh transport may retry the broadcast across
//! many loop iterations before reporting delivery. The tracker holds a
//! one-shot token correlating the pending publish to the first
//! confirmation that arrives, and expires the token if none ever does.

use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::error::NodeError;
use crate::traits::Confirmation;

/// Default bound on the wait for a delivery confirmation.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Correlates a state-report publish with its delivery confirmation.
#[derive(Debug)]
pub struct PublishTracker {
    /// When the in-flight publish was handed to the transport.
    pending_since: Option<Instant>,
    timeout: Duration,
}

impl PublishTracker {
    /// Create a tracker with the given confirmation timeout.
    pub fn new(timeout: Duration) -> Self {
        PublishTracker {
            pending_since: None,
            timeout,
        }
    }

    /// Whether a publish is awaiting confirmation.
    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Arm the tracker after a state report was handed to the transport.
    /// A re-publish before confirmation re-arms the token; only the
    /// newest publish is tracked.
    pub fn arm(&mut self, now: Instant) {
        self.pending_since = Some(now);
    }

    /// Consume a delivery confirmation.
    ///
    /// Returns `true` exactly once per armed publish, signalling that the
    /// host acknowledgment should be sent. The ack is sent whether or not
    /// delivery succeeded, matching the established host protocol; a
    /// failed delivery is logged. Confirmations with no pending publish
    /// are dropped.
    pub fn confirm(&mut self, confirmation: &Confirmation) -> bool {
        if self.pending_since.take().is_none() {
            debug!(
                "dropping confirmation from {} with no pending publish",
                confirmation.target
            );
            return false;
        }
        if !confirmation.delivered {
            warn!(
                "broadcast to {} not delivered; acknowledging host anyway",
                confirmation.target
            );
        }
        true
    }

    /// Expire an overdue publish. Returns the timeout condition at most
    /// once per armed publish; the host receives no acknowledgment.
    pub fn check_timeout(&mut self, now: Instant) -> Option<NodeError> {
        match self.pending_since {
            Some(since) if now.duration_since(since) >= self.timeout => {
                self.pending_since = None;
                Some(NodeError::ConfirmationTimeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                })
            }
            _ => None,
        }
    }
}

impl Default for PublishTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRMATION_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MeshAddress;

    fn confirmation(delivered: bool) -> Confirmation {
        Confirmation {
            target: MeshAddress::default(),
            delivered,
        }
    }

    #[test]
    fn test_confirm_fires_once_per_publish() {
        let mut tracker = PublishTracker::default();
        let now = Instant::now();

        assert!(!tracker.confirm(&confirmation(true)));

        tracker.arm(now);
        assert!(tracker.is_pending());
        assert!(tracker.confirm(&confirmation(true)));
        assert!(!tracker.is_pending());
        // A second confirmation for the same publish is dropped.
        assert!(!tracker.confirm(&confirmation(true)));
    }

    #[test]
    fn test_failed_delivery_still_acknowledged() {
        let mut tracker = PublishTracker::default();
        tracker.arm(Instant::now());
        assert!(tracker.confirm(&confirmation(false)));
    }

    #[test]
    fn test_timeout_clears_pending() {
        let mut tracker = PublishTracker::new(Duration::from_millis(50));
        let start = Instant::now();
        tracker.arm(start);

        assert!(tracker.check_timeout(start).is_none());
        let err = tracker
            .check_timeout(start + Duration::from_millis(51))
            .expect("publish should expire");
        assert!(matches!(err, NodeError::ConfirmationTimeout { timeout_ms: 50 }));
        assert!(!tracker.is_pending());
        // Expiry is reported once.
        assert!(tracker
            .check_timeout(start + Duration::from_millis(60))
            .is_none());
        // A late confirmation after expiry is dropped.
        assert!(!tracker.confirm(&confirmation(true)));
    }
}
