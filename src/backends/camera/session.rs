// SPDX-License-Identifier: GPL-3.0-only

//! Camera session lifecycle
//!
//! A [`CameraSession`] owns the identity of the active preview stream: its
//! facing direction, whether a stream should be running, and a generation
//! counter that uniquely names each start. The stream itself runs inside the
//! application's subscription (or the CLI capture loop) and is keyed on the
//! generation, so stopping or switching facing here is what tears the old
//! pipeline down and prevents a late-resolving stale stream from being
//! applied over a newer one.

use super::types::Facing;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Lifecycle state and identity of the camera stream
#[derive(Debug)]
pub struct CameraSession {
    facing: Facing,
    generation: u64,
    active: bool,
    /// Raised to tell the streaming task of the current generation to exit
    cancel_flag: Arc<AtomicBool>,
}

impl CameraSession {
    /// Create an inactive session with the given facing direction
    pub fn new(facing: Facing) -> Self {
        Self {
            facing,
            generation: 0,
            active: false,
            cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The currently requested facing direction
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Identity of the current stream start
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a stream should currently be running
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Cancellation flag shared with the streaming task of this generation
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel_flag)
    }

    /// Whether a result produced by the given generation may be applied.
    ///
    /// Late results from torn-down streams fail this check and are dropped.
    pub fn accepts(&self, generation: u64) -> bool {
        self.active && generation == self.generation
    }

    /// Activate the session under a fresh generation.
    ///
    /// Returns the new generation; the caller hands it to the streaming task
    /// so its frames can be identified.
    pub fn start(&mut self) -> u64 {
        if self.active {
            // Restarting an active session retires the old stream first
            self.raise_cancel();
        }
        self.generation += 1;
        self.active = true;
        self.cancel_flag = Arc::new(AtomicBool::new(false));
        info!(
            generation = self.generation,
            facing = %self.facing,
            "Camera session started"
        );
        self.generation
    }

    /// Deactivate the session and signal the streaming task to exit.
    ///
    /// Idempotent: stopping an inactive session is a no-op.
    pub fn stop(&mut self) {
        if !self.active {
            debug!("Session already inactive");
            return;
        }
        self.raise_cancel();
        self.active = false;
        info!(generation = self.generation, "Camera session stopped");
    }

    /// Stop the current stream, flip facing, and start a new one.
    ///
    /// Returns the generation of the new stream. The preview goes dark for
    /// the moment between teardown and the first frame of the new stream.
    pub fn switch_facing(&mut self) -> u64 {
        self.stop();
        self.facing = self.facing.flipped();
        self.start()
    }

    /// Change facing without starting (used when restoring persisted config)
    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    fn raise_cancel(&self) {
        self.cancel_flag.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_inactive() {
        let session = CameraSession::new(Facing::Front);
        assert!(!session.is_active());
        assert_eq!(session.generation(), 0);
        assert!(!session.accepts(0));
    }

    #[test]
    fn start_bumps_generation_and_activates() {
        let mut session = CameraSession::new(Facing::Back);
        let generation = session.start();
        assert!(session.is_active());
        assert_eq!(generation, 1);
        assert!(session.accepts(1));
    }

    #[test]
    fn stop_is_idempotent_and_cancels() {
        let mut session = CameraSession::new(Facing::Back);
        session.start();
        let flag = session.cancel_flag();

        session.stop();
        assert!(!session.is_active());
        assert!(flag.load(Ordering::Acquire));

        // Second stop is a no-op
        session.stop();
        assert!(!session.is_active());
    }

    #[test]
    fn switch_facing_stops_then_starts_flipped() {
        let mut session = CameraSession::new(Facing::Front);
        session.start();
        let old_flag = session.cancel_flag();
        let old_generation = session.generation();

        let new_generation = session.switch_facing();

        // Old stream was told to exit; exactly one stream generation is current
        assert!(old_flag.load(Ordering::Acquire));
        assert!(!session.cancel_flag().load(Ordering::Acquire));
        assert_eq!(session.facing(), Facing::Back);
        assert!(session.is_active());
        assert_eq!(new_generation, old_generation + 1);
        assert!(!session.accepts(old_generation));
        assert!(session.accepts(new_generation));
    }

    #[test]
    fn stale_generations_rejected_across_switch_sequences() {
        let mut session = CameraSession::new(Facing::Front);
        let mut generations = vec![session.start()];
        for _ in 0..3 {
            generations.push(session.switch_facing());
        }

        // Only the most recent start may deliver results
        let (current, stale) = generations.split_last().unwrap();
        assert!(session.accepts(*current));
        for generation in stale {
            assert!(!session.accepts(*generation));
        }
    }

    #[test]
    fn restart_retires_previous_stream() {
        let mut session = CameraSession::new(Facing::Back);
        session.start();
        let first_flag = session.cancel_flag();

        session.start();
        assert!(first_flag.load(Ordering::Acquire));
        assert!(session.is_active());
    }
}
