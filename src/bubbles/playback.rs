use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// Whether the animation advances.
///
/// Clones share the same flag, so a handle can be given to an input
/// thread while the frame loop keeps its own.
#[derive(Debug, Clone, Default)]
pub struct Playback {
    playing: Arc<AtomicBool>,
}

impl Playback {
    /// A new controller starts out stopped.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        if !self.playing.swap(true, Ordering::Relaxed) {
            tracing::debug!("playback started");
        }
    }

    pub fn stop(&self) {
        if self.playing.swap(false, Ordering::Relaxed) {
            tracing::debug!("playback stopped");
        }
    }

    pub fn toggle(&self) -> PlaybackState {
        let was_playing = self.playing.fetch_xor(true, Ordering::Relaxed);
        tracing::debug!(playing = !was_playing, "playback toggled");
        Self::state_of(!was_playing)
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }

    pub fn state(&self) -> PlaybackState {
        Self::state_of(self.is_playing())
    }

    fn state_of(playing: bool) -> PlaybackState {
        if playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Stopped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_stopped() {
        let p = Playback::new();
        assert!(!p.is_playing());
        assert_eq!(p.state(), PlaybackState::Stopped);
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let p = Playback::new();

        p.start();
        p.start();
        assert_eq!(p.state(), PlaybackState::Playing);

        p.stop();
        p.stop();
        assert_eq!(p.state(), PlaybackState::Stopped);
    }

    #[test]
    fn toggle_flips() {
        let p = Playback::new();
        assert_eq!(p.toggle(), PlaybackState::Playing);
        assert_eq!(p.toggle(), PlaybackState::Stopped);
        assert!(!p.is_playing());
    }

    #[test]
    fn clones_share_state() {
        let p = Playback::new();
        let handle = p.clone();

        let t = std::thread::spawn(move || handle.start());
        let _ = t.join();

        assert!(p.is_playing());
    }
}
