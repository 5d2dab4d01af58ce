//! Blinking caret timer.
//!
//! Purely cosmetic: a tokio task flips a visibility flag on a fixed period.
//! It never touches the session; readers only see the flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Read-only view of the caret's visibility.
#[derive(Clone, Debug)]
pub struct Caret {
    visible: Arc<AtomicBool>,
}

impl Caret {
    /// A caret that never blinks and is always shown.
    pub fn steady() -> Self {
        Self {
            visible: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Start blinking on the current tokio runtime.
    ///
    /// The caret starts visible and flips every `period`. Abort the returned
    /// handle to stop it.
    pub fn spawn(period: Duration) -> (Self, JoinHandle<()>) {
        let caret = Self::steady();
        let visible = caret.visible.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                visible.fetch_xor(true, Ordering::Relaxed);
            }
        });

        (caret, handle)
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }

    /// The caret as it should be drawn right now.
    pub fn glyph(&self) -> char {
        if self.is_visible() { '|' } else { ' ' }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_caret() {
        let caret = Caret::steady();
        assert!(caret.is_visible());
        assert_eq!(caret.glyph(), '|');
    }

    #[tokio::test(start_paused = true)]
    async fn test_blinks_every_period() {
        let period = Duration::from_millis(500);
        let (caret, handle) = Caret::spawn(period);
        assert!(caret.is_visible());

        tokio::time::sleep(period + Duration::from_millis(1)).await;
        assert!(!caret.is_visible());
        assert_eq!(caret.glyph(), ' ');

        tokio::time::sleep(period).await;
        assert!(caret.is_visible());

        handle.abort();
    }
}
