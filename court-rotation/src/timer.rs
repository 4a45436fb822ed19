use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const MIN_MATCH_MINUTES: u32 = 5;
pub const MAX_MATCH_MINUTES: u32 = 60;
pub const DEFAULT_MATCH_MINUTES: u32 = 15;

/// How a match ends: on the clock, or first to four games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "format")]
pub enum MatchFormat {
    Timed { minutes: u32 },
    FastFour,
}

impl Default for MatchFormat {
    fn default() -> Self {
        MatchFormat::Timed {
            minutes: DEFAULT_MATCH_MINUTES,
        }
    }
}

impl MatchFormat {
    /// Timed format with minutes clamped to the allowed range
    pub fn timed(minutes: u32) -> Self {
        MatchFormat::Timed {
            minutes: minutes.clamp(MIN_MATCH_MINUTES, MAX_MATCH_MINUTES),
        }
    }

    /// `None` for Fast Four, which has no clock
    pub fn duration(&self) -> Option<Duration> {
        match self {
            MatchFormat::Timed { minutes } => Some(Duration::from_secs(u64::from(*minutes) * 60)),
            MatchFormat::FastFour => None,
        }
    }
}

/// `MM:SS`
pub fn format_remaining(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Countdown running on its own task. Never blocks round generation.
#[derive(Debug)]
pub struct MatchTimer {
    remaining: watch::Receiver<u64>,
    handle: JoinHandle<()>,
    cancelled: AtomicBool,
}

impl MatchTimer {
    /// Spawns the countdown; must be called inside a tokio runtime
    pub fn start(duration: Duration) -> Self {
        let total = duration.as_secs();
        let (tx, rx) = watch::channel(total);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.tick().await;
            for left in (0..total).rev() {
                interval.tick().await;
                if tx.send(left).is_err() {
                    return;
                }
            }
            info!("Time's up!");
        });
        info!("Match timer started for {}", format_remaining(total));
        Self {
            remaining: rx,
            handle,
            cancelled: AtomicBool::new(false),
        }
    }

    pub fn remaining(&self) -> u64 {
        *self.remaining.borrow()
    }

    pub fn cancel(&self) {
        self.handle.abort();
        self.cancelled.store(true, Ordering::SeqCst);
        info!("Match timer cancelled at {}", format_remaining(self.remaining()));
    }

    /// True once the countdown has expired or been cancelled
    pub fn is_finished(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst) || self.handle.is_finished()
    }
}

impl Drop for MatchTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_minutes_are_clamped() {
        assert_eq!(MatchFormat::timed(1), MatchFormat::Timed { minutes: 5 });
        assert_eq!(MatchFormat::timed(90), MatchFormat::Timed { minutes: 60 });
        assert_eq!(MatchFormat::FastFour.duration(), None);
        assert_eq!(MatchFormat::default().duration(), Some(Duration::from_secs(900)));
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_remaining(905), "15:05");
        assert_eq!(format_remaining(0), "00:00");
    }

    #[tokio::test(start_paused = true)]
    async fn counts_down_to_zero() {
        let timer = MatchTimer::start(Duration::from_secs(3));
        assert_eq!(timer.remaining(), 3);
        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(timer.remaining(), 0);
        assert!(timer.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_the_clock() {
        let timer = MatchTimer::start(Duration::from_secs(60));
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(timer.remaining(), 58);
        timer.cancel();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(timer.remaining(), 58);
        assert!(timer.is_finished());
    }
}
