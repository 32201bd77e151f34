use std::time::{Duration, Instant};

use bevy::prelude::*;

pub struct FrameLimiterPlugin;

impl Plugin for FrameLimiterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameLimiter>()
            .add_systems(Last, limit_frame_rate);
    }
}

/// Opt-in frame-rate cap (render loop only, fixed physics step is unaffected)
#[derive(Resource, Debug, Clone, Copy)]
pub struct FrameLimiter {
    pub enabled: bool,
    pub target_fps: u32,
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self {
            enabled: false,
            target_fps: 60,
        }
    }
}

impl FrameLimiter {
    /// Frame budget; None when limiting is off
    pub fn frame_budget(&self) -> Option<Duration> {
        if !self.enabled || self.target_fps == 0 {
            return None;
        }
        Some(Duration::from_secs_f64(1.0 / self.target_fps as f64))
    }
}

/// Time left to sleep so that the frame takes at least `budget`
pub fn remaining_sleep(budget: Duration, elapsed: Duration) -> Duration {
    budget.saturating_sub(elapsed)
}

fn limit_frame_rate(limiter: Res<FrameLimiter>, mut last_frame: Local<Option<Instant>>) {
    if let (Some(budget), Some(start)) = (limiter.frame_budget(), *last_frame) {
        let sleep = remaining_sleep(budget, start.elapsed());
        if !sleep.is_zero() {
            std::thread::sleep(sleep);
        }
    }

    *last_frame = Some(Instant::now());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_limiter_has_no_budget() {
        let limiter = FrameLimiter { enabled: false, target_fps: 60 };
        assert!(limiter.frame_budget().is_none());

        let zero = FrameLimiter { enabled: true, target_fps: 0 };
        assert!(zero.frame_budget().is_none());
    }

    #[test]
    fn test_limiter_is_opt_in() {
        let limiter = FrameLimiter::default();
        assert!(!limiter.enabled);
        assert!(limiter.frame_budget().is_none());

        let enabled = FrameLimiter { enabled: true, ..limiter };
        assert_eq!(enabled.frame_budget(), Some(Duration::from_secs_f64(1.0 / 60.0)));
    }

    #[test]
    fn test_remaining_sleep() {
        let budget = Duration::from_millis(16);
        assert_eq!(remaining_sleep(budget, Duration::from_millis(10)), Duration::from_millis(6));
        assert_eq!(remaining_sleep(budget, Duration::from_millis(20)), Duration::ZERO);
    }
}
