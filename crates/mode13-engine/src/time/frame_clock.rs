use std::time::{Duration, Instant};

/// Window over which the averaged FPS is recomputed.
const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Interval between title-bar refreshes.
const TITLE_INTERVAL: Duration = Duration::from_millis(250);

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f64,

    /// Averaged frames per second over the last completed one-second window.
    ///
    /// Zero until the first window completes.
    pub average_fps: f64,

    /// The title-bar text is due for a refresh on this tick.
    pub title_due: bool,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is reported unclamped. FPS is averaged as `frames / elapsed`
/// over windows of at least one second, and a separate accumulator gates
/// title updates to four per second.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    last_dt: f64,

    fps_sum: Duration,
    fps_count: u32,
    average_fps: f64,

    title_timer: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Creates a clock whose first tick measures from `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            last: start,
            last_dt: 0.0,
            fps_sum: Duration::ZERO,
            fps_count: 0,
            average_fps: 0.0,
            title_timer: Duration::ZERO,
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        self.last_dt = elapsed.as_secs_f64();

        // Summed as `Duration` so whole windows add up exactly.
        self.fps_sum += elapsed;
        self.fps_count += 1;
        if self.fps_sum >= FPS_WINDOW {
            self.average_fps = self.fps_count as f64 / self.fps_sum.as_secs_f64();
            self.fps_sum = Duration::ZERO;
            self.fps_count = 0;
        }

        self.title_timer += elapsed;
        let title_due = self.title_timer >= TITLE_INTERVAL;
        if title_due {
            self.title_timer = Duration::ZERO;
        }

        FrameTime {
            dt: self.last_dt,
            average_fps: self.average_fps,
            title_due,
        }
    }

    /// Duration of the last measured frame, in seconds.
    #[inline]
    pub fn delta_time(&self) -> f64 {
        self.last_dt
    }

    #[inline]
    pub fn average_fps(&self) -> f64 {
        self.average_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats the title-bar text: `"{name} - {fps} FPS ({ms} ms)"`.
pub fn format_title(app_name: &str, average_fps: f64) -> String {
    let frame_ms = if average_fps > 0.0 { 1000.0 / average_fps } else { 0.0 };
    format!("{app_name} - {average_fps:.1} FPS ({frame_ms:.1} ms)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    // ── delta time ────────────────────────────────────────────────────────

    #[test]
    fn tick_reports_elapsed_seconds() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        let ft = clock.tick_at(t0 + ms(16));
        assert!((ft.dt - 0.016).abs() < 1e-9);
        assert_eq!(clock.delta_time(), ft.dt);
    }

    #[test]
    fn tick_never_goes_negative() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0 + ms(10));
        assert_eq!(clock.tick_at(t0).dt, 0.0);
    }

    // ── fps ───────────────────────────────────────────────────────────────

    #[test]
    fn fps_is_zero_until_a_full_second_accumulates() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        for i in 1..=9 {
            let ft = clock.tick_at(t0 + ms(100 * i));
            assert_eq!(ft.average_fps, 0.0);
        }
    }

    #[test]
    fn fps_averages_over_the_window() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        let mut last = None;
        for i in 1..=10 {
            last = Some(clock.tick_at(t0 + ms(100 * i)));
        }
        let fps = last.unwrap().average_fps;
        assert_eq!(fps, 10.0);

        // The average holds until the next window completes.
        let ft = clock.tick_at(t0 + ms(1050));
        assert_eq!(ft.average_fps, 10.0);
    }

    #[test]
    fn sixty_hz_frames_complete_a_window_on_the_sixtieth_tick() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        let frame = Duration::from_nanos(16_666_667);
        let mut at = t0;
        for _ in 0..59 {
            at += frame;
            assert_eq!(clock.tick_at(at).average_fps, 0.0);
        }
        at += frame;
        let fps = clock.tick_at(at).average_fps;
        assert!(fps > 59.99 && fps <= 60.0, "fps = {fps}");
    }

    // ── title gate ────────────────────────────────────────────────────────

    #[test]
    fn title_is_due_every_quarter_second() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);
        let due: Vec<bool> = (1..=10)
            .map(|i| clock.tick_at(t0 + ms(100 * i)).title_due)
            .collect();
        // Accumulator: 0.1, 0.2, 0.3 → due; 0.1, 0.2, 0.3 → due; ...
        assert_eq!(
            due,
            vec![false, false, true, false, false, true, false, false, true, false]
        );
    }

    #[test]
    fn format_title_includes_fps_and_frame_time() {
        assert_eq!(format_title("Demo", 50.0), "Demo - 50.0 FPS (20.0 ms)");
        assert_eq!(format_title("Demo", 0.0), "Demo - 0.0 FPS (0.0 ms)");
    }
}
