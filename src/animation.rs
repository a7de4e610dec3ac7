//! The frame loop: sample time, render, present, sleep

use crate::renderer::FrameRenderer;
use crate::scene::SceneParameters;
use crate::terminal::{RenderError, TerminalDisplay};
use std::io::Write;
use std::time::{Duration, Instant};

/// Time source and delay primitive for the frame loop
pub trait Clock {
    /// Free-running seconds since an arbitrary epoch
    fn seconds(&self) -> f64;

    /// Block for `duration`
    fn sleep(&self, duration: Duration);
}

/// Monotonic clock starting at construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// What happened in one iteration of the loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Zero-based frame number
    pub index: u64,
    /// Rotation used for every cell of the frame
    pub angle: f64,
    /// Cells that hit the torus
    pub coverage: usize,
    pub render_time: Duration,
}

/// Drives the renderer at a fixed cadence
///
/// The clock is read once per frame, so all cells of a frame share one
/// rotation. After each frame the loop sleeps a fixed interval no matter how
/// long rendering took; there is no catch-up.
pub struct Animator<W: Write, C: Clock> {
    params: SceneParameters,
    renderer: FrameRenderer,
    display: TerminalDisplay<W>,
    clock: C,
    frames: u64,
}

impl<W: Write, C: Clock> Animator<W, C> {
    pub fn new(params: SceneParameters, display: TerminalDisplay<W>, clock: C) -> Self {
        Self {
            renderer: FrameRenderer::new(&params),
            params,
            display,
            clock,
            frames: 0,
        }
    }

    /// Render and present a single frame, without sleeping
    pub fn step(&mut self) -> Result<FrameStats, RenderError> {
        // Single clock read: every cell of this frame uses the same rotation
        let angle = self.params.rotation_angle(self.clock.seconds());

        let started = Instant::now();
        let frame = self.renderer.render(angle);
        let render_time = started.elapsed();

        self.display.present(&frame)?;

        let stats = FrameStats {
            index: self.frames,
            angle,
            coverage: frame.coverage(),
            render_time,
        };
        self.frames += 1;

        tracing::debug!(
            frame = stats.index,
            angle = stats.angle,
            coverage = stats.coverage,
            render_us = stats.render_time.as_micros() as u64,
            "Frame presented"
        );

        Ok(stats)
    }

    /// Run frames until `keep_running` returns false
    ///
    /// The predicate sees each frame's stats right after it is presented; the
    /// inter-frame sleep only happens when it asks for another frame.
    /// Returns the total number of frames presented by this animator.
    pub fn run<F>(&mut self, mut keep_running: F) -> Result<u64, RenderError>
    where
        F: FnMut(&FrameStats) -> bool,
    {
        let interval = self.params.frame_interval();
        loop {
            let stats = self.step()?;
            if !keep_running(&stats) {
                return Ok(self.frames);
            }
            // Fixed delay regardless of render time; slow frames are not made up
            self.clock.sleep(interval);
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn display(&self) -> &TerminalDisplay<W> {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Clock that only moves when slept on
    #[derive(Default)]
    struct ManualClock {
        now: Cell<f64>,
        reads: Cell<u32>,
        sleeps: RefCell<Vec<Duration>>,
    }

    impl ManualClock {
        fn at(seconds: f64) -> Self {
            let clock = Self::default();
            clock.now.set(seconds);
            clock
        }
    }

    impl Clock for &ManualClock {
        fn seconds(&self) -> f64 {
            self.reads.set(self.reads.get() + 1);
            self.now.get()
        }

        fn sleep(&self, duration: Duration) {
            self.sleeps.borrow_mut().push(duration);
            self.now.set(self.now.get() + duration.as_secs_f64());
        }
    }

    fn animator(clock: &ManualClock) -> Animator<Vec<u8>, &ManualClock> {
        Animator::new(SceneParameters::default(), TerminalDisplay::new(Vec::new()), clock)
    }

    #[test]
    fn test_single_step_does_not_sleep() {
        let clock = ManualClock::at(0.0);
        let mut anim = animator(&clock);

        let stats = anim.step().unwrap();
        assert_eq!(stats.index, 0);
        assert_eq!(stats.angle, 0.0);
        assert!(stats.coverage > 0);
        assert!(clock.sleeps.borrow().is_empty());
        assert_eq!(anim.display().frames_written(), 1);
    }

    #[test]
    fn test_run_one_frame() {
        let clock = ManualClock::at(0.0);
        let mut anim = animator(&clock);

        let frames = anim.run(|_| false).unwrap();
        assert_eq!(frames, 1);
        assert!(clock.sleeps.borrow().is_empty());

        let out = String::from_utf8(anim.display().get_ref().clone()).unwrap();
        assert_eq!(out.matches('\n').count(), crate::HEIGHT);
    }

    #[test]
    fn test_clock_sampled_once_per_frame() {
        let clock = ManualClock::at(0.0);
        let mut anim = animator(&clock);

        anim.run(|stats| stats.index < 4).unwrap();
        assert_eq!(anim.frames(), 5);
        assert_eq!(clock.reads.get(), 5);
    }

    #[test]
    fn test_fixed_sleep_between_frames() {
        let clock = ManualClock::at(0.0);
        let mut anim = animator(&clock);

        anim.run(|stats| stats.index < 2).unwrap();
        let sleeps = clock.sleeps.borrow();
        assert_eq!(sleeps.len(), 2);
        for d in sleeps.iter() {
            assert!((d.as_secs_f64() - 1.0 / 30.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_angle_follows_clock() {
        let clock = ManualClock::at(1.5);
        let mut anim = animator(&clock);

        let mut angles = Vec::new();
        anim.run(|stats| {
            angles.push(stats.angle);
            angles.len() < 3
        })
        .unwrap();

        assert!((angles[0] - 3.0).abs() < 1e-12);
        assert!((angles[1] - (3.0 + 2.0 / 30.0)).abs() < 1e-6);
        assert!((angles[2] - (3.0 + 4.0 / 30.0)).abs() < 1e-6);
    }

    #[test]
    fn test_write_failure_stops_the_loop() {
        struct Closed;

        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
        }

        let clock = ManualClock::at(0.0);
        let mut anim = Animator::new(SceneParameters::default(), TerminalDisplay::new(Closed), &clock);

        let err = anim.run(|_| true).unwrap_err();
        assert!(err.is_broken_pipe());
        assert_eq!(anim.frames(), 0);
    }

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock::new();
        let a = clock.seconds();
        clock.sleep(Duration::from_millis(2));
        assert!(clock.seconds() > a);
    }
}
