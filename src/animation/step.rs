use std::fmt;

/// Shortest duration a step may have (seconds)
const MIN_DURATION: f32 = 1.0e-3;

/// Interpolation written into a typed target: `f(target, progress)`
pub type Interpolation<T> = Box<dyn Fn(&mut T, f32) + Send + Sync>;

/// Which interpolation a step runs on update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// A single timed transition
///
/// The step never owns the state it animates: callers pass the target into
/// [`AnimationStep::update`], so a step can be tested against a plain struct.
pub struct AnimationStep<T> {
    forward: Interpolation<T>,
    backward: Option<Interpolation<T>>,
    duration: f32,
    elapsed: f32,
    direction: Direction,
}

impl<T> AnimationStep<T> {
    /// Step with only a forward interpolation
    pub fn new<F>(forward: F, duration: f32) -> Self
    where
        F: Fn(&mut T, f32) + Send + Sync + 'static,
    {
        AnimationStep {
            forward: Box::new(forward),
            backward: None,
            duration: checked_duration(duration),
            elapsed: 0.0,
            direction: Direction::Forward,
        }
    }

    /// Step that can also be played backward
    pub fn with_backward<F, B>(forward: F, backward: B, duration: f32) -> Self
    where
        F: Fn(&mut T, f32) + Send + Sync + 'static,
        B: Fn(&mut T, f32) + Send + Sync + 'static,
    {
        AnimationStep {
            forward: Box::new(forward),
            backward: Some(Box::new(backward)),
            duration: checked_duration(duration),
            elapsed: 0.0,
            direction: Direction::Forward,
        }
    }

    /// Advance by `dt` and apply the interpolation for the current direction once
    pub fn update(&mut self, dt: f32, target: &mut T) {
        self.elapsed += dt.max(0.0);
        let progress = self.progress();

        match self.direction {
            Direction::Forward => (self.forward)(target, progress),
            Direction::Backward => {
                if let Some(backward) = &self.backward {
                    backward(target, progress);
                }
            }
        }
    }

    /// Normalized completion in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Rewind to the start, keeping the direction
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl<T> fmt::Debug for AnimationStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationStep")
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("direction", &self.direction)
            .field("has_backward", &self.backward.is_some())
            .finish()
    }
}

fn checked_duration(duration: f32) -> f32 {
    if duration > 0.0 {
        duration
    } else {
        log::warn!(
            "Animation step duration {} is not positive, using {}s",
            duration,
            MIN_DURATION
        );
        MIN_DURATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: usize,
        last: f32,
        history: Vec<f32>,
    }

    fn recording_step(duration: f32) -> AnimationStep<Recorder> {
        AnimationStep::new(
            |recorder: &mut Recorder, t| {
                recorder.calls += 1;
                recorder.last = t;
                recorder.history.push(t);
            },
            duration,
        )
    }

    #[test]
    fn test_progress_is_clamped_and_monotonic() {
        let mut step = recording_step(1.0);
        let mut recorder = Recorder::default();

        for _ in 0..15 {
            step.update(0.1, &mut recorder);
        }

        assert!(recorder.history.iter().all(|&t| (0.0..=1.0).contains(&t)));
        assert!(recorder.history.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(recorder.last, 1.0);
    }

    #[test]
    fn test_one_call_per_update() {
        let mut step = recording_step(0.5);
        let mut recorder = Recorder::default();

        // A single huge dt is still a single interpolation call
        step.update(10.0, &mut recorder);
        assert_eq!(recorder.calls, 1);
        assert!(step.is_finished());
    }

    #[test]
    fn test_finished_exactly_at_duration() {
        let mut step = recording_step(1.0);
        let mut recorder = Recorder::default();

        step.update(0.5, &mut recorder);
        assert!(!step.is_finished());
        step.update(0.25, &mut recorder);
        assert!(!step.is_finished());
        step.update(0.25, &mut recorder);
        assert!(step.is_finished());
    }

    #[test]
    fn test_reset_keeps_direction() {
        let mut step = recording_step(1.0);
        let mut recorder = Recorder::default();

        step.set_direction(Direction::Backward);
        step.update(2.0, &mut recorder);
        step.reset();

        assert_eq!(step.elapsed(), 0.0);
        assert_eq!(step.direction(), Direction::Backward);
    }

    #[test]
    fn test_backward_runs_backward_fn() {
        let mut step: AnimationStep<Vec<&'static str>> = AnimationStep::with_backward(
            |log: &mut Vec<&'static str>, _| log.push("forward"),
            |log: &mut Vec<&'static str>, _| log.push("backward"),
            1.0,
        );
        let mut log = Vec::new();

        step.update(0.1, &mut log);
        step.set_direction(Direction::Backward);
        step.update(0.1, &mut log);

        assert_eq!(log, vec!["forward", "backward"]);
    }

    #[test]
    fn test_backward_without_fn_is_silent() {
        let mut step = recording_step(1.0);
        let mut recorder = Recorder::default();

        step.set_direction(Direction::Backward);
        step.update(0.3, &mut recorder);

        assert_eq!(recorder.calls, 0);
        assert!((step.elapsed() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_non_positive_duration_is_clamped() {
        let step = recording_step(0.0);
        assert!(step.duration() > 0.0);

        let step = recording_step(f32::NAN);
        assert!(step.duration() > 0.0);
    }
}
