use super::step::{AnimationStep, Direction};

/// Lowest playback speed multiplier
pub const MIN_SPEED: f32 = 0.1;

/// An ordered timeline of animation steps with playback control
///
/// Invariant: `current < steps.len()` while playing; a finished non-looping
/// sequence parks the cursor at `steps.len()`.
#[derive(Debug)]
pub struct AnimationSequence<T> {
    steps: Vec<AnimationStep<T>>,
    current: usize,
    /// Delay between consecutive steps (seconds, unscaled)
    cooldown: f32,
    delay_timer: f32,
    speed: f32,
    playing: bool,
    looping: bool,
    waiting: bool,
}

impl<T> Default for AnimationSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AnimationSequence<T> {
    pub fn new() -> Self {
        AnimationSequence {
            steps: Vec::new(),
            current: 0,
            cooldown: 0.0,
            delay_timer: 0.0,
            speed: 1.0,
            playing: false,
            looping: false,
            waiting: false,
        }
    }

    // === Queries ===

    pub fn is_finished(&self) -> bool {
        !self.playing && !self.looping && self.current >= self.steps.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// The step under the cursor, if any
    pub fn current_step(&self) -> Option<&AnimationStep<T>> {
        self.steps.get(self.current)
    }

    // === Building ===

    pub fn push(&mut self, step: AnimationStep<T>) {
        self.steps.push(step);
    }

    /// Drop every step and stop playback
    pub fn clear(&mut self) {
        self.steps.clear();
        self.current = 0;
        self.playing = false;
        self.waiting = false;
        self.delay_timer = 0.0;
    }

    // === Playback control ===

    /// Resume playback, rewinding first if the sequence already ran off the end
    pub fn play(&mut self) {
        if self.steps.is_empty() {
            return;
        }

        self.playing = true;
        if self.current >= self.steps.len() {
            self.current = 0;
            self.waiting = false;
            for step in &mut self.steps {
                step.reset();
            }
        }
    }

    /// Stop advancing; progress is kept
    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn play_next(&mut self) {
        if !self.steps.is_empty() {
            self.waiting = false;
            self.proceed_to_next();
            self.playing = true;
        }
    }

    pub fn play_previous(&mut self) {
        if !self.steps.is_empty() {
            self.waiting = false;
            self.proceed_to_previous();
            self.playing = true;
        }
    }

    pub fn go_to_front(&mut self) {
        if let Some(first) = self.steps.first_mut() {
            self.current = 0;
            self.waiting = false;
            first.reset();
        }
    }

    pub fn go_to_back(&mut self) {
        let len = self.steps.len();
        if let Some(last) = self.steps.last_mut() {
            self.current = len - 1;
            self.waiting = false;
            last.reset();
        }
    }

    /// Set the time multiplier, never below [`MIN_SPEED`]
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(MIN_SPEED);
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn set_cooldown(&mut self, cooldown: f32) {
        self.cooldown = cooldown.max(0.0);
    }

    /// Point every step in the same direction
    pub fn set_direction(&mut self, direction: Direction) {
        for step in &mut self.steps {
            step.set_direction(direction);
        }
    }

    // === Frame update ===

    /// Advance the timeline by one frame, writing into `target`
    pub fn update(&mut self, dt: f32, target: &mut T) {
        if !self.playing || self.steps.is_empty() {
            return;
        }

        if !self.waiting {
            let Some(step) = self.steps.get_mut(self.current) else {
                // Cursor parked past the end while flagged playing
                self.playing = false;
                return;
            };

            step.update(dt * self.speed, target);

            if step.is_finished() {
                if self.cooldown > 0.0 {
                    self.waiting = true;
                    self.delay_timer = 0.0;
                } else {
                    self.proceed_to_next();
                }
            }
        } else {
            self.delay_timer += dt;
            if self.delay_timer >= self.cooldown {
                self.waiting = false;
                self.proceed_to_next();
            }
        }
    }

    fn proceed_to_next(&mut self) {
        let len = self.steps.len();

        if self.looping {
            self.current = (self.current + 1) % len;
        } else if self.current + 1 < len {
            self.current += 1;
        } else {
            self.current = len;
            self.playing = false;
            return;
        }

        self.steps[self.current].reset();
    }

    fn proceed_to_previous(&mut self) {
        let len = self.steps.len();

        if self.looping {
            self.current = (self.current.min(len) + len - 1) % len;
        } else if self.current > 0 {
            self.current = self.current.min(len) - 1;
        }

        self.steps[self.current].reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts how often each step reported progress 1.0
    #[derive(Default)]
    struct Completions {
        per_step: Vec<usize>,
        total: usize,
    }

    fn counting_step(index: usize, duration: f32) -> AnimationStep<Completions> {
        AnimationStep::new(
            move |c: &mut Completions, t| {
                if c.per_step.len() <= index {
                    c.per_step.resize(index + 1, 0);
                }
                if t >= 1.0 {
                    c.per_step[index] += 1;
                    c.total += 1;
                }
            },
            duration,
        )
    }

    fn sequence_of(n: usize, duration: f32) -> AnimationSequence<Completions> {
        let mut seq = AnimationSequence::new();
        for i in 0..n {
            seq.push(counting_step(i, duration));
        }
        seq
    }

    #[test]
    fn test_update_is_noop_when_paused() {
        let mut seq = sequence_of(2, 0.5);
        let mut c = Completions::default();

        seq.update(1.0, &mut c);
        assert_eq!(c.total, 0);
        assert_eq!(seq.current_index(), 0);
    }

    #[test]
    fn test_non_looping_finishes_after_each_step_once() {
        let mut seq = sequence_of(3, 0.5);
        let mut c = Completions::default();

        seq.play();
        let mut frames = 0;
        while !seq.is_finished() && frames < 1000 {
            seq.update(0.125, &mut c);
            frames += 1;
        }

        assert!(seq.is_finished());
        assert_eq!(c.total, 3);
        assert_eq!(c.per_step, vec![1, 1, 1]);
        assert_eq!(seq.current_index(), 3);
        assert!(!seq.is_playing());
    }

    #[test]
    fn test_not_finished_before_last_completion() {
        let mut seq = sequence_of(2, 0.5);
        let mut c = Completions::default();

        seq.play();
        while c.total < 2 {
            assert!(!seq.is_finished());
            seq.update(0.125, &mut c);
        }
        assert!(seq.is_finished());
    }

    #[test]
    fn test_looping_never_finishes() {
        let mut seq = sequence_of(2, 0.25);
        let mut c = Completions::default();

        seq.set_looping(true);
        seq.play();
        for _ in 0..200 {
            seq.update(0.125, &mut c);
            assert!(!seq.is_finished());
            assert!(seq.current_index() < seq.len());
        }
        assert!(c.total >= 10);
        assert!(seq.is_playing());
    }

    #[test]
    fn test_cooldown_delays_next_step() {
        let mut seq = sequence_of(2, 0.125);
        let mut c = Completions::default();

        seq.set_cooldown(0.5);
        seq.play();

        seq.update(0.125, &mut c);
        assert!(seq.is_waiting());
        assert_eq!(seq.current_index(), 0);

        seq.update(0.25, &mut c);
        assert!(seq.is_waiting());

        seq.update(0.25, &mut c);
        assert!(!seq.is_waiting());
        assert_eq!(seq.current_index(), 1);
    }

    #[test]
    fn test_speed_scales_step_time() {
        let mut seq = sequence_of(2, 1.0);
        let mut c = Completions::default();

        seq.set_speed(2.0);
        seq.play();
        seq.update(0.5, &mut c);

        assert_eq!(c.total, 1);
        assert_eq!(seq.current_index(), 1);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut seq: AnimationSequence<Completions> = AnimationSequence::new();

        seq.set_speed(0.0);
        assert_eq!(seq.speed(), MIN_SPEED);
        seq.set_speed(-3.0);
        assert_eq!(seq.speed(), MIN_SPEED);
        seq.set_speed(2.5);
        assert_eq!(seq.speed(), 2.5);
    }

    #[test]
    fn test_play_after_finish_rewinds() {
        let mut seq = sequence_of(2, 0.125);
        let mut c = Completions::default();

        seq.play();
        for _ in 0..10 {
            seq.update(0.125, &mut c);
        }
        assert!(seq.is_finished());

        seq.play();
        assert!(seq.is_playing());
        assert_eq!(seq.current_index(), 0);
        assert_eq!(seq.current_step().map(|s| s.elapsed()), Some(0.0));
    }

    #[test]
    fn test_pause_preserves_progress() {
        let mut seq = sequence_of(1, 1.0);
        let mut c = Completions::default();

        seq.play();
        seq.update(0.5, &mut c);
        seq.pause();
        seq.update(0.5, &mut c);

        let elapsed = seq.current_step().map(|s| s.elapsed()).unwrap_or_default();
        assert_eq!(elapsed, 0.5);

        seq.play();
        seq.update(0.5, &mut c);
        assert_eq!(c.total, 1);
    }

    #[test]
    fn test_previous_clamps_and_wraps() {
        let mut seq = sequence_of(3, 1.0);

        seq.play_previous();
        assert_eq!(seq.current_index(), 0);

        seq.set_looping(true);
        seq.play_previous();
        assert_eq!(seq.current_index(), 2);

        seq.play_next();
        assert_eq!(seq.current_index(), 0);
    }

    #[test]
    fn test_front_and_back() {
        let mut seq = sequence_of(4, 1.0);

        seq.go_to_back();
        assert_eq!(seq.current_index(), 3);
        seq.go_to_front();
        assert_eq!(seq.current_index(), 0);
    }

    #[test]
    fn test_go_to_back_rewinds_last_step() {
        let mut seq = sequence_of(2, 1.0);
        let mut c = Completions::default();

        seq.go_to_back();
        seq.play();
        seq.update(0.5, &mut c);
        assert_eq!(seq.current_index(), 1);

        seq.go_to_back();
        assert_eq!(seq.current_index(), 1);
        assert_eq!(seq.current_step().map(|step| step.progress()), Some(0.0));
        assert!(!seq.is_waiting());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut seq = sequence_of(3, 1.0);
        let mut c = Completions::default();

        seq.play();
        seq.update(1.0, &mut c);
        seq.clear();

        assert!(seq.is_empty());
        assert!(!seq.is_playing());
        assert_eq!(seq.current_index(), 0);

        // Playing an empty sequence does nothing
        seq.play();
        assert!(!seq.is_playing());
    }
}
