/// Easing curves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    QuadOut,
    BackOut,
}

impl Ease {
    /// Overshoot of the back-out curve
    const BACK_OVERSHOOT: f32 = 1.70158;

    /// Map linear progress in `0.0..=1.0` to eased progress
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadOut => t * (2.0 - t),
            Ease::BackOut => {
                let s = Self::BACK_OVERSHOOT;
                let u = t - 1.0;
                u * u * ((s + 1.0) * u + s) + 1.0
            }
        }
    }
}

/// One scalar property moving from a start to an end value over a fixed
/// duration
#[derive(Debug, Clone, PartialEq)]
pub struct Tween<K> {
    key: K,
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    ease: Ease,
}

impl<K> Tween<K> {
    pub fn new(key: K, from: f32, to: f32, duration: f32, ease: Ease) -> Self {
        Self {
            key,
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            ease,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    /// Current value of the property
    pub fn value(&self) -> f32 {
        let progress = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else {
            1.0
        };
        self.from + (self.to - self.from) * self.ease.apply(progress)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn step(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }
}

struct Running<K, C> {
    tween: Tween<K>,
    on_complete: Option<C>,
}

/// Set of running tweens keyed by property
///
/// Starting a tween on a property that is already animating replaces the
/// running one, and the replaced tween's completion never fires.
pub struct Tweens<K, C> {
    running: Vec<Running<K, C>>,
}

impl<K, C> Default for Tweens<K, C> {
    fn default() -> Self {
        Self {
            running: Vec::new(),
        }
    }
}

impl<K: PartialEq, C> Tweens<K, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `tween`, replacing any tween running on the same property
    pub fn start(&mut self, tween: Tween<K>, on_complete: Option<C>) {
        self.running.retain(|running| running.tween.key != tween.key);
        self.running.push(Running { tween, on_complete });
    }

    pub fn is_animating(&self, key: &K) -> bool {
        self.running.iter().any(|running| &running.tween.key == key)
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Advance every tween by `dt` seconds and hand each new value to `apply`.
    ///
    /// Returns the completion actions of the tweens that finished, in start
    /// order.
    pub fn advance<F>(&mut self, dt: f32, mut apply: F) -> Vec<C>
    where
        F: FnMut(&K, f32),
    {
        for running in &mut self.running {
            running.tween.step(dt);
            apply(&running.tween.key, running.tween.value());
        }

        let (finished, running): (Vec<_>, Vec<_>) = self
            .running
            .drain(..)
            .partition(|running| running.tween.is_finished());
        self.running = running;
        finished
            .into_iter()
            .filter_map(|running| running.on_complete)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ease_endpoints() {
        for ease in [Ease::Linear, Ease::QuadOut, Ease::BackOut] {
            assert_relative_eq!(ease.apply(0.0), 0.0, epsilon = 1e-6);
            assert_relative_eq!(ease.apply(1.0), 1.0, epsilon = 1e-6);
        }
        assert_relative_eq!(Ease::QuadOut.apply(0.5), 0.75);
        assert_relative_eq!(Ease::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::BackOut.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_tween_reaches_target() {
        let mut tweens: Tweens<&str, &str> = Tweens::new();
        tweens.start(Tween::new("x", 0.0, 10.0, 1.0, Ease::Linear), Some("done"));

        let mut last = 0.0;
        let done = tweens.advance(0.5, |_, value| last = value);
        assert!(done.is_empty());
        assert_relative_eq!(last, 5.0);

        let done = tweens.advance(0.75, |_, value| last = value);
        assert_eq!(done, vec!["done"]);
        assert_relative_eq!(last, 10.0);
        assert!(tweens.is_empty());
    }

    #[test]
    fn test_same_property_is_overwritten() {
        let mut tweens: Tweens<&str, &str> = Tweens::new();
        tweens.start(Tween::new("x", 0.0, 10.0, 1.0, Ease::Linear), Some("first"));
        tweens.start(Tween::new("y", 0.0, 1.0, 1.0, Ease::Linear), None);
        tweens.start(Tween::new("x", 0.0, -10.0, 1.0, Ease::Linear), Some("second"));
        assert_eq!(tweens.len(), 2);

        let mut x = 0.0;
        let done = tweens.advance(1.0, |key, value| {
            if *key == "x" {
                x = value;
            }
        });
        assert_eq!(done, vec!["second"]);
        assert_relative_eq!(x, -10.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut tweens: Tweens<u8, ()> = Tweens::new();
        tweens.start(Tween::new(0, 1.0, 2.0, 0.0, Ease::QuadOut), Some(()));
        let mut value = 0.0;
        assert_eq!(tweens.advance(0.0, |_, v| value = v).len(), 1);
        assert_relative_eq!(value, 2.0);
    }
}
