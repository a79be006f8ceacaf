use crate::error::{ChartError, ChartResult};

/// A displayed value chasing its target.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimatedValue {
    pub current: f64,
    pub target: f64,
}

impl AnimatedValue {
    pub const fn new(current: f64, target: f64) -> Self {
        Self { current, target }
    }

    /// Adopt a new target; `current` is left where it is.
    pub fn retarget(&mut self, target: f64) {
        self.target = target;
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}

/// Exponential easing: each step closes `rate` of the remaining distance and
/// snaps onto the target once within `epsilon`.
///
/// Since `rate` lies in (0, 1) a step never crosses the target, so the motion
/// is monotonic. The snap makes it finish in a finite number of steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAnimator {
    rate: f64,
    epsilon: f64,
}

impl ValueAnimator {
    pub fn new(rate: f64, epsilon: f64) -> ChartResult<Self> {
        if !(rate > 0.0 && rate < 1.0) {
            return Err(ChartError::InvalidEasingRate(rate));
        }
        if !(epsilon > 0.0) {
            return Err(ChartError::InvalidEpsilon(epsilon));
        }
        Ok(Self { rate, epsilon })
    }

    pub(crate) const fn new_unchecked(rate: f64, epsilon: f64) -> Self {
        Self { rate, epsilon }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn next(&self, current: f64, target: f64) -> f64 {
        if (target - current).abs() <= self.epsilon {
            target
        } else {
            current + (target - current) * self.rate
        }
    }

    pub fn step(&self, value: &mut AnimatedValue) {
        value.current = self.next(value.current, value.target);
    }
}

/// Positional animation state for a whole series.
///
/// Starts empty and follows the length of whatever series it is retargeted
/// to. Surviving indices keep their `current`; new ones start at zero.
#[derive(Debug, Clone, Default)]
pub struct AnimatedSeries {
    values: Vec<AnimatedValue>,
}

impl AnimatedSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn retarget(&mut self, series: &[f64]) {
        self.values.resize(series.len(), AnimatedValue::default());
        for (value, &target) in self.values.iter_mut().zip(series) {
            value.retarget(target);
        }
    }

    pub fn step_all(&mut self, animator: &ValueAnimator) {
        for value in &mut self.values {
            animator.step(value);
        }
    }

    pub fn currents(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().map(|v| v.current)
    }

    pub fn get(&self, index: usize) -> Option<&AnimatedValue> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_settled(&self) -> bool {
        self.values.iter().all(AnimatedValue::is_settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator(rate: f64) -> ValueAnimator {
        ValueAnimator::new(rate, 0.1).unwrap()
    }

    #[test]
    fn rejects_rates_outside_open_unit_interval() {
        for rate in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(ValueAnimator::new(rate, 0.1).is_err(), "rate {rate}");
        }
        assert!(matches!(
            ValueAnimator::new(0.1, 0.0),
            Err(ChartError::InvalidEpsilon(_))
        ));
    }

    #[test]
    fn accepted_parameters_are_kept() {
        let a = ValueAnimator::new(0.25, 0.5).unwrap();
        assert_eq!(a.rate(), 0.25);
        assert_eq!(a.epsilon(), 0.5);
        // A gap of exactly epsilon snaps; anything wider moves by `rate`.
        assert_eq!(a.next(1.5, 2.0), 2.0);
        assert_eq!(a.next(0.0, 4.0), 4.0 * a.rate());
    }

    #[test]
    fn step_closes_fraction_of_distance() {
        let a = animator(0.1);
        assert!((a.next(0.0, 10.0) - 1.0).abs() < 1e-12);
        assert!((a.next(10.0, 0.0) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn snaps_exactly_within_epsilon() {
        let a = animator(0.1);
        assert_eq!(a.next(9.95, 10.0), 10.0);
        assert_eq!(a.next(10.1, 10.0), 10.0);
    }

    #[test]
    fn rising_sequence_is_monotonic_and_bounded() {
        let a = animator(0.1);
        let mut v = AnimatedValue::new(-3.0, 42.0);
        let mut prev = v.current;
        for _ in 0..500 {
            a.step(&mut v);
            assert!(v.current >= prev);
            assert!(v.current <= v.target);
            prev = v.current;
        }
        assert!(v.is_settled());
    }

    #[test]
    fn falling_sequence_is_monotonic_and_bounded() {
        let a = animator(0.05);
        let mut v = AnimatedValue::new(100.0, 7.5);
        let mut prev = v.current;
        for _ in 0..1000 {
            a.step(&mut v);
            assert!(v.current <= prev);
            assert!(v.current >= v.target);
            prev = v.current;
        }
        assert_eq!(v.current, 7.5);
    }

    #[test]
    fn retarget_keeps_current() {
        let a = animator(0.1);
        let mut v = AnimatedValue::new(0.0, 10.0);
        a.step(&mut v);
        a.step(&mut v);
        let before = v.current;
        v.retarget(-5.0);
        assert_eq!(v.current, before);
        a.step(&mut v);
        assert!(v.current < before);
    }

    #[test]
    fn series_resize_preserves_existing_indices() {
        let a = animator(0.1);
        let mut s = AnimatedSeries::new();
        assert!(s.is_empty());

        s.retarget(&[10.0, 20.0]);
        s.step_all(&a);
        let kept: Vec<f64> = s.currents().collect();

        s.retarget(&[10.0, 20.0, 30.0]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.get(0).unwrap().current, kept[0]);
        assert_eq!(s.get(1).unwrap().current, kept[1]);
        assert_eq!(s.get(2).unwrap(), &AnimatedValue::new(0.0, 30.0));

        s.retarget(&[1.0]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.get(0).unwrap().current, kept[0]);
        assert_eq!(s.get(0).unwrap().target, 1.0);
    }
}
