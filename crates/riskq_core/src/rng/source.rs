//! Uniform random sources.

/// A source of uniform variates on [0, 1).
///
/// All samplers take `&mut impl UniformSource`; implement it to plug in a
/// different generator or to replay fixed draws in tests.
pub trait UniformSource {
    /// Returns a uniform variate in [0, 1).
    fn next_uniform(&mut self) -> f64;

    /// Returns a uniform variate in (0, 1], safe to pass to `ln`.
    #[inline]
    fn next_open_uniform(&mut self) -> f64 {
        1.0 - self.next_uniform()
    }
}

impl<U: UniformSource + ?Sized> UniformSource for &mut U {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// Replays a fixed cycle of uniform values.
///
/// Values are clamped into [0, 1) on construction. An empty sequence yields 0.
///
/// # Examples
///
/// ```rust
/// use riskq_core::rng::{SequenceSource, UniformSource};
///
/// let mut source = SequenceSource::new(vec![0.25, 0.75]);
/// assert_eq!(source.next_uniform(), 0.25);
/// assert_eq!(source.next_uniform(), 0.75);
/// assert_eq!(source.next_uniform(), 0.25);
/// ```
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    position: usize,
}

impl SequenceSource {
    /// Largest value representable below one.
    const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

    /// Creates a source replaying `values` in order, cycling at the end.
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, Self::BELOW_ONE) })
            .collect();
        Self {
            values,
            position: 0,
        }
    }

    /// Creates a source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl UniformSource for SequenceSource {
    fn next_uniform(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}
