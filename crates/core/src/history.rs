use crate::error::{Result, TickerError};

/// One price observation.  Only meaningful through its position in history.
pub type Sample = f64;

/// Fixed-capacity rolling history of samples, oldest evicted on push.
///
/// The buffer is pre-filled at construction, so it always holds exactly
/// `capacity` samples. Index 0 is the oldest sample and is drawn leftmost.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: Box<[Sample]>,
    /// Slot holding the oldest sample; the next push overwrites it.
    head: usize,
}

impl HistoryBuffer {
    /// Create a buffer of exactly `capacity` copies of `fill`.
    pub fn new(capacity: usize, fill: Sample) -> Result<Self> {
        if capacity == 0 {
            return Err(TickerError::Config(
                "history capacity must be at least 1 (chart has no width)".into(),
            ));
        }
        Ok(Self {
            samples: vec![fill; capacity].into_boxed_slice(),
            head:    0,
        })
    }

    /// Append `value`, evicting the oldest sample.
    pub fn push(&mut self, value: Sample) {
        self.samples[self.head] = value;
        self.head = (self.head + 1) % self.samples.len();
    }

    /// `(index, value)` pairs oldest → newest.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Sample)> + '_ {
        let len = self.samples.len();
        (0..len).map(move |i| (i, self.samples[(self.head + i) % len]))
    }

    /// Most recently pushed sample (the fill value before any push).
    #[must_use]
    pub fn latest(&self) -> Sample {
        let len = self.samples.len();
        self.samples[(self.head + len - 1) % len]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; present for API symmetry with std collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Sample> {
        self.iter().map(|(_, v)| v).collect()
    }
}
