/// A contiguous slice of the global progress range assigned to one word or character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    /// The whole progress range, [0, 1].
    pub const FULL: Interval = Interval {
        start: 0.0,
        end: 1.0,
    };

    /// Builds an interval, swapping the bounds if they arrive reversed.
    pub fn new(start: f64, end: f64) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && value <= self.end
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::FULL
    }
}

/// Splits [0, 1] into `word_count` equal intervals.
///
/// Interval `i` is `[i/N, (i+1)/N]`, so the last one ends at exactly `1.0`.
pub fn partition_words(word_count: usize) -> Vec<Interval> {
    if word_count == 0 {
        return Vec::new();
    }
    let n = word_count as f64;
    (0..word_count)
        .map(|i| Interval {
            start: i as f64 / n,
            end: (i + 1) as f64 / n,
        })
        .collect()
}

/// Splits `parent` into `char_count` equal, adjacent sub-intervals.
pub fn partition_chars(parent: Interval, char_count: usize) -> Vec<Interval> {
    match char_count {
        0 => Vec::new(),
        1 => vec![parent],
        _ => {
            let step = parent.len() / char_count as f64;
            (0..char_count)
                .map(|i| {
                    let start = parent.start + i as f64 * step;
                    let end = if i + 1 == char_count {
                        parent.end
                    } else {
                        parent.start + (i + 1) as f64 * step
                    };
                    Interval { start, end }
                })
                .collect()
        }
    }
}
