//! Run detection over a sorted sequence of values.
//!
//! A run is a `(start, length)` span in which each element is exactly one
//! greater than the previous. A repeated value does not continue a run, it
//! starts a new one, so expanding the runs of any sorted multiset gives back
//! the same multiset.

/// A span of `length` consecutive integers beginning at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: u32,
    pub length: u32,
}

impl Run {
    /// The last value covered by the run, or `None` if it overflows `u32`.
    pub fn end(&self) -> Option<u32> {
        self.length.checked_sub(1).and_then(|len| self.start.checked_add(len))
    }
}

/// Groups an ascending slice into maximal runs.
pub fn detect(sorted: &[u32]) -> Vec<Run> {
    let mut runs = Vec::new();
    let Some((&first, rest)) = sorted.split_first() else {
        return runs;
    };

    let mut current = Run { start: first, length: 1 };
    let mut prev = first;
    for &val in rest {
        if prev.checked_add(1) == Some(val) {
            current.length += 1;
        } else {
            runs.push(current);
            current = Run { start: val, length: 1 };
        }
        prev = val;
    }
    runs.push(current);

    runs
}

/// Expands runs back into values, appending to `out`.
pub fn expand_into(runs: &[Run], out: &mut Vec<u32>) {
    for run in runs {
        out.extend((0..run.length).map(|i| run.start + i));
    }
}
