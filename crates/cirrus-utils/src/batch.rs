//! Overlapping batches over a slice

use crate::error::{UtilError, UtilResult};
use std::iter::FusedIterator;

/// Lazy iterator of overlapping windows, created by [`make_batch`]
#[derive(Debug, Clone)]
pub struct Batches<'a, T> {
    items: &'a [T],
    start: usize,
    batch_size: usize,
    step: usize,
    finished: bool,
}

/// Split `items` into windows of `batch_size` where consecutive windows share
/// `overlap` elements.
///
/// The last window may be shorter. Fails before yielding anything when
/// `batch_size` is zero or `overlap >= batch_size`.
pub fn make_batch<T>(items: &[T], batch_size: usize, overlap: usize) -> UtilResult<Batches<'_, T>> {
    if batch_size == 0 {
        return Err(UtilError::config("batch_size must be greater than zero"));
    }
    if overlap >= batch_size {
        return Err(UtilError::config(format!(
            "overlap must be less than batch_size (overlap={}, batch_size={})",
            overlap, batch_size
        )));
    }

    Ok(Batches {
        items,
        start: 0,
        batch_size,
        step: batch_size - overlap,
        finished: items.is_empty(),
    })
}

impl<'a, T> Iterator for Batches<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let len = self.items.len();
        let end = (self.start + self.batch_size).min(len);
        let batch = &self.items[self.start..end];

        if end == len {
            self.finished = true;
        } else {
            self.start += self.step;
        }
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.finished {
            0
        } else {
            let len = self.items.len();
            if self.start + self.batch_size >= len {
                1
            } else {
                1 + (len - self.start - self.batch_size).div_ceil(self.step)
            }
        };
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Batches<'_, T> {}

impl<T> FusedIterator for Batches<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(items: &[i32], batch_size: usize, overlap: usize) -> Vec<Vec<i32>> {
        make_batch(items, batch_size, overlap)
            .unwrap()
            .map(<[i32]>::to_vec)
            .collect()
    }

    #[test]
    fn test_batches_without_overlap() {
        let items: Vec<i32> = (1..=7).collect();
        assert_eq!(
            collect(&items, 3, 0),
            vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]
        );
    }

    #[test]
    fn test_batches_with_overlap() {
        let items: Vec<i32> = (1..=7).collect();
        assert_eq!(
            collect(&items, 3, 1),
            vec![vec![1, 2, 3], vec![3, 4, 5], vec![5, 6, 7]]
        );
    }

    #[test]
    fn test_final_window_reaching_end_stops() {
        let items: Vec<i32> = (1..=6).collect();
        assert_eq!(
            collect(&items, 4, 2),
            vec![vec![1, 2, 3, 4], vec![3, 4, 5, 6]]
        );
    }

    #[test]
    fn test_batch_larger_than_input() {
        assert_eq!(collect(&[1, 2], 5, 4), vec![vec![1, 2]]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let mut batches = make_batch::<i32>(&[], 3, 0).unwrap();
        assert_eq!(batches.len(), 0);
        assert!(batches.next().is_none());
    }

    #[test]
    fn test_overlap_not_less_than_batch_size_fails() {
        for overlap in [3, 4] {
            let err = make_batch(&[1, 2, 3, 4], 3, overlap).unwrap_err();
            assert!(err.is_configuration());
            assert!(err.to_string().contains("overlap must be less than batch_size"));
        }
    }

    #[test]
    fn test_zero_batch_size_fails() {
        assert!(make_batch(&[1], 0, 0).unwrap_err().is_configuration());
    }

    #[test]
    fn test_non_overlapping_parts_reconstruct_input() {
        let items: Vec<i32> = (0..23).collect();
        for batch_size in 2..=9 {
            for overlap in 1..batch_size {
                let batches: Vec<&[i32]> = make_batch(&items, batch_size, overlap).unwrap().collect();

                let mut rebuilt = batches[0].to_vec();
                for batch in &batches[1..] {
                    rebuilt.extend_from_slice(&batch[overlap.min(batch.len())..]);
                }
                assert_eq!(rebuilt, items, "batch_size={batch_size} overlap={overlap}");

                for batch in &batches[..batches.len() - 1] {
                    assert_eq!(batch.len(), batch_size);
                }
            }
        }
    }

    #[test]
    fn test_size_hint_matches_count() {
        let items: Vec<i32> = (0..10).collect();
        for (batch_size, overlap) in [(3, 0), (3, 1), (4, 3), (10, 2), (11, 0)] {
            let batches = make_batch(&items, batch_size, overlap).unwrap();
            let expected = batches.len();
            assert_eq!(batches.count(), expected);
        }
    }

    #[test]
    fn test_fused_after_exhaustion() {
        let mut batches = make_batch(&[1, 2, 3], 2, 0).unwrap();
        assert_eq!(batches.next(), Some(&[1, 2][..]));
        assert_eq!(batches.next(), Some(&[3][..]));
        assert_eq!(batches.next(), None);
        assert_eq!(batches.next(), None);
    }
}
