use serde::Serialize;

/// One histogram bucket over `[start, end)`; the last bucket is closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationBucket {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width histogram spanning the observed `[min, max]`.
///
/// When every value is identical the range is widened to `[v - 0.5, v + 0.5]`
/// so the buckets still have a width. No values or zero buckets produce an
/// empty histogram.
pub fn equal_width(values: &[f64], bucket_count: usize) -> Vec<DurationBucket> {
    if values.is_empty() || bucket_count == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (hi - lo) / bucket_count as f64;

    let mut counts = vec![0usize; bucket_count];
    for &v in values {
        let idx = (((v - lo) / width).floor() as usize).min(bucket_count - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| DurationBucket {
            start: lo + i as f64 * width,
            end: if i + 1 == bucket_count {
                hi
            } else {
                lo + (i + 1) as f64 * width
            },
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_cover_min_to_max() {
        let h = equal_width(&[90.0, 100.0, 110.0, 130.0], 4);
        assert_eq!(h.len(), 4);
        assert_eq!(h[0].start, 90.0);
        assert_eq!(h[3].end, 130.0);
        let counts: Vec<usize> = h.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 1]);
    }

    #[test]
    fn max_value_lands_in_last_bucket() {
        let h = equal_width(&[0.0, 10.0], 2);
        assert_eq!(h[0].count, 1);
        assert_eq!(h[1].count, 1);
    }

    #[test]
    fn identical_values_get_unit_range() {
        let h = equal_width(&[120.0, 120.0, 120.0], 3);
        assert_eq!(h[0].start, 119.5);
        assert_eq!(h[2].end, 120.5);
        assert_eq!(h.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn degenerate_inputs_are_empty() {
        assert!(equal_width(&[], 5).is_empty());
        assert!(equal_width(&[100.0], 0).is_empty());
    }
}
