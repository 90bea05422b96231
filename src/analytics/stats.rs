use std::collections::BTreeMap;

/// More distinct lengths than this and the username pie switches to ranges.
pub const MAX_DISTINCT_SLICES: usize = 7;
pub const BUCKET_WIDTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthSummary {
    pub count: usize,
    pub average: f64,
    pub max: usize,
}

/// Empty input summarizes to zeros.
pub fn summarize(lengths: &[usize]) -> LengthSummary {
    if lengths.is_empty() {
        return LengthSummary {
            count: 0,
            average: 0.0,
            max: 0,
        };
    }

    let total: usize = lengths.iter().sum();
    LengthSummary {
        count: lengths.len(),
        average: total as f64 / lengths.len() as f64,
        max: lengths.iter().copied().max().unwrap_or(0),
    }
}

/// `(length, occurrences)` sorted by length.
pub fn distribution(lengths: &[usize]) -> Vec<(usize, usize)> {
    let mut counts = BTreeMap::new();
    for length in lengths {
        *counts.entry(*length).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub count: usize,
}

/// Pie slices for a set of lengths: one per distinct length, or fixed-width
/// ranges starting at the shortest length once there are too many.
pub fn slices(lengths: &[usize]) -> Vec<Slice> {
    let counts = distribution(lengths);
    if counts.len() <= MAX_DISTINCT_SLICES {
        return counts
            .into_iter()
            .map(|(length, count)| Slice {
                label: format!("Length {}", length),
                count,
            })
            .collect();
    }

    let (min, max) = match (counts.first(), counts.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => return Vec::new(),
    };

    let mut buckets: Vec<Slice> = (0..=(max - min) / BUCKET_WIDTH)
        .map(|index| {
            let start = min + index * BUCKET_WIDTH;
            Slice {
                label: format!("{}-{}", start, start + BUCKET_WIDTH - 1),
                count: 0,
            }
        })
        .collect();

    for (length, count) in counts {
        buckets[(length - min) / BUCKET_WIDTH].count += count;
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lengths_summarize_to_zero() {
        assert_eq!(
            summarize(&[]),
            LengthSummary {
                count: 0,
                average: 0.0,
                max: 0
            }
        );
    }

    #[test]
    fn summary_of_lengths() {
        let summary = summarize(&[3, 5, 7]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.max, 7);
        assert!((summary.average - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn distribution_counts_each_length() {
        assert_eq!(distribution(&[4, 2, 4, 4]), vec![(2, 1), (4, 3)]);
    }

    #[test]
    fn few_lengths_get_one_slice_each() {
        let result = slices(&[5, 5, 8]);
        assert_eq!(
            result,
            vec![
                Slice {
                    label: "Length 5".to_string(),
                    count: 2
                },
                Slice {
                    label: "Length 8".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn many_lengths_are_bucketed_from_the_minimum() {
        let lengths = [3, 4, 5, 6, 7, 8, 9, 12, 12];
        let result = slices(&lengths);

        let labels: Vec<&str> = result.iter().map(|slice| slice.label.as_str()).collect();
        assert_eq!(labels, vec!["3-5", "6-8", "9-11", "12-14"]);

        let counts: Vec<usize> = result.iter().map(|slice| slice.count).collect();
        assert_eq!(counts, vec![3, 3, 1, 2]);
        assert_eq!(counts.iter().sum::<usize>(), lengths.len());
    }
}
