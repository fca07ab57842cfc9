use std::fmt;

use serde::Serialize;

const HISTOGRAM_WIDTH: usize = 40;

/// Fill-height distribution of a batch of sampled drop sequences.
#[derive(Debug, Clone, Serialize)]
pub struct SampleSummary {
    pub trials: usize,
    pub drops_per_trial: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub median: usize,
    pub std_dev: f64,
    pub histogram: Vec<HistogramBin>,
}

/// Number of trials that ended at a given fill height.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    pub fill_height: usize,
    pub count: usize,
}

impl SampleSummary {
    /// Summarizes final fill heights, one per trial. Returns `None` for an
    /// empty batch.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(drops_per_trial: usize, samples: &[usize]) -> Option<Self> {
        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<usize>() as f64 / n;
        let median = sorted[sorted.len() / 2];
        let variance = sorted
            .iter()
            .map(|&v| (v as f64 - mean).powi(2))
            .sum::<f64>()
            / n;

        let mut counts = vec![0_usize; max + 1];
        for &sample in samples {
            counts[sample] += 1;
        }
        let histogram = counts
            .into_iter()
            .enumerate()
            .map(|(fill_height, count)| HistogramBin { fill_height, count })
            .collect();

        Some(Self {
            trials: samples.len(),
            drops_per_trial,
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
            histogram,
        })
    }
}

impl fmt::Display for SampleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "sampled {} sequences of {} drops",
            self.trials, self.drops_per_trial
        )?;
        writeln!(
            f,
            "fill height: min {} max {} mean {:.2} median {} std dev {:.2}",
            self.min, self.max, self.mean, self.median, self.std_dev
        )?;
        let peak = self.histogram.iter().map(|bin| bin.count).max().unwrap_or(0);
        for bin in &self.histogram {
            let bar = if peak == 0 {
                0
            } else {
                bin.count * HISTOGRAM_WIDTH / peak
            };
            writeln!(
                f,
                "{:>3} |{:<HISTOGRAM_WIDTH$}| {}",
                bin.fill_height,
                "#".repeat(bar),
                bin.count
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizes_a_known_batch() {
        let summary = SampleSummary::new(8, &[4, 0, 2, 2]).unwrap();

        assert_eq!(summary.trials, 4);
        assert_eq!(summary.drops_per_trial, 8);
        assert_eq!(summary.min, 0);
        assert_eq!(summary.max, 4);
        assert!((summary.mean - 2.0).abs() < f64::EPSILON);
        assert_eq!(summary.median, 2);
        assert!((summary.std_dev - 2.0_f64.sqrt()).abs() < 1e-9);

        let counts: Vec<usize> = summary.histogram.iter().map(|bin| bin.count).collect();
        assert_eq!(counts, [1, 0, 2, 0, 1]);
    }

    #[test]
    fn empty_batch_has_no_summary() {
        assert!(SampleSummary::new(8, &[]).is_none());
    }

    #[test]
    fn report_lists_every_height_up_to_the_max() {
        let summary = SampleSummary::new(1, &[3, 1]).unwrap();
        let report = summary.to_string();

        for height in 0..=3 {
            assert!(report.contains(&format!("\n{height:>3} |")), "height {height}");
        }
    }
}
