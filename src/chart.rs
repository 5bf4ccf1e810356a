//! Text bar charts for histograms.

use std::fmt;

use anyhow::{bail, Result};

use crate::{Histogram, MatchCount};

/// Default length of the longest bar in characters.
pub const DEFAULT_WIDTH: usize = 50;

/// A labeled bar chart, one bar per bucket.
#[derive(Clone, Debug)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Maximum bar length, the largest count gets a bar this long.
    pub width: usize,
    bars: Vec<(String, i64)>,
}

impl BarChart {
    /// Build a chart from parallel sequences of bucket keys and counts.
    pub fn new(
        title: impl Into<String>,
        keys: impl IntoIterator<Item = String>,
        counts: impl IntoIterator<Item = i64>,
    ) -> Result<Self> {
        let keys: Vec<String> = keys.into_iter().collect();
        let counts: Vec<i64> = counts.into_iter().collect();

        if keys.len() != counts.len() {
            bail!(
                "BarChart: {} keys but {} counts",
                keys.len(),
                counts.len()
            );
        }

        Ok(BarChart {
            title: title.into(),
            x_label: String::new(),
            y_label: "Count".into(),
            width: DEFAULT_WIDTH,
            bars: keys.into_iter().zip(counts).collect(),
        })
    }

    /// Build a chart from a histogram, using `label` to show the keys.
    pub fn from_histogram<K: Ord>(
        title: impl Into<String>,
        hist: &Histogram<K>,
        label: impl Fn(&K) -> String,
    ) -> Self {
        BarChart {
            title: title.into(),
            x_label: String::new(),
            y_label: "Count".into(),
            width: DEFAULT_WIDTH,
            bars: hist.iter().map(|(k, &n)| (label(k), n as i64)).collect(),
        }
    }

    /// Two-bar chart of matched and unmatched entities.
    pub fn from_matches(title: impl Into<String>, m: &MatchCount) -> Self {
        BarChart {
            title: title.into(),
            x_label: String::new(),
            y_label: "Count".into(),
            width: DEFAULT_WIDTH,
            bars: vec![
                ("matched".into(), m.matched),
                ("unmatched".into(), m.unmatched as i64),
            ],
        }
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn bars(&self) -> &[(String, i64)] {
        &self.bars
    }

    /// Write the chart data as CSV with the axis labels as the header.
    pub fn to_csv(&self) -> Result<String> {
        let mut buf = Vec::new();
        {
            let mut wtr = csv::Writer::from_writer(&mut buf);
            wtr.write_record([&self.x_label, &self.y_label])?;
            for (key, n) in &self.bars {
                wtr.write_record([key.clone(), n.to_string()])?;
            }
            wtr.flush()?;
        }

        Ok(String::from_utf8(buf)?)
    }

    /// Length of the bar drawn for count `n`.
    fn bar_len(&self, n: i64) -> usize {
        let max = self.bars.iter().map(|(_, n)| *n).max().unwrap_or(0);
        if n <= 0 || max <= 0 {
            return 0;
        }

        // Round up so that every nonzero count shows at least one mark.
        (n as u64 * self.width as u64).div_ceil(max as u64) as usize
    }
}

impl fmt::Display for BarChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{} / {}", self.x_label, self.y_label)?;
        writeln!(f)?;

        if self.bars.is_empty() {
            return writeln!(f, "(no data)");
        }

        let key_width = self
            .bars
            .iter()
            .map(|(k, _)| k.chars().count())
            .max()
            .unwrap_or(0);

        for (key, n) in &self.bars {
            let bar = "#".repeat(self.bar_len(*n));
            if bar.is_empty() {
                writeln!(f, "{key:>key_width$} | {n}")?;
            } else {
                writeln!(f, "{key:>key_width$} | {bar} {n}")?;
            }
        }

        Ok(())
    }
}
