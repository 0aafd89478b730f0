//! Chart data for the selected range and its terminal rendering.
//!
//! The moving average is computed over the whole history and then cut to the
//! visible window, so the first visible points still carry an average when
//! enough earlier history exists.

use std::fmt::Write as _;

use serde::Serialize;

use crate::domain::trailing;
use crate::indicators::moving_average;
use crate::{DisplayRange, HistoricalSeries};

const CLOSE_MARK: char = '*';
const AVERAGE_MARK: char = '.';
const AXIS_WIDTH: usize = 10;

/// Index-aligned chart series for one range.
///
/// `labels`, `closes` and `moving_average` always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub range: DisplayRange,
    pub ma_window: usize,
    pub labels: Vec<String>,
    pub closes: Vec<f64>,
    pub moving_average: Vec<Option<f64>>,
}

impl ChartView {
    pub fn build(series: &HistoricalSeries, range: DisplayRange, ma_window: usize) -> Self {
        let visible = range.window(series.points());
        let full_average = moving_average(&series.closes(), ma_window);
        let aligned = trailing(&full_average, visible.len());

        Self {
            range,
            ma_window,
            labels: visible.iter().map(|point| point.date.clone()).collect(),
            closes: visible.iter().map(|point| point.close).collect(),
            moving_average: aligned.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn average_label(&self) -> String {
        format!("{}-Day MA", self.ma_window)
    }

    /// Lowest and highest plotted value across both series.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.closes
            .iter()
            .copied()
            .chain(self.moving_average.iter().flatten().copied())
            .fold(None, |bounds, value| match bounds {
                None => Some((value, value)),
                Some((low, high)) => Some((low.min(value), high.max(value))),
            })
    }

    /// Draw the chart on a `width` x `height` character grid.
    ///
    /// When there are more points than columns, each column shows the point
    /// nearest its position. An empty view renders a no-data notice.
    pub fn render(&self, width: usize, height: usize) -> String {
        let Some((low, high)) = self.value_bounds() else {
            return String::from("No price history available.\n");
        };

        let columns = self.len().min(width.max(1));
        let rows = height.max(2);
        let span = if high > low { high - low } else { 1.0 };
        let row_of = |value: f64| -> usize {
            let scaled = (high - value) / span * (rows - 1) as f64;
            (scaled.round() as usize).min(rows - 1)
        };

        let mut grid = vec![vec![' '; columns]; rows];
        for column in 0..columns {
            let index = if columns > 1 {
                column * (self.len() - 1) / (columns - 1)
            } else {
                self.len() - 1
            };
            if let Some(average) = self.moving_average[index] {
                grid[row_of(average)][column] = AVERAGE_MARK;
            }
            grid[row_of(self.closes[index])][column] = CLOSE_MARK;
        }

        let mut out = String::new();
        for (row, cells) in grid.iter().enumerate() {
            let axis = if row == 0 {
                format!("{high:>width$.2}", width = AXIS_WIDTH)
            } else if row == rows - 1 {
                format!("{low:>width$.2}", width = AXIS_WIDTH)
            } else {
                " ".repeat(AXIS_WIDTH)
            };
            let line: String = cells.iter().collect();
            let _ = writeln!(out, "{axis} |{}", line.trim_end());
        }
        let _ = writeln!(out, "{} +{}", " ".repeat(AXIS_WIDTH), "-".repeat(columns));

        let first = self.labels.first().map(String::as_str).unwrap_or_default();
        let last = self.labels.last().map(String::as_str).unwrap_or_default();
        let gap = columns.saturating_sub(first.len() + last.len()).max(1);
        let _ = writeln!(out, "{}  {first}{}{last}", " ".repeat(AXIS_WIDTH), " ".repeat(gap));
        let _ = writeln!(
            out,
            "{}  {CLOSE_MARK} Close Price   {AVERAGE_MARK} {}",
            " ".repeat(AXIS_WIDTH),
            self.average_label()
        );

        out
    }
}
