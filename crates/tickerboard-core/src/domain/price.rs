use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// One trading day's closing price.
///
/// `date` is kept as the label the backend sent. It is displayed on the chart
/// axis and never parsed, so unusual labels pass through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: impl Into<String>, close: f64) -> Result<Self, ValidationError> {
        if !close.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "close" });
        }
        Ok(Self {
            date: date.into(),
            close,
        })
    }
}

/// Chronological (oldest first) daily closes for one ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoricalSeries {
    points: Vec<PricePoint>,
}

impl HistoricalSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.close).collect()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

impl From<Vec<PricePoint>> for HistoricalSeries {
    fn from(points: Vec<PricePoint>) -> Self {
        Self::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite_close() {
        let err = PricePoint::new("2024-01-02", f64::NAN).expect_err("must fail");
        assert_eq!(err, ValidationError::NonFiniteValue { field: "close" });
    }

    #[test]
    fn series_deserializes_from_bare_array() {
        let series: HistoricalSeries = serde_json::from_str(
            r#"[{"date":"2024-01-02","close":185.64},{"date":"2024-01-03","close":184.25}]"#,
        )
        .expect("series must decode");

        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![185.64, 184.25]);
        assert_eq!(series.last().map(|p| p.date.as_str()), Some("2024-01-03"));
    }
}
