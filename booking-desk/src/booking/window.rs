//! Booking time window

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("Both start time and end time must be selected.")]
    Missing,

    #[error("Start time must be before end time.")]
    Inverted,
}

/// A validated `[start, end)` window, `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, WindowError> {
        if start >= end {
            return Err(WindowError::Inverted);
        }
        Ok(Self { start, end })
    }

    /// Validate the two halves of a form
    pub fn from_parts(
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Self, WindowError> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end),
            _ => Err(WindowError::Missing),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::time::parse_timestamp;

    #[test]
    fn test_validation_messages() {
        let nine = parse_timestamp("2024-05-01T09:00").unwrap();
        let ten = parse_timestamp("2024-05-01T10:00").unwrap();

        assert!(TimeWindow::from_parts(Some(nine), Some(ten)).is_ok());
        assert_eq!(
            TimeWindow::from_parts(Some(nine), None).unwrap_err().to_string(),
            "Both start time and end time must be selected."
        );
        assert_eq!(
            TimeWindow::from_parts(Some(ten), Some(nine)).unwrap_err().to_string(),
            "Start time must be before end time."
        );
        assert_eq!(TimeWindow::new(nine, nine), Err(WindowError::Inverted));
    }
}
