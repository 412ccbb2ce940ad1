//! Free-interval detection between occupied slots.
//!
//! Finds the open stretches of a window that are not covered by any
//! scheduled block.

use serde::{Deserialize, Serialize};

use super::{TimeOfDay, TimeSlot};

/// Size category of a time gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapSize {
    Small,  // under 30 minutes
    Medium, // 30-59 minutes
    Large,  // 60+ minutes
}

impl GapSize {
    /// Categorize a gap by its duration in minutes
    pub fn from_minutes(minutes: u32) -> Self {
        if minutes < 30 {
            Self::Small
        } else if minutes < 60 {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

/// A detected free interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeGap {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub size: GapSize,
}

impl TimeGap {
    /// Create a new time gap. `None` for empty or inverted ranges.
    pub fn new(start_time: TimeOfDay, end_time: TimeOfDay) -> Option<Self> {
        if end_time <= start_time {
            return None;
        }

        Some(Self {
            start_time,
            end_time,
            size: GapSize::from_minutes(start_time.minutes_until(end_time)),
        })
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> u32 {
        self.start_time.minutes_until(self.end_time)
    }

    /// Check if this gap can fit a block of given duration
    pub fn can_fit(&self, minutes: u32) -> bool {
        self.duration_minutes() >= minutes
    }
}

/// Detector for finding free intervals in a window
pub struct TimeGapDetector {
    /// Minimum gap duration to report (in minutes)
    min_gap_minutes: u32,
}

impl TimeGapDetector {
    /// Create a new detector that reports every non-empty gap
    pub fn new() -> Self {
        Self { min_gap_minutes: 1 }
    }

    /// Set the minimum gap duration
    pub fn with_min_gap(mut self, minutes: u32) -> Self {
        self.min_gap_minutes = minutes.max(1);
        self
    }

    /// Find gaps between occupied slots inside `[window_start, window_end)`.
    ///
    /// Occupied slots may be unsorted, overlapping, or partly outside the
    /// window. Returned gaps are sorted by start time.
    pub fn find_gaps(
        &self,
        occupied: &[TimeSlot],
        window_start: TimeOfDay,
        window_end: TimeOfDay,
    ) -> Vec<TimeGap> {
        let mut gaps = Vec::new();

        let mut sorted: Vec<_> = occupied.to_vec();
        sorted.sort_by_key(|s| s.start);

        let mut last_end = window_start;

        for slot in &sorted {
            if slot.end <= last_end {
                continue;
            }

            if slot.start >= window_end {
                break;
            }

            if slot.start > last_end {
                self.push_gap(&mut gaps, last_end, slot.start.min(window_end));
            }

            last_end = slot.end.min(window_end);
        }

        if last_end < window_end {
            self.push_gap(&mut gaps, last_end, window_end);
        }

        gaps
    }

    fn push_gap(&self, gaps: &mut Vec<TimeGap>, start: TimeOfDay, end: TimeOfDay) {
        if let Some(gap) = TimeGap::new(start, end) {
            if gap.duration_minutes() >= self.min_gap_minutes {
                gaps.push(gap);
            }
        }
    }
}

impl Default for TimeGapDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to find every non-empty gap in a window
pub fn detect_time_gaps(
    occupied: &[TimeSlot],
    window_start: TimeOfDay,
    window_end: TimeOfDay,
) -> Vec<TimeGap> {
    TimeGapDetector::new().find_gaps(occupied, window_start, window_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn slot(a: &str, b: &str) -> TimeSlot {
        TimeSlot::new(t(a), t(b)).unwrap()
    }

    #[test]
    fn test_gap_size_classification() {
        assert_eq!(GapSize::from_minutes(15), GapSize::Small);
        assert_eq!(GapSize::from_minutes(29), GapSize::Small);
        assert_eq!(GapSize::from_minutes(30), GapSize::Medium);
        assert_eq!(GapSize::from_minutes(59), GapSize::Medium);
        assert_eq!(GapSize::from_minutes(60), GapSize::Large);
    }

    #[test]
    fn test_time_gap_creation() {
        let gap = TimeGap::new(t("09:00"), t("09:30")).unwrap();
        assert_eq!(gap.duration_minutes(), 30);
        assert!(gap.can_fit(30));
        assert!(!gap.can_fit(31));
        assert!(TimeGap::new(t("09:00"), t("09:00")).is_none());
    }

    #[test]
    fn test_find_gaps_around_blocks() {
        let occupied = vec![slot("11:00", "12:00"), slot("09:00", "10:00")];
        let gaps = detect_time_gaps(&occupied, t("08:00"), t("17:00"));

        let spans: Vec<_> = gaps
            .iter()
            .map(|g| (g.start_time.to_string(), g.end_time.to_string()))
            .collect();
        assert_eq!(
            spans,
            vec![
                ("08:00".to_string(), "09:00".to_string()),
                ("10:00".to_string(), "11:00".to_string()),
                ("12:00".to_string(), "17:00".to_string()),
            ]
        );
    }

    #[test]
    fn test_blocks_outside_window_are_clipped() {
        let occupied = vec![slot("06:00", "09:30"), slot("16:30", "18:00")];
        let gaps = detect_time_gaps(&occupied, t("09:00"), t("17:00"));
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].start_time, t("09:30"));
        assert_eq!(gaps[0].end_time, t("16:30"));
    }

    #[test]
    fn test_overlapping_blocks_merge() {
        let occupied = vec![slot("09:00", "11:00"), slot("10:00", "10:30")];
        let gaps = detect_time_gaps(&occupied, t("09:00"), t("12:00"));
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].start_time, t("11:00"));
    }

    #[test]
    fn test_min_gap_filter() {
        let occupied = vec![slot("09:10", "10:00")];
        let gaps = TimeGapDetector::new()
            .with_min_gap(15)
            .find_gaps(&occupied, t("09:00"), t("10:30"));
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].start_time, t("10:00"));
    }
}
