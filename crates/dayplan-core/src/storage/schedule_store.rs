//! Persistence seam for generated schedules.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::Result;
use crate::schedule::DaySchedule;

/// Keyed storage of one [`DaySchedule`] per date.
///
/// Saving a schedule for a date that already has one replaces it.
pub trait ScheduleStore {
    fn load(&self, date: NaiveDate) -> Result<Option<DaySchedule>>;

    fn save(&mut self, schedule: &DaySchedule) -> Result<()>;

    /// Date of the stored schedule containing `block_id`, if any.
    fn find_block_date(&self, block_id: &str) -> Result<Option<NaiveDate>>;

    /// All stored dates, ascending.
    fn dates(&self) -> Result<Vec<NaiveDate>>;
}

/// Process-local store.
#[derive(Debug, Clone, Default)]
pub struct MemoryScheduleStore {
    schedules: BTreeMap<NaiveDate, DaySchedule>,
}

impl MemoryScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

impl ScheduleStore for MemoryScheduleStore {
    fn load(&self, date: NaiveDate) -> Result<Option<DaySchedule>> {
        Ok(self.schedules.get(&date).cloned())
    }

    fn save(&mut self, schedule: &DaySchedule) -> Result<()> {
        self.schedules.insert(schedule.date, schedule.clone());
        Ok(())
    }

    fn find_block_date(&self, block_id: &str) -> Result<Option<NaiveDate>> {
        Ok(self
            .schedules
            .iter()
            .find(|(_, schedule)| schedule.contains_block(block_id))
            .map(|(date, _)| *date))
    }

    fn dates(&self) -> Result<Vec<NaiveDate>> {
        Ok(self.schedules.keys().copied().collect())
    }
}
