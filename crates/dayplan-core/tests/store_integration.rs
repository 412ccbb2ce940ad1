//! Planner against the on-disk SQLite store.

use chrono::NaiveDate;
use dayplan_core::storage::migrations;
use dayplan_core::{
    ChecklistItem, CompletionStatus, DayPlanner, DeepTask, ScheduleStore, SqliteScheduleStore,
    TaskCollections, TimeOfDay, WorkSchedulePreferences,
};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, day).unwrap()
}

fn tasks() -> TaskCollections {
    TaskCollections {
        morning_tasks: vec![ChecklistItem::new("m1", "Coffee")],
        deep_tasks: vec![DeepTask::new("d1", "Quarterly plan").with_duration(120)],
        light_tasks: vec![ChecklistItem::new("l1", "Inbox zero")],
        ..Default::default()
    }
}

#[test]
fn schedules_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dayplan.db");

    let generated = {
        let store = SqliteScheduleStore::open_at(&path).unwrap();
        let mut planner = DayPlanner::new(store);
        planner
            .generate_optimal_schedule(date(1), &WorkSchedulePreferences::default(), &tasks())
            .unwrap()
    };

    let store = SqliteScheduleStore::open_at(&path).unwrap();
    let planner = DayPlanner::new(store);
    let loaded = planner.get_schedule_for_date(date(1)).unwrap().unwrap();
    assert_eq!(loaded, generated);
    assert_eq!(
        migrations::get_schema_version(planner.store().conn()),
        migrations::SCHEMA_VERSION
    );
}

#[test]
fn completion_is_found_across_dates() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteScheduleStore::open_at(&dir.path().join("dayplan.db")).unwrap();
    let mut planner = DayPlanner::new(store);
    let prefs = WorkSchedulePreferences::default();

    planner.generate_optimal_schedule(date(1), &prefs, &tasks()).unwrap();
    let second = planner.generate_optimal_schedule(date(2), &prefs, &tasks()).unwrap();
    let block = second.time_blocks.iter().find(|b| b.title == "Inbox zero").unwrap();

    let finished = TimeOfDay::from_hm(9, 40);
    assert!(planner
        .update_block_completion(&block.id, CompletionStatus::Completed, finished)
        .unwrap());

    let first = planner.get_schedule_for_date(date(1)).unwrap().unwrap();
    assert_eq!(first.version, 1);
    assert_eq!(first.completion_summary().completed, 0);

    let updated = planner.get_schedule_for_date(date(2)).unwrap().unwrap();
    let updated_block = updated.block(&block.id).unwrap();
    assert_eq!(updated_block.completion_status, CompletionStatus::Completed);
    assert_eq!(updated_block.actual_end_time, finished);
    assert_eq!(updated_block.start_time, block.start_time);
    assert_eq!(updated.version, 2);

    assert_eq!(planner.store().dates().unwrap(), vec![date(1), date(2)]);
}

#[test]
fn regenerating_forgets_old_block_ids() {
    let mut planner = DayPlanner::new(SqliteScheduleStore::open_memory().unwrap());
    let prefs = WorkSchedulePreferences::default();

    let old = planner.generate_optimal_schedule(date(5), &prefs, &tasks()).unwrap();
    let new = planner.generate_optimal_schedule(date(5), &prefs, &tasks()).unwrap();
    assert_eq!(new.version, 2);

    let old_id = &old.time_blocks[0].id;
    assert!(!planner
        .update_block_completion(old_id, CompletionStatus::InProgress, None)
        .unwrap());
    assert_eq!(planner.store().find_block_date(&new.time_blocks[0].id).unwrap(), Some(date(5)));
}
