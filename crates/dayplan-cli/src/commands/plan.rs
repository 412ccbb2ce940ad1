//! Schedule generation and display commands for CLI.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use dayplan_core::{Config, DayPlanner, DaySchedule, SqliteScheduleStore, TaskCollections};
use tracing::debug;

#[derive(Subcommand)]
pub enum PlanAction {
    /// Build and store a schedule for a date
    Generate {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// JSON file with morning/deep/light/workout/health task lists
        #[arg(long)]
        tasks: PathBuf,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the stored schedule for a date
    Show {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: PlanAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PlanAction::Generate { date, tasks, json } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let content = std::fs::read_to_string(&tasks)
                .map_err(|e| format!("cannot read {}: {e}", tasks.display()))?;
            let collections: TaskCollections = serde_json::from_str(&content)?;
            debug!(path = %tasks.display(), items = collections.total_items(), "loaded task collections");

            let config = Config::load()?;
            let mut planner = DayPlanner::with_config(SqliteScheduleStore::open()?, config.scheduler);
            let schedule = planner.generate_optimal_schedule(date, &config.preferences, &collections)?;
            print_schedule(&schedule, json)?;
        }
        PlanAction::Show { date, json } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let planner = DayPlanner::new(SqliteScheduleStore::open()?);
            let schedule = planner
                .get_schedule_for_date(date)?
                .ok_or_else(|| format!("no schedule stored for {date}"))?;
            print_schedule(&schedule, json)?;
        }
    }
    Ok(())
}

fn print_schedule(schedule: &DaySchedule, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(schedule)?);
        return Ok(());
    }

    println!("Schedule for {} (version {})", schedule.date, schedule.version);
    for block in &schedule.time_blocks {
        let span = match (block.start_time, block.end_time) {
            (Some(start), Some(end)) => format!("{start}-{end}"),
            _ => "--:-- --:--".to_string(),
        };
        println!(
            "  {span}  {:<15} {:<30} [{}]  {}",
            block.category.as_str(),
            block.title,
            block.completion_status,
            block.id
        );
    }

    let metrics = &schedule.metrics;
    println!();
    println!("Work:        {} min", metrics.total_work_time);
    println!("Focus:       {} min", metrics.total_focus_time);
    println!("Breaks:      {} min", metrics.total_break_time);
    println!("Peak usage:  {:.0}%", metrics.energy_utilization);
    println!("Efficiency:  {}", metrics.schedule_efficiency);

    let summary = schedule.completion_summary();
    println!(
        "Completed:   {}/{} ({:.0}%)",
        summary.completed,
        summary.total,
        summary.completion_rate * 100.0
    );

    if !schedule.dropped_task_ids.is_empty() {
        println!("Not placed:  {}", schedule.dropped_task_ids.join(", "));
    }
    Ok(())
}
