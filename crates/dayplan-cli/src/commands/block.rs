//! Block completion commands for CLI.

use clap::Subcommand;
use dayplan_core::{CompletionStatus, DayPlanner, SqliteScheduleStore, TimeOfDay};

#[derive(Subcommand)]
pub enum BlockAction {
    /// Set a block's completion status
    Set {
        /// Block ID (see `dayplan plan show --json`)
        id: String,
        /// pending, in-progress, completed, skipped or cancelled
        status: CompletionStatus,
        /// Actual end time (HH:MM), recorded for completed blocks
        #[arg(long)]
        at: Option<TimeOfDay>,
    },
}

pub fn run(action: BlockAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        BlockAction::Set { id, status, at } => {
            let mut planner = DayPlanner::new(SqliteScheduleStore::open()?);
            if !planner.update_block_completion(&id, status, at)? {
                return Err(format!("no stored schedule contains block {id}").into());
            }
            println!("{id}: {status}");
        }
    }
    Ok(())
}
