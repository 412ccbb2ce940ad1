//! Overlap detection and last-resort repair.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::schedule::{Flexibility, TimeBlock};

/// Two positioned blocks that share time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockConflict {
    /// Block that starts first (ties: earlier in input order)
    pub earlier_id: String,
    pub later_id: String,
    pub overlap_minutes: u32,
}

/// Every overlapping pair among the positioned blocks.
pub fn detect_conflicts(blocks: &[TimeBlock]) -> Vec<BlockConflict> {
    let mut positioned: Vec<&TimeBlock> = blocks.iter().filter(|b| b.is_positioned()).collect();
    positioned.sort_by_key(|b| b.start_time);

    let mut conflicts = Vec::new();
    for (i, a) in positioned.iter().enumerate() {
        let Some(a_slot) = a.slot() else { continue };
        for b in &positioned[i + 1..] {
            let Some(b_slot) = b.slot() else { continue };
            if b_slot.start >= a_slot.end {
                break;
            }
            if a_slot.overlaps(&b_slot) {
                let overlap_end = a_slot.end.min(b_slot.end);
                conflicts.push(BlockConflict {
                    earlier_id: a.id.clone(),
                    later_id: b.id.clone(),
                    overlap_minutes: b_slot.start.minutes_until(overlap_end),
                });
            }
        }
    }
    conflicts
}

/// Output of [`ConflictResolver::resolve`].
#[derive(Debug, Clone, Default)]
pub struct ConflictResolution {
    /// Non-overlapping blocks sorted by start time
    pub blocks: Vec<TimeBlock>,
    /// Blocks truncated to nothing, starting inside an anchor, or never positioned
    pub removed: Vec<TimeBlock>,
    /// Number of truncations performed
    pub truncated: usize,
}

/// Sorts blocks by start and cuts each one back to the start of the next.
///
/// The earlier block yields unless it is a fixed anchor, whatever its
/// priority. A block that starts inside an anchor is removed instead, and on
/// a shared start the anchor sorts last so it is never the one cut.
#[derive(Debug, Clone, Default)]
pub struct ConflictResolver;

impl ConflictResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, blocks: Vec<TimeBlock>) -> ConflictResolution {
        let (mut positioned, mut removed): (Vec<_>, Vec<_>) =
            blocks.into_iter().partition(TimeBlock::is_positioned);
        positioned.sort_by_key(|b| (b.start_time, b.flexibility == Flexibility::Fixed));

        let mut kept: Vec<TimeBlock> = Vec::with_capacity(positioned.len());
        let mut truncated = 0;
        for block in positioned {
            let Some(next_start) = block.start_time else { continue };
            let Some(last) = kept.last_mut() else {
                kept.push(block);
                continue;
            };
            if !last.end_time.is_some_and(|end| end > next_start) {
                kept.push(block);
                continue;
            }

            if last.flexibility == Flexibility::Fixed && block.flexibility != Flexibility::Fixed {
                warn!(
                    block = %block.title,
                    anchor = %last.title,
                    "block starts inside a fixed anchor, removing"
                );
                removed.push(block);
                continue;
            }

            warn!(
                block = %last.title,
                end = ?last.end_time.map(|t| t.to_string()),
                next_start = %next_start,
                "overlap detected, truncating block"
            );
            last.truncate_to(next_start);
            truncated += 1;
            if last.duration == 0 {
                if let Some(empty) = kept.pop() {
                    warn!(block = %empty.title, "block truncated to zero length, removing");
                    removed.push(empty);
                }
            }
            kept.push(block);
        }

        let (blocks, empty): (Vec<_>, Vec<_>) = kept.into_iter().partition(|b| b.duration > 0);
        for block in &empty {
            warn!(block = %block.title, "zero-length block, removing");
        }
        removed.extend(empty);

        ConflictResolution {
            blocks,
            removed,
            truncated,
        }
    }
}
