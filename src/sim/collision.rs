//! Catch/collision resolution between the bin and falling trash
//!
//! Items that touch the bin are classified by where they came in: through the
//! opening (lid) or against the body (side). Only lid entries can score.
//! Removal is two-phase: resolve everything first, then drop resolved items.

use serde::{Deserialize, Serialize};

use super::state::{Player, SessionStats, Trash, TrashCategory};
use crate::Rect;

/// Where an item met the bin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entry {
    Lid,
    Side,
}

/// Outcome for a single removed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Right category through the lid
    Caught(TrashCategory),
    /// Wrong category through the lid
    Mismatch(TrashCategory),
    /// Non-bonus item hit the bin body
    SideHit(TrashCategory),
    /// Bonus through the lid
    Healed,
    /// Bonus against the body; consumed without effect
    BonusDeflected,
    /// Non-bonus item fell past the bottom
    Missed(TrashCategory),
    /// Bonus fell past the bottom
    BonusLost,
}

impl Resolution {
    /// Health change this outcome applies
    pub fn health_delta(&self) -> i32 {
        match self {
            Resolution::Healed => 1,
            Resolution::Mismatch(_) | Resolution::SideHit(_) | Resolution::Missed(_) => -1,
            Resolution::Caught(_) | Resolution::BonusDeflected | Resolution::BonusLost => 0,
        }
    }

    /// Whether the outcome counts toward `total_resolved`
    pub fn counts_as_resolved(&self) -> bool {
        !matches!(
            self,
            Resolution::Healed | Resolution::BonusDeflected | Resolution::BonusLost
        )
    }
}

/// Classify an overlapping item by its bottom edge relative to the lid line
pub fn classify_entry(bin: &Rect, item: &Rect, lid_depth: f32) -> Entry {
    if item.bottom() <= bin.top() + lid_depth {
        Entry::Lid
    } else {
        Entry::Side
    }
}

/// Decide the outcome of an item entering the bin
pub fn adjudicate(entry: Entry, item: TrashCategory, bin: TrashCategory) -> Resolution {
    match (entry, item) {
        (Entry::Lid, TrashCategory::Bonus) => Resolution::Healed,
        (Entry::Lid, category) if category == bin => Resolution::Caught(category),
        (Entry::Lid, category) => Resolution::Mismatch(category),
        (Entry::Side, TrashCategory::Bonus) => Resolution::BonusDeflected,
        (Entry::Side, category) => Resolution::SideHit(category),
    }
}

/// Apply one outcome to the player and stats
pub fn apply(resolution: Resolution, player: &mut Player, stats: &mut SessionStats) {
    match resolution.health_delta() {
        d if d > 0 => player.heal(),
        d if d < 0 => player.damage(),
        _ => {}
    }
    match resolution {
        Resolution::Caught(_) => stats.caught += 1,
        Resolution::Missed(_) => stats.missed += 1,
        _ => {}
    }
    if resolution.counts_as_resolved() {
        stats.total_resolved += 1;
    }
}

/// Resolve every item touching the bin, then every item that fell off screen.
///
/// Resolved items are removed from `trash`. Outcomes are returned in the
/// order they were applied.
pub fn resolve(
    player: &mut Player,
    trash: &mut Vec<Trash>,
    stats: &mut SessionStats,
    lid_depth: f32,
) -> Vec<Resolution> {
    let bin = player.rect();

    // Phase 1: decide outcomes without touching the collection
    let mut resolved: Vec<(u32, Resolution)> = trash
        .iter()
        .filter(|item| bin.intersects(&item.rect()))
        .map(|item| {
            let entry = classify_entry(&bin, &item.rect(), lid_depth);
            (item.id, adjudicate(entry, item.category, player.category))
        })
        .collect();
    resolved.extend(
        trash
            .iter()
            .filter(|item| item.is_off_screen() && !bin.intersects(&item.rect()))
            .map(|item| (item.id, miss_outcome(item.category))),
    );

    // Phase 2: apply and remove
    for (_, resolution) in &resolved {
        apply(*resolution, player, stats);
    }
    if !resolved.is_empty() {
        trash.retain(|t| !resolved.iter().any(|(id, _)| *id == t.id));
    }

    resolved.into_iter().map(|(_, r)| r).collect()
}

fn miss_outcome(category: TrashCategory) -> Resolution {
    if category.is_bonus() {
        Resolution::BonusLost
    } else {
        Resolution::Missed(category)
    }
}
