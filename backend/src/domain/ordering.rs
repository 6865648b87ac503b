//! Rank ordering for catalogue items.
//!
//! A move is planned against the visible rows of one kind sorted by
//! `(sort_order, id)`. "Up" moves towards the front of the list. Usually the
//! plan exchanges two rank values and gaps left by soft deletes persist; only
//! a tie between the pair forces some rows to be renumbered.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::AssetId;

/// Direction of a single-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

impl FromStr for MoveDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(other.to_owned()),
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
        })
    }
}

/// Identifier and rank of a visible row, as observed when planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedSlot {
    pub id: AssetId,
    pub sort_order: i32,
}

impl RankedSlot {
    pub const fn new(id: AssetId, sort_order: i32) -> Self {
        Self { id, sort_order }
    }
}

/// New rank for one row, guarded by the rank observed when planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankChange {
    pub observed: RankedSlot,
    pub new_rank: i32,
}

impl RankChange {
    pub const fn new(observed: RankedSlot, new_rank: i32) -> Self {
        Self { observed, new_rank }
    }
}

/// Outcome of planning a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderPlan {
    /// Apply every change together; `neighbour` is the row passed over.
    Move {
        neighbour: RankedSlot,
        changes: Vec<RankChange>,
    },
    /// The target already sits at the relevant end of the list.
    AtEdge,
}

/// Plan moving `target` one step in `direction`.
///
/// Distinct ranks are exchanged. When the two rows share a rank, the rows
/// from the pair onwards are renumbered upwards until ranks are strictly
/// increasing again, so the new order survives the `(sort_order, id)` sort.
///
/// Returns `None` when `target` is not among the visible rows.
///
/// # Examples
/// ```
/// use studio_backend::domain::{
///     AssetId, MoveDirection, RankChange, RankedSlot, ReorderPlan, plan_move,
/// };
///
/// let first = RankedSlot::new(AssetId::new(1), 1);
/// let second = RankedSlot::new(AssetId::new(2), 2);
/// let plan = plan_move(&[first, second], AssetId::new(1), MoveDirection::Down);
/// assert_eq!(
///     plan,
///     Some(ReorderPlan::Move {
///         neighbour: second,
///         changes: vec![RankChange::new(first, 2), RankChange::new(second, 1)],
///     })
/// );
/// ```
pub fn plan_move(
    visible: &[RankedSlot],
    target: AssetId,
    direction: MoveDirection,
) -> Option<ReorderPlan> {
    let mut ranked = visible.to_vec();
    ranked.sort_by_key(|slot| (slot.sort_order, slot.id));

    let index = ranked.iter().position(|slot| slot.id == target)?;
    let neighbour_index = match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => index.checked_add(1).filter(|next| *next < ranked.len()),
    };
    let Some(neighbour_index) = neighbour_index else {
        return Some(ReorderPlan::AtEdge);
    };
    let (Some(&moving), Some(&neighbour)) = (ranked.get(index), ranked.get(neighbour_index))
    else {
        return None;
    };

    let changes = if moving.sort_order == neighbour.sort_order {
        renumber_from(&ranked, index.min(neighbour_index), moving, neighbour)
    } else {
        vec![
            RankChange::new(moving, neighbour.sort_order),
            RankChange::new(neighbour, moving.sort_order),
        ]
    };
    Some(ReorderPlan::Move { neighbour, changes })
}

/// Exchange the tied pair starting at `from`, then bump each following row
/// until its rank exceeds its predecessor's.
fn renumber_from(
    ranked: &[RankedSlot],
    from: usize,
    moving: RankedSlot,
    neighbour: RankedSlot,
) -> Vec<RankChange> {
    let mut reordered: Vec<RankedSlot> = ranked.iter().skip(from).copied().collect();
    if let (Some(a), Some(b)) = (
        reordered.iter().position(|slot| slot.id == moving.id),
        reordered.iter().position(|slot| slot.id == neighbour.id),
    ) {
        reordered.swap(a, b);
    }

    let mut changes = Vec::new();
    let mut floor: Option<i32> = None;
    for slot in reordered {
        let rank = floor.map_or(slot.sort_order, |prev| {
            slot.sort_order.max(prev.saturating_add(1))
        });
        if rank != slot.sort_order {
            changes.push(RankChange::new(slot, rank));
        }
        floor = Some(rank);
    }
    changes
}

/// Rank assigned to a newly uploaded row given the current maximum.
///
/// The maximum spans deleted rows too so a new upload never reuses a rank.
pub fn next_rank(current_max: Option<i32>) -> i32 {
    current_max.map_or(1, |max| max.saturating_add(1))
}
