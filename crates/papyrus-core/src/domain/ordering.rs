//! # Block Ordering
//!
//! Pure algorithms behind the Ordering Engine.
//!
//! The store never sorts for us. Every sorted read goes through
//! [`sort_blocks`], whose key is `(order, created_at, id)`, so blocks that
//! share an `order` still come back in a stable sequence.
//!
//! Reorders are always planned as a full contiguous renumbering `0..N-1` of
//! the stream, never as a single-block bump. This keeps orders unique for
//! well-behaved clients even though the store does not enforce it.

use super::commands::{MoveDirection, OrderUpdate};
use super::entities::{Block, BlockId};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Total order over blocks of one stream.
pub fn compare_blocks(a: &Block, b: &Block) -> Ordering {
    a.order
        .cmp(&b.order)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort blocks into display order.
pub fn sort_blocks(blocks: &mut [Block]) {
    blocks.sort_by(compare_blocks);
}

/// Position for a block appended at the end: the current block count.
pub fn next_order(blocks: &[Block]) -> u32 {
    u32::try_from(blocks.len()).unwrap_or(u32::MAX)
}

/// Assign `0..N-1` to `ids` in the given sequence.
pub fn renumber<'a, I>(ids: I) -> Vec<OrderUpdate>
where
    I: IntoIterator<Item = &'a BlockId>,
{
    ids.into_iter()
        .enumerate()
        .map(|(position, id)| OrderUpdate::new(id.clone(), position as u32))
        .collect()
}

/// Result of planning a one-slot move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovePlan {
    /// Block already at the edge in that direction. Nothing to write.
    Unchanged,
    /// Full renumbering of the stream with the block swapped into place.
    Reorder(Vec<OrderUpdate>),
    /// Block is not part of the given list.
    Missing,
}

/// Plan swapping `target` with its neighbour.
///
/// `sorted` must be the whole stream in display order. The plan covers every
/// block of the stream, not just the two that swap.
pub fn plan_move(sorted: &[Block], target: &BlockId, direction: MoveDirection) -> MovePlan {
    let Some(index) = sorted.iter().position(|block| &block.id == target) else {
        return MovePlan::Missing;
    };

    let neighbour = match direction {
        MoveDirection::Up if index > 0 => index - 1,
        MoveDirection::Down if index + 1 < sorted.len() => index + 1,
        _ => return MovePlan::Unchanged,
    };

    let mut ids: Vec<&BlockId> = sorted.iter().map(|block| &block.id).collect();
    ids.swap(index, neighbour);
    MovePlan::Reorder(renumber(ids))
}

/// True when `orders` is exactly `0..N-1` in some sequence.
pub fn is_contiguous_permutation<I>(orders: I) -> bool
where
    I: IntoIterator<Item = u32>,
{
    let orders: Vec<u32> = orders.into_iter().collect();
    let unique: HashSet<u32> = orders.iter().copied().collect();
    unique.len() == orders.len() && orders.iter().all(|&o| (o as usize) < orders.len())
}
