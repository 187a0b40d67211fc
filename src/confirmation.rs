//! Confirmation depth checks for staking

use crate::chain::BlockRef;
use crate::config::ConsensusParams;
use crate::types::DiskTxPos;

/// Confirmations: ℬ × ℕ → ℤ
///
/// Depth a coin created at `coin_height` would have in the block built on
/// top of `prev`.
pub fn stake_confirmations(prev: BlockRef<'_>, coin_height: u32) -> i64 {
    prev.height() as i64 + 1 - coin_height as i64
}

/// A coin may stake once it has `stake_min_confirmations` confirmations
pub fn is_stake_mature(prev: BlockRef<'_>, coin_height: u32, params: &ConsensusParams) -> bool {
    stake_confirmations(prev, coin_height) >= params.stake_min_confirmations as i64
}

/// IsConfirmedInNPrevBlocks: 𝒫 × ℬ × ℕ → ℕ?
///
/// Walk back from `from` through at most `max_depth` blocks (including
/// `from` itself) and return the depth of the first block whose
/// transaction position equals `tx_pos`.
pub fn is_confirmed_in_prev_blocks(tx_pos: &DiskTxPos, from: BlockRef<'_>, max_depth: u32) -> Option<u32> {
    let mut current = Some(from);
    while let Some(block) = current {
        let depth = from.height() - block.height();
        if depth >= max_depth {
            break;
        }
        if block.tx_pos() == *tx_pos {
            return Some(depth);
        }
        current = block.prev();
    }
    None
}
