//! Stake kernel protocol
//!
//! The kernel (input 0 of a coinstake) must meet the formula
//!
//! ```text
//! Hash(stakeModifier ‖ blockFromTime ‖ prevout.hash ‖ prevout.n ‖ time) ≤ target × amount
//! ```
//!
//! so the chance of finding a coinstake is proportional to the amount of
//! coins staked. Only `time` is under the staker's control.

use crate::chain::BlockRef;
use crate::hash::{hash_to_hex, HashWriter};
use crate::target::{set_compact, U256};
use crate::types::{Amount, Hash, OutPoint};

/// StakeKernelHash: ℍ × ℕ × 𝒪 × ℕ → ℍ
pub fn stake_kernel_hash(stake_modifier: &Hash, block_from_time: u32, prevout: &OutPoint, time: u32) -> Hash {
    let mut writer = HashWriter::new();
    writer
        .write_hash(stake_modifier)
        .write_u32(block_from_time)
        .write_hash(&prevout.hash)
        .write_u32(prevout.index)
        .write_u32(time);
    writer.finalize()
}

/// WeightedTarget: U256 × ℤ → U256?
///
/// The decoded target scaled by the staked amount, or `None` when the
/// amount is not positive. Multiplication wraps at 2^256.
pub fn weighted_target(target: &U256, amount: Amount) -> Option<U256> {
    if amount <= 0 {
        return None;
    }
    Some(target.wrapping_mul_u64(amount as u64))
}

/// CheckStakeKernelHash: ℬ × ℕ₃₂ × ℕ × ℤ × 𝒪 × ℕ → {true, false}
///
/// 1. If time < blockFromTime: return false
/// 2. Let target = SetCompact(bits); if negative, overflow or 0: return false
/// 3. If amount = 0: return false
/// 4. Let weighted = target × amount
/// 5. Let proof = StakeKernelHash(prev.stakeModifier, blockFromTime, prevout, time)
/// 6. Return proof ≤ weighted
pub fn check_stake_kernel_hash(
    prev: BlockRef<'_>,
    bits: u32,
    block_from_time: u32,
    prev_out_amount: Amount,
    prevout: &OutPoint,
    time: u32,
) -> bool {
    if time < block_from_time {
        tracing::debug!(time, block_from_time, "stake kernel timestamp violation");
        return false;
    }

    let decoded = set_compact(bits);
    let Some(target) = decoded.usable() else {
        tracing::debug!(bits, negative = decoded.negative, overflow = decoded.overflow, "stake kernel target unusable");
        return false;
    };

    let Some(weighted) = weighted_target(&target, prev_out_amount) else {
        tracing::debug!(amount = prev_out_amount, "stake kernel has no weight");
        return false;
    };

    let stake_modifier = prev.stake_modifier();
    let hash_proof = stake_kernel_hash(stake_modifier, block_from_time, prevout, time);

    if U256::from_le_bytes(&hash_proof) > weighted {
        return false;
    }

    tracing::debug!(
        modifier = %hash_to_hex(stake_modifier),
        block_from_time,
        prevout_n = prevout.index,
        time,
        hash_proof = %hash_to_hex(&hash_proof),
        "stake kernel check passed"
    );

    true
}
