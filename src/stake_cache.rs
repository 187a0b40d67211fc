//! Per-session cache of stake kernel inputs
//!
//! A staking loop checks the same outputs against many candidate times.
//! `StakeCache` remembers, per outpoint, the origin block time and amount
//! so those checks skip the UTXO and ancestor lookups.
//!
//! One cache belongs to one scanning session. It is not synchronized: the
//! session that fills it with `cache_kernel` is also the one that reads it
//! through `check_kernel`. Entries are only ever added, never replaced.

use std::collections::HashMap;

use crate::chain::BlockRef;
use crate::coins::CoinsView;
use crate::config::ConsensusParams;
use crate::confirmation::is_stake_mature;
use crate::types::{Amount, OutPoint};

/// Kernel inputs resolved for one outpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakeCacheEntry {
    pub block_from_time: u32,
    pub amount: Amount,
}

#[derive(Debug, Default)]
pub struct StakeCache {
    entries: HashMap<OutPoint, StakeCacheEntry>,
}

impl StakeCache {
    pub fn new() -> Self {
        StakeCache { entries: HashMap::new() }
    }

    pub fn lookup(&self, outpoint: &OutPoint) -> Option<StakeCacheEntry> {
        self.entries.get(outpoint).copied()
    }

    /// Insert unless the outpoint is already cached; returns whether it was inserted
    pub fn insert_if_absent(&mut self, outpoint: OutPoint, block_from_time: u32, amount: Amount) -> bool {
        if self.entries.contains_key(&outpoint) {
            return false;
        }
        self.entries.insert(outpoint, StakeCacheEntry { block_from_time, amount });
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// ResolveStake: ℬ × 𝒪 × 𝒰𝒮 → (ℕ × ℤ)?
///
/// 1. Look up the coin at `outpoint`; it must exist and be unspent
/// 2. The coin must be mature relative to `prev`
/// 3. Its origin block is the ancestor of `prev` at the coin's height
/// 4. Return (origin block time, coin amount)
pub(crate) fn resolve_stake_entry(
    prev: BlockRef<'_>,
    outpoint: &OutPoint,
    view: &dyn CoinsView,
    params: &ConsensusParams,
) -> Option<StakeCacheEntry> {
    let coin = view.get_coin(outpoint)?;
    if !is_stake_mature(prev, coin.height, params) {
        return None;
    }
    let block_from = prev.ancestor(coin.height)?;
    if coin.is_spent() {
        return None;
    }
    Some(StakeCacheEntry { block_from_time: block_from.time(), amount: coin.amount() })
}

/// CacheKernel: 𝒮𝒞 × 𝒪 × ℬ × 𝒰𝒮 → 𝒮𝒞
///
/// Best effort: an outpoint that cannot be resolved is left out silently.
pub fn cache_kernel(
    cache: &mut StakeCache,
    outpoint: &OutPoint,
    prev: BlockRef<'_>,
    view: &dyn CoinsView,
    params: &ConsensusParams,
) {
    if cache.lookup(outpoint).is_some() {
        return;
    }
    if let Some(entry) = resolve_stake_entry(prev, outpoint, view, params) {
        cache.insert_if_absent(*outpoint, entry.block_from_time, entry.amount);
    }
}
