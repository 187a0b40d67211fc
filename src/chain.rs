//! Block index arena
//!
//! The chain owns every block record in one append-only `Vec`. Records are
//! addressed by `BlockId` and never change once linked, so validation code
//! borrows `BlockRef` views instead of owning nodes. Each record keeps a
//! skip pointer so ancestor lookups take O(log n) steps.

use crate::error::{ConsensusError, Result};
use crate::modifier::compute_stake_modifier;
use crate::types::{DiskTxPos, Hash};

/// Index of a block record in a `ChainIndex`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(usize);

/// Immutable per-block data used by stake validation
#[derive(Debug, Clone, PartialEq, Eq)]
struct BlockIndexEntry {
    height: u32,
    time: u32,
    bits: u32,
    stake_modifier: Hash,
    hash_proof_of_stake: Hash,
    tx_pos: DiskTxPos,
    prev: Option<BlockId>,
    skip: Option<BlockId>,
}

/// Header fields of a block being linked into the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBlock {
    pub time: u32,
    pub bits: u32,
    pub tx_pos: DiskTxPos,
    /// Kernel hash of the block's coinstake
    pub hash_proof_of_stake: Hash,
}

#[derive(Debug, Default)]
pub struct ChainIndex {
    entries: Vec<BlockIndexEntry>,
}

/// Turn the lowest set bit off
fn invert_lowest_one(n: u32) -> u32 {
    n & n.wrapping_sub(1)
}

/// Height the skip pointer of a block at `height` points to
///
/// Any number that is strictly lower than `height` works; this choice keeps
/// both the jump distance and the number of steps logarithmic.
fn skip_height(height: u32) -> u32 {
    if height < 2 {
        return 0;
    }
    if height & 1 == 1 {
        invert_lowest_one(invert_lowest_one(height - 1)) + 1
    } else {
        invert_lowest_one(height)
    }
}

impl ChainIndex {
    pub fn new() -> Self {
        ChainIndex { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn block(&self, id: BlockId) -> Option<BlockRef<'_>> {
        self.entries.get(id.0).map(|_| BlockRef { chain: self, id })
    }

    /// Most recently linked block
    pub fn last(&self) -> Option<BlockRef<'_>> {
        self.entries.len().checked_sub(1).map(|i| BlockRef { chain: self, id: BlockId(i) })
    }

    /// ConnectBlock: ℬ? × 𝒩 → ℬ
    ///
    /// Link a new block after `prev` (or as a genesis when `prev` is absent).
    /// The block's stake modifier is computed here, once, from the
    /// predecessor's modifier and the block's own kernel hash.
    pub fn connect_block(&mut self, prev: Option<BlockId>, block: NewBlock) -> Result<BlockId> {
        let prev_ref = match prev {
            Some(id) => Some(self.block(id).ok_or(ConsensusError::UnknownBlock(id.0))?),
            None => None,
        };

        let stake_modifier = compute_stake_modifier(prev_ref, &block.hash_proof_of_stake);
        let height = prev_ref.map_or(0, |p| p.height() + 1);
        let skip = prev_ref.and_then(|p| p.ancestor(skip_height(height))).map(|b| b.id);

        let id = BlockId(self.entries.len());
        self.entries.push(BlockIndexEntry {
            height,
            time: block.time,
            bits: block.bits,
            stake_modifier,
            hash_proof_of_stake: block.hash_proof_of_stake,
            tx_pos: block.tx_pos,
            prev,
            skip,
        });

        tracing::trace!(height, modifier = %crate::hash::hash_to_hex(&stake_modifier), "connected block index entry");
        Ok(id)
    }
}

/// Borrowed view of one block in a `ChainIndex`
#[derive(Debug, Clone, Copy)]
pub struct BlockRef<'a> {
    chain: &'a ChainIndex,
    id: BlockId,
}

impl<'a> BlockRef<'a> {
    fn entry(&self) -> &'a BlockIndexEntry {
        &self.chain.entries[self.id.0]
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn height(&self) -> u32 {
        self.entry().height
    }

    pub fn time(&self) -> u32 {
        self.entry().time
    }

    pub fn bits(&self) -> u32 {
        self.entry().bits
    }

    pub fn stake_modifier(&self) -> &'a Hash {
        &self.entry().stake_modifier
    }

    pub fn hash_proof_of_stake(&self) -> &'a Hash {
        &self.entry().hash_proof_of_stake
    }

    pub fn tx_pos(&self) -> DiskTxPos {
        self.entry().tx_pos
    }

    pub fn prev(&self) -> Option<BlockRef<'a>> {
        self.entry().prev.map(|id| BlockRef { chain: self.chain, id })
    }

    /// GetAncestor: ℬ × ℕ → ℬ?
    ///
    /// Walk towards genesis taking the skip pointer whenever it does not
    /// overshoot `height`, falling back to the direct predecessor otherwise.
    pub fn ancestor(&self, height: u32) -> Option<BlockRef<'a>> {
        if height > self.height() {
            return None;
        }

        let mut walk = *self;
        let mut height_walk = self.height();
        while height_walk > height {
            let height_skip = skip_height(height_walk);
            let height_skip_prev = skip_height(height_walk - 1);
            let entry = walk.entry();
            let take_skip = entry.skip.is_some()
                && (height_skip == height
                    || (height_skip > height
                        && !(height_skip_prev + 2 < height_skip && height_skip_prev >= height)));
            let next = if take_skip {
                height_walk = height_skip;
                entry.skip
            } else {
                height_walk -= 1;
                entry.prev
            };
            walk = BlockRef { chain: self.chain, id: next? };
        }
        Some(walk)
    }
}

impl PartialEq for BlockRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.chain, other.chain) && self.id == other.id
    }
}

impl Eq for BlockRef<'_> {}
