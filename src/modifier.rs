//! Stake modifier chaining
//!
//! The stake modifier keeps a coin owner from computing, at the time their
//! output confirms, the future proofs of stake that output will produce:
//! every kernel hash folds in a modifier that depends on blocks that do not
//! exist yet.

use crate::chain::BlockRef;
use crate::hash::HashWriter;
use crate::types::Hash;

/// ComputeStakeModifier: ℬ? × ℍ → ℍ
///
/// 1. If there is no previous block (genesis): return 0
/// 2. Otherwise: return Hash(kernel ‖ prev.stakeModifier)
pub fn compute_stake_modifier(prev: Option<BlockRef<'_>>, kernel: &Hash) -> Hash {
    let Some(prev) = prev else {
        return [0u8; 32];
    };

    let mut writer = HashWriter::new();
    writer.write_hash(kernel).write_hash(prev.stake_modifier());
    writer.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{ChainIndex, NewBlock};
    use crate::types::DiskTxPos;

    fn genesis_chain() -> ChainIndex {
        let mut chain = ChainIndex::new();
        chain
            .connect_block(
                None,
                NewBlock { time: 0, bits: 0x1d00ffff, tx_pos: DiskTxPos::default(), hash_proof_of_stake: [7; 32] },
            )
            .unwrap();
        chain
    }

    #[test]
    fn test_genesis_modifier_is_zero() {
        assert_eq!(compute_stake_modifier(None, &[0xff; 32]), [0u8; 32]);
        assert_eq!(compute_stake_modifier(None, &[0x00; 32]), [0u8; 32]);
    }

    #[test]
    fn test_modifier_is_deterministic() {
        let chain = genesis_chain();
        let prev = chain.last();
        assert_eq!(compute_stake_modifier(prev, &[1; 32]), compute_stake_modifier(prev, &[1; 32]));
    }

    #[test]
    fn test_modifier_depends_on_kernel() {
        let chain = genesis_chain();
        let prev = chain.last();
        assert_ne!(compute_stake_modifier(prev, &[1; 32]), compute_stake_modifier(prev, &[2; 32]));
    }

    #[test]
    fn test_modifier_matches_serialization() {
        let chain = genesis_chain();
        let prev = chain.last().unwrap();

        let mut writer = HashWriter::new();
        writer.write_hash(&[3; 32]).write_hash(&[0; 32]);
        assert_eq!(compute_stake_modifier(Some(prev), &[3; 32]), writer.finalize());
    }
}
