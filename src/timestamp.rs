//! Coinstake timestamp rules

use crate::config::ConsensusParams;

/// CheckCoinStakeTimestamp: ℤ × ℤ → {true, false}
///
/// The coinstake must carry the block's own time. Under protocol v2 the
/// time must also have every bit of `stake_timestamp_mask` clear, which
/// limits how many timestamps a staker can try per kernel.
pub fn is_valid_coinstake_timestamp(block_time: i64, tx_time: i64, params: &ConsensusParams) -> bool {
    if params.is_protocol_v2(block_time) {
        block_time == tx_time && (tx_time & params.stake_timestamp_mask as i64) == 0
    } else {
        block_time == tx_time
    }
}

/// Header-only variant of `is_valid_coinstake_timestamp`
pub fn is_valid_block_header_timestamp(block_time: i64, params: &ConsensusParams) -> bool {
    is_valid_coinstake_timestamp(block_time, block_time, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v2_requires_masked_bits_clear() {
        let params = ConsensusParams::regtest();
        assert!(is_valid_coinstake_timestamp(1_600_000_000, 1_600_000_000, &params));
        assert!(!is_valid_coinstake_timestamp(1_600_000_001, 1_600_000_001, &params));
        assert!(!is_valid_coinstake_timestamp(1_600_000_015, 1_600_000_015, &params));
        assert!(is_valid_coinstake_timestamp(1_600_000_016, 1_600_000_016, &params));
    }

    #[test]
    fn test_v2_requires_equal_times() {
        let params = ConsensusParams::regtest();
        assert!(!is_valid_coinstake_timestamp(1_600_000_000, 1_600_000_016, &params));
    }

    #[test]
    fn test_legacy_ignores_mask() {
        let params = ConsensusParams::mainnet();
        let legacy_time = params.protocol_v2_time as i64 - 1;
        assert!(legacy_time & 0xf != 0);
        assert!(is_valid_coinstake_timestamp(legacy_time, legacy_time, &params));
        assert!(!is_valid_coinstake_timestamp(legacy_time, legacy_time - 1, &params));
    }

    #[test]
    fn test_header_timestamp() {
        let params = ConsensusParams::regtest();
        assert!(is_valid_block_header_timestamp(1_600_000_000, &params));
        assert!(!is_valid_block_header_timestamp(1_600_000_008, &params));
    }
}
