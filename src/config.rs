//! Consensus parameters for proof-of-stake validation
//!
//! Parameters are an immutable value handed to every validation call.
//! Nothing here is process-wide state.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ConsensusError, Result};

/// Network selector for the built-in parameter presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Regtest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusParams {
    /// Low bits that must be clear in a protocol v2 coinstake timestamp
    pub stake_timestamp_mask: u32,
    /// Minimum depth of a coin before it can be used as a stake kernel
    pub stake_min_confirmations: u32,
    /// Blocks with a time strictly after this use protocol v2 rules
    pub protocol_v2_time: u32,
}

impl ConsensusParams {
    pub fn mainnet() -> Self {
        ConsensusParams {
            stake_timestamp_mask: STAKE_TIMESTAMP_MASK,
            stake_min_confirmations: MAINNET_STAKE_MIN_CONFIRMATIONS,
            protocol_v2_time: MAINNET_PROTOCOL_V2_TIME,
        }
    }

    pub fn testnet() -> Self {
        ConsensusParams {
            stake_timestamp_mask: STAKE_TIMESTAMP_MASK,
            stake_min_confirmations: TESTNET_STAKE_MIN_CONFIRMATIONS,
            protocol_v2_time: TESTNET_PROTOCOL_V2_TIME,
        }
    }

    pub fn regtest() -> Self {
        ConsensusParams {
            stake_timestamp_mask: STAKE_TIMESTAMP_MASK,
            stake_min_confirmations: TESTNET_STAKE_MIN_CONFIRMATIONS,
            protocol_v2_time: 0,
        }
    }

    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Mainnet => Self::mainnet(),
            Network::Testnet => Self::testnet(),
            Network::Regtest => Self::regtest(),
        }
    }

    /// Parse and validate parameters from JSON
    ///
    /// ```
    /// use stake_proof::config::ConsensusParams;
    ///
    /// let params = ConsensusParams::from_json(
    ///     r#"{"stake_timestamp_mask": 15, "stake_min_confirmations": 10, "protocol_v2_time": 0}"#,
    /// ).unwrap();
    /// assert_eq!(params, ConsensusParams::regtest());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let params: ConsensusParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        // The mask must be a contiguous run of low bits
        if !(self.stake_timestamp_mask as u64 + 1).is_power_of_two() {
            return Err(ConsensusError::InvalidConfig(format!(
                "stake timestamp mask {:#x} is not a low-bit mask",
                self.stake_timestamp_mask
            )));
        }
        if self.stake_min_confirmations == 0 {
            return Err(ConsensusError::InvalidConfig(
                "stake minimum confirmations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_protocol_v2(&self, time: i64) -> bool {
        time > self.protocol_v2_time as i64
    }
}

impl Default for ConsensusParams {
    fn default() -> Self {
        Self::mainnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for network in [Network::Mainnet, Network::Testnet, Network::Regtest] {
            assert!(ConsensusParams::for_network(network).validate().is_ok());
        }
    }

    #[test]
    fn test_from_json_rejects_sparse_mask() {
        let json = r#"{"stake_timestamp_mask": 5, "stake_min_confirmations": 10, "protocol_v2_time": 0}"#;
        assert!(matches!(
            ConsensusParams::from_json(json),
            Err(ConsensusError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_zero_confirmations() {
        let json = r#"{"stake_timestamp_mask": 15, "stake_min_confirmations": 0, "protocol_v2_time": 0}"#;
        assert!(ConsensusParams::from_json(json).is_err());
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            ConsensusParams::from_json("{"),
            Err(ConsensusError::Serialization(_))
        ));
    }

    #[test]
    fn test_zero_mask_is_valid() {
        let params = ConsensusParams { stake_timestamp_mask: 0, ..ConsensusParams::regtest() };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_protocol_v2_switch() {
        let params = ConsensusParams::mainnet();
        assert!(!params.is_protocol_v2(MAINNET_PROTOCOL_V2_TIME as i64));
        assert!(params.is_protocol_v2(MAINNET_PROTOCOL_V2_TIME as i64 + 1));
    }

    #[test]
    fn test_network_serde() {
        let network: Network = serde_json::from_str("\"regtest\"").unwrap();
        assert_eq!(network, Network::Regtest);
    }
}
