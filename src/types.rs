//! Core types for proof-of-stake validation

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::hash::HashWriter;

/// Hash type: 256-bit hash, raw digest byte order
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Amount in base units
pub type Amount = i64;

/// OutPoint: 𝒪 = ℍ × ℕ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: Hash,
    pub index: u32,
}

impl OutPoint {
    pub fn new(hash: Hash, index: u32) -> Self {
        OutPoint { hash, index }
    }

    /// The null outpoint referenced by coinbase inputs
    pub fn null() -> Self {
        OutPoint { hash: [0; 32], index: u32::MAX }
    }

    pub fn is_null(&self) -> bool {
        self.hash == [0; 32] && self.index == u32::MAX
    }
}

/// Transaction Input: ℐ = 𝒪 × 𝕊 × ℕ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub prevout: OutPoint,
    pub script_sig: ByteString,
    pub sequence: u32,
}

/// Transaction Output: 𝒯 = ℤ × 𝕊
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: Amount,
    pub script_pubkey: ByteString,
}

impl TransactionOutput {
    /// Empty outputs mark the first output of a coinstake
    pub fn is_empty(&self) -> bool {
        self.value == 0 && self.script_pubkey.is_empty()
    }
}

/// Transaction: 𝒯𝒳 = ℕ × ℐ* × 𝒯* × ℕ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn is_coin_base(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].prevout.is_null()
    }

    /// IsCoinStake: 𝒯𝒳 → {true, false}
    ///
    /// A coinstake spends at least one real outpoint, has at least two
    /// outputs and marks itself with an empty first output.
    pub fn is_coin_stake(&self) -> bool {
        !self.inputs.is_empty()
            && !self.inputs[0].prevout.is_null()
            && self.outputs.len() >= 2
            && self.outputs[0].is_empty()
    }

    /// Double SHA-256 over the canonical serialization
    pub fn txid(&self) -> Hash {
        let mut writer = HashWriter::new();
        writer.write_i32(self.version);
        writer.write_compact_size(self.inputs.len() as u64);
        for input in &self.inputs {
            writer.write_hash(&input.prevout.hash);
            writer.write_u32(input.prevout.index);
            writer.write_var_bytes(&input.script_sig);
            writer.write_u32(input.sequence);
        }
        writer.write_compact_size(self.outputs.len() as u64);
        for output in &self.outputs {
            writer.write_i64(output.value);
            writer.write_var_bytes(&output.script_pubkey);
        }
        writer.write_u32(self.lock_time);
        writer.finalize()
    }
}

/// Coin: 𝒞 = 𝒯 × ℕ × ℕ × {spent, unspent}
///
/// Read-only view of an unspent output as held by the UTXO set. `time` is
/// the origin time of the transaction that created the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub output: TransactionOutput,
    pub height: u32,
    pub time: u32,
    pub spent: bool,
}

impl Coin {
    pub fn new(output: TransactionOutput, height: u32, time: u32) -> Self {
        Coin { output, height, time, spent: false }
    }

    pub fn amount(&self) -> Amount {
        self.output.value
    }

    pub fn is_spent(&self) -> bool {
        self.spent
    }
}

/// UTXO Set: 𝒰𝒮 = 𝒪 → 𝒞
pub type UtxoSet = HashMap<OutPoint, Coin>;

/// Location of a block's transaction data on disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiskTxPos {
    pub file: i32,
    pub pos: u32,
}

impl DiskTxPos {
    pub fn new(file: i32, pos: u32) -> Self {
        DiskTxPos { file, pos }
    }
}

/// Receives misbehavior penalties for peer-supplied data
pub trait MisbehaviorSink {
    fn misbehaving(&mut self, score: u32, reason: &str);
}

/// Validation outcome for peer-facing checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid { misbehavior: u32, reason: String },
}

impl ValidationOutcome {
    pub fn invalid(misbehavior: u32, reason: impl Into<String>) -> Self {
        ValidationOutcome::Invalid { misbehavior, reason: reason.into() }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn misbehavior(&self) -> u32 {
        match self {
            ValidationOutcome::Valid => 0,
            ValidationOutcome::Invalid { misbehavior, .. } => *misbehavior,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid { reason, .. } => Some(reason),
        }
    }

    /// Forward an invalid outcome to the banning subsystem
    pub fn report(&self, sink: &mut dyn MisbehaviorSink) {
        if let ValidationOutcome::Invalid { misbehavior, reason } = self {
            sink.misbehaving(*misbehavior, reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coinstake() -> Transaction {
        Transaction {
            version: 1,
            inputs: vec![TransactionInput {
                prevout: OutPoint::new([1; 32], 0),
                script_sig: vec![0x51],
                sequence: 0xffffffff,
            }],
            outputs: vec![
                TransactionOutput { value: 0, script_pubkey: vec![] },
                TransactionOutput { value: 1000, script_pubkey: vec![0x51] },
            ],
            lock_time: 0,
        }
    }

    #[test]
    fn test_is_coin_stake() {
        assert!(coinstake().is_coin_stake());
    }

    #[test]
    fn test_is_coin_stake_requires_empty_first_output() {
        let mut tx = coinstake();
        tx.outputs[0].value = 1;
        assert!(!tx.is_coin_stake());
    }

    #[test]
    fn test_is_coin_stake_requires_two_outputs() {
        let mut tx = coinstake();
        tx.outputs.truncate(1);
        assert!(!tx.is_coin_stake());
    }

    #[test]
    fn test_coinbase_is_not_coin_stake() {
        let mut tx = coinstake();
        tx.inputs[0].prevout = OutPoint::null();
        assert!(tx.is_coin_base());
        assert!(!tx.is_coin_stake());
    }

    #[test]
    fn test_txid_changes_with_content() {
        let tx = coinstake();
        let mut other = coinstake();
        other.lock_time = 1;
        assert_eq!(tx.txid(), coinstake().txid());
        assert_ne!(tx.txid(), other.txid());
    }

    #[test]
    fn test_outcome_report() {
        struct Recorder(Vec<(u32, String)>);
        impl MisbehaviorSink for Recorder {
            fn misbehaving(&mut self, score: u32, reason: &str) {
                self.0.push((score, reason.to_string()));
            }
        }

        let mut sink = Recorder(Vec::new());
        ValidationOutcome::Valid.report(&mut sink);
        assert!(sink.0.is_empty());

        ValidationOutcome::invalid(100, "bad stake").report(&mut sink);
        assert_eq!(sink.0, vec![(100, "bad stake".to_string())]);
    }
}
