//! # Stake-Proof
//!
//! Proof-of-stake consensus validation for coinstake transactions.
//!
//! This crate decides whether a coinstake is a valid stake claim for the
//! next block: a hash lottery weighted by the staked amount, salted with a
//! chained stake modifier, plus the maturity and timestamp rules around it.
//!
//! ## Architecture
//!
//! - Target codec (`target`): compact difficulty encoding and 256-bit targets
//! - Stake hashing (`hash`, `modifier`, `kernel`): modifier chaining and the kernel hash
//! - Chain access (`chain`, `coins`): block index arena and UTXO view
//! - Validation (`timestamp`, `confirmation`, `stake_cache`, `pos`)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: validation reads a caller-supplied snapshot and never mutates it
//! 2. **Explicit Parameters**: consensus parameters travel with every call
//! 3. **Exact Version Pinning**: all consensus-critical dependencies pinned to exact versions
//! 4. **Rejections Are Values**: consensus failures are outcomes, not errors
//!
//! ## Usage
//!
//! ```rust
//! use stake_proof::StakeProof;
//! use stake_proof::chain::{ChainIndex, NewBlock};
//! use stake_proof::types::*;
//!
//! let proof = StakeProof::regtest();
//! let mut chain = ChainIndex::new();
//! let genesis = chain.connect_block(None, NewBlock {
//!     time: 1_600_000_000,
//!     bits: 0x1e00ffff,
//!     tx_pos: DiskTxPos::new(0, 0),
//!     hash_proof_of_stake: [0; 32],
//! }).unwrap();
//!
//! let prev = chain.block(genesis).unwrap();
//! assert_eq!(*prev.stake_modifier(), [0u8; 32]);
//! assert!(proof.is_valid_block_header_timestamp(1_600_000_016));
//! ```

pub mod types;
pub mod constants;
pub mod config;
pub mod error;
pub mod hash;
pub mod target;
pub mod chain;
pub mod coins;
pub mod modifier;
pub mod timestamp;
pub mod kernel;
pub mod confirmation;
pub mod stake_cache;
pub mod pos;

// Re-export commonly used types
pub use types::*;
pub use constants::*;
pub use config::{ConsensusParams, Network};
pub use error::{ConsensusError, Result};

use chain::BlockRef;
use coins::CoinsView;
use pos::ScriptVerifier;
use stake_cache::StakeCache;

/// Proof-of-stake validator bound to one set of consensus parameters
///
/// # Examples
///
/// ```
/// use stake_proof::{ConsensusParams, StakeProof};
///
/// let proof = StakeProof::new(ConsensusParams::mainnet());
/// assert_eq!(proof.params().stake_min_confirmations, 500);
/// ```
#[derive(Debug, Clone)]
pub struct StakeProof {
    params: ConsensusParams,
}

impl StakeProof {
    pub fn new(params: ConsensusParams) -> Self {
        StakeProof { params }
    }

    pub fn for_network(network: Network) -> Self {
        Self::new(ConsensusParams::for_network(network))
    }

    pub fn regtest() -> Self {
        Self::new(ConsensusParams::regtest())
    }

    pub fn params(&self) -> &ConsensusParams {
        &self.params
    }

    /// Validate the coinstake of a block built on `prev`
    ///
    /// # Examples
    ///
    /// ```
    /// use stake_proof::{StakeProof, COIN, DOS_SEVERE};
    /// use stake_proof::chain::{ChainIndex, NewBlock};
    /// use stake_proof::pos::{ScriptError, ScriptVerifier};
    /// use stake_proof::types::*;
    ///
    /// struct AcceptAll;
    /// impl ScriptVerifier for AcceptAll {
    ///     fn verify(&self, _: &ByteString, _: &ByteString, _: &Transaction, _: usize, _: Amount)
    ///         -> Result<(), ScriptError> { Ok(()) }
    /// }
    ///
    /// let proof = StakeProof::regtest();
    /// let mut chain = ChainIndex::new();
    /// let genesis = chain.connect_block(None, NewBlock {
    ///     time: 1_600_000_000,
    ///     bits: 0x1e00ffff,
    ///     tx_pos: DiskTxPos::new(0, 0),
    ///     hash_proof_of_stake: [0; 32],
    /// }).unwrap();
    ///
    /// let tx = Transaction {
    ///     version: 1,
    ///     inputs: vec![TransactionInput {
    ///         prevout: OutPoint::new([1; 32], 0),
    ///         script_sig: vec![],
    ///         sequence: 0xffffffff,
    ///     }],
    ///     outputs: vec![
    ///         TransactionOutput { value: 0, script_pubkey: vec![] },
    ///         TransactionOutput { value: 10 * COIN, script_pubkey: vec![0x51] },
    ///     ],
    ///     lock_time: 0,
    /// };
    ///
    /// // The kernel's coin is not in the UTXO set
    /// let outcome = proof
    ///     .check_proof_of_stake(chain.block(genesis).unwrap(), &tx, 0x1e00ffff, 1_600_000_016, &UtxoSet::new(), &AcceptAll)
    ///     .unwrap();
    /// assert_eq!(outcome.misbehavior(), DOS_SEVERE);
    /// ```
    pub fn check_proof_of_stake(
        &self,
        prev: BlockRef<'_>,
        tx: &Transaction,
        bits: u32,
        block_time: u32,
        view: &dyn CoinsView,
        verifier: &dyn ScriptVerifier,
    ) -> Result<ValidationOutcome> {
        pos::check_proof_of_stake(prev, tx, bits, block_time, view, verifier, &self.params)
    }

    /// Check one candidate output for a winning kernel, optionally through a session cache
    pub fn check_kernel(
        &self,
        prev: BlockRef<'_>,
        bits: u32,
        time: u32,
        outpoint: &OutPoint,
        view: &dyn CoinsView,
        cache: Option<&StakeCache>,
    ) -> bool {
        pos::check_kernel(prev, bits, time, outpoint, view, cache, &self.params)
    }

    /// Precompute kernel inputs for `outpoint` into a session cache
    pub fn cache_kernel(&self, cache: &mut StakeCache, outpoint: &OutPoint, prev: BlockRef<'_>, view: &dyn CoinsView) {
        stake_cache::cache_kernel(cache, outpoint, prev, view, &self.params)
    }

    pub fn check_stake_kernel_hash(
        &self,
        prev: BlockRef<'_>,
        bits: u32,
        block_from_time: u32,
        amount: Amount,
        prevout: &OutPoint,
        time: u32,
    ) -> bool {
        kernel::check_stake_kernel_hash(prev, bits, block_from_time, amount, prevout, time)
    }

    pub fn compute_stake_modifier(&self, prev: Option<BlockRef<'_>>, kernel: &Hash) -> Hash {
        modifier::compute_stake_modifier(prev, kernel)
    }

    /// # Examples
    ///
    /// ```
    /// use stake_proof::StakeProof;
    ///
    /// let proof = StakeProof::regtest();
    /// assert!(proof.is_valid_coinstake_timestamp(1_600_000_000, 1_600_000_000));
    /// assert!(!proof.is_valid_coinstake_timestamp(1_600_000_001, 1_600_000_001));
    /// ```
    pub fn is_valid_coinstake_timestamp(&self, block_time: i64, tx_time: i64) -> bool {
        timestamp::is_valid_coinstake_timestamp(block_time, tx_time, &self.params)
    }

    pub fn is_valid_block_header_timestamp(&self, block_time: i64) -> bool {
        timestamp::is_valid_block_header_timestamp(block_time, &self.params)
    }

    pub fn is_confirmed_in_prev_blocks(&self, tx_pos: &DiskTxPos, from: BlockRef<'_>, max_depth: u32) -> Option<u32> {
        confirmation::is_confirmed_in_prev_blocks(tx_pos, from, max_depth)
    }
}

impl Default for StakeProof {
    fn default() -> Self {
        Self::new(ConsensusParams::default())
    }
}
