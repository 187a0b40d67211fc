//! Proof-of-stake validation of coinstake transactions

use thiserror::Error;

use crate::chain::BlockRef;
use crate::coins::CoinsView;
use crate::config::ConsensusParams;
use crate::confirmation::{is_stake_mature, stake_confirmations};
use crate::constants::{DOS_MINOR, DOS_SEVERE};
use crate::error::{ConsensusError, Result};
use crate::hash::hash_to_hex;
use crate::kernel::check_stake_kernel_hash;
use crate::stake_cache::{resolve_stake_entry, StakeCache};
use crate::types::{Amount, ByteString, OutPoint, Transaction, ValidationOutcome};

/// Failure detail reported by a script verifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ScriptError(pub String);

/// Verifies an input's unlocking script against the output it spends
///
/// Script interpretation lives outside this crate; validation only needs
/// the verdict.
pub trait ScriptVerifier {
    fn verify(
        &self,
        script_sig: &ByteString,
        script_pubkey: &ByteString,
        tx: &Transaction,
        input_index: usize,
        amount: Amount,
    ) -> std::result::Result<(), ScriptError>;
}

/// CheckProofOfStake: ℬ × 𝒯𝒳 × ℕ₃₂ × ℕ × 𝒰𝒮 → {valid, invalid}
///
/// For coinstake tx with kernel input k = tx.inputs[0]:
/// 1. Let coin = us(k.prevout); if absent or spent: invalid (severe)
/// 2. If prev.height + 1 − coin.height < stakeMinConfirmations: invalid (severe)
/// 3. If VerifyScript(k.scriptSig, coin.scriptPubKey) fails: invalid (severe)
/// 4. If CheckStakeKernelHash(prev, bits, coin.time, coin.amount, k.prevout, blockTime)
///    fails: invalid (minor, kernel misses also happen while syncing)
/// 5. Return valid
///
/// Calling this on a transaction that is not a coinstake is a caller bug
/// and returns `Err(ConsensusError::NotCoinStake)`.
pub fn check_proof_of_stake(
    prev: BlockRef<'_>,
    tx: &Transaction,
    bits: u32,
    block_time: u32,
    view: &dyn CoinsView,
    verifier: &dyn ScriptVerifier,
    params: &ConsensusParams,
) -> Result<ValidationOutcome> {
    if !tx.is_coin_stake() {
        return Err(ConsensusError::NotCoinStake(hash_to_hex(&tx.txid())));
    }

    let kernel = &tx.inputs[0];

    let Some(coin) = view.get_coin(&kernel.prevout).filter(|coin| !coin.is_spent()) else {
        let reason = format!("stake prevout does not exist {}", hash_to_hex(&kernel.prevout.hash));
        tracing::warn!(%reason, "check_proof_of_stake rejected");
        return Ok(ValidationOutcome::invalid(DOS_SEVERE, reason));
    };

    if !is_stake_mature(prev, coin.height, params) {
        let reason = format!(
            "stake prevout is not mature, expecting {} and only matured to {}",
            params.stake_min_confirmations,
            stake_confirmations(prev, coin.height)
        );
        tracing::warn!(%reason, "check_proof_of_stake rejected");
        return Ok(ValidationOutcome::invalid(DOS_SEVERE, reason));
    }

    if let Err(err) = verifier.verify(&kernel.script_sig, &coin.output.script_pubkey, tx, 0, coin.amount()) {
        let reason = format!("verify script failed on coinstake {}: {}", hash_to_hex(&tx.txid()), err);
        tracing::warn!(%reason, "check_proof_of_stake rejected");
        return Ok(ValidationOutcome::invalid(DOS_SEVERE, reason));
    }

    if !check_stake_kernel_hash(prev, bits, coin.time, coin.amount(), &kernel.prevout, block_time) {
        let reason = format!("check stake kernel hash failed on coinstake {}", hash_to_hex(&tx.txid()));
        tracing::debug!(%reason, "check_proof_of_stake rejected");
        return Ok(ValidationOutcome::invalid(DOS_MINOR, reason));
    }

    Ok(ValidationOutcome::Valid)
}

/// CheckKernel: ℬ × ℕ₃₂ × ℕ × 𝒪 × 𝒰𝒮 × 𝒮𝒞? → {true, false}
///
/// Staking-side kernel check for one candidate output:
/// - cached outpoint: use the cached (blockFromTime, amount)
/// - otherwise: resolve the coin from `view`, require maturity, an origin
///   block on this chain and an unspent coin, then use the origin block's
///   time and the coin's amount
///
/// Both paths feed the same `check_stake_kernel_hash`. No misbehavior is
/// scored here.
pub fn check_kernel(
    prev: BlockRef<'_>,
    bits: u32,
    time: u32,
    outpoint: &OutPoint,
    view: &dyn CoinsView,
    cache: Option<&StakeCache>,
    params: &ConsensusParams,
) -> bool {
    let entry = match cache.and_then(|cache| cache.lookup(outpoint)) {
        Some(entry) => entry,
        None => match resolve_stake_entry(prev, outpoint, view, params) {
            Some(entry) => entry,
            None => return false,
        },
    };

    check_stake_kernel_hash(prev, bits, entry.block_from_time, entry.amount, outpoint, time)
}
