//! Proof-of-stake consensus constants

/// Base units per coin
pub const COIN: i64 = 100_000_000;

/// Misbehavior score for stake claims no honest, synced peer can produce
pub const DOS_SEVERE: u32 = 100;

/// Misbehavior score for kernel misses, which also happen during sync races
pub const DOS_MINOR: u32 = 1;

/// Coinstake timestamps must clear these low bits (16 second granularity)
pub const STAKE_TIMESTAMP_MASK: u32 = 0xf;

/// Confirmations a coin needs before it may stake on mainnet
pub const MAINNET_STAKE_MIN_CONFIRMATIONS: u32 = 500;

/// Confirmations a coin needs before it may stake on test networks
pub const TESTNET_STAKE_MIN_CONFIRMATIONS: u32 = 10;

/// Mainnet block time after which protocol v2 timestamp rules apply
pub const MAINNET_PROTOCOL_V2_TIME: u32 = 1_407_053_625;

/// Testnet block time after which protocol v2 timestamp rules apply
pub const TESTNET_PROTOCOL_V2_TIME: u32 = 1_405_343_600;

/// Proof-of-stake limit in compact form
pub const POS_LIMIT_BITS: u32 = 0x1e00ffff;
