//! Stake hashing over serialized fields
//!
//! Fields are serialized the way they travel on the wire: 256-bit hashes as
//! their raw 32 bytes, integers little-endian. The digest is double SHA-256.

use bitcoin_hashes::{sha256, sha256d, Hash as BitcoinHash, HashEngine};

use crate::types::Hash;

/// Accumulates serialized fields and produces their double SHA-256
pub struct HashWriter {
    engine: sha256::HashEngine,
}

impl HashWriter {
    pub fn new() -> Self {
        HashWriter { engine: sha256d::Hash::engine() }
    }

    pub fn write_hash(&mut self, hash: &Hash) -> &mut Self {
        self.engine.input(hash);
        self
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.engine.input(&value.to_le_bytes());
        self
    }

    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        self.engine.input(&value.to_le_bytes());
        self
    }

    pub fn write_i64(&mut self, value: i64) -> &mut Self {
        self.engine.input(&value.to_le_bytes());
        self
    }

    /// CompactSize length prefix
    pub fn write_compact_size(&mut self, size: u64) -> &mut Self {
        if size < 0xfd {
            self.engine.input(&[size as u8]);
        } else if size <= 0xffff {
            self.engine.input(&[0xfd]);
            self.engine.input(&(size as u16).to_le_bytes());
        } else if size <= 0xffff_ffff {
            self.engine.input(&[0xfe]);
            self.engine.input(&(size as u32).to_le_bytes());
        } else {
            self.engine.input(&[0xff]);
            self.engine.input(&size.to_le_bytes());
        }
        self
    }

    /// Length-prefixed byte string
    pub fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_compact_size(bytes.len() as u64);
        self.engine.input(bytes);
        self
    }

    pub fn finalize(self) -> Hash {
        sha256d::Hash::from_engine(self.engine).into_inner()
    }
}

impl Default for HashWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Hex in display order (most significant byte first)
pub fn hash_to_hex(hash: &Hash) -> String {
    let mut reversed = *hash;
    reversed.reverse();
    hex::encode(reversed)
}
