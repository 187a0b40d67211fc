//! Read access to the UTXO set

use crate::types::{Coin, OutPoint, UtxoSet};

/// Snapshot of unspent outputs a validation call reads from
pub trait CoinsView {
    /// The unspent coin at `outpoint`, if any
    fn get_coin(&self, outpoint: &OutPoint) -> Option<Coin>;
}

impl CoinsView for UtxoSet {
    fn get_coin(&self, outpoint: &OutPoint) -> Option<Coin> {
        self.get(outpoint).filter(|coin| !coin.is_spent()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionOutput;

    #[test]
    fn test_spent_coins_are_hidden() {
        let mut utxo_set = UtxoSet::new();
        let live = OutPoint::new([1; 32], 0);
        let spent = OutPoint::new([2; 32], 0);
        let output = TransactionOutput { value: 10, script_pubkey: vec![0x51] };
        utxo_set.insert(live, Coin::new(output.clone(), 1, 100));
        utxo_set.insert(spent, Coin { spent: true, ..Coin::new(output, 1, 100) });

        assert_eq!(utxo_set.get_coin(&live).map(|c| c.amount()), Some(10));
        assert!(utxo_set.get_coin(&spent).is_none());
        assert!(utxo_set.get_coin(&OutPoint::new([3; 32], 0)).is_none());
    }
}
