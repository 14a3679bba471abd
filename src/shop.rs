//! The buff shop.
//!
//! Purchases happen strictly outside the draw path: the guaranteed-rare buff
//! sets a one-shot flag the next draw consumes, and the pity booster is a
//! configuration-time side effect applied directly to the counter.

use crate::constants::PITY_BOOST_AMOUNT;
use crate::session::SessionState;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopEffect {
    /// Next draw is guaranteed rarity >= rare.
    GuaranteedRare,
    /// Pity counter advances by [`PITY_BOOST_AMOUNT`] immediately.
    PityBoost,
    /// No gameplay effect.
    Cosmetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u64,
    pub description: &'static str,
    pub effect: ShopEffect,
}

pub const SHOP_ITEMS: [ShopItem; 3] = [
    ShopItem {
        id: "buff_rare",
        name: "Lucky Charm",
        price: 200,
        description: "Your next draw is guaranteed Rare or better",
        effect: ShopEffect::GuaranteedRare,
    },
    ShopItem {
        id: "buff_pity",
        name: "Pity Whetstone",
        price: 500,
        description: "Advances the pity counter by 5",
        effect: ShopEffect::PityBoost,
    },
    ShopItem {
        id: "cosmetic_tip",
        name: "Tip Jar",
        price: 9999,
        description: "Pure moral support (no effect)",
        effect: ShopEffect::Cosmetic,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseError {
    InsufficientCoins,
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseError::InsufficientCoins => write!(f, "not enough coins"),
        }
    }
}

impl Error for PurchaseError {}

/// Validates the balance, debits it and applies the item's effect.
pub fn buy(item: &ShopItem, session: &mut SessionState) -> Result<(), PurchaseError> {
    if session.coins < item.price {
        return Err(PurchaseError::InsufficientCoins);
    }
    session.coins -= item.price;

    match item.effect {
        ShopEffect::GuaranteedRare => session.buffs.guaranteed_rare = true,
        ShopEffect::PityBoost => session.pity_counter += PITY_BOOST_AMOUNT,
        ShopEffect::Cosmetic => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_guaranteed_rare() {
        let mut session = SessionState::new();
        let coins_before = session.coins;

        buy(&SHOP_ITEMS[0], &mut session).unwrap();
        assert!(session.buffs.guaranteed_rare);
        assert_eq!(session.coins, coins_before - 200);
    }

    #[test]
    fn test_buy_pity_boost_advances_counter() {
        let mut session = SessionState::new();
        session.pity_counter = 7;

        buy(&SHOP_ITEMS[1], &mut session).unwrap();
        assert_eq!(session.pity_counter, 12);
        assert!(!session.buffs.guaranteed_rare);
    }

    #[test]
    fn test_insufficient_coins_rejected_without_debit() {
        let mut session = SessionState::new();
        session.coins = 100;

        let err = buy(&SHOP_ITEMS[0], &mut session).unwrap_err();
        assert_eq!(err, PurchaseError::InsufficientCoins);
        assert_eq!(session.coins, 100);
        assert!(!session.buffs.guaranteed_rare);
    }

    #[test]
    fn test_cosmetic_only_debits() {
        let mut session = SessionState::new();
        session.coins = 10_000;

        buy(&SHOP_ITEMS[2], &mut session).unwrap();
        assert_eq!(session.coins, 1);
        assert!(!session.buffs.guaranteed_rare);
        assert_eq!(session.pity_counter, 0);
    }
}
