//! Prize catalog types and the active pool projection.

use crate::constants::POOL_CAPACITY;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common = 0,
    Rare = 1,
    Legendary = 2,
}

impl Rarity {
    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
        }
    }

    pub fn all() -> [Rarity; 3] {
        [Rarity::Common, Rarity::Rare, Rarity::Legendary]
    }
}

/// One entry of the prize catalog. Immutable for the duration of a draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prize {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    /// Relative draw weight. Zero (or absent in serialized form) counts as 1.
    #[serde(default)]
    pub weight: f64,
    pub description: String,
    #[serde(default)]
    pub image_ref: String,
}

impl Prize {
    /// Weight used by the selector. Zero defaults to 1 so no configured prize
    /// silently drops out of the pool.
    pub fn effective_weight(&self) -> f64 {
        if self.weight == 0.0 {
            1.0
        } else {
            self.weight
        }
    }

    pub fn is_legendary(&self) -> bool {
        self.rarity == Rarity::Legendary
    }
}

/// The active, ordered projection of the catalog used for selection and the
/// 3x3 slot display. Truncates to capacity, never reorders.
#[derive(Debug, Clone)]
pub struct PrizePool {
    slots: Vec<Prize>,
}

impl PrizePool {
    pub fn from_catalog(catalog: &[Prize]) -> Self {
        Self {
            slots: catalog.iter().take(POOL_CAPACITY).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, index: usize) -> Option<&Prize> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[Prize] {
        &self.slots
    }

    /// Slot indices whose prize satisfies the predicate, in pool order.
    pub fn indices_where(&self, pred: impl Fn(&Prize) -> bool) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, p)| pred(p))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Built-in catalog used when no machine file exists yet.
pub fn default_catalog() -> Vec<Prize> {
    fn prize(
        id: &str,
        name: &str,
        rarity: Rarity,
        weight: f64,
        description: &str,
        seed: &str,
    ) -> Prize {
        Prize {
            id: id.to_string(),
            name: name.to_string(),
            rarity,
            weight,
            description: description.to_string(),
            image_ref: format!("https://picsum.photos/seed/{}/300/300", seed),
        }
    }

    vec![
        prize(
            "p1",
            "Limited Sneakers",
            Rarity::Legendary,
            2.0,
            "The resale market has gone mad",
            "kicks",
        ),
        prize(
            "p2",
            "Fizzy Cola",
            Rarity::Common,
            50.0,
            "Fuel for the couch potato",
            "drink",
        ),
        prize(
            "p3",
            "Mechanical Keyboard",
            Rarity::Rare,
            15.0,
            "Clack clack, instant stress relief",
            "kb",
        ),
        prize(
            "p4",
            "Slacker Stickers",
            Rarity::Common,
            40.0,
            "Look busy without doing anything",
            "sticker",
        ),
        prize(
            "p5",
            "Mystery Pouch",
            Rarity::Legendary,
            5.0,
            "Maybe air, maybe gold",
            "bag",
        ),
        prize(
            "p6",
            "Bucket Hat",
            Rarity::Common,
            30.0,
            "Sun-proof and flattering",
            "hat",
        ),
        prize(
            "p7",
            "Designer Figurine",
            Rarity::Rare,
            20.0,
            "Desk morale goes up just looking at it",
            "toy",
        ),
        prize(
            "p8",
            "Thanks For Playing",
            Rarity::Common,
            60.0,
            "Air is precious too",
            "air",
        ),
        prize(
            "p9",
            "Gold Chain",
            Rarity::Legendary,
            1.0,
            "A true statement piece",
            "gold",
        ),
    ]
}
