use crate::error::{Result, VendingError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A monetary value in minor currency units (cents).
///
/// Amounts are unsigned, so a negative balance or count cannot be represented.
/// Subtraction is only exposed through [`Amount::checked_sub`]. `+`, `*` via
/// [`Amount::times`] and `sum` saturate at `u64::MAX`; use
/// [`Amount::checked_add`] where the exact total matters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub const fn new(minor_units: u64) -> Self {
        Self(minor_units)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn times(self, count: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(count)))
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// A product the machine sells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub price: Amount,
}

impl Item {
    pub fn new(id: impl Into<String>, price: Amount) -> Self {
        Self {
            id: id.into(),
            price,
        }
    }
}

/// A coin denomination the machine accepts and pays out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub id: String,
    pub value: Amount,
}

impl Coin {
    pub fn new(id: impl Into<String>, value: Amount) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

/// Sums the face value of a set of coins.
pub fn total_value(coins: &[Coin]) -> Amount {
    coins.iter().map(|coin| coin.value).sum()
}

/// The fixed set of items and coin denominations a machine is configured with.
///
/// Coins are kept ordered from the highest face value to the lowest.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    items: Vec<Item>,
    coins: Vec<Coin>,
}

impl Catalog {
    pub fn new(items: Vec<Item>, mut coins: Vec<Coin>) -> Self {
        coins.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.id.cmp(&b.id)));
        Self { items, coins }
    }

    pub fn item(&self, id: &str) -> Result<&Item> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| VendingError::UnknownItem(id.to_string()))
    }

    pub fn coin(&self, id: &str) -> Result<&Coin> {
        self.coins
            .iter()
            .find(|coin| coin.id == id)
            .ok_or_else(|| VendingError::UnknownCoin(id.to_string()))
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }
}
