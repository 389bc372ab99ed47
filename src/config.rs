//! Machine configuration: the item catalog, coin denominations and their
//! initial stock, plus the policy applied when change cannot be paid out.

use crate::domain::catalog::{Amount, Catalog, Coin, Item};
use crate::domain::ledger::StockLedger;
use crate::error::{Result, VendingError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Largest accepted price or face value. With counts capped at `u32::MAX`,
/// the value of a full denomination still fits in a `u64`.
pub const MAX_DENOMINATION: Amount = Amount::new(u32::MAX as u64);

/// What happens to an open transaction whose balance cannot be paid back.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChangePolicy {
    /// Abort to idle and keep the balance in the cash box.
    #[default]
    Forfeit,
    /// Keep the transaction open in `Processing` until a refund succeeds or
    /// an operator resets the machine.
    Hold,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ItemConfig {
    pub id: String,
    pub price: Amount,
    #[serde(default)]
    pub stock: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CoinConfig {
    pub id: String,
    pub value: Amount,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct MachineConfig {
    pub items: Vec<ItemConfig>,
    pub coins: Vec<CoinConfig>,
    #[serde(default)]
    pub change_policy: ChangePolicy,
}

impl Default for MachineConfig {
    /// Three drinks and the four US coins, five of each.
    fn default() -> Self {
        let item = |id: &str, price| ItemConfig {
            id: id.to_string(),
            price: Amount::new(price),
            stock: 5,
        };
        let coin = |id: &str, value| CoinConfig {
            id: id.to_string(),
            value: Amount::new(value),
            count: 5,
        };
        Self {
            items: vec![item("coke", 25), item("pepsi", 35), item("soda", 45)],
            coins: vec![
                coin("penny", 1),
                coin("nickel", 5),
                coin("dime", 10),
                coin("quarter", 25),
            ],
            change_policy: ChangePolicy::Forfeit,
        }
    }
}

impl MachineConfig {
    /// Reads and validates a JSON configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        let config: Self = serde_json::from_reader(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(config_error("at least one item is required"));
        }
        if self.coins.is_empty() {
            return Err(config_error("at least one coin denomination is required"));
        }

        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                return Err(config_error(format!("duplicate item '{}'", item.id)));
            }
            if item.price.is_zero() {
                return Err(config_error(format!("item '{}' must have a price", item.id)));
            }
            if item.price > MAX_DENOMINATION {
                return Err(config_error(format!(
                    "item '{}' price exceeds {}",
                    item.id, MAX_DENOMINATION
                )));
            }
        }

        let mut seen = HashSet::new();
        for coin in &self.coins {
            if !seen.insert(coin.id.as_str()) {
                return Err(config_error(format!("duplicate coin '{}'", coin.id)));
            }
            if coin.value.is_zero() {
                return Err(config_error(format!(
                    "coin '{}' must have a face value",
                    coin.id
                )));
            }
            if coin.value > MAX_DENOMINATION {
                return Err(config_error(format!(
                    "coin '{}' face value exceeds {}",
                    coin.id, MAX_DENOMINATION
                )));
            }
        }
        Ok(())
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(
            self.items
                .iter()
                .map(|item| Item::new(item.id.clone(), item.price))
                .collect(),
            self.coins
                .iter()
                .map(|coin| Coin::new(coin.id.clone(), coin.value))
                .collect(),
        )
    }

    /// Initial stock and cash box.
    pub fn ledger(&self) -> Result<StockLedger> {
        StockLedger::new(
            self.items
                .iter()
                .map(|item| (Item::new(item.id.clone(), item.price), item.stock)),
            self.coins
                .iter()
                .map(|coin| (Coin::new(coin.id.clone(), coin.value), coin.count)),
        )
    }
}

fn config_error(message: impl Into<String>) -> VendingError {
    VendingError::ConfigError(message.into())
}
