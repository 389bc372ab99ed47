use super::catalog::{Amount, Coin, Item};
use crate::error::{Result, VendingError};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
struct CoinStock {
    coin: Coin,
    count: u32,
}

/// Authoritative item stock and cash box of a machine.
///
/// Every operation either applies completely or leaves the ledger untouched.
/// Counts are unsigned, so they can never go negative.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StockLedger {
    items: BTreeMap<String, u32>,
    /// Ordered from the highest face value to the lowest.
    coins: Vec<CoinStock>,
}

impl StockLedger {
    pub fn new(
        items: impl IntoIterator<Item = (Item, u32)>,
        coins: impl IntoIterator<Item = (Coin, u32)>,
    ) -> Result<Self> {
        let mut ledger = Self::default();
        for (item, count) in items {
            ledger.add_items(&item, count)?;
        }
        for (coin, count) in coins {
            ledger.add_coins(&coin, count)?;
        }
        Ok(ledger)
    }

    pub fn has_item(&self, item: &Item) -> bool {
        self.item_count(item) > 0
    }

    pub fn item_count(&self, item: &Item) -> u32 {
        self.items.get(&item.id).copied().unwrap_or(0)
    }

    /// Removes one unit of `item` from stock.
    pub fn deduct_item(&mut self, item: &Item) -> Result<()> {
        match self.items.get_mut(&item.id) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(())
            }
            _ => Err(VendingError::OutOfStock(item.id.clone())),
        }
    }

    pub fn add_item(&mut self, item: &Item) -> Result<()> {
        self.add_items(item, 1)
    }

    /// Fails without touching the stock when the count would overflow.
    pub fn add_items(&mut self, item: &Item, count: u32) -> Result<()> {
        let stock = self.item_count(item);
        let total = stock
            .checked_add(count)
            .ok_or_else(|| VendingError::Overflow(item.id.clone()))?;
        self.items.insert(item.id.clone(), total);
        Ok(())
    }

    pub fn coin_count(&self, coin: &Coin) -> u32 {
        self.coins
            .iter()
            .find(|stock| stock.coin == *coin)
            .map_or(0, |stock| stock.count)
    }

    /// Total face value of every coin in the cash box, saturating at
    /// `u64::MAX`.
    pub fn cash_value(&self) -> Amount {
        self.coins
            .iter()
            .map(|stock| stock.coin.value.times(stock.count))
            .sum()
    }

    /// Whether the cash box holds at least `amount` in total.
    ///
    /// This does not guarantee that [`StockLedger::make_change`] can pay
    /// `amount` out exactly.
    pub fn has_change(&self, amount: Amount) -> bool {
        self.cash_value() >= amount
    }

    /// Pays `amount` out of the cash box, largest denomination first.
    ///
    /// The selection is greedy and never backtracks: with only quarters and
    /// dimes, 30 cannot be paid even though a dime triple would do. On failure
    /// no coin leaves the cash box.
    pub fn make_change(&mut self, amount: Amount) -> Result<Vec<Coin>> {
        let mut remaining = amount.value();
        let mut taken = vec![0u32; self.coins.len()];

        for (slot, stock) in taken.iter_mut().zip(&self.coins) {
            if remaining == 0 {
                break;
            }
            let face = stock.coin.value.value();
            if face == 0 {
                continue;
            }
            let take = u32::try_from(remaining / face)
                .map_or(stock.count, |fit| fit.min(stock.count));
            *slot = take;
            remaining -= face * u64::from(take);
        }

        if remaining != 0 {
            return Err(VendingError::InsufficientChange(amount));
        }

        let mut change = Vec::new();
        for (stock, take) in self.coins.iter_mut().zip(taken) {
            stock.count -= take;
            change.extend(std::iter::repeat_n(stock.coin.clone(), take as usize));
        }
        Ok(change)
    }

    /// Puts coins into the cash box. Either every coin goes in or none does.
    pub fn add_change(&mut self, coins: &[Coin]) -> Result<()> {
        let mut staged = self.coins.clone();
        for coin in coins {
            Self::stock_coins(&mut staged, coin, 1)?;
        }
        self.coins = staged;
        Ok(())
    }

    /// Fails without touching the cash box when the count would overflow.
    pub fn add_coins(&mut self, coin: &Coin, count: u32) -> Result<()> {
        Self::stock_coins(&mut self.coins, coin, count)
    }

    fn stock_coins(coins: &mut Vec<CoinStock>, coin: &Coin, count: u32) -> Result<()> {
        if let Some(stock) = coins.iter_mut().find(|stock| stock.coin == *coin) {
            stock.count = stock
                .count
                .checked_add(count)
                .ok_or_else(|| VendingError::Overflow(coin.id.clone()))?;
            return Ok(());
        }
        let position = coins
            .iter()
            .position(|stock| stock.coin.value < coin.value)
            .unwrap_or(coins.len());
        coins.insert(
            position,
            CoinStock {
                coin: coin.clone(),
                count,
            },
        );
        Ok(())
    }

    /// Item stock as `(id, count)` pairs ordered by id.
    pub fn items(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(id, count)| (id.as_str(), *count))
    }

    /// Cash box contents ordered from the highest face value to the lowest.
    pub fn coins(&self) -> impl Iterator<Item = (&Coin, u32)> {
        self.coins.iter().map(|stock| (&stock.coin, stock.count))
    }
}
