use crate::config::{ChangePolicy, MachineConfig};
use crate::domain::catalog::{Amount, Catalog, Coin, Item};
use crate::domain::command::{Command, CommandType};
use crate::domain::ledger::StockLedger;
use crate::domain::state::{MachineState, TransactionContext};
use crate::error::{Result, VendingError};
use tracing::{debug, info, warn};

/// What a successful command handed back to the customer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dispensed {
    pub item: Option<Item>,
    pub coins: Vec<Coin>,
}

/// A single vending machine: its catalog, its stock and the transaction in
/// flight.
///
/// Every customer operation is dispatched on the current [`MachineState`].
/// The machine has no internal locking; callers sharing one across threads
/// must serialize access themselves.
pub struct VendingMachine {
    catalog: Catalog,
    ledger: StockLedger,
    context: TransactionContext,
    policy: ChangePolicy,
}

impl VendingMachine {
    /// Builds an idle machine from a validated configuration.
    pub fn new(config: MachineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_parts(
            config.catalog(),
            config.ledger()?,
            config.change_policy,
        ))
    }

    pub fn with_parts(catalog: Catalog, ledger: StockLedger, policy: ChangePolicy) -> Self {
        Self {
            catalog,
            ledger,
            context: TransactionContext::default(),
            policy,
        }
    }

    pub fn state(&self) -> MachineState {
        self.context.state
    }

    pub fn balance(&self) -> Amount {
        self.context.balance
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.context.selected.as_ref()
    }

    pub fn ledger(&self) -> &StockLedger {
        &self.ledger
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn change_policy(&self) -> ChangePolicy {
        self.policy
    }

    /// Opens a transaction for the item with the given id.
    pub fn select_item(&mut self, item_id: &str) -> Result<()> {
        match self.context.state {
            MachineState::Idle => {
                let item = self.catalog.item(item_id)?.clone();
                if !self.ledger.has_item(&item) {
                    return Err(VendingError::OutOfStock(item.id));
                }
                debug!(item = %item.id, price = %item.price, "item selected");
                self.context.open(item);
                Ok(())
            }
            MachineState::Selecting | MachineState::Processing => {
                Err(VendingError::TransactionInProgress)
            }
        }
    }

    /// Accepts a coin towards the selected item. The coin goes straight into
    /// the cash box. A coin that would overflow the balance or its cash box
    /// slot is rejected and changes nothing.
    pub fn insert_coin(&mut self, coin_id: &str) -> Result<()> {
        match self.context.state {
            MachineState::Selecting => {
                let coin = self.catalog.coin(coin_id)?.clone();
                let balance = self
                    .context
                    .balance
                    .checked_add(coin.value)
                    .ok_or_else(|| VendingError::Overflow(coin.id.clone()))?;
                self.ledger.add_change(std::slice::from_ref(&coin))?;
                self.context.balance = balance;
                debug!(coin = %coin.id, balance = %self.context.balance, "coin inserted");
                Ok(())
            }
            MachineState::Idle => Err(VendingError::NotSelecting),
            MachineState::Processing => Err(VendingError::TransactionInProgress),
        }
    }

    /// Completes the sale: dispenses the selected item and the change owed.
    pub fn collect_item_and_change(&mut self) -> Result<(Item, Vec<Coin>)> {
        match self.context.state {
            MachineState::Selecting => {
                let item = self
                    .context
                    .selected
                    .clone()
                    .ok_or(VendingError::NotSelecting)?;
                let balance = self.context.balance;
                let excess = balance.checked_sub(item.price).ok_or(
                    VendingError::PaymentIncomplete {
                        price: item.price,
                        balance,
                    },
                )?;
                if !self.ledger.has_item(&item) {
                    return Err(VendingError::OutOfStock(item.id));
                }

                let change = match self.ledger.make_change(excess) {
                    Ok(change) => change,
                    Err(err) => return Err(self.change_failed(err)),
                };
                self.ledger.deduct_item(&item)?;
                self.context.clear();
                info!(
                    item = %item.id,
                    paid = %balance,
                    change = %excess,
                    "item dispensed"
                );
                Ok((item, change))
            }
            MachineState::Idle | MachineState::Processing => Err(VendingError::NotSelecting),
        }
    }

    /// Returns the whole open balance. Refunding an idle machine is a no-op.
    pub fn refund(&mut self) -> Result<Vec<Coin>> {
        match self.context.state {
            MachineState::Idle => Ok(Vec::new()),
            MachineState::Selecting | MachineState::Processing => {
                let balance = self.context.balance;
                match self.ledger.make_change(balance) {
                    Ok(coins) => {
                        self.context.clear();
                        info!(refunded = %balance, "balance refunded");
                        Ok(coins)
                    }
                    Err(err) => Err(self.change_failed(err)),
                }
            }
        }
    }

    /// Operator override: drops the open transaction without touching stock.
    /// Any open balance stays in the cash box.
    pub fn reset(&mut self) {
        let forfeited = self.context.clear();
        if !forfeited.is_zero() {
            warn!(forfeited = %forfeited, "machine reset with an open balance");
        }
        debug!("machine reset");
    }

    pub fn restock_item(&mut self, item_id: &str, count: u32) -> Result<()> {
        let item = self.catalog.item(item_id)?.clone();
        self.warn_if_busy("item restock");
        self.ledger.add_items(&item, count)?;
        info!(
            item = %item.id,
            added = count,
            stock = self.ledger.item_count(&item),
            "item restocked"
        );
        Ok(())
    }

    pub fn restock_coins(&mut self, coin_id: &str, count: u32) -> Result<()> {
        let coin = self.catalog.coin(coin_id)?.clone();
        self.warn_if_busy("coin restock");
        self.ledger.add_coins(&coin, count)?;
        info!(
            coin = %coin.id,
            added = count,
            stock = self.ledger.coin_count(&coin),
            "coins restocked"
        );
        Ok(())
    }

    /// Runs one scripted command against the machine.
    pub fn process_command(&mut self, command: &Command) -> Result<Dispensed> {
        match command.action {
            CommandType::Select => {
                self.select_item(command.required_arg()?)?;
                Ok(Dispensed::default())
            }
            CommandType::Insert => {
                self.insert_coin(command.required_arg()?)?;
                Ok(Dispensed::default())
            }
            CommandType::Collect => {
                let (item, coins) = self.collect_item_and_change()?;
                Ok(Dispensed {
                    item: Some(item),
                    coins,
                })
            }
            CommandType::Refund => Ok(Dispensed {
                item: None,
                coins: self.refund()?,
            }),
            CommandType::Reset => {
                self.reset();
                Ok(Dispensed::default())
            }
            CommandType::RestockItem => {
                self.restock_item(command.required_arg()?, command.count())?;
                Ok(Dispensed::default())
            }
            CommandType::RestockCoin => {
                self.restock_coins(command.required_arg()?, command.count())?;
                Ok(Dispensed::default())
            }
        }
    }

    /// Applies the configured policy after a payout could not be made.
    fn change_failed(&mut self, err: VendingError) -> VendingError {
        match self.policy {
            ChangePolicy::Forfeit => {
                let forfeited = self.context.clear();
                warn!(
                    forfeited = %forfeited,
                    error = %err,
                    "transaction aborted, balance kept in cash box"
                );
            }
            ChangePolicy::Hold => {
                self.context.hold();
                warn!(
                    held = %self.context.balance,
                    error = %err,
                    "transaction held for operator"
                );
            }
        }
        err
    }

    fn warn_if_busy(&self, operation: &str) {
        if self.context.state != MachineState::Idle {
            warn!(state = %self.context.state, "{} during an open transaction", operation);
        }
    }
}
