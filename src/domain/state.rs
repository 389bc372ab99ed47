use super::catalog::{Amount, Item};
use serde::Serialize;
use std::fmt;

/// Mode of operation of a vending machine.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum MachineState {
    /// Waiting for a customer to pick an item.
    #[default]
    Idle,
    /// An item is selected and the customer is paying for it.
    Selecting,
    /// A payout is pending; only a refund or an operator reset is accepted.
    Processing,
}

impl MachineState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Selecting => "selecting",
            Self::Processing => "processing",
        }
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Volatile state of the transaction currently in flight.
///
/// Balance and selection only hold non-default values outside of
/// [`MachineState::Idle`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionContext {
    pub state: MachineState,
    pub balance: Amount,
    pub selected: Option<Item>,
}

impl TransactionContext {
    /// Starts a transaction for `item` with a zero balance.
    pub fn open(&mut self, item: Item) {
        self.state = MachineState::Selecting;
        self.balance = Amount::ZERO;
        self.selected = Some(item);
    }

    /// Keeps balance and selection but refuses further customer input.
    pub fn hold(&mut self) {
        self.state = MachineState::Processing;
    }

    /// Ends the transaction and returns the balance that was still open.
    pub fn clear(&mut self) -> Amount {
        let balance = self.balance;
        *self = Self::default();
        balance
    }
}
