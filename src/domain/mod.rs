//! Domain types: catalog and money, the stock ledger, transaction state and
//! scripted commands.

pub mod catalog;
pub mod command;
pub mod ledger;
pub mod state;
