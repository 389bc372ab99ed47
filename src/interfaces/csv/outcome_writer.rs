use crate::application::machine::{Dispensed, VendingMachine};
use crate::domain::catalog::Amount;
use crate::domain::command::Command;
use crate::domain::ledger::StockLedger;
use crate::domain::state::MachineState;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// One row of the replay log.
#[derive(Debug, Serialize, PartialEq)]
pub struct OutcomeRecord {
    pub step: usize,
    pub action: &'static str,
    /// `ok`, or the kind of error the command failed with.
    pub outcome: &'static str,
    pub state: MachineState,
    pub balance: Amount,
    pub item: Option<String>,
    /// Space separated coin ids handed back to the customer.
    pub coins: String,
}

impl OutcomeRecord {
    pub fn new(
        step: usize,
        command: &Command,
        result: &Result<Dispensed>,
        machine: &VendingMachine,
    ) -> Self {
        let (outcome, item, coins) = match result {
            Ok(dispensed) => (
                "ok",
                dispensed.item.as_ref().map(|item| item.id.clone()),
                dispensed
                    .coins
                    .iter()
                    .map(|coin| coin.id.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            Err(err) => (err.kind(), None, String::new()),
        };
        Self {
            step,
            action: command.action.name(),
            outcome,
            state: machine.state(),
            balance: machine.balance(),
            item,
            coins,
        }
    }
}

/// Writes the replay log and, on request, the final ledger as CSV.
pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new().flexible(true).from_writer(sink);
        Self { writer }
    }

    pub fn write_outcome(&mut self, record: &OutcomeRecord) -> Result<()> {
        self.writer.serialize(record)?;
        Ok(())
    }

    /// Appends a `kind,id,count` section with the item stock followed by the
    /// cash box.
    pub fn write_stock(&mut self, ledger: &StockLedger) -> Result<()> {
        self.writer.write_record(["kind", "id", "count"])?;
        for (id, count) in ledger.items() {
            self.writer.write_record(["item", id, count.to_string().as_str()])?;
        }
        for (coin, count) in ledger.coins() {
            let count = count.to_string();
            self.writer.write_record(["coin", coin.id.as_str(), count.as_str()])?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
