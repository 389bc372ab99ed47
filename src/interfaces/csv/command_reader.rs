use crate::domain::command::Command;
use crate::error::{Result, VendingError};
use std::io::Read;

/// Reads scripted machine commands from a CSV source.
///
/// Expects an `action, arg, count` header. Whitespace is trimmed and rows may
/// omit trailing fields.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes the commands, one `Result` per row.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(VendingError::from))
    }
}
