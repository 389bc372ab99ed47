use crate::error::{Result, VendingError};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    Select,
    Insert,
    Collect,
    Refund,
    Reset,
    RestockItem,
    RestockCoin,
}

impl CommandType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Collect => "collect",
            Self::Refund => "refund",
            Self::Reset => "reset",
            Self::RestockItem => "restock_item",
            Self::RestockCoin => "restock_coin",
        }
    }
}

/// One step of a customer or operator session against a machine.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Command {
    pub action: CommandType,
    /// Item or coin identifier, for the actions that take one.
    #[serde(default)]
    pub arg: Option<String>,
    /// Restock quantity, defaults to one.
    #[serde(default)]
    pub count: Option<u32>,
}

impl Command {
    pub fn new(action: CommandType) -> Self {
        Self {
            action,
            arg: None,
            count: None,
        }
    }

    pub fn with_arg(action: CommandType, arg: impl Into<String>) -> Self {
        Self {
            action,
            arg: Some(arg.into()),
            count: None,
        }
    }

    pub fn required_arg(&self) -> Result<&str> {
        self.arg
            .as_deref()
            .filter(|arg| !arg.is_empty())
            .ok_or_else(|| {
                VendingError::ValidationError(format!(
                    "'{}' requires an item or coin argument",
                    self.action.name()
                ))
            })
    }

    pub fn count(&self) -> u32 {
        self.count.unwrap_or(1)
    }
}
