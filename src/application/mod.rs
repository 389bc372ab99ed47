//! Application layer driving customer and operator operations.
//!
//! This module defines the `VendingMachine`, the single owner of a machine's
//! stock ledger and of the transaction in flight.

pub mod machine;
