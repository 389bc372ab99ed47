#![allow(dead_code)]

use vendsim::application::machine::VendingMachine;
use vendsim::config::{ChangePolicy, CoinConfig, ItemConfig, MachineConfig};
use vendsim::domain::catalog::{Amount, Coin, Item};

/// Builds a machine from `(id, price, stock)` items and `(id, value, count)` coins.
pub fn machine(items: &[(&str, u64, u32)], coins: &[(&str, u64, u32)]) -> VendingMachine {
    machine_with_policy(items, coins, ChangePolicy::Forfeit)
}

pub fn machine_with_policy(
    items: &[(&str, u64, u32)],
    coins: &[(&str, u64, u32)],
    change_policy: ChangePolicy,
) -> VendingMachine {
    let config = MachineConfig {
        items: items
            .iter()
            .map(|&(id, price, stock)| ItemConfig {
                id: id.to_string(),
                price: Amount::new(price),
                stock,
            })
            .collect(),
        coins: coins
            .iter()
            .map(|&(id, value, count)| CoinConfig {
                id: id.to_string(),
                value: Amount::new(value),
                count,
            })
            .collect(),
        change_policy,
    };
    VendingMachine::new(config).expect("Invalid test configuration")
}

pub fn item(machine: &VendingMachine, id: &str) -> Item {
    machine.catalog().item(id).unwrap().clone()
}

pub fn coin(machine: &VendingMachine, id: &str) -> Coin {
    machine.catalog().coin(id).unwrap().clone()
}

pub fn coin_ids(coins: &[Coin]) -> Vec<&str> {
    coins.iter().map(|coin| coin.id.as_str()).collect()
}
