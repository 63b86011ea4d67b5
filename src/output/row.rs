//! One printable line of network data.

use crate::models::Network;
use serde::Serialize;

/// Derived values of one network, ready for any output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkRow {
    /// Position in the listing, starting at 1.
    pub index: usize,
    /// The network as given, with prefix.
    pub cidr: String,
    /// Network address.
    pub network: String,
    /// Broadcast (IPv4) or last (IPv6) address.
    pub broadcast: String,
    /// First usable host.
    pub first: String,
    /// Last usable host.
    pub last: String,
    /// Exact number of addresses, as decimal text.
    pub size: String,
    /// Dotted netmask (IPv4) or `/len` (IPv6).
    pub netmask: String,
    pub class: String,
}

impl NetworkRow {
    pub fn from_network(index: usize, network: &Network) -> NetworkRow {
        NetworkRow {
            index,
            cidr: network.to_string(),
            network: network.network().addr_string(),
            broadcast: network.broadcast().addr_string(),
            first: network.first().addr_string(),
            last: network.last().addr_string(),
            size: network.size().to_string(),
            netmask: network.netmask_string(),
            class: network.classify().to_string(),
        }
    }
}

/// Rows for a listing, numbered from 1.
pub fn rows_for(networks: &[Network]) -> Vec<NetworkRow> {
    networks
        .iter()
        .enumerate()
        .map(|(i, n)| NetworkRow::from_network(i + 1, n))
        .collect()
}
