//! CIDR address algebra for IPv4 and IPv6.
//!
//! Parse addresses and networks, derive their ranges, test containment and
//! ordering, summarize collections of networks and split networks into an
//! exact number of subnets.
//!
//! ```
//! use cidr_algebra::{Cidr, Ipv4, Network};
//!
//! let summary = Network::summarize(&[
//!     Network::parse("172.16.10.0/24").unwrap(),
//!     Network::parse("172.16.11.0/24").unwrap(),
//! ])
//! .unwrap();
//! assert_eq!(summary[0].to_string(), "172.16.10.0/23");
//!
//! let parts = Ipv4::new("172.16.10.0/24").unwrap().split(3).unwrap();
//! assert_eq!(parts[2].to_string(), "172.16.10.128/25");
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

pub use codec::{compress, expand};
pub use error::CidrError;
pub use models::{
    valid, valid_ipv4, valid_ipv4_netmask, valid_ipv6, AddressClass, AddressCount, Cidr, Family,
    Ipv4, Ipv6, Ipv6Mapped, Network, Prefix,
};
pub use processing::{split, subnets, summarize};
