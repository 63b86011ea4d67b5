//! Address and network values.
//!
//! - [`Prefix`] - prefix length bounded to an address width
//! - [`Ipv4`], [`Ipv6`], [`Ipv6Mapped`] - single-family values
//! - [`Cidr`] - range derivation shared by both families
//! - [`Network`] - family-polymorphic value that dispatches on input text

mod cidr;
mod classify;
mod count;
mod ipv4;
mod ipv6;
mod mapped;
mod network;
mod prefix;

pub use cidr::{
    broadcast_addr, cut_addr, first_host, get_cidr_mask, ip_after_subnet, last_host, width_ones,
    Cidr, Hosts,
};
pub use classify::AddressClass;
pub use count::AddressCount;
pub use ipv4::{valid_ipv4, valid_ipv4_netmask, Ipv4, OCTETS};
pub use ipv6::{valid_ipv6, Ipv6};
pub use mapped::{Ipv6Mapped, MAPPED_BASE};
pub use network::{valid, Family, Network};
pub use prefix::{Prefix, V4_BITS, V6_BITS};
