//! Set operations over collections of networks.
//!
//! - [`summarize`] - aggregate networks into the minimal covering set
//! - [`subnets`] and [`split`] - partition one network
//! - [`merge_pair`] - the sibling test both of them rely on

mod merge;
mod split;
mod summarize;

pub use merge::merge_pair;
pub use split::{split, subnets};
pub use summarize::summarize;
