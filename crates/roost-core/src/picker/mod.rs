//! The interactive picker contract and its item filter.

pub mod errors;
pub mod filter;
pub mod types;

pub use errors::PickerError;
pub use filter::filter_items;
pub use types::{Picker, PickerItem};
