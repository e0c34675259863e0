//! PTT document families: gas supply, transmission (TSO), inventory and LNG.

pub mod inventory;
pub mod lng;
pub mod supply;
pub mod tso;
