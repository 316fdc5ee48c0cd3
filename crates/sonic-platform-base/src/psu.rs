//! Power supply status contract.

/// Power supply status as needed by other platform devices.
///
/// Only the power-good query is part of this contract; presence, fans,
/// voltage and the rest of the PSU API belong to the PSU daemon side.
pub trait PsuBase: Send + Sync {
    /// Returns true if the PSU is present and its output is good.
    fn powergood_status(&self) -> bool;
}
