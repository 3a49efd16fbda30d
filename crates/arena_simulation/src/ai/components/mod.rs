//! AI components

pub mod brain;
pub mod fsm;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod brain_tests;
#[cfg(test)]
mod fsm_tests;

// Re-export all components
pub use brain::*;
pub use fsm::*;
