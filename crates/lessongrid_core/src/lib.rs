// --- File: crates/lessongrid_core/src/lib.rs ---
// Declare modules within this crate
pub mod flow;
pub mod pricing;
pub mod slots;
#[cfg(test)]
mod slots_proptest;
pub mod timegrid;
pub mod view;
pub mod week;
