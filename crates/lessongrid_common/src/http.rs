// --- File: crates/lessongrid_common/src/http.rs ---

pub mod client;
