// Reestructura - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (outcome), util (errors), rfd.
// Must NOT depend on: platform, direct I/O.

pub mod notify;
