// Reestructura - platform/mod.rs
//
// Platform abstraction layer.
// Dependencies: standard library.
// Must NOT depend on: core, app, ui.

pub mod paths;
