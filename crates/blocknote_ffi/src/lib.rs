//! Flutter-facing bindings for the block editor engine.

pub mod api;
