//! End-to-end light synchronization tests

mod resources;
