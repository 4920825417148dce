//! # junokit-tests
//! Shared test doubles for scenario and property tests.

pub mod helpers;
