//! integrated tests

mod stats;
