#![doc = include_str!("doc.md")]

pub mod algorithm;
pub mod model;

// graph-building assets shared between unit tests and scenario tests
pub mod testing;
