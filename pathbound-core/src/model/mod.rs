pub mod label;
pub mod network;
pub mod resource;
pub mod termination;
pub mod unit;
