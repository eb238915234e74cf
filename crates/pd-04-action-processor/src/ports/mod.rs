//! Ports for the Action Processor subsystem.

pub mod inbound;

pub use inbound::ActionApi;
