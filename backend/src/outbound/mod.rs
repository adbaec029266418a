//! Outbound adapters implementing domain ports against real collaborators.

pub mod identity;
pub mod persistence;
