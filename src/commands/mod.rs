//! Command implementations for the go-bump CLI

pub mod upgrade;
