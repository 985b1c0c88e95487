//! Shared guards for the reward ledger contract suite.
//!
//! This crate provides:
//! - [`admin_tiers`] — the three-tier admin hierarchy used to gate
//!   administrative entry points.
//! - [`reentrancy`] — a scoped, storage-backed reentrancy lock.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod admin_tiers;
pub mod reentrancy;

pub use admin_tiers::*;
pub use reentrancy::*;
