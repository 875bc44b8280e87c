//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors, auth types)
//! - `access` - Roles and capability flags
//! - `account` - Registered users
//! - `catalog` - Categories and tags
//! - `event` - Event listings and inventory arithmetic
//! - `booking` - Booking lifecycle

pub mod access;
pub mod account;
pub mod booking;
pub mod catalog;
pub mod event;
pub mod foundation;
