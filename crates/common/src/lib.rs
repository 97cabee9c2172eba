//! Common utilities and types shared across Ferriem auth components.

#![warn(clippy::pedantic)]

/// Module for secret types that prevent accidental logging
pub mod secret;

/// Module for compact JWT envelope handling (size limits, segment splitting)
pub mod jwt;
