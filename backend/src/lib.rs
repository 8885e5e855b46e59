//! # Sunroof Proposals Backend
//!
//! Rooftop solar data for the proposal results page of a solar quote funnel.
//!
//! When a proposal page is mounted, the backend asks a building lookup service
//! for the solar potential of the homeowner's roof, derives the figures the page
//! shows (usable square footage, annual sunshine hours, building centre), waits
//! for the aerial imagery to be available and reports a single terminal state.
//! The same state drives the pure display derivations of the page: pricing,
//! savings projection, system size and the footer disclaimer.
//!
//! ## Architecture
//!
//! - [`api`]: view state types returned to callers
//! - [`models`]: user profile, theme and building insights
//! - [`solar`]: building lookup and imagery readiness collaborators
//! - [`services`]: the proposal loader, view state cells and presentation logic
//! - [`format`]: locale-aware number formatting
//! - [`config`]: server configuration from the environment
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod config;
pub mod format;
pub mod models;
pub mod services;
pub mod solar;

#[cfg(feature = "http-server")]
pub mod http;
