//! HTTP server module for the proposal backend.
//!
//! This module provides an axum-based HTTP server that exposes the proposal
//! loader and the display derivations as a REST API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing                                        │
//! │  - JSON / SSE responses                                   │
//! │  - CORS, compression, tracing                             │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - ProposalDataLoader, view state cells, sessions         │
//! │  - Presentation derivations                               │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Solar collaborators (solar/)                             │
//! │  - GoogleSolarClient / ImageryReadinessProbe              │
//! │  - StaticBuildingLookup / ImmediateReadiness              │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
