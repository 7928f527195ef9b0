//! HTTP server module for the simulator engine.
//!
//! This module provides an axum-based HTTP server that exposes every
//! simulator section as a JSON endpoint. It reuses the route functions and
//! DTOs from the core library.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Query parsing, defaults from SimulatorConfig           │
//! │  - JSON serialization, error mapping                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Routes / Services                                        │
//! │  - Closed-form evaluators and dataset builders            │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Solver                                                   │
//! │  - LP model, simplex (run on the blocking pool)           │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
