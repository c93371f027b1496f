//! # dex-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Accept **snapshots** (`POST /api/snapshot`) and dispatch them to the
//!   installed widgets
//! - Serve a small **JSON API** (`/api/ages`, `/api/widgets`)
//! - Serve a **server-side-rendered HTML dashboard** that works with
//!   **zero JavaScript**: every page is complete HTML, command buttons and
//!   the service-control form are `<form>` elements that POST back and
//!   redirect (PRG pattern), and `<meta http-equiv="refresh">` reloads the
//!   page at the configured interval. Pages are askama templates under
//!   `templates/`
//! - Turn "are you sure?" prompts into a confirmation page whose form
//!   re-submits with `confirmed=true`
//!
//! ## Dependency rule
//! Depends on `dex-app` (dashboard controller and port traits) and
//! `dex-domain`. Never leaks axum types into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;
