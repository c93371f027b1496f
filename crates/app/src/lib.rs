//! # dex-app
//!
//! Application layer: the dashboard core and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CommandPoster`: deliver a command request to the control server
//! - Provide the dashboard mechanism:
//!   - `WidgetRegistry`: ordered, name-unique widgets with their view anchors
//!   - `DataDispatcher`: fan a snapshot out to every handler, isolating failures
//!   - `AgeTracker`: last-write-wins "seconds since update" per label
//!   - `command`: confirmation-gated actions and the command button panel
//!   - `ServiceControlForm`: batched start/stop/status requests with auto-reset
//!   - `Dashboard`: the controller that owns all of the above
//!   - `SharedDashboard`: the locked handle adapters use to press buttons,
//!     send instrument text and submit services
//!
//! ## Dependency rule
//! Depends on `dex-domain` only. Never imports adapter crates. Adapters depend
//! on *this* crate, not the reverse.

pub mod age_tracker;
pub mod command;
pub mod dashboard;
pub mod dispatcher;
pub mod ports;
pub mod registry;
pub mod service_control;
pub mod widget;
