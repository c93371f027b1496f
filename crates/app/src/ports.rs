//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the dashboard layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod command_poster;

pub use command_poster::CommandPoster;
