//! Currents API model types.
//!
//! Only the project model is fully typed; every other payload crosses the
//! tool boundary as opaque JSON, since nothing in this crate interprets
//! those shapes.

mod project;

pub use project::{project_map, DataEnvelope, Project, ProjectListQuery};
