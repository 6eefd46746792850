mod container;
mod router;

pub use container::{Container, TE_PAPA_API_KEY_VAR};
pub use router::router;
