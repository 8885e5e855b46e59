//! Domain models shared by the loader, the presentation layer and the HTTP API.

pub mod building;
pub mod profile;
pub mod theme;

pub use building::*;
pub use profile::*;
pub use theme::*;
