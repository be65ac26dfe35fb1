pub mod lifecycle;
pub mod server;

pub use lifecycle::ServerHandle;
pub use server::{BoundApp, Server};
