// Platform-specific code module

pub mod host;

pub use host::resolve_server_identity;
