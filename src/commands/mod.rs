// Command handlers module
pub mod check;
pub mod serve;
pub mod version;

// Re-exports for cleaner imports
pub use check::execute as check;
pub use serve::execute as serve;
pub use version::execute as version;
