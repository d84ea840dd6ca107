/// Rule files and the catalog built from them
pub mod catalog;
/// Command-line interface and run orchestration
pub mod cli;
/// Runtime configuration defaults and limits
pub mod configuration;
/// Error types for all collapse operations
pub mod error;
/// Board rendering to PNG
pub mod image;
/// Terminal progress display
pub mod progress;
/// Output port for cell reports
pub mod visitor;
/// Frame capture and GIF export
pub mod visualization;
