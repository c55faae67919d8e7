//! Command line, configuration, errors, progress display and figure output

/// Command-line parsing and run orchestration
pub mod cli;
/// Analysis constants and defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Run directories and figure display
pub mod output;
/// Progress bars for streaming analyses
pub mod progress;
/// SVG rendering of analysis figures
pub mod render;
