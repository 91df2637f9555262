//! secret-dispatch - push encrypted secrets to GitHub organizations and repositories.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── push          # Dispatch secrets to every target
//! │   ├── check         # Validate inputs without network calls
//! │   ├── output        # Terminal and workflow-command output
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # Layered run configuration
//!     ├── secrets       # Ordered secret set + JSON loader
//!     ├── target        # org / owner/repo resolution
//!     ├── cipher/       # Sealed box encryption
//!     ├── api/          # Typed endpoints + GitHub client
//!     ├── dispatch      # Per-target concurrent submission
//!     ├── orchestrator  # Sequential run across targets
//!     └── outcome       # Per-secret / per-target results
//! ```
//!
//! # Flow
//!
//! For each target, in order: resolve it, fetch the scope's public key
//! once, seal every secret under that key, write all secrets
//! concurrently, and wait for every write before moving on.

pub mod cli;
pub mod core;
pub mod error;
