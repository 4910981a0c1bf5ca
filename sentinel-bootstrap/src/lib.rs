// /////////////////////////////////////////////////////////////////////////////
// Sentinel
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

// Production code safety enforced via CI and `make lint-strict`
// (lib/bins checked separately from tests - tests may use unwrap/expect)

//! # Bootstrap Module
//!
//! The bootstrap module sits **outside** the enterprise application layers
//! (domain, application, infrastructure) and provides:
//!
//! - **Entry point** - Application lifecycle management
//! - **Platform abstraction** - OS-specific operations (POSIX vs Windows)
//! - **Signal handling** - Graceful shutdown (SIGTERM, SIGINT, SIGHUP)
//! - **Argument parsing** - Secure CLI argument validation
//! - **Dependency injection** - Composition root for wiring dependencies
//! - **Error handling** - Unix exit code mapping
//! - **Async coordination** - Shutdown coordination and cancellation
//!
//! ## Architecture Position
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │          BOOTSTRAP (This Module)            │
//! │  - Entry Point                              │
//! │  - DI Container (Composition Root)          │
//! │  - Platform Abstraction                     │
//! │  - Signal Handling                          │
//! │  - Secure Arg Parsing                       │
//! └─────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────┐
//! │         APPLICATION LAYER                   │
//! │  - Use Cases                                │
//! │  - Application Services                     │
//! └─────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────┐
//! │           DOMAIN LAYER                      │
//! │  - Business Logic                           │
//! │  - Domain Services                          │
//! │  - Entities & Value Objects                 │
//! └─────────────────────────────────────────────┘
//!                      ▲
//!                      │
//! ┌─────────────────────────────────────────────┐
//! │       INFRASTRUCTURE LAYER                  │
//! │  - Adapters                                 │
//! │  - Repositories                             │
//! │  - External Services                        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Key Design Principles
//!
//! 1. **Separation from Enterprise Layers**
//!    - Bootstrap can access all layers
//!    - Enterprise layers cannot access bootstrap
//!    - Clear architectural boundary
//!
//! 2. **Platform Abstraction**
//!    - Abstract OS-specific functionality behind traits
//!    - POSIX implementation for Linux/macOS
//!    - Windows implementation with cross-platform stubs
//!    - Compile-time platform selection
//!
//! 3. **Graceful Shutdown**
//!    - Signal handlers (SIGTERM, SIGINT, SIGHUP)
//!    - Cancellation token propagation
//!    - Grace period with timeout enforcement
//!    - Coordinated shutdown across components
//!
//! 4. **Security First**
//!    - Input validation for all arguments
//!    - Path traversal prevention
//!    - Injection attack protection
//!    - Privilege checking
//!
//! 5. **Testability**
//!    - All components behind traits
//!    - No-op implementations for testing
//!    - Dependency injection for mocking
//!
//! ## Usage Example
//!
//! ```rust
//! use sentinel_bootstrap::platform::create_platform;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Get platform abstraction
//!     let platform = create_platform();
//!     println!("Running on: {}", platform.platform_name());
//!
//!     // Bootstrap will handle:
//!     // - Argument parsing
//!     // - Signal handling setup
//!     // - Dependency wiring
//!     // - Application lifecycle
//!     // - Graceful shutdown
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - `platform` - OS abstraction (Unix/Windows)
//! - `signals` - Signal handling (SIGTERM, SIGINT, SIGHUP)
//! - `cli` - Secure argument parsing (`db`, `ftp`, `nfs`, `smb`, `local`, `review`, `report`)
//! - `config` - Bootstrap-layer configuration (rule/database paths, grace period)
//! - `exit_code` - Exit code enumeration
//! - `logger` - Bootstrap-specific logging
//! - `shutdown` - Shutdown coordination

pub mod cli;
pub mod config;
pub mod exit_code;
pub mod logger;
pub mod platform;
pub mod shutdown;
pub mod signals;

pub use cli::{parse_and_validate, ValidatedCli, ValidatedCommand};
pub use exit_code::{map_error_to_exit_code, result_to_exit_code, ExitCode};

/// Parse and validate CLI arguments.
///
/// This is the main entry point for the bootstrap layer. The caller is
/// responsible for running the application logic against the returned
/// [`ValidatedCli`] and mapping the result to an exit code with
/// [`result_to_exit_code`].
///
/// # Errors
///
/// Returns `cli::ParseError` if CLI parsing or validation fails. Clap
/// handles `--help`/`--version` and exits the process on its own.
///
/// # Example
///
/// ```no_run
/// use sentinel_bootstrap::{bootstrap_cli, result_to_exit_code};
///
/// #[tokio::main]
/// async fn main() -> std::process::ExitCode {
///     let validated_cli = match bootstrap_cli() {
///         Ok(cli) => cli,
///         Err(e) => {
///             eprintln!("CLI error: {}", e);
///             return std::process::ExitCode::from(2);
///         }
///     };
///
///     let result = run_application(validated_cli).await;
///     result_to_exit_code(result)
/// }
///
/// async fn run_application(
///     cli: sentinel_bootstrap::ValidatedCli,
/// ) -> Result<(), sentinel_domain::HunterError> {
///     let _ = cli;
///     Ok(())
/// }
/// ```
pub fn bootstrap_cli() -> Result<ValidatedCli, cli::ParseError> {
    cli::parse_and_validate()
}
