//! probe - single-shot HTTP health probe
//!
//! Asks "is this HTTP service up?" with one GET request, finite timeouts and
//! optional conditions on the response status and body.
//!
//! ```no_run
//! use probe::health::{Conditions, HealthChecker, RequestOptions};
//!
//! # async fn run() -> Result<(), probe::health::ProbeError> {
//! let checker = HealthChecker::new(
//!     "http://localhost:8080/health",
//!     Conditions::new().status_code_equals_to(200).body_contains("UP"),
//!     RequestOptions::new(),
//! )?;
//!
//! if checker.is_healthy().await {
//!     println!("service is up");
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod health;
pub mod logging;
