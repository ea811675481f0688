//! Missionboard Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the
//! missionboard application. This crate offers a builder pattern for creating test
//! contexts with in-memory SQLite databases and customizable table schemas, plus
//! factories for the domain entities.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing database connection and setup
//! - **factory**: Factories creating carriers, missions and webhooks with defaults
//!
//! # Usage
//!
//! Use `TestBuilder` to create a test context with the required database tables:
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::Carrier;
//!
//! #[tokio::test]
//! async fn test_carrier_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(Carrier)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
