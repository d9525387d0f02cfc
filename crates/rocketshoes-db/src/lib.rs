//! # rocketshoes-db: Durable Slot Storage
//!
//! This crate persists named string slots in SQLite. The cart store keeps
//! its snapshot in one of those slots.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       RocketShoes Data Flow                             │
//! │                                                                         │
//! │  CartStore::add_product(id)                                            │
//! │       │                                                                 │
//! │       ▼  snapshot bytes                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  rocketshoes-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (slot.rs)    │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ SlotRepo      │    │ 001_storage_ │  │   │
//! │  │   │               │    │ get/put/del   │    │   slots.sql  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/cart.db  :  storage_slots(key, value, updated_at) │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Slot repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rocketshoes_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/cart.db")).await?;
//!
//! db.slots().put("@RocketShoes:cart", "[]").await?;
//! let snapshot = db.slots().get("@RocketShoes:cart").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::slot::SlotRepository;
