//! # Repository Module
//!
//! Database repository implementations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart Store                                                            │
//! │       │                                                                 │
//! │       │  db.slots().put("@RocketShoes:cart", json)                     │
//! │       ▼                                                                 │
//! │  SlotRepository                                                        │
//! │  ├── get(&self, key)                                                   │
//! │  └── put(&self, key, value)      (upsert)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite: storage_slots                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`SlotRepository`](slot::SlotRepository) - Durable named string slots

pub mod slot;
