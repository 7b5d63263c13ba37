//! # Platedex Architecture
//!
//! Platedex catalogs a license-plate collection: plates you own, plates you
//! want, and plates you have parted with. It is a library with a CLI client,
//! not a CLI with some library code.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Parses selectors, publishes snapshots after mutations    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic, returns CmdResult                        │
//! │  - Query core: fields, filter, sort, search, bounds, view   │
//! │  - CSV interchange                                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract DataStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Query Pipeline
//!
//! A listing is derived from a full snapshot of one item kind, always in the
//! same order:
//!
//! 1. [`bounds`]: min/max of every range field over the snapshot
//! 2. [`filter`]: drop items rejected by the [`filter::FilterSpec`]
//! 3. [`sort`]: order by a [`sort::SortKey`] (a key that does not apply to
//!    the kind leaves the order alone)
//! 4. [`search`]: keep registration numbers matching the folded query
//!
//! All four read items through [`fields::FieldBag`], so none of them cares
//! which kind of item it is looking at. [`view::CatalogView`] holds the
//! transient state for one listing and re-runs the pipeline whenever the API
//! publishes a new snapshot through [`feed`].
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. The query pipeline does no I/O at all.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Item`, `Collection`)
//! - [`fields`]: Field registry and the flattened field bag
//! - [`filter`], [`sort`], [`search`], [`bounds`]: the query pipeline
//! - [`view`], [`feed`]: per-listing state and snapshot publishing
//! - [`interchange`]: CSV export, import and template
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod bounds;
pub mod commands;
pub mod config;
pub mod error;
pub mod feed;
pub mod fields;
pub mod filter;
pub mod interchange;
pub mod model;
pub mod search;
pub mod sort;
pub mod store;
pub mod view;
