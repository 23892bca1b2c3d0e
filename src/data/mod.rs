//! Data layer: core types, loading, filtering, and aggregation.
//!
//! Architecture:
//! ```text
//!  ufo-sightings CSV (Latin-1)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset (seconds → minutes, once)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset   │  Vec<Sighting> + shape/country indices, immutable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  country substring query → Vec<&Sighting> view
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────────┐
//!   │ aggregate + analysis │  pure view → tables for the chart sinks
//!   └──────────────────┘
//! ```

pub mod aggregate;
pub mod analysis;
pub mod filter;
pub mod loader;
pub mod model;
