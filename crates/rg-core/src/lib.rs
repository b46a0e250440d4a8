//! `rg-core`: foundational types for the `roadgraph` network builder.
//!
//! This crate is a dependency of every other `rg-*` crate.  It has no
//! `rg-*` dependencies and minimal external ones (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VertexId`, `EdgeId`                                  |
//! | [`geo`]         | `Point`, planar Euclidean distance                    |
//! | [`config`]      | `GraphConfig`, `SpeedTable`                           |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on all public types; needed to load `GraphConfig` from TOML. |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{GraphConfig, SpeedTable};
pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{EdgeId, VertexId};
