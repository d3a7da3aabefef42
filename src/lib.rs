//! # apiregister
//!
//! **apiregister** builds the registration model of an aggregated API server
//! from a tree of annotated type declarations. Types opt in with comment
//! directives (`+resource=`, `+subresource=`, `+controller=`,
//! `+subresource-request`), the package layout supplies group and version, and
//! the builder produces a deterministic group → version → resource tree plus
//! the flattened struct graph a code generator needs.
//!
//! ## Architecture
//!
//! - **[`universe`]** - the declaration universe: packages, types, members, comments
//! - **[`tags`]** - directive grammar (`key=value` pairs) for resources, subresources and controllers
//! - **[`classify`]** - the [`Classifier`](classify::Classifier) seam deciding what a declaration is
//! - **[`builder`]** - indexing, subresource resolution, assembly and struct flattening
//! - **[`model`]** - the serializable output model
//! - **[`linter`]** - non-fatal directive checks
//! - **[`config`]** / **[`logging`]** / **[`cli`]** - the ambient layers used by the binary
//!
//! ### Build Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant CLI as CLI<br/>(apiregister-gen)
//!     participant Load as universe::load_universe
//!     participant Builder as builder::ApisBuilder
//!     participant Out as File System
//!
//!     CLI->>Load: load_universe("universe.yaml")
//!     Load-->>CLI: Universe
//!     CLI->>Builder: build()
//!     Builder->>Builder: packages, domain, group names
//!     Builder->>Builder: index resources (+ subresources)
//!     Builder->>Builder: controllers
//!     Builder->>Builder: assemble groups, flatten structs
//!     Builder-->>CLI: ApiModel
//!     CLI->>Out: JSON / YAML
//! ```
//!
//! ## Directives
//!
//! ```text
//! // +domain=example.com                                  (on the API root package)
//! // +resource=path=widgets,strategy=WidgetStrategy       (on a resource type)
//! // +subresource=request=WidgetScale,path=widgets/scale  (on a resource type, repeatable)
//! // +subresource-request                                 (on a subresource request type)
//! // +controller=group=core,version=v1,kind=Widget,resource=widgets
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use apiregister::{build_model, load_universe};
//! use apiregister::config::BuilderConfig;
//! use std::path::Path;
//!
//! let universe = load_universe(Path::new("universe.yaml"))?;
//! let model = build_model(&universe, BuilderConfig::default())?;
//! for (name, group) in &model.apis.groups {
//!     println!("{name}: {} versions", group.versions.len());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod builder;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod linter;
pub mod logging;
pub mod model;
pub mod pkgpath;
pub mod tags;
pub mod universe;

pub use builder::{build_model, ApisBuilder};
pub use error::{ModelError, Result};
pub use model::ApiModel;
pub use universe::{load_universe, Universe};
