//! # CLI Module
//!
//! Thin command-line front end over the model builder and the linter.
//!
//! ## Commands
//!
//! ### `build`
//!
//! Build the model and write it as JSON or YAML:
//!
//! ```bash
//! apiregister-gen build --universe universe.yaml --output model.json
//! ```
//!
//! Options:
//! - `--universe <FILE>` - Universe snapshot (required)
//! - `--config <FILE>` - Builder configuration; `apiregister.toml` beside the snapshot is used when present
//! - `--output <FILE>` - Output file (default: stdout)
//! - `--format <FORMAT>` - json or yaml (default: json)
//!
//! ### `lint`
//!
//! ```bash
//! apiregister-gen lint --universe universe.yaml --fail-on-error
//! ```
//!
//! ### `inspect`
//!
//! Print the group/version/resource tree:
//!
//! ```bash
//! apiregister-gen inspect --universe universe.yaml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use apiregister::cli::{Cli, run_cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```

mod commands;


pub use commands::{build_from_paths, render_model, render_tree, run_cli, Cli, Commands, OutputFormat};
