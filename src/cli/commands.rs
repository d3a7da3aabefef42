use crate::builder::build_model;
use crate::config::load_builder_config;
use crate::linter::{fail_if_errors, lint_file, print_lint_issues, LintSeverity};
use crate::model::ApiModel;
use crate::universe::load_universe;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Command-line interface for the API model builder
#[derive(Parser, Debug)]
#[command(name = "apiregister-gen")]
#[command(about = "Builds the API registration model from an annotated declaration universe", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the API model and write it out
    Build {
        /// Path to the universe snapshot (YAML or JSON)
        #[arg(short, long)]
        universe: PathBuf,

        /// Path to the builder configuration (apiregister.toml)
        /// If not provided, will auto-detect alongside the universe snapshot
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Lint the directives of a universe snapshot
    ///
    /// Reports malformed and missing directives, duplicate subresources and
    /// resources, bare-name collisions, multi-version kinds, unknown
    /// directive keys and resource paths that are not DNS-1123 labels.
    Lint {
        /// Path to the universe snapshot (YAML or JSON)
        #[arg(short, long)]
        universe: PathBuf,

        /// Exit with error code if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Show only errors (hide warnings and info)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
    /// Print the group/version/resource tree of the built model
    Inspect {
        #[arg(short, long)]
        universe: PathBuf,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Load the universe and configuration, then build the model.
pub fn build_from_paths(universe_path: &Path, config_path: Option<&Path>) -> anyhow::Result<ApiModel> {
    let universe = load_universe(universe_path)?;
    let config = load_builder_config(config_path, universe_path)?;
    build_model(&universe, config)
        .with_context(|| format!("Failed to build API model from {}", universe_path.display()))
}

pub fn render_model(model: &ApiModel, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(model).context("Failed to serialize model as JSON")
        }
        OutputFormat::Yaml => serde_yaml::to_string(model).context("Failed to serialize model as YAML"),
    }
}

/// Human-readable tree of groups, versions, resources, subresources and structs.
pub fn render_tree(model: &ApiModel) -> String {
    let mut out = format!("domain: {}\n", model.domain);
    for (name, group) in &model.apis.groups {
        out.push_str(&format!("{name} ({})\n", group.pkg_path));
        for (version, v) in &group.versions {
            out.push_str(&format!("  {version} ({})\n", v.package));
            for (kind, r) in &v.resources {
                let scope = if r.non_namespaced { " cluster-scoped" } else { "" };
                out.push_str(&format!(
                    "    {kind} /{} strategy={}{scope}\n",
                    r.resource, r.strategy
                ));
                for (path, sr) in &r.subresources {
                    out.push_str(&format!("      /{}/{path} request={}\n", r.resource, sr.request));
                }
            }
        }
        if !group.structs.is_empty() {
            let names: Vec<&str> = group.structs.iter().map(|s| s.name.as_str()).collect();
            out.push_str(&format!("  structs: {}\n", names.join(", ")));
        }
    }
    for c in &model.controllers {
        out.push_str(&format!("controller {} -> {}\n", c.package, c.target));
    }
    out
}

fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("Failed to write to stdout")?;
            Ok(())
        }
    }
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - The universe snapshot or configuration cannot be loaded
/// - The model build fails on a bad directive
/// - The output cannot be written
/// - `lint --fail-on-error` finds error-level issues
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Build {
            universe,
            config,
            output,
            format,
        } => {
            let model = build_from_paths(universe, config.as_deref())?;
            let rendered = render_model(&model, *format)?;
            write_output(output.as_deref(), &rendered)?;
            if let Some(path) = output {
                tracing::info!(output = %path.display(), groups = model.apis.groups.len(), "wrote API model");
            }
            Ok(())
        }
        Commands::Lint {
            universe,
            fail_on_error,
            errors_only,
        } => {
            let mut issues = lint_file(universe)?;
            if *errors_only {
                issues.retain(|i| i.severity == LintSeverity::Error);
            }
            print_lint_issues(&issues);
            if *fail_on_error {
                fail_if_errors(&issues)?;
            }
            Ok(())
        }
        Commands::Inspect { universe, config } => {
            let model = build_from_paths(universe, config.as_deref())?;
            write_output(None, &render_tree(&model))
        }
    }
}
