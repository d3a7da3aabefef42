//! # Model Builder
//!
//! [`ApisBuilder`] turns a [`Universe`] of annotated declarations into an
//! [`ApiModel`]. It owns every intermediate index for the duration of one run
//! and is consumed by [`ApisBuilder::build`]:
//!
//! 1. **packages** - versioned/unversioned package sets and the API root
//! 2. **domain** - `+domain=` on the API root package
//! 3. **group names**
//! 4. **index** - resources by group/version/kind and group/kind/version, plus
//!    subresource types; subresource directives are resolved per resource
//! 5. **controllers**
//! 6. **assemble** - the public group/version/resource tree, flattening the
//!    struct graph of each group as it goes
//!
//! Every step returns a [`ModelError`](crate::ModelError) on bad input and
//! the first error ends the run; there is no partial model.
//!
//! ```rust
//! use apiregister::builder::ApisBuilder;
//! use apiregister::universe::{Declaration, Package, Universe};
//!
//! let mut root = Package::new("example.com/apis");
//! root.comment_lines.push("+domain=example.com".into());
//! let mut v1 = Package::new("example.com/apis/core/v1");
//! v1.types.push(Declaration::new("", "Widget").with_comment("+resource=path=widgets"));
//! let universe = Universe::new(vec![root, Package::new("example.com/apis/core"), v1]);
//!
//! let model = ApisBuilder::new(&universe).build().unwrap();
//! assert_eq!(model.resource("core", "v1", "Widget").unwrap().resource, "widgets");
//! ```

mod assemble;
mod controllers;
mod index;
mod packages;
mod structs;
mod subresource;

pub use index::{default_strategy, status_strategy};
pub use structs::{flatten_type, unversioned_reference, UnversionedRef};
pub use subresource::split_request_type;

use crate::classify::{Classifier, TagClassifier};
use crate::config::BuilderConfig;
use crate::error::Result;
use crate::model::{ApiModel, Controller, ResourceIndex, SubresourceTypeIndex};
use crate::universe::{Declaration, Universe};
use std::collections::BTreeSet;

pub struct ApisBuilder<'u, C = TagClassifier> {
    universe: &'u Universe,
    classifier: C,
    config: BuilderConfig,

    domain: String,
    versioned_pkgs: BTreeSet<String>,
    unversioned_pkgs: BTreeSet<String>,
    apis_pkg: String,
    group_names: BTreeSet<String>,

    by_group_kind_version: ResourceIndex,
    by_group_version_kind: ResourceIndex,
    sub_by_group_version_kind: SubresourceTypeIndex,
    controllers: Vec<Controller>,
}

impl<'u> ApisBuilder<'u, TagClassifier> {
    pub fn new(universe: &'u Universe) -> Self {
        ApisBuilder::with_classifier(universe, TagClassifier)
    }
}

impl<'u, C: Classifier> ApisBuilder<'u, C> {
    pub fn with_classifier(universe: &'u Universe, classifier: C) -> Self {
        ApisBuilder {
            universe,
            classifier,
            config: BuilderConfig::default(),
            domain: String::new(),
            versioned_pkgs: BTreeSet::new(),
            unversioned_pkgs: BTreeSet::new(),
            apis_pkg: String::new(),
            group_names: BTreeSet::new(),
            by_group_kind_version: ResourceIndex::new(),
            by_group_version_kind: ResourceIndex::new(),
            sub_by_group_version_kind: SubresourceTypeIndex::new(),
            controllers: Vec::new(),
        }
    }

    pub fn config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    fn declarations(&self) -> impl Iterator<Item = &'u Declaration> {
        let universe: &'u Universe = self.universe;
        universe.declarations()
    }

    /// Run every step and hand back the finished model.
    pub fn build(mut self) -> Result<ApiModel> {
        self.parse_packages()?;
        self.parse_domain()?;
        self.parse_group_names();
        self.parse_index()?;
        self.parse_controllers()?;
        let apis = self.parse_apis()?;

        tracing::info!(
            domain = %self.domain,
            groups = apis.groups.len(),
            controllers = self.controllers.len(),
            "built API model"
        );

        Ok(ApiModel {
            domain: self.domain,
            apis,
            controllers: self.controllers,
            by_group_version_kind: self.by_group_version_kind,
            by_group_kind_version: self.by_group_kind_version,
            versioned_packages: self.versioned_pkgs,
            unversioned_packages: self.unversioned_pkgs,
            group_names: self.group_names,
        })
    }
}

/// Build a model with the default classifier.
pub fn build_model(universe: &Universe, config: BuilderConfig) -> Result<ApiModel> {
    ApisBuilder::new(universe).config(config).build()
}
