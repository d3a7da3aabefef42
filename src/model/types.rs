use crate::tags::GroupVersionKind;
use crate::universe::TypeName;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// The root of the generated API tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Apis {
    /// Domain portion of every group, e.g. `k8s.io`
    pub domain: String,
    /// Import path of the API root package, e.g. `github.com/pwittrock/apiserver-helloworld/apis`
    pub package: String,
    /// Groups keyed by name
    pub groups: BTreeMap<String, ApiGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiGroup {
    pub domain: String,
    /// Short group name, e.g. `mushroomkingdom`
    pub group: String,
    pub group_title: String,
    /// Versions keyed by name
    pub versions: BTreeMap<String, ApiVersion>,
    /// Every resource of the group keyed by kind, regardless of version
    pub unversioned_resources: BTreeMap<String, ApiResource>,
    /// Unversioned definitions that must be generated
    pub structs: Vec<Struct>,
    /// Import path of the unversioned group package
    pub pkg_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiVersion {
    pub domain: String,
    pub group: String,
    /// e.g. `v1beta1`
    pub version: String,
    /// Resources keyed by kind
    pub resources: BTreeMap<String, ApiResource>,
    /// Import path of the versioned package
    pub package: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiResource {
    pub domain: String,
    pub group: String,
    pub version: String,
    /// e.g. `PeachesCastle`
    pub kind: String,
    /// Plural path segment, e.g. `peachescastles`
    pub resource: String,
    /// rest.Storage implementation; empty selects the standard implementation
    pub rest: String,
    /// Subresources keyed by path
    pub subresources: BTreeMap<String, ApiSubresource>,
    /// The declaration the resource was read from
    pub type_name: TypeName,
    pub strategy: String,
    /// Always derived from `strategy`
    pub status_strategy: String,
    pub non_namespaced: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiSubresource {
    pub domain: String,
    pub group: String,
    pub version: String,
    /// Kind of the parent resource. apiserver-builder left this empty; it is
    /// filled here so a subresource can be rendered without its parent.
    pub kind: String,
    /// Plural of the parent resource
    pub resource: String,
    /// Request type, `pkg.Name` when it lives outside the resource package
    pub request: String,
    pub rest: String,
    /// Path below the parent resource, e.g. `scale`
    pub path: String,
    /// Import path required for `request`; empty when it is package local
    pub import_package: String,
}

/// A type flattened for the generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Struct {
    pub name: String,
    pub gen_client: bool,
    pub gen_deep_copy: bool,
    pub gen_unversioned: bool,
    pub fields: Vec<Field>,
}

impl Struct {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Empty for embedded members
    pub name: String,
    /// Package of the member's own (versioned) type
    pub versioned_package: String,
    /// Import line needed by `unversioned_type`, e.g. `metav1 "k8s.io/apimachinery/pkg/apis/meta/v1"`
    pub unversioned_import: String,
    pub unversioned_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Controller {
    pub target: GroupVersionKind,
    pub resource: String,
    /// Import path of the controller package
    pub package: String,
    /// Repository root: the package path cut at the controller directory marker
    pub repo: String,
}

/// Three-level resource index: group -> second key -> third key.
pub type ResourceIndex = BTreeMap<String, BTreeMap<String, BTreeMap<String, ApiResource>>>;

/// Subresource request/response types by group -> version -> kind.
pub type SubresourceTypeIndex = BTreeMap<String, BTreeMap<String, BTreeMap<String, TypeName>>>;

/// Everything the generator consumes from one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApiModel {
    pub domain: String,
    pub apis: Apis,
    pub controllers: Vec<Controller>,
    pub by_group_version_kind: ResourceIndex,
    pub by_group_kind_version: ResourceIndex,
    pub versioned_packages: BTreeSet<String>,
    pub unversioned_packages: BTreeSet<String>,
    pub group_names: BTreeSet<String>,
}

impl ApiModel {
    pub fn group(&self, group: &str) -> Option<&ApiGroup> {
        self.apis.groups.get(group)
    }

    pub fn resource(&self, group: &str, version: &str, kind: &str) -> Option<&ApiResource> {
        self.by_group_version_kind.get(group)?.get(version)?.get(kind)
    }
}
