use super::ApisBuilder;
use crate::classify::Classifier;
use crate::error::{ModelError, Result};
use crate::model::{ApiGroup, ApiVersion, Apis};
use crate::pkgpath;

impl<C: Classifier> ApisBuilder<'_, C> {
    /// Fold the group/version/kind index into the public tree and flatten the
    /// struct graph of each group.
    ///
    /// `unversioned_resources` and `pkg_path` are written once per resource, so
    /// when a kind exists in several versions the last version visited wins.
    pub(super) fn parse_apis(&self) -> Result<Apis> {
        let mut apis = Apis {
            domain: self.domain.clone(),
            package: self.apis_pkg.clone(),
            ..Default::default()
        };

        for (group, version_map) in &self.by_group_version_kind {
            let mut api_group = ApiGroup {
                group: group.clone(),
                group_title: pkgpath::title(group),
                domain: self.domain.clone(),
                ..Default::default()
            };

            for (version, kind_map) in version_map {
                let mut api_version = ApiVersion {
                    domain: self.domain.clone(),
                    group: group.clone(),
                    version: version.clone(),
                    ..Default::default()
                };
                for (kind, resource) in kind_map {
                    let versioned = resource.type_name.package.as_str();
                    let unversioned = pkgpath::dir(versioned);
                    if self.universe.package(unversioned).is_none() {
                        return Err(ModelError::MissingPackage {
                            path: unversioned.to_string(),
                        });
                    }
                    api_version.package = versioned.to_string();
                    api_group.pkg_path = unversioned.to_string();

                    api_version.resources.insert(kind.clone(), resource.clone());
                    api_group
                        .unversioned_resources
                        .insert(kind.clone(), resource.clone());
                }
                api_group.versions.insert(version.clone(), api_version);
            }

            api_group.structs = self.parse_structs(&api_group);
            tracing::info!(
                group = %group,
                versions = api_group.versions.len(),
                structs = api_group.structs.len(),
                "assembled API group"
            );
            apis.groups.insert(group.clone(), api_group);
        }
        Ok(apis)
    }
}
