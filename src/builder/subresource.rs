use super::ApisBuilder;
use crate::classify::Classifier;
use crate::error::{Directive, ModelError, Result};
use crate::model::{ApiResource, ApiSubresource};
use crate::pkgpath;
use crate::tags::parse_subresource_tag;
use crate::universe::Declaration;
use std::collections::BTreeMap;

/// Split an out-of-package request type `example.com/apis/scale/v1.Scale`
/// into the display name `v1.Scale` and the import path `example.com/apis/scale/v1`.
///
/// Returns `None` for package-local names (no `.`).
pub fn split_request_type(request: &str) -> Option<(String, String)> {
    let last = request.rfind('.')?;
    let import_package = &request[..last];
    let bare = &request[last + 1..];
    let name = format!("{}.{}", pkgpath::base(import_package), bare);
    Some((name, import_package.to_string()))
}

impl<C: Classifier> ApisBuilder<'_, C> {
    /// Resolve every `+subresource=` directive on the resource's declaration.
    ///
    /// Two directives resolving to the same path are rejected.
    pub(super) fn get_subresources(
        &self,
        resource: &ApiResource,
        decl: &Declaration,
    ) -> Result<BTreeMap<String, ApiSubresource>> {
        let mut result = BTreeMap::new();
        let mut raw_by_path: BTreeMap<String, &str> = BTreeMap::new();

        for raw in decl.comments().get_tags(Directive::Subresource.tag(), "=") {
            let tags = parse_subresource_tag(&resource.resource, raw)?;
            let mut sr = ApiSubresource {
                domain: self.domain.clone(),
                group: resource.group.clone(),
                version: resource.version.clone(),
                kind: resource.kind.clone(),
                resource: resource.resource.clone(),
                request: tags.request_kind,
                rest: tags.rest,
                path: tags.path,
                import_package: String::new(),
            };
            if let Some((request, import_package)) = split_request_type(&sr.request) {
                sr.request = request;
                sr.import_package = import_package;
            }

            if let Some(existing) = raw_by_path.get(&sr.path) {
                return Err(ModelError::DuplicateSubresource {
                    path: sr.path,
                    existing: existing.to_string(),
                    duplicate: raw.to_string(),
                });
            }
            raw_by_path.insert(sr.path.clone(), raw);
            result.insert(sr.path.clone(), sr);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_request_type() {
        assert_eq!(split_request_type("ScaleRequest"), None);
        assert_eq!(
            split_request_type("k8s.io/api/autoscaling/v1.Scale"),
            Some((
                "v1.Scale".to_string(),
                "k8s.io/api/autoscaling/v1".to_string()
            ))
        );
    }
}
