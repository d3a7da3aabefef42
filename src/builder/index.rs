use super::ApisBuilder;
use crate::classify::Classifier;
use crate::error::{Directive, ModelError, Result};
use crate::model::{ApiResource, ResourceIndex};
use crate::tags::parse_resource_tag;
use crate::universe::Declaration;

/// `<group>.<Kind>Strategy`, used when `+resource=` names no strategy.
pub fn default_strategy(group: &str, kind: &str) -> String {
    format!("{group}.{kind}Strategy")
}

/// The status strategy mirrors the main one: `FooStrategy` -> `FooStatusStrategy`.
pub fn status_strategy(strategy: &str) -> String {
    let stem = strategy.strip_suffix("Strategy").unwrap_or(strategy);
    format!("{stem}StatusStrategy")
}

fn insert(
    index: &mut ResourceIndex,
    a: &str,
    b: &str,
    c: &str,
    resource: ApiResource,
) -> Option<ApiResource> {
    index
        .entry(a.to_string())
        .or_default()
        .entry(b.to_string())
        .or_default()
        .insert(c.to_string(), resource)
}

impl<C: Classifier> ApisBuilder<'_, C> {
    /// Index every `+resource` declaration by group/version/kind and
    /// group/kind/version, and every subresource type by group/version/kind.
    ///
    /// A second declaration with the same group/version/kind replaces the
    /// first in both indices.
    pub(super) fn parse_index(&mut self) -> Result<()> {
        for decl in self.declarations() {
            if self.classifier.is_api_subresource(decl) {
                let name = decl.type_name();
                let group = self.classifier.group(&name);
                let version = self.classifier.version(&name, &group);
                let kind = self.classifier.kind(&name, &group);
                self.sub_by_group_version_kind
                    .entry(group)
                    .or_default()
                    .entry(version)
                    .or_default()
                    .insert(kind, name);
            }

            if !self.classifier.is_api_resource(decl) {
                continue;
            }

            let mut r = self.new_resource(decl)?;
            if self.classifier.has_subresource(decl) {
                r.subresources = self.get_subresources(&r, decl)?;
            }

            tracing::debug!(
                group = %r.group,
                version = %r.version,
                kind = %r.kind,
                resource = %r.resource,
                subresources = r.subresources.len(),
                "indexed resource"
            );

            let (group, version, kind) = (r.group.clone(), r.version.clone(), r.kind.clone());
            insert(&mut self.by_group_kind_version, &group, &kind, &version, r.clone());
            if let Some(previous) =
                insert(&mut self.by_group_version_kind, &group, &version, &kind, r)
            {
                tracing::warn!(
                    group = %group,
                    version = %version,
                    kind = %kind,
                    replaced = %previous.type_name,
                    "duplicate resource declaration, keeping the last one"
                );
            }
        }
        Ok(())
    }

    fn new_resource(&self, decl: &Declaration) -> Result<ApiResource> {
        let name = decl.type_name();
        let group = self.classifier.group(&name);
        let version = self.classifier.version(&name, &group);
        let kind = self.classifier.kind(&name, &group);

        let tag = decl
            .comments()
            .get_tag(Directive::Resource.tag(), "=")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ModelError::MissingDirective {
                directive: Directive::Resource,
                type_name: name.clone(),
            })?;
        let tags = parse_resource_tag(tag)?;

        let strategy = if tags.strategy.is_empty() {
            default_strategy(&group, &kind)
        } else {
            tags.strategy
        };

        Ok(ApiResource {
            domain: self.domain.clone(),
            status_strategy: status_strategy(&strategy),
            strategy,
            resource: tags.resource,
            rest: tags.rest,
            non_namespaced: self.classifier.is_non_namespaced(decl),
            type_name: name,
            group,
            version,
            kind,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_defaults() {
        assert_eq!(default_strategy("core", "Widget"), "core.WidgetStrategy");
        assert_eq!(status_strategy("core.WidgetStrategy"), "core.WidgetStatusStrategy");
        assert_eq!(status_strategy("custom.Handler"), "custom.HandlerStatusStrategy");
    }
}
