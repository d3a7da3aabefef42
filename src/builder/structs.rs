//! Struct graph flattening.
//!
//! Starting from every resource type and every subresource type of a group,
//! each type is flattened into a [`Struct`] and the non-primitive members that
//! belong to the same group are queued for flattening in turn. Types are
//! deduplicated by bare name, so two declarations named `Spec` in different
//! versions of one group produce a single struct (whichever is reached first).

use super::ApisBuilder;
use crate::classify::Classifier;
use crate::config::BuilderConfig;
use crate::model::{ApiGroup, Field, Struct};
use crate::pkgpath;
use crate::universe::{Declaration, TypeName, TypeRef};
use std::collections::{HashSet, VecDeque};

/// Display type and import of a member in the unversioned package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnversionedRef {
    pub ty: String,
    pub import: String,
}

/// Resolve how a member of `owner` is spelled from the unversioned package.
///
/// Members from the owner's own package keep their name. The shared metadata
/// package keeps its versioned type under the configured alias. Anything else
/// is rewritten to `<group>.<Name>` and imported from the parent directory of
/// its package; for pointers, slices and maps the rendered compound type is
/// kept and only the element's package qualifier is rewritten
/// (`[]*example.com/apis/core/v1.Gear` -> `[]*core.Gear`).
pub fn unversioned_reference(owner: &TypeName, ty: &TypeRef, config: &BuilderConfig) -> UnversionedRef {
    let mut result = UnversionedRef {
        ty: ty.name(),
        import: String::new(),
    };
    if owner.package == ty.package() {
        return result;
    }

    let rendered = ty.to_string();
    let base = pkgpath::base(&rendered);
    let mut parts = base.split('.');
    let (Some(_), Some(type_part)) = (parts.next(), parts.next()) else {
        return result;
    };

    if ty.package() == config.metadata_package {
        result.import = format!("{} \"{}\"", config.metadata_alias, config.metadata_package);
        result.ty = format!("{}.{}", config.metadata_alias, type_part);
        return result;
    }

    let mut target = ty;
    while let Some(elem) = target.elem() {
        target = elem;
    }
    let has_elem = !std::ptr::eq(target, ty);

    let import = pkgpath::dir(target.package()).to_string();
    result.ty = format!("{}.{}", pkgpath::base(&import), target.name());
    if has_elem {
        let strip_root = format!("{}/", pkgpath::dir(&import));
        let strip_version = format!("/{}", pkgpath::base(target.package()));
        result.ty = rendered
            .replacen(&strip_root, "", 1)
            .replacen(&strip_version, "", 1);
    }
    tracing::debug!(
        owner = %owner,
        member_type = %rendered,
        unversioned_import = %import,
        unversioned_type = %result.ty,
        "rewrote cross-package member"
    );
    result.import = import;
    result
}

/// Flatten one declaration into a [`Struct`].
///
/// Returns the struct together with the member types that must be flattened
/// next: non-primitive types in the same group as `decl`.
pub fn flatten_type<C: Classifier>(
    decl: &Declaration,
    classifier: &C,
    config: &BuilderConfig,
) -> (Struct, Vec<TypeName>) {
    let owner = decl.type_name();
    let owner_group = classifier.group(&owner);
    let mut remaining = Vec::new();

    let mut s = Struct {
        name: decl.name.clone(),
        gen_client: false,
        gen_unversioned: !decl.comments().contains(&config.unversioned_opt_out),
        ..Default::default()
    };

    for member in &decl.members {
        let reference = unversioned_reference(&owner, &member.ty, config);
        s.fields.push(Field {
            name: if member.embedded {
                String::new()
            } else {
                member.name.clone()
            },
            versioned_package: member.ty.package().to_string(),
            unversioned_import: reference.import,
            unversioned_type: reference.ty,
        });

        let member_name = member.ty.type_name();
        if !member.ty.is_primitive() && classifier.group(&member_name) == owner_group {
            remaining.push(member_name);
        }
    }
    (s, remaining)
}

impl<C: Classifier> ApisBuilder<'_, C> {
    /// Flatten the struct graph reachable from the group's resources and
    /// subresource types. A queued type missing from the universe becomes an
    /// empty struct.
    pub(super) fn parse_structs(&self, group: &ApiGroup) -> Vec<Struct> {
        let mut remaining: VecDeque<TypeName> = group
            .versions
            .values()
            .flat_map(|v| v.resources.values())
            .map(|r| r.type_name.clone())
            .collect();
        if let Some(versions) = self.sub_by_group_version_kind.get(&group.group) {
            remaining.extend(versions.values().flat_map(|kinds| kinds.values().cloned()));
        }

        let mut structs = Vec::new();
        let mut done: HashSet<String> = HashSet::new();
        while let Some(next) = remaining.pop_front() {
            if !done.insert(next.name.clone()) {
                continue;
            }
            let Some(decl) = self.universe.lookup(&next) else {
                tracing::warn!(
                    group = %group.group,
                    type_name = %next,
                    "type not in the universe, flattened without fields"
                );
                structs.push(Struct {
                    name: next.name,
                    gen_unversioned: true,
                    ..Default::default()
                });
                continue;
            };

            let (mut result, additional) = flatten_type(decl, &self.classifier, &self.config);
            if self.classifier.is_api_resource(decl) {
                result.gen_client = true;
                result.gen_deep_copy = true;
            }
            if self.classifier.is_api_subresource(decl) {
                result.gen_deep_copy = true;
            }
            tracing::debug!(
                group = %group.group,
                name = %result.name,
                fields = result.fields.len(),
                discovered = additional.len(),
                "flattened struct"
            );
            structs.push(result);
            remaining.extend(additional);
        }
        structs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORE_V1: &str = "example.com/apis/core/v1";
    const META_V1: &str = "k8s.io/apimachinery/pkg/apis/meta/v1";

    fn owner() -> TypeName {
        TypeName::new(CORE_V1, "Widget")
    }

    #[test]
    fn test_same_package_member_keeps_name() {
        let r = unversioned_reference(&owner(), &TypeRef::named(CORE_V1, "WidgetStatus"), &BuilderConfig::default());
        assert_eq!(r, UnversionedRef { ty: "WidgetStatus".into(), import: String::new() });
    }

    #[test]
    fn test_builtin_member_is_untouched() {
        let r = unversioned_reference(&owner(), &TypeRef::builtin("string"), &BuilderConfig::default());
        assert_eq!(r.ty, "string");
        assert!(r.import.is_empty());

        let slice = TypeRef::slice(TypeRef::builtin("string"));
        let r = unversioned_reference(&owner(), &slice, &BuilderConfig::default());
        assert_eq!(r.ty, "[]string");
        assert!(r.import.is_empty());
    }

    #[test]
    fn test_metadata_member_uses_alias() {
        let r = unversioned_reference(&owner(), &TypeRef::named(META_V1, "ObjectMeta"), &BuilderConfig::default());
        assert_eq!(r.ty, "metav1.ObjectMeta");
        assert_eq!(r.import, "metav1 \"k8s.io/apimachinery/pkg/apis/meta/v1\"");
    }

    #[test]
    fn test_other_package_member_is_unversioned() {
        let ty = TypeRef::named("example.com/apis/storage/v1beta1", "Volume");
        let r = unversioned_reference(&owner(), &ty, &BuilderConfig::default());
        assert_eq!(r.ty, "storage.Volume");
        assert_eq!(r.import, "example.com/apis/storage");
    }

    #[test]
    fn test_pointer_keeps_sigil() {
        let ty = TypeRef::pointer(TypeRef::named(CORE_V1, "WidgetSpec"));
        let r = unversioned_reference(&owner(), &ty, &BuilderConfig::default());
        assert_eq!(r.ty, "*core.WidgetSpec");
        assert_eq!(r.import, "example.com/apis/core");
    }

    #[test]
    fn test_slice_of_pointer_rewrites_element_only() {
        let ty = TypeRef::slice(TypeRef::pointer(TypeRef::named(
            "example.com/apis/storage/v1",
            "Volume",
        )));
        let r = unversioned_reference(&owner(), &ty, &BuilderConfig::default());
        assert_eq!(r.ty, "[]*storage.Volume");
        assert_eq!(r.import, "example.com/apis/storage");
    }

    #[test]
    fn test_map_value_is_rewritten() {
        let ty = TypeRef::map(
            TypeRef::builtin("string"),
            TypeRef::named("example.com/apis/storage/v1", "Volume"),
        );
        let r = unversioned_reference(&owner(), &ty, &BuilderConfig::default());
        assert_eq!(r.ty, "map[string]storage.Volume");
    }

    #[test]
    fn test_flatten_type_embedded_and_queue() {
        let decl = Declaration::new(CORE_V1, "Widget")
            .with_member(crate::universe::Member::embedded(TypeRef::named(META_V1, "TypeMeta")))
            .with_member(crate::universe::Member::new("Spec", TypeRef::named(CORE_V1, "WidgetSpec")))
            .with_member(crate::universe::Member::new("Count", TypeRef::builtin("int32")))
            .with_member(crate::universe::Member::new(
                "Parts",
                TypeRef::slice(TypeRef::named(CORE_V1, "Part")),
            ));
        let (s, next) = flatten_type(&decl, &crate::classify::TagClassifier, &BuilderConfig::default());

        assert_eq!(s.name, "Widget");
        assert!(s.gen_unversioned);
        assert_eq!(s.fields.len(), 4);
        assert_eq!(s.fields[0].name, "");
        assert_eq!(s.fields[0].unversioned_type, "metav1.TypeMeta");
        assert_eq!(s.fields[1].versioned_package, CORE_V1);
        assert_eq!(s.fields[3].versioned_package, "");
        // compound members have no group of their own and are not followed
        assert_eq!(next, vec![TypeName::new(CORE_V1, "WidgetSpec")]);
    }

    #[test]
    fn test_flatten_type_unversioned_opt_out() {
        let decl = Declaration::new(CORE_V1, "Internal").with_comment("+genregister:unversioned=false");
        let (s, next) = flatten_type(&decl, &crate::classify::TagClassifier, &BuilderConfig::default());
        assert!(!s.gen_unversioned);
        assert!(next.is_empty());
    }
}
