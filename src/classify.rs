//! Declaration classification.
//!
//! The builder never inspects comment markers directly to decide what a
//! declaration is; it asks a [`Classifier`]. [`TagClassifier`] implements the
//! apiserver-builder conventions and is what the CLI uses. Custom loaders can
//! supply their own implementation.

use crate::pkgpath;
use crate::universe::{Declaration, TypeName};

pub trait Classifier {
    /// Declaration is an API resource (`+resource`).
    fn is_api_resource(&self, decl: &Declaration) -> bool;
    /// Declaration is a controller binding (`+controller`).
    fn is_controller(&self, decl: &Declaration) -> bool;
    /// Declaration is a subresource request/response type (`+subresource-request`).
    fn is_api_subresource(&self, decl: &Declaration) -> bool;
    /// Declaration is a resource that carries subresource directives.
    fn has_subresource(&self, decl: &Declaration) -> bool;
    fn is_non_namespaced(&self, decl: &Declaration) -> bool;

    fn group(&self, name: &TypeName) -> String;
    fn version(&self, name: &TypeName, group: &str) -> String;
    fn kind(&self, name: &TypeName, group: &str) -> String;
}

/// Classifier driven by comment markers and the `<root>/<group>/<version>` layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagClassifier;

impl Classifier for TagClassifier {
    fn is_api_resource(&self, decl: &Declaration) -> bool {
        decl.comments().has_tag("resource")
    }

    fn is_controller(&self, decl: &Declaration) -> bool {
        decl.comments().has_tag("controller")
    }

    fn is_api_subresource(&self, decl: &Declaration) -> bool {
        decl.comments().has_tag("subresource-request")
    }

    fn has_subresource(&self, decl: &Declaration) -> bool {
        self.is_api_resource(decl) && decl.comments().has_tag("subresource")
    }

    fn is_non_namespaced(&self, decl: &Declaration) -> bool {
        self.is_api_resource(decl) && decl.comments().contains("+genclient:nonNamespaced")
    }

    fn group(&self, name: &TypeName) -> String {
        pkgpath::base(pkgpath::dir(&name.package)).to_string()
    }

    fn version(&self, name: &TypeName, _group: &str) -> String {
        pkgpath::base(&name.package).to_string()
    }

    fn kind(&self, name: &TypeName, _group: &str) -> String {
        name.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORE_V1: &str = "example.com/apis/core/v1";

    #[test]
    fn test_gvk_from_layout() {
        let c = TagClassifier;
        let name = TypeName::new(CORE_V1, "Widget");
        let group = c.group(&name);
        assert_eq!(group, "core");
        assert_eq!(c.version(&name, &group), "v1");
        assert_eq!(c.kind(&name, &group), "Widget");
    }

    #[test]
    fn test_compound_and_builtin_types_have_no_group() {
        let c = TagClassifier;
        assert_eq!(c.group(&TypeName::new("", "string")), ".");
    }

    #[test]
    fn test_predicates() {
        let c = TagClassifier;
        let widget = Declaration::new(CORE_V1, "Widget")
            .with_comment("+genclient:nonNamespaced")
            .with_comment("+resource=path=widgets")
            .with_comment("+subresource=request=ScaleRequest,path=widgets/scale");
        assert!(c.is_api_resource(&widget));
        assert!(c.has_subresource(&widget));
        assert!(c.is_non_namespaced(&widget));
        assert!(!c.is_controller(&widget));
        assert!(!c.is_api_subresource(&widget));

        let request = Declaration::new(CORE_V1, "ScaleRequest").with_comment("+subresource-request");
        assert!(c.is_api_subresource(&request));
        assert!(!c.is_api_resource(&request));
        assert!(!c.has_subresource(&request));
        assert!(!c.is_non_namespaced(&request));
    }
}
