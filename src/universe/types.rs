use serde::{Deserialize, Serialize};
use std::fmt;

use super::comments::Comments;

/// Identity of a named type: its import path plus its bare name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct TypeName {
    /// Import path of the declaring package (empty for builtins and compound types)
    #[serde(default)]
    pub package: String,
    /// Bare type name (`Widget`), or the rendered form for compound types
    pub name: String,
}

impl TypeName {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeName {
            package: package.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.package, self.name)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Struct,
    Builtin,
    Alias,
    Interface,
    Pointer,
    Slice,
    Map,
}

impl TypeKind {
    /// Pointer, slice and map types wrap an element and have no package of their own.
    pub fn is_compound(self) -> bool {
        matches!(self, TypeKind::Pointer | TypeKind::Slice | TypeKind::Map)
    }
}

/// Type descriptor attached to a struct member.
///
/// Named kinds carry `package` and `name`; compound kinds carry `elem` (and
/// `key` for maps) and derive their name from the rendered form, e.g.
/// `[]*example.com/apis/core/v1.Widget`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TypeRef {
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elem: Option<Box<TypeRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Box<TypeRef>>,
}

impl TypeRef {
    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeRef {
            kind: TypeKind::Struct,
            package: package.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn builtin(name: impl Into<String>) -> Self {
        TypeRef {
            kind: TypeKind::Builtin,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn alias(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeRef {
            kind: TypeKind::Alias,
            ..TypeRef::named(package, name)
        }
    }

    pub fn pointer(elem: TypeRef) -> Self {
        TypeRef {
            kind: TypeKind::Pointer,
            elem: Some(Box::new(elem)),
            ..Default::default()
        }
    }

    pub fn slice(elem: TypeRef) -> Self {
        TypeRef {
            kind: TypeKind::Slice,
            elem: Some(Box::new(elem)),
            ..Default::default()
        }
    }

    pub fn map(key: TypeRef, elem: TypeRef) -> Self {
        TypeRef {
            kind: TypeKind::Map,
            key: Some(Box::new(key)),
            elem: Some(Box::new(elem)),
            ..Default::default()
        }
    }

    /// Own package; always empty for compound kinds.
    pub fn package(&self) -> &str {
        if self.kind.is_compound() {
            ""
        } else {
            &self.package
        }
    }

    /// Own name; the rendered form for compound kinds.
    pub fn name(&self) -> String {
        if self.kind.is_compound() {
            self.to_string()
        } else {
            self.name.clone()
        }
    }

    pub fn type_name(&self) -> TypeName {
        TypeName::new(self.package(), self.name())
    }

    pub fn elem(&self) -> Option<&TypeRef> {
        self.elem.as_deref()
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == TypeKind::Builtin
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elem = |f: &mut fmt::Formatter<'_>| match &self.elem {
            Some(e) => write!(f, "{e}"),
            None => Ok(()),
        };
        match self.kind {
            TypeKind::Pointer => {
                write!(f, "*")?;
                elem(f)
            }
            TypeKind::Slice => {
                write!(f, "[]")?;
                elem(f)
            }
            TypeKind::Map => {
                write!(f, "map[")?;
                if let Some(k) = &self.key {
                    write!(f, "{k}")?;
                }
                write!(f, "]")?;
                elem(f)
            }
            _ => write!(f, "{}", TypeName::new(self.package.as_str(), self.name.as_str())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(default)]
    pub embedded: bool,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Member {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Member {
            name: name.into(),
            embedded: false,
            ty,
        }
    }

    pub fn embedded(ty: TypeRef) -> Self {
        Member {
            name: ty.name(),
            embedded: true,
            ty,
        }
    }
}

/// A type declaration as handed over by the declaration loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Declaration {
    /// Filled in from the enclosing package when the universe is assembled
    #[serde(default)]
    pub package: String,
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default, rename = "comments")]
    pub comment_lines: Vec<String>,
}

impl Declaration {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Declaration {
            package: package.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_comment(mut self, line: impl Into<String>) -> Self {
        self.comment_lines.push(line.into());
        self
    }

    pub fn type_name(&self) -> TypeName {
        TypeName::new(self.package.as_str(), self.name.as_str())
    }

    pub fn comments(&self) -> Comments<'_> {
        Comments::new(&self.comment_lines)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Package {
    pub path: String,
    #[serde(default, rename = "comments")]
    pub comment_lines: Vec<String>,
    #[serde(default)]
    pub types: Vec<Declaration>,
}

impl Package {
    pub fn new(path: impl Into<String>) -> Self {
        Package {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn comments(&self) -> Comments<'_> {
        Comments::new(&self.comment_lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORE_V1: &str = "example.com/apis/core/v1";

    #[test]
    fn test_named_type_rendering() {
        let t = TypeRef::named(CORE_V1, "Widget");
        assert_eq!(t.to_string(), "example.com/apis/core/v1.Widget");
        assert_eq!(t.package(), CORE_V1);
        assert_eq!(t.name(), "Widget");
        assert_eq!(TypeRef::builtin("string").to_string(), "string");
    }

    #[test]
    fn test_compound_types_have_no_package() {
        let ptr = TypeRef::pointer(TypeRef::named(CORE_V1, "Widget"));
        assert_eq!(ptr.package(), "");
        assert_eq!(ptr.name(), "*example.com/apis/core/v1.Widget");

        let slice = TypeRef::slice(TypeRef::pointer(TypeRef::named(CORE_V1, "Widget")));
        assert_eq!(slice.to_string(), "[]*example.com/apis/core/v1.Widget");

        let map = TypeRef::map(TypeRef::builtin("string"), TypeRef::named(CORE_V1, "Widget"));
        assert_eq!(map.to_string(), "map[string]example.com/apis/core/v1.Widget");
        assert!(!map.is_primitive());
    }

    #[test]
    fn test_embedded_member_takes_type_name() {
        let m = Member::embedded(TypeRef::named("k8s.io/apimachinery/pkg/apis/meta/v1", "TypeMeta"));
        assert!(m.embedded);
        assert_eq!(m.name, "TypeMeta");
    }
}
