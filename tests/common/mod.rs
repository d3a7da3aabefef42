#![allow(dead_code, clippy::unwrap_used)]

pub mod fixtures {
    use apiregister::universe::{Declaration, Member, Package, TypeRef, Universe};

    pub const ROOT: &str = "example.com/apis";
    pub const CORE: &str = "example.com/apis/core";
    pub const CORE_V1: &str = "example.com/apis/core/v1";
    pub const CORE_V2: &str = "example.com/apis/core/v2";
    pub const STORAGE: &str = "example.com/apis/storage";
    pub const STORAGE_V1: &str = "example.com/apis/storage/v1";
    pub const META_V1: &str = "k8s.io/apimachinery/pkg/apis/meta/v1";

    /// Builder for a universe laid out as `<root>/<group>/<version>`.
    pub struct UniverseBuilder {
        packages: Vec<Package>,
    }

    impl UniverseBuilder {
        /// Root package carrying `+domain=example.com`.
        pub fn new() -> Self {
            let mut root = Package::new(ROOT);
            root.comment_lines.push("+domain=example.com".to_string());
            UniverseBuilder {
                packages: vec![root],
            }
        }

        pub fn without_root() -> Self {
            UniverseBuilder {
                packages: Vec::new(),
            }
        }

        pub fn package(mut self, path: &str) -> Self {
            self.packages.push(Package::new(path));
            self
        }

        /// Add a declaration, creating the versioned package and its unversioned
        /// parent when they are not there yet.
        pub fn decl(mut self, package: &str, decl: Declaration) -> Self {
            let parent = apiregister::pkgpath::dir(package).to_string();
            if parent != "." && !self.packages.iter().any(|p| p.path == parent) {
                self.packages.push(Package::new(parent));
            }
            match self.packages.iter_mut().find(|p| p.path == package) {
                Some(p) => p.types.push(decl),
                None => {
                    let mut p = Package::new(package);
                    p.types.push(decl);
                    self.packages.push(p);
                }
            }
            self
        }

        pub fn build(self) -> Universe {
            Universe::new(self.packages)
        }
    }

    pub fn resource(name: &str, tag: &str) -> Declaration {
        Declaration::new("", name).with_comment(format!("+resource={tag}"))
    }

    pub fn plain(name: &str) -> Declaration {
        Declaration::new("", name)
    }

    pub fn field(name: &str, ty: TypeRef) -> Member {
        Member::new(name, ty)
    }

    pub fn object_meta() -> Member {
        Member::new("ObjectMeta", TypeRef::named(META_V1, "ObjectMeta"))
    }
}

pub mod temp_files {
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Write `content` to `name` inside a fresh temporary directory.
    pub fn write(name: &str, content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }
}
