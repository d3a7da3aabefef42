//! # Declaration Universe
//!
//! The read-only snapshot of type declarations the model builder runs over.
//! The universe is produced by an external loader (source parsing and comment
//! attachment happen elsewhere) and handed over either in memory or as a
//! YAML/JSON snapshot via [`load_universe`].
//!
//! Declarations are visited in package order, then in declaration order within
//! each package. Nothing in this module is mutated once [`Universe::new`]
//! returns.

mod comments;
mod load;
mod types;

pub use comments::Comments;
pub use load::*;
pub use types::*;

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Universe {
    packages: Vec<Package>,
    by_path: HashMap<String, usize>,
}

impl Universe {
    /// Assemble a universe. Packages listed more than once are merged in order,
    /// and every declaration is stamped with its enclosing package path.
    pub fn new(packages: impl IntoIterator<Item = Package>) -> Self {
        let mut universe = Universe::default();
        for mut pkg in packages {
            for decl in &mut pkg.types {
                decl.package = pkg.path.clone();
            }
            match universe.by_path.get(&pkg.path) {
                Some(&idx) => {
                    let existing = &mut universe.packages[idx];
                    existing.comment_lines.extend(pkg.comment_lines);
                    existing.types.extend(pkg.types);
                }
                None => {
                    universe.by_path.insert(pkg.path.clone(), universe.packages.len());
                    universe.packages.push(pkg);
                }
            }
        }
        universe
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn package(&self, path: &str) -> Option<&Package> {
        self.by_path.get(path).map(|&idx| &self.packages[idx])
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.packages.iter().flat_map(|p| p.types.iter())
    }

    pub fn lookup(&self, name: &TypeName) -> Option<&Declaration> {
        self.package(&name.package)?
            .types
            .iter()
            .find(|d| d.name == name.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_packages_are_merged() {
        let mut a = Package::new("example.com/apis/core/v1");
        a.types.push(Declaration::new("", "Widget"));
        let mut b = Package::new("example.com/apis/core/v1");
        b.types.push(Declaration::new("", "Gadget"));
        b.comment_lines.push("+groupName=core".to_string());

        let u = Universe::new(vec![a, b]);
        assert_eq!(u.packages().len(), 1);
        assert_eq!(u.declarations().count(), 2);
        let gadget = u
            .lookup(&TypeName::new("example.com/apis/core/v1", "Gadget"))
            .unwrap();
        assert_eq!(gadget.package, "example.com/apis/core/v1");
        assert_eq!(
            u.package("example.com/apis/core/v1").unwrap().comment_lines.len(),
            1
        );
    }

    #[test]
    fn test_lookup_misses_unknown_package() {
        let u = Universe::new(vec![Package::new("example.com/apis")]);
        assert!(u.lookup(&TypeName::new("example.com/other", "X")).is_none());
    }
}
