use super::ApisBuilder;
use crate::classify::Classifier;
use crate::error::{ModelError, Result};
use crate::pkgpath;

impl<C: Classifier> ApisBuilder<'_, C> {
    /// Collect versioned and unversioned packages and identify the API root.
    ///
    /// Resources live at `<root>/<group>/<version>`; every resource must agree
    /// on `<root>`.
    pub(super) fn parse_packages(&mut self) -> Result<()> {
        for decl in self.declarations() {
            if !self.classifier.is_api_resource(decl) {
                continue;
            }
            let versioned = decl.package.as_str();
            let unversioned = pkgpath::dir(versioned);
            let apis = pkgpath::dir(unversioned);

            self.versioned_pkgs.insert(versioned.to_string());
            self.unversioned_pkgs.insert(unversioned.to_string());

            if !self.apis_pkg.is_empty() && apis != self.apis_pkg {
                return Err(ModelError::MultipleApiRoots {
                    first: self.apis_pkg.clone(),
                    second: apis.to_string(),
                });
            }
            self.apis_pkg = apis.to_string();
        }
        tracing::debug!(
            apis = %self.apis_pkg,
            versioned = self.versioned_pkgs.len(),
            unversioned = self.unversioned_pkgs.len(),
            "parsed packages"
        );
        Ok(())
    }

    /// Read `+domain=` from the API root package.
    pub(super) fn parse_domain(&mut self) -> Result<()> {
        let pkg = self
            .universe
            .package(&self.apis_pkg)
            .filter(|_| !self.apis_pkg.is_empty())
            .ok_or(ModelError::MissingRootPackage)?;
        match pkg.comments().get_tag("domain", "=") {
            Some(domain) if !domain.is_empty() => {
                self.domain = domain.to_string();
                Ok(())
            }
            _ => Err(ModelError::MissingDomain {
                package: pkg.path.clone(),
            }),
        }
    }

    /// Group names are the base names of the unversioned packages that were loaded.
    pub(super) fn parse_group_names(&mut self) {
        self.group_names = self
            .unversioned_pkgs
            .iter()
            .filter(|p| self.universe.package(p).is_some())
            .map(|p| pkgpath::base(p).to_string())
            .collect();
    }
}
