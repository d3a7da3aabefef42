use super::ApisBuilder;
use crate::classify::Classifier;
use crate::error::{Directive, ModelError, Result};
use crate::model::Controller;
use crate::tags::parse_controller_tag;

impl<C: Classifier> ApisBuilder<'_, C> {
    /// Collect every `+controller=` binding.
    pub(super) fn parse_controllers(&mut self) -> Result<()> {
        for decl in self.declarations() {
            if !self.classifier.is_controller(decl) {
                continue;
            }
            let tag = decl
                .comments()
                .get_tag(Directive::Controller.tag(), "=")
                .filter(|t| !t.is_empty())
                .ok_or_else(|| ModelError::MissingDirective {
                    directive: Directive::Controller,
                    type_name: decl.type_name(),
                })?;
            let tags = parse_controller_tag(tag)?;
            let marker = self.config.controller_marker.as_str();
            let repo = if marker.is_empty() {
                decl.package.clone()
            } else {
                decl.package.split(marker).next().unwrap_or_default().to_string()
            };

            tracing::debug!(target_gvk = %tags.gvk, resource = %tags.resource, repo = %repo, "found controller");

            self.controllers.push(Controller {
                target: tags.gvk,
                resource: tags.resource,
                package: decl.package.clone(),
                repo,
            });
        }
        Ok(())
    }
}
