//! Directive tag grammar.
//!
//! A directive body is a comma separated list of `key=value` pairs:
//!
//! ```text
//! +resource=path=<plural>,rest=<RESTImplName>,strategy=<StrategyName>
//! +controller=group=<g>,version=<v>,kind=<k>,resource=<plural>
//! +subresource=request=<TypeName|pkg.TypeName>,rest=<RESTImplName>,path=<parentPlural>/<segment>
//! ```
//!
//! Every element must contain exactly one `=`. Keys a shape does not know are
//! accepted and dropped so older generators keep working against newer
//! annotations.

use crate::error::{Directive, ModelError, Result};
use serde::Serialize;
use std::fmt;

/// Split a tag body into its `(key, value)` pairs.
pub fn key_value_pairs(directive: Directive, tag: &str) -> Result<Vec<(&str, &str)>> {
    tag.split(',')
        .map(|elem| {
            let mut kv = elem.split('=');
            match (kv.next(), kv.next(), kv.next()) {
                (Some(k), Some(v), None) => Ok((k, v)),
                _ => Err(ModelError::MalformedDirective {
                    directive,
                    tag: tag.to_string(),
                }),
            }
        })
        .collect()
}

/// Keys present in `tag` that `directive` does not recognize.
pub fn unknown_keys(directive: Directive, tag: &str) -> Result<Vec<String>> {
    let known = directive.recognized_keys();
    Ok(key_value_pairs(directive, tag)?
        .into_iter()
        .filter(|(k, _)| !known.contains(k))
        .map(|(k, _)| k.to_string())
        .collect())
}

/// The values of a `+resource=` comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTags {
    /// Plural path segment, from `path=`
    pub resource: String,
    pub rest: String,
    pub strategy: String,
}

pub fn parse_resource_tag(tag: &str) -> Result<ResourceTags> {
    let mut result = ResourceTags::default();
    for (key, value) in key_value_pairs(Directive::Resource, tag)? {
        match key {
            "rest" => result.rest = value.to_string(),
            "path" => result.resource = value.to_string(),
            "strategy" => result.strategy = value.to_string(),
            _ => {}
        }
    }
    Ok(result)
}

impl fmt::Display for ResourceTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pairs(
            f,
            &[
                ("path", &self.resource),
                ("rest", &self.rest),
                ("strategy", &self.strategy),
            ],
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}, Kind={}", self.group, self.version, self.kind)
    }
}

/// The values of a `+controller=` comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerTags {
    pub gvk: GroupVersionKind,
    pub resource: String,
}

pub fn parse_controller_tag(tag: &str) -> Result<ControllerTags> {
    let mut result = ControllerTags::default();
    for (key, value) in key_value_pairs(Directive::Controller, tag)? {
        match key {
            "group" => result.gvk.group = value.to_string(),
            "version" => result.gvk.version = value.to_string(),
            "kind" => result.gvk.kind = value.to_string(),
            "resource" => result.resource = value.to_string(),
            _ => {}
        }
    }
    Ok(result)
}

/// The values of a `+subresource=` comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubresourceTags {
    /// Path with every `<parent>/` occurrence removed
    pub path: String,
    pub request_kind: String,
    pub rest: String,
}

/// Parse a subresource tag belonging to the resource whose plural is `parent_resource`.
pub fn parse_subresource_tag(parent_resource: &str, tag: &str) -> Result<SubresourceTags> {
    let mut result = SubresourceTags::default();
    let parent_prefix = format!("{parent_resource}/");
    for (key, value) in key_value_pairs(Directive::Subresource, tag)? {
        match key {
            "request" => result.request_kind = value.to_string(),
            "rest" => result.rest = value.to_string(),
            "path" => result.path = value.replace(&parent_prefix, ""),
            _ => {}
        }
    }
    Ok(result)
}

impl fmt::Display for SubresourceTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pairs(
            f,
            &[
                ("request", &self.request_kind),
                ("rest", &self.rest),
                ("path", &self.path),
            ],
        )
    }
}

fn write_pairs(f: &mut fmt::Formatter<'_>, pairs: &[(&str, &String)]) -> fmt::Result {
    let mut first = true;
    for (key, value) in pairs.iter().filter(|(_, v)| !v.is_empty()) {
        if !first {
            write!(f, ",")?;
        }
        write!(f, "{key}={value}")?;
        first = false;
    }
    Ok(())
}
