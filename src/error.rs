use crate::universe::TypeName;
use std::fmt;
use thiserror::Error;

/// The three directive shapes recognized on type declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Resource,
    Controller,
    Subresource,
}

impl Directive {
    /// Comment tag name, without the leading `+`.
    pub fn tag(self) -> &'static str {
        match self {
            Directive::Resource => "resource",
            Directive::Controller => "controller",
            Directive::Subresource => "subresource",
        }
    }

    pub fn expected_keys(self) -> &'static str {
        match self {
            Directive::Resource => "[path=<resource>,rest=<restImplType>,strategy=<strategyType>]",
            Directive::Controller => "[group=<group>,version=<version>,kind=<kind>,resource=<resource>]",
            Directive::Subresource => {
                "[request=<requestType>,rest=<restImplType>,path=<subresourcepath>]"
            }
        }
    }

    pub fn recognized_keys(self) -> &'static [&'static str] {
        match self {
            Directive::Resource => &["rest", "path", "strategy"],
            Directive::Controller => &["group", "version", "kind", "resource"],
            Directive::Subresource => &["request", "rest", "path"],
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}", self.tag())
    }
}

/// Every way building the API model can fail. All of them abort the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("// {directive}: tags must be key value pairs.  Expected keys {} Got string: [{tag}]", .directive.expected_keys())]
    MalformedDirective { directive: Directive, tag: String },

    #[error("Must specify {directive} comment for type {type_name}")]
    MissingDirective {
        directive: Directive,
        type_name: TypeName,
    },

    #[error("Multiple subresources registered for path {path}: [{existing}] [{duplicate}]")]
    DuplicateSubresource {
        path: String,
        existing: String,
        duplicate: String,
    },

    #[error(
        "Found multiple apis directory paths: {first} and {second}.  Do you have a +resource tag on a resource that is not in a version directory?"
    )]
    MultipleApiRoots { first: String, second: String },

    #[error("Missing apis package.")]
    MissingRootPackage,

    #[error("Could not find string matching // +domain=.+ in the comments of package {package}")]
    MissingDomain { package: String },

    #[error("Package {path} is not part of the declaration universe")]
    MissingPackage { path: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
