//! Project description files: the host-side input that stands in for a
//! compiler's symbol discovery.
//!
//! A project file is JSON: one package, a tree of class declarations, and a
//! `builder` flag marking the generation targets. Type signatures are written
//! in the canonical text form and parsed on load.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{ClassKind, DeclId, Declaration, Model, Parameter, Property, Visibility};
use crate::signature::{self, SignatureError};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("could not read project file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse project file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid type signature `{text}` on `{owner}`: {source}")]
    Signature {
        owner: String,
        text: String,
        #[source]
        source: SignatureError,
    },
}

/// Visibility of the property a constructor parameter declares, if any.
/// Defaults to public, the common `val`-parameter case; `none` marks a
/// constructor-only parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyBinding {
    #[default]
    Public,
    Private,
    None,
}

#[derive(Debug, Deserialize)]
pub struct ParameterEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub signature: String,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub property: PropertyBinding,
}

/// A property declared outside the constructor.
#[derive(Debug, Deserialize)]
pub struct PropertyEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub signature: String,
    #[serde(default)]
    pub visibility: Visibility,
}

#[derive(Debug, Deserialize)]
pub struct ClassEntry {
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    /// Marks this declaration as a generation target.
    #[serde(default)]
    pub builder: bool,
    #[serde(default)]
    pub constructor: Option<Vec<ParameterEntry>>,
    #[serde(default)]
    pub properties: Vec<PropertyEntry>,
    /// Nested declarations.
    #[serde(default)]
    pub classes: Vec<ClassEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectFile {
    pub package: String,
    #[serde(default)]
    pub classes: Vec<ClassEntry>,
}

/// A loaded project: the declaration model plus the marked targets in file
/// order.
#[derive(Debug)]
pub struct Project {
    pub model: Model,
    pub targets: Vec<DeclId>,
}

pub fn load(path: &Path) -> Result<Project, ProjectError> {
    let data = std::fs::read_to_string(path)?;
    from_str(&data)
}

pub fn from_str(data: &str) -> Result<Project, ProjectError> {
    let file: ProjectFile = serde_json::from_str(data)?;
    let mut model = Model::new();
    let mut targets = Vec::new();
    for class in &file.classes {
        insert_class(&mut model, &mut targets, &file.package, &file.package, class, None)?;
    }
    Ok(Project { model, targets })
}

fn insert_class(
    model: &mut Model,
    targets: &mut Vec<DeclId>,
    package: &str,
    enclosing: &str,
    entry: &ClassEntry,
    parent: Option<DeclId>,
) -> Result<(), ProjectError> {
    let owner = if enclosing.is_empty() {
        entry.name.clone()
    } else {
        format!("{}.{}", enclosing, entry.name)
    };

    let mut declaration = Declaration::new(package, &entry.name, entry.kind);
    if let Some(parent) = parent {
        declaration = declaration.nested_in(parent);
    }
    if let Some(parameters) = &entry.constructor {
        let mut params = Vec::with_capacity(parameters.len());
        let mut bound_properties = Vec::new();
        for parameter in parameters {
            let signature = parse_signature(&owner, &parameter.signature)?;
            match parameter.property {
                PropertyBinding::Public => {
                    bound_properties.push(Property::public(&parameter.name, signature.clone()));
                }
                PropertyBinding::Private => {
                    bound_properties.push(Property::private(&parameter.name, signature.clone()));
                }
                PropertyBinding::None => {}
            }
            let mut param = Parameter::new(&parameter.name, signature);
            if parameter.default {
                param = param.with_default();
            }
            params.push(param);
        }
        declaration = declaration.constructor(params);
        for property in bound_properties {
            declaration = declaration.property(property);
        }
    }
    for property in &entry.properties {
        let signature = parse_signature(&owner, &property.signature)?;
        declaration = declaration.property(Property {
            name: property.name.clone(),
            signature,
            visibility: property.visibility,
        });
    }

    let id = model.insert(declaration);
    if entry.builder {
        targets.push(id);
    }
    for nested in &entry.classes {
        insert_class(model, targets, package, &owner, nested, Some(id))?;
    }
    Ok(())
}

fn parse_signature(
    owner: &str,
    text: &str,
) -> Result<crate::signature::TypeSignature, ProjectError> {
    signature::parse(text).map_err(|source| ProjectError::Signature {
        owner: owner.to_string(),
        text: text.to_string(),
        source,
    })
}
