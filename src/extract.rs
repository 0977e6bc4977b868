//! Constructor metadata extraction and builder-name resolution.
//!
//! Both are pure queries against the declaration model. They run first in a
//! generation pass; everything downstream works off their output.

use crate::error::GenerateError;
use crate::model::{ClassKind, DeclId, DeclarationResolver, Visibility};
use crate::signature::TypeSignature;

/// One canonical-constructor parameter, enriched for builder synthesis.
#[derive(Debug, Clone)]
pub struct ParameterInfo {
    pub name: String,
    pub signature: TypeSignature,
    pub has_default: bool,
    /// Visibility of the same-named declared property, if one backs this
    /// parameter. `None` means the parameter is constructor-only and takes no
    /// part in copy construction.
    pub backing: Option<Visibility>,
}

impl ParameterInfo {
    pub fn is_nullable(&self) -> bool {
        self.signature.nullable
    }
}

/// Extracts the ordered parameter list of the target's canonical constructor.
///
/// Fails when the target is not a concrete class, has no canonical
/// constructor, or declares a parameter that is unnamed, duplicated, or of an
/// unresolvable type.
pub fn extract<R: DeclarationResolver + ?Sized>(
    resolver: &R,
    target: DeclId,
) -> Result<Vec<ParameterInfo>, GenerateError> {
    let target_name = resolver.qualified_name(target);
    let kind = resolver.classification(target);
    if kind != ClassKind::Class {
        return Err(GenerateError::UnsupportedKind {
            target: target_name,
            kind,
        });
    }

    let parameters =
        resolver
            .canonical_constructor(target)
            .ok_or_else(|| GenerateError::MissingConstructor {
                target: target_name.clone(),
            })?;
    let properties = resolver.declared_properties(target);

    let mut infos: Vec<ParameterInfo> = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        if parameter.name.is_empty() {
            return Err(GenerateError::MissingParameterName {
                target: target_name,
            });
        }
        if infos.iter().any(|info| info.name == parameter.name) {
            return Err(GenerateError::DuplicateParameter {
                target: target_name,
                parameter: parameter.name.clone(),
            });
        }
        let signature = resolver.resolve_type(&parameter.signature).ok_or_else(|| {
            GenerateError::UnresolvedType {
                target: target_name.clone(),
                parameter: parameter.name.clone(),
            }
        })?;
        let backing = properties
            .iter()
            .find(|property| property.name == parameter.name)
            .map(|property| property.visibility);
        infos.push(ParameterInfo {
            name: parameter.name.clone(),
            signature,
            has_default: parameter.has_default,
            backing,
        });
    }
    Ok(infos)
}

/// Derives the builder's namespace and name for a target.
///
/// The name concatenates every simple name along the enclosing chain,
/// outermost first, and appends `Builder`. The namespace is the package of
/// the unit declaring the innermost type.
pub fn resolve_builder_name<R: DeclarationResolver + ?Sized>(
    resolver: &R,
    target: DeclId,
) -> Result<(String, String), GenerateError> {
    let kind = resolver.classification(target);
    if kind != ClassKind::Class {
        return Err(GenerateError::UnsupportedKind {
            target: resolver.qualified_name(target),
            kind,
        });
    }
    let mut name = String::new();
    for link in resolver.enclosing_chain(target) {
        name.push_str(resolver.simple_name(link));
    }
    name.push_str("Builder");
    Ok((resolver.package(target).to_string(), name))
}
