//! Field synthesis: backing slots, presence flags, setters, and the
//! per-field policies the construction and copy synthesizers execute.

use crate::extract::ParameterInfo;
use crate::model::Visibility;

/// How `build()` treats a field whose presence flag is unset, decided once at
/// generation time from default-presence and nullability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyPolicy {
    /// No default, not nullable: unset is an error.
    Required,
    /// No default, nullable: unset is an error unless the builder was created
    /// in the allow-null-as-implicit-default mode, which passes null through.
    RequiredUnlessLenient,
    /// Declared default: an unset field is omitted from the invocation so the
    /// target's own default applies.
    OmitWhenUnset,
}

/// How the copy constructor obtains this field's value from a source
/// instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// Public backing property, read directly.
    Direct,
    /// Private backing property, read through an explicit accessibility
    /// override that fails loudly when the platform refuses it.
    PrivateOverride,
    /// No backing property; the copy path leaves the field unset.
    Skipped,
}

/// One builder field: a constructor parameter plus its generated names.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub parameter: ParameterInfo,
    /// Backing slot holding the value until `build()`.
    pub slot: String,
    /// Presence flag, tracked separately so a stored null still counts as
    /// set.
    pub presence: String,
}

impl FieldSpec {
    pub fn from_parameter(parameter: ParameterInfo) -> Self {
        let slot = format!("_{}", parameter.name);
        let presence = format!("_{}Set", parameter.name);
        FieldSpec {
            parameter,
            slot,
            presence,
        }
    }

    pub fn name(&self) -> &str {
        &self.parameter.name
    }

    /// Setter name matches the parameter name by convention.
    pub fn setter(&self) -> &str {
        &self.parameter.name
    }

    pub fn is_nullable(&self) -> bool {
        self.parameter.is_nullable()
    }

    /// Declared type of the backing slot. Slots start out null, so the slot
    /// type is always the nullable form.
    pub fn slot_type(&self) -> String {
        format!("{}?", self.parameter.signature.render_base())
    }

    /// Type taken by the fluent setter, nullable-qualified exactly when the
    /// field is nullable.
    pub fn setter_type(&self) -> String {
        self.parameter.signature.render()
    }

    pub fn assembly_policy(&self) -> AssemblyPolicy {
        if self.parameter.has_default {
            AssemblyPolicy::OmitWhenUnset
        } else if self.is_nullable() {
            AssemblyPolicy::RequiredUnlessLenient
        } else {
            AssemblyPolicy::Required
        }
    }

    pub fn copy_mode(&self) -> CopyMode {
        match self.parameter.backing {
            Some(Visibility::Public) => CopyMode::Direct,
            Some(Visibility::Private) => CopyMode::PrivateOverride,
            None => CopyMode::Skipped,
        }
    }
}

/// Turns extracted parameters into field specs, preserving order.
pub fn synthesize(parameters: Vec<ParameterInfo>) -> Vec<FieldSpec> {
    parameters.into_iter().map(FieldSpec::from_parameter).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::TypeSignature;

    fn info(nullable: bool, has_default: bool) -> ParameterInfo {
        let mut signature = TypeSignature::simple("kotlin.String");
        signature.nullable = nullable;
        ParameterInfo {
            name: "label".to_string(),
            signature,
            has_default,
            backing: None,
        }
    }

    #[test]
    fn test_generated_names() {
        let field = FieldSpec::from_parameter(info(false, false));
        assert_eq!(field.name(), "label");
        assert_eq!(field.setter(), "label");
        assert_eq!(field.slot, "_label");
        assert_eq!(field.presence, "_labelSet");
    }

    #[test]
    fn test_slot_is_always_nullable() {
        assert_eq!(FieldSpec::from_parameter(info(false, false)).slot_type(), "kotlin.String?");
        assert_eq!(FieldSpec::from_parameter(info(true, false)).slot_type(), "kotlin.String?");
    }

    #[test]
    fn test_setter_type_tracks_nullability() {
        assert_eq!(FieldSpec::from_parameter(info(false, false)).setter_type(), "kotlin.String");
        assert_eq!(FieldSpec::from_parameter(info(true, false)).setter_type(), "kotlin.String?");
    }

    #[test]
    fn test_assembly_policy_table() {
        assert_eq!(
            FieldSpec::from_parameter(info(false, false)).assembly_policy(),
            AssemblyPolicy::Required
        );
        assert_eq!(
            FieldSpec::from_parameter(info(true, false)).assembly_policy(),
            AssemblyPolicy::RequiredUnlessLenient
        );
        // A declared default wins over nullability either way.
        assert_eq!(
            FieldSpec::from_parameter(info(false, true)).assembly_policy(),
            AssemblyPolicy::OmitWhenUnset
        );
        assert_eq!(
            FieldSpec::from_parameter(info(true, true)).assembly_policy(),
            AssemblyPolicy::OmitWhenUnset
        );
    }

    #[test]
    fn test_copy_mode_follows_backing_visibility() {
        use crate::model::Visibility;

        let mut parameter = info(false, false);
        assert_eq!(FieldSpec::from_parameter(parameter.clone()).copy_mode(), CopyMode::Skipped);

        parameter.backing = Some(Visibility::Public);
        assert_eq!(FieldSpec::from_parameter(parameter.clone()).copy_mode(), CopyMode::Direct);

        parameter.backing = Some(Visibility::Private);
        assert_eq!(
            FieldSpec::from_parameter(parameter).copy_mode(),
            CopyMode::PrivateOverride
        );
    }
}
