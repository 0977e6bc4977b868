//! Builder synthesis: turns extracted metadata into one generated source
//! unit containing the builder class, its fluent setters, the keyed
//! `build()` operation, and optionally a copy constructor.

use crate::emit::{GeneratedUnit, SourceWriter};
use crate::error::GenerateError;
use crate::extract;
use crate::field::{self, AssemblyPolicy, CopyMode, FieldSpec};
use crate::model::{DeclId, DeclarationResolver};

/// Per-pass generation options.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Emit the constructor that seeds a builder from an existing instance.
    pub copy_constructor: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            copy_constructor: true,
        }
    }
}

/// Everything the emitter needs for one builder, derived once per target.
#[derive(Debug)]
pub struct BuilderSpec {
    pub package: String,
    pub name: String,
    /// Qualified name of the target type.
    pub target: String,
    pub fields: Vec<FieldSpec>,
    pub copy_constructor: bool,
}

/// Derives the [`BuilderSpec`] for a target without emitting it.
pub fn builder_spec<R: DeclarationResolver + ?Sized>(
    resolver: &R,
    target: DeclId,
    options: &GenerateOptions,
) -> Result<BuilderSpec, GenerateError> {
    let (package, name) = extract::resolve_builder_name(resolver, target)?;
    let parameters = extract::extract(resolver, target)?;
    let spec = BuilderSpec {
        package,
        name,
        target: resolver.qualified_name(target),
        fields: field::synthesize(parameters),
        copy_constructor: options.copy_constructor,
    };
    tracing::debug!(
        target_type = %spec.target,
        builder = %spec.name,
        fields = spec.fields.len(),
        "synthesized builder spec"
    );
    Ok(spec)
}

/// Generates the builder source unit for one target.
pub fn generate<R: DeclarationResolver + ?Sized>(
    resolver: &R,
    target: DeclId,
    options: &GenerateOptions,
) -> Result<GeneratedUnit, GenerateError> {
    let spec = builder_spec(resolver, target, options)?;
    Ok(emit(&spec))
}

/// Generates every listed target, isolating failures per target so one
/// failing declaration does not block the rest.
pub fn generate_all<R: DeclarationResolver + ?Sized>(
    resolver: &R,
    targets: &[DeclId],
    options: &GenerateOptions,
) -> Vec<(DeclId, Result<GeneratedUnit, GenerateError>)> {
    targets
        .iter()
        .map(|&target| (target, generate(resolver, target, options)))
        .collect()
}

/// Serializes a [`BuilderSpec`] to its source unit. Deterministic: the same
/// spec always yields byte-identical text.
pub fn emit(spec: &BuilderSpec) -> GeneratedUnit {
    let mut w = SourceWriter::new();

    if !spec.package.is_empty() {
        w.line(&format!("package {}", spec.package));
        w.blank();
    }
    w.line("import kotlin.reflect.KParameter");
    w.line("import kotlin.reflect.full.primaryConstructor");
    if spec.copy_constructor && spec.fields.iter().any(|f| f.copy_mode() == CopyMode::PrivateOverride)
    {
        w.line("import kotlin.reflect.full.memberProperties");
        w.line("import kotlin.reflect.jvm.isAccessible");
    }
    w.blank();

    w.open(&format!(
        "class {} @JvmOverloads constructor(private val allowNullAsImplicitDefault: Boolean = false) {{",
        spec.name
    ));
    if spec.copy_constructor {
        emit_copy_constructor(&mut w, spec);
        w.blank();
    }
    emit_fields_and_setters(&mut w, spec);
    emit_build_method(&mut w, spec);
    w.close("}");

    GeneratedUnit {
        package: spec.package.clone(),
        name: spec.name.clone(),
        text: w.finish(),
    }
}

/// Copy constructor: seeds the builder from an existing instance. Public
/// backing properties are read directly; private ones go through an explicit
/// accessibility override that fails loudly when the lookup comes back
/// empty. Constructor-only parameters are left unset.
fn emit_copy_constructor(w: &mut SourceWriter, spec: &BuilderSpec) {
    w.open(&format!(
        "@JvmOverloads constructor(other: {}, allowNullAsImplicitDefault: Boolean = false) : this(allowNullAsImplicitDefault) {{",
        spec.target
    ));
    for field in &spec.fields {
        match field.copy_mode() {
            CopyMode::Direct => {
                w.line(&format!("this.{}(other.{})", field.setter(), field.name()));
            }
            CopyMode::PrivateOverride => {
                w.open(&format!(
                    "{}::class.memberProperties.find {{ it.name == \"{}\" }}?.also {{",
                    spec.target,
                    field.name()
                ));
                w.line("it.isAccessible = true");
                w.line(&format!(
                    "this.{}(it.get(other) as {})",
                    field.setter(),
                    field.setter_type()
                ));
                w.close(&format!(
                    "}} ?: error(\"Could not read property '{}' of {}\")",
                    field.name(),
                    spec.target
                ));
            }
            CopyMode::Skipped => {}
        }
    }
    w.close("}");
}

/// Per field: a nullable backing slot, a presence flag, and a fluent setter
/// that stores the value, marks presence, and returns the builder.
fn emit_fields_and_setters(w: &mut SourceWriter, spec: &BuilderSpec) {
    for field in &spec.fields {
        w.line(&format!(
            "private var {}: {} = null",
            field.slot,
            field.slot_type()
        ));
        w.line(&format!("private var {}: Boolean = false", field.presence));
        w.open(&format!(
            "fun {}({}: {}): {} = apply {{",
            field.setter(),
            field.name(),
            field.setter_type(),
            spec.name
        ));
        w.line(&format!("this.{} = true", field.presence));
        w.line(&format!("this.{} = {}", field.slot, field.name()));
        w.close("}");
        w.blank();
    }
}

/// The keyed `build()`: presence checks first, then per-parameter argument
/// assembly as an explicit conditional chain, then a single by-name
/// invocation of the target's primary constructor. An unset defaulted
/// parameter never enters the argument map, so the target's own default
/// applies.
fn emit_build_method(w: &mut SourceWriter, spec: &BuilderSpec) {
    w.open(&format!("fun build(): {} {{", spec.target));
    w.line(&format!(
        "val primaryConstructor = {}::class.primaryConstructor ?: error(\"There is no primary constructor present in class {}\")",
        spec.target, spec.target
    ));
    w.line("val arguments = mutableMapOf<KParameter, Any?>()");
    w.line("val constructorParameters = primaryConstructor.parameters.associateBy { it.name ?: error(\"Could not get name for parameter in primary constructor\") }");
    for field in &spec.fields {
        // A non-nullable slot is unwrapped on the way out; a nullable one may
        // legitimately hold null.
        let value = if field.is_nullable() {
            field.slot.clone()
        } else {
            format!("{}!!", field.slot)
        };
        match field.assembly_policy() {
            AssemblyPolicy::Required => {
                w.line(&format!(
                    "require({}) {{ \"Required property '{}' is not set\" }}",
                    field.presence,
                    field.name()
                ));
                w.line(&format!(
                    "arguments[constructorParameters[\"{}\"]!!] = {}",
                    field.name(),
                    value
                ));
            }
            AssemblyPolicy::RequiredUnlessLenient => {
                w.line(&format!(
                    "if (!allowNullAsImplicitDefault) require({}) {{ \"Required property '{}' is not set\" }}",
                    field.presence,
                    field.name()
                ));
                w.line(&format!(
                    "arguments[constructorParameters[\"{}\"]!!] = {}",
                    field.name(),
                    value
                ));
            }
            AssemblyPolicy::OmitWhenUnset => {
                w.line(&format!(
                    "if ({}) arguments[constructorParameters[\"{}\"]!!] = {}",
                    field.presence,
                    field.name(),
                    value
                ));
            }
        }
    }
    w.line("return primaryConstructor.callBy(args = arguments)");
    w.close("}");
}
