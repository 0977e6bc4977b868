//! Declaration model: an immutable arena of class-like declarations.
//!
//! The model is a plain value graph. Declarations live in an arena and refer
//! to their enclosing declaration by [`DeclId`]; a parent must exist before a
//! child can be inserted, so the graph is acyclic by construction. The core
//! only ever borrows the model, it never mutates it.

use serde::{Deserialize, Serialize};

use crate::signature::TypeSignature;

/// Stable identifier of a declaration within its [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId(u32);

/// Classification of a declaration. Only [`ClassKind::Class`] may receive a
/// builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Object,
}

impl Default for ClassKind {
    fn default() -> Self {
        ClassKind::Class
    }
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum class",
            ClassKind::Object => "object",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Public
    }
}

/// A formal parameter of a primary constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub signature: TypeSignature,
    /// Whether the declaration carries a default expression for this
    /// parameter. Independent of nullability.
    pub has_default: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, signature: TypeSignature) -> Self {
        Parameter {
            name: name.into(),
            signature,
            has_default: false,
        }
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}

/// A property declared on a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub signature: TypeSignature,
    pub visibility: Visibility,
}

impl Property {
    pub fn public(name: impl Into<String>, signature: TypeSignature) -> Self {
        Property {
            name: name.into(),
            signature,
            visibility: Visibility::Public,
        }
    }

    pub fn private(name: impl Into<String>, signature: TypeSignature) -> Self {
        Property {
            name: name.into(),
            signature,
            visibility: Visibility::Private,
        }
    }
}

/// One class-like declaration.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub simple_name: String,
    /// Package of the file declaring this type. Nested declarations share the
    /// package of their enclosing file.
    pub package: String,
    pub kind: ClassKind,
    pub parent: Option<DeclId>,
    pub primary_constructor: Option<Vec<Parameter>>,
    pub properties: Vec<Property>,
}

impl Declaration {
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>, kind: ClassKind) -> Self {
        Declaration {
            simple_name: simple_name.into(),
            package: package.into(),
            kind,
            parent: None,
            primary_constructor: None,
            properties: Vec::new(),
        }
    }

    /// A concrete class declaration.
    pub fn class(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Declaration::new(package, simple_name, ClassKind::Class)
    }

    pub fn nested_in(mut self, parent: DeclId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn constructor(mut self, parameters: Vec<Parameter>) -> Self {
        self.primary_constructor = Some(parameters);
        self
    }

    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }
}

/// Arena of declarations. Implements [`DeclarationResolver`], the query
/// interface the generation core reads from.
#[derive(Debug, Default)]
pub struct Model {
    decls: Vec<Declaration>,
}

impl Model {
    pub fn new() -> Self {
        Model::default()
    }

    pub fn insert(&mut self, declaration: Declaration) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(declaration);
        id
    }

    pub fn get(&self, id: DeclId) -> &Declaration {
        &self.decls[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

/// Read-only queries against a declaration model. This is the boundary the
/// generation core sees; [`Model`] is the in-memory implementation.
pub trait DeclarationResolver {
    fn classification(&self, id: DeclId) -> ClassKind;

    fn simple_name(&self, id: DeclId) -> &str;

    /// Package of the file/unit declaring this type.
    fn package(&self, id: DeclId) -> &str;

    /// Ordered parameters of the canonical constructor, if the type has one.
    fn canonical_constructor(&self, id: DeclId) -> Option<&[Parameter]>;

    /// All properties declared on the type, a superset of those backing
    /// constructor parameters.
    fn declared_properties(&self, id: DeclId) -> &[Property];

    /// Enclosing-declaration chain, outermost first, ending at `id` itself.
    fn enclosing_chain(&self, id: DeclId) -> Vec<DeclId>;

    /// Validates a type reference, returning its signature when it resolves
    /// to a qualified name at every nesting level.
    fn resolve_type(&self, reference: &TypeSignature) -> Option<TypeSignature> {
        reference.is_resolved().then(|| reference.clone())
    }

    /// Dotted qualified name: package plus every simple name along the
    /// enclosing chain.
    fn qualified_name(&self, id: DeclId) -> String {
        let mut name = self.package(id).to_string();
        for link in self.enclosing_chain(id) {
            if !name.is_empty() {
                name.push('.');
            }
            name.push_str(self.simple_name(link));
        }
        name
    }
}

impl DeclarationResolver for Model {
    fn classification(&self, id: DeclId) -> ClassKind {
        self.get(id).kind
    }

    fn simple_name(&self, id: DeclId) -> &str {
        &self.get(id).simple_name
    }

    fn package(&self, id: DeclId) -> &str {
        &self.get(id).package
    }

    fn canonical_constructor(&self, id: DeclId) -> Option<&[Parameter]> {
        self.get(id).primary_constructor.as_deref()
    }

    fn declared_properties(&self, id: DeclId) -> &[Property] {
        &self.get(id).properties
    }

    fn enclosing_chain(&self, id: DeclId) -> Vec<DeclId> {
        let mut chain = vec![id];
        let mut parent = self.get(id).parent;
        while let Some(link) = parent {
            chain.push(link);
            parent = self.get(link).parent;
        }
        chain.reverse();
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enclosing_chain_outermost_first() {
        let mut model = Model::new();
        let outer = model.insert(Declaration::class("com.example", "A"));
        let inner = model.insert(Declaration::class("com.example", "B").nested_in(outer));

        assert_eq!(model.enclosing_chain(inner), vec![outer, inner]);
        assert_eq!(model.enclosing_chain(outer), vec![outer]);
    }

    #[test]
    fn test_qualified_name() {
        let mut model = Model::new();
        let outer = model.insert(Declaration::class("com.example", "A"));
        let inner = model.insert(Declaration::class("com.example", "B").nested_in(outer));

        assert_eq!(model.qualified_name(outer), "com.example.A");
        assert_eq!(model.qualified_name(inner), "com.example.A.B");
    }

    #[test]
    fn test_qualified_name_empty_package() {
        let mut model = Model::new();
        let id = model.insert(Declaration::class("", "Foo"));
        assert_eq!(model.qualified_name(id), "Foo");
    }

    #[test]
    fn test_resolve_type_rejects_hollow_signature() {
        let model = Model::new();
        assert!(model.resolve_type(&TypeSignature::simple("kotlin.Int")).is_some());
        assert!(model.resolve_type(&TypeSignature::simple("")).is_none());
    }
}
