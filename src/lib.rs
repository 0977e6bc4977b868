//! # builder-codegen
//!
//! Generates fluent builder companions for class declarations.
//!
//! Given a declaration model of class-like types (primary constructor,
//! properties, nullability, defaulted parameters, nested declarations), the
//! crate synthesizes one source unit per target: a builder class with a
//! fluent setter and presence flag per constructor parameter, a keyed
//! `build()` that lets omitted defaulted parameters fall back to the target's
//! own defaults, and a copy constructor that seeds the builder from an
//! existing instance.
//!
//! ## Example
//!
//! ```rust
//! use builder_codegen::model::{Declaration, Model, Parameter};
//! use builder_codegen::signature::TypeSignature;
//! use builder_codegen::{generate, GenerateOptions};
//!
//! let mut model = Model::new();
//! let foo = model.insert(
//!     Declaration::class("com.example", "Foo").constructor(vec![
//!         Parameter::new("id", TypeSignature::simple("kotlin.Int")),
//!         Parameter::new("label", TypeSignature::simple("kotlin.String").nullable())
//!             .with_default(),
//!     ]),
//! );
//!
//! let unit = generate(&model, foo, &GenerateOptions::default()).unwrap();
//! assert_eq!(unit.name, "FooBuilder");
//! assert!(unit.text.contains("fun build(): com.example.Foo {"));
//! ```

pub mod emit;
pub mod error;
pub mod extract;
pub mod field;
pub mod generate;
pub mod model;
pub mod project;
pub mod signature;

pub use emit::GeneratedUnit;
pub use error::GenerateError;
pub use generate::{generate, generate_all, BuilderSpec, GenerateOptions};
pub use model::{DeclId, DeclarationResolver, Model};
