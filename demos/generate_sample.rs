use builder_codegen::model::{Declaration, Model, Parameter, Property};
use builder_codegen::signature::TypeSignature;
use builder_codegen::{generate, generate_all, GenerateOptions};

fn main() {
    println!("=== Builder generation example ===\n");

    let mut model = Model::new();
    let foo = model.insert(
        Declaration::class("com.example.sample", "Foo")
            .constructor(vec![
                Parameter::new("field1", TypeSignature::simple("kotlin.Int")),
                Parameter::new("field2", TypeSignature::simple("kotlin.String")),
                Parameter::new("field3", TypeSignature::simple("kotlin.String").nullable()),
                Parameter::new("field4", TypeSignature::simple("kotlin.String").nullable())
                    .with_default(),
            ])
            .property(Property::public(
                "field1",
                TypeSignature::simple("kotlin.Int"),
            ))
            .property(Property::public(
                "field2",
                TypeSignature::simple("kotlin.String"),
            ))
            .property(Property::private(
                "field3",
                TypeSignature::simple("kotlin.String").nullable(),
            )),
    );

    let unit = generate(&model, foo, &GenerateOptions::default()).expect("generation failed");
    println!("// {}\n{}", unit.relative_path().display(), unit.text);

    // A target that cannot get a builder does not block the others.
    let broken = model.insert(Declaration::class("com.example.sample", "NoConstructor"));
    for (_, result) in generate_all(&model, &[broken, foo], &GenerateOptions::default()) {
        match result {
            Ok(unit) => println!("generated {}", unit.file_name()),
            Err(err) => println!("skipped: {err}"),
        }
    }
}
