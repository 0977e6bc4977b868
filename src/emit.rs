//! Thin formatting layer for generated source units.

use std::path::PathBuf;

/// One generated source unit, identified by its namespace and builder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub package: String,
    pub name: String,
    pub text: String,
}

impl GeneratedUnit {
    pub fn file_name(&self) -> String {
        format!("{}.kt", self.name)
    }

    /// Package-structured path relative to an output root, e.g.
    /// `com/example/FooBuilder.kt`.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        if !self.package.is_empty() {
            for segment in self.package.split('.') {
                path.push(segment);
            }
        }
        path.push(self.file_name());
        path
    }
}

/// Indentation-aware line writer.
#[derive(Debug, Default)]
pub struct SourceWriter {
    buf: String,
    indent: usize,
}

impl SourceWriter {
    const INDENT: &'static str = "    ";

    pub fn new() -> Self {
        SourceWriter::default()
    }

    pub fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.buf.push_str(Self::INDENT);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Writes an opening line and indents what follows.
    pub fn open(&mut self, text: &str) {
        self.line(text);
        self.indent += 1;
    }

    /// Dedents and writes a closing line.
    pub fn close(&mut self, text: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.line(text);
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_indents_blocks() {
        let mut writer = SourceWriter::new();
        writer.open("class Foo {");
        writer.line("val x = 1");
        writer.blank();
        writer.open("fun f() {");
        writer.line("return");
        writer.close("}");
        writer.close("}");

        assert_eq!(
            writer.finish(),
            "class Foo {\n    val x = 1\n\n    fun f() {\n        return\n    }\n}\n"
        );
    }

    #[test]
    fn test_relative_path_splits_package() {
        let unit = GeneratedUnit {
            package: "com.example.deep".to_string(),
            name: "FooBuilder".to_string(),
            text: String::new(),
        };
        assert_eq!(
            unit.relative_path(),
            PathBuf::from("com/example/deep/FooBuilder.kt")
        );
    }

    #[test]
    fn test_relative_path_empty_package() {
        let unit = GeneratedUnit {
            package: String::new(),
            name: "FooBuilder".to_string(),
            text: String::new(),
        };
        assert_eq!(unit.relative_path(), PathBuf::from("FooBuilder.kt"));
    }
}
