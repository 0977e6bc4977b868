//! Canonical type signatures: rendering and re-parsing.
//!
//! A signature is a qualified base name, an optional angle-bracketed list of
//! type arguments (each with a variance token and its own nullability), and a
//! nullability marker on the signature itself: `Base<out Arg?, Other>?`.
//! Rendering is deterministic and `parse` accepts exactly what `render`
//! produces, so signatures survive a render/parse round trip unchanged.

use thiserror::Error;

/// Variance of a type argument position. Absence of a token means invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variance {
    #[default]
    Invariant,
    /// Contravariant (`in`).
    In,
    /// Covariant (`out`).
    Out,
}

impl Variance {
    fn token(self) -> Option<&'static str> {
        match self {
            Variance::Invariant => None,
            Variance::In => Some("in"),
            Variance::Out => Some("out"),
        }
    }
}

/// A type argument: a signature plus the variance of its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeArgument {
    pub variance: Variance,
    pub signature: TypeSignature,
}

impl TypeArgument {
    pub fn invariant(signature: TypeSignature) -> Self {
        TypeArgument {
            variance: Variance::Invariant,
            signature,
        }
    }

    pub fn covariant(signature: TypeSignature) -> Self {
        TypeArgument {
            variance: Variance::Out,
            signature,
        }
    }

    pub fn contravariant(signature: TypeSignature) -> Self {
        TypeArgument {
            variance: Variance::In,
            signature,
        }
    }
}

/// A resolved type reference in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSignature {
    /// Fully qualified base name, e.g. `kotlin.collections.List`.
    pub base: String,
    pub nullable: bool,
    pub args: Vec<TypeArgument>,
}

impl TypeSignature {
    pub fn simple(base: impl Into<String>) -> Self {
        TypeSignature {
            base: base.into(),
            nullable: false,
            args: Vec::new(),
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_args(mut self, args: Vec<TypeArgument>) -> Self {
        self.args = args;
        self
    }

    /// A signature is resolvable when it has a qualified base name at every
    /// nesting level.
    pub fn is_resolved(&self) -> bool {
        !self.base.is_empty() && self.args.iter().all(|arg| arg.signature.is_resolved())
    }

    /// Canonical text without the outer nullability marker. Emission sites
    /// that manage nullability themselves (slot declarations, setter
    /// parameters) build on this form.
    pub fn render_base(&self) -> String {
        let mut out = self.base.clone();
        if !self.args.is_empty() {
            out.push('<');
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if let Some(token) = arg.variance.token() {
                    out.push_str(token);
                    out.push(' ');
                }
                out.push_str(&arg.signature.render());
            }
            out.push('>');
        }
        out
    }

    /// Full canonical text, `?`-suffixed when the signature is nullable.
    pub fn render(&self) -> String {
        let mut out = self.render_base();
        if self.nullable {
            out.push('?');
        }
        out
    }
}

impl std::fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("empty type signature")]
    Empty,
    #[error("unexpected character `{found}` at offset {at}")]
    Unexpected { found: char, at: usize },
    #[error("unterminated type argument list in `{input}`")]
    Unterminated { input: String },
    #[error("trailing input `{rest}` after signature")]
    Trailing { rest: String },
}

/// Parses canonical signature text back into a [`TypeSignature`].
pub fn parse(input: &str) -> Result<TypeSignature, SignatureError> {
    let mut cursor = Cursor { input, pos: 0 };
    let signature = cursor.signature()?;
    cursor.skip_ws();
    if cursor.pos < input.len() {
        return Err(SignatureError::Trailing {
            rest: input[cursor.pos..].to_string(),
        });
    }
    Ok(signature)
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    /// Consumes a variance keyword only when followed by whitespace, so base
    /// names like `internal.Config` are not mistaken for `in ternal.Config`.
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let rest = &self.input[self.pos..];
        if let Some(tail) = rest.strip_prefix(keyword) {
            if tail.chars().next().is_some_and(char::is_whitespace) {
                self.pos += keyword.len();
                self.skip_ws();
                return true;
            }
        }
        false
    }

    fn base_name(&mut self) -> Result<String, SignatureError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_' || c == '.') {
            self.bump();
        }
        if self.pos == start {
            return match self.peek() {
                Some(found) => Err(SignatureError::Unexpected { found, at: self.pos }),
                None => Err(SignatureError::Empty),
            };
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn signature(&mut self) -> Result<TypeSignature, SignatureError> {
        self.skip_ws();
        let base = self.base_name()?;
        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.type_argument()?);
                self.skip_ws();
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(SignatureError::Unterminated {
                    input: self.input.to_string(),
                });
            }
        }
        let nullable = self.eat('?');
        Ok(TypeSignature { base, nullable, args })
    }

    fn type_argument(&mut self) -> Result<TypeArgument, SignatureError> {
        self.skip_ws();
        let variance = if self.eat_keyword("out") {
            Variance::Out
        } else if self.eat_keyword("in") {
            Variance::In
        } else {
            Variance::Invariant
        };
        let signature = self.signature()?;
        Ok(TypeArgument { variance, signature })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_simple() {
        assert_eq!(TypeSignature::simple("kotlin.Int").render(), "kotlin.Int");
    }

    #[test]
    fn test_render_nullable() {
        let sig = TypeSignature::simple("kotlin.String").nullable();
        assert_eq!(sig.render(), "kotlin.String?");
        assert_eq!(sig.render_base(), "kotlin.String");
    }

    #[test]
    fn test_render_nested_generic_with_variance() {
        let sig = TypeSignature::simple("kotlin.collections.Map").with_args(vec![
            TypeArgument::invariant(TypeSignature::simple("kotlin.String")),
            TypeArgument::covariant(
                TypeSignature::simple("kotlin.collections.List").with_args(vec![
                    TypeArgument::invariant(TypeSignature::simple("kotlin.Int").nullable()),
                ]),
            ),
        ]);
        assert_eq!(
            sig.render(),
            "kotlin.collections.Map<kotlin.String, out kotlin.collections.List<kotlin.Int?>>"
        );
    }

    #[test]
    fn test_parse_simple() {
        let sig = parse("kotlin.Int").unwrap();
        assert_eq!(sig, TypeSignature::simple("kotlin.Int"));
    }

    #[test]
    fn test_parse_round_trip() {
        let text = "kotlin.collections.Map<in kotlin.String, out kotlin.collections.List<kotlin.Int?>?>?";
        let sig = parse(text).unwrap();
        assert_eq!(sig.render(), text);
        assert_eq!(parse(&sig.render()).unwrap(), sig);
    }

    #[test]
    fn test_parse_keyword_prefix_is_not_variance() {
        let sig = parse("internal.Config").unwrap();
        assert_eq!(sig.base, "internal.Config");
        let sig = parse("kotlin.collections.List<output.Record>").unwrap();
        assert_eq!(sig.args[0].variance, Variance::Invariant);
        assert_eq!(sig.args[0].signature.base, "output.Record");
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        let sig = parse("kotlin.collections.Map< kotlin.String , kotlin.Int >").unwrap();
        assert_eq!(
            sig.render(),
            "kotlin.collections.Map<kotlin.String, kotlin.Int>"
        );
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert_eq!(parse(""), Err(SignatureError::Empty));
    }

    #[test]
    fn test_parse_trailing_is_error() {
        assert!(matches!(
            parse("kotlin.Int extra"),
            Err(SignatureError::Trailing { .. })
        ));
    }

    #[test]
    fn test_parse_unterminated_is_error() {
        assert!(matches!(
            parse("kotlin.collections.List<kotlin.Int"),
            Err(SignatureError::Unterminated { .. })
        ));
    }

    #[test]
    fn test_is_resolved() {
        assert!(TypeSignature::simple("kotlin.Int").is_resolved());
        assert!(!TypeSignature::simple("").is_resolved());
        let hollow = TypeSignature::simple("kotlin.collections.List")
            .with_args(vec![TypeArgument::invariant(TypeSignature::simple(""))]);
        assert!(!hollow.is_resolved());
    }
}
