//! Rust impl block builder.

use super::Fn;
use crate::builder::CodeBuilder;

/// Builder for Rust impl blocks.
#[derive(Debug, Clone)]
pub struct Impl {
    type_name: String,
    methods: Vec<Fn>,
}

impl Impl {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            methods: Vec::new(),
        }
    }

    pub fn method(mut self, method: Fn) -> Self {
        self.methods.push(method);
        self
    }

    /// Render the impl block to a CodeBuilder. Methods are separated by a
    /// blank line.
    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        let header = format!("impl {} {{", self.type_name);

        builder.block_with_close(&header, "}", |b| {
            self.methods
                .iter()
                .enumerate()
                .fold(b, |b, (i, method)| method.render(b.when(i > 0, CodeBuilder::blank)))
        })
    }

    /// Build the impl block as a string.
    pub fn build(&self) -> String {
        self.render(CodeBuilder::rust()).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rust::Param;

    #[test]
    fn test_empty_impl() {
        assert_eq!(Impl::new("Foo").build(), "impl Foo {\n}\n");
    }

    #[test]
    fn test_methods_separated_by_blank_line() {
        let i = Impl::new("Counter")
            .method(Fn::new("new").returns("Self").body_line("Self::default()"))
            .method(
                Fn::new("reset")
                    .param(Param::receiver("&mut self"))
                    .body_line("self.count = 0;"),
            )
            .build();
        assert_eq!(
            i,
            "impl Counter {\n    pub fn new() -> Self {\n        Self::default()\n    }\n\n    pub fn reset(&mut self) {\n        self.count = 0;\n    }\n}\n"
        );
    }
}
