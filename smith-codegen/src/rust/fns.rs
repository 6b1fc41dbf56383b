//! Rust function builder.

use crate::builder::CodeBuilder;

/// A parameter in a Rust function. An empty `ty` renders the name alone,
/// which is how receivers such as `mut self` are expressed.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// A receiver parameter (`self`, `mut self`, `&self`).
    pub fn receiver(receiver: impl Into<String>) -> Self {
        Self::new(receiver, "")
    }
}

/// Builder for Rust functions.
#[derive(Debug, Clone)]
pub struct Fn {
    name: String,
    doc: Option<String>,
    attrs: Vec<String>,
    is_public: bool,
    params: Vec<Param>,
    return_type: Option<String>,
    body: Vec<String>,
}

impl Fn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            attrs: Vec::new(),
            is_public: true,
            params: Vec::new(),
            return_type: None,
            body: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Add a line to the function body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }

    /// Add raw body content. Relative indentation inside `content` is kept.
    pub fn body(mut self, content: impl AsRef<str>) -> Self {
        self.body
            .extend(content.as_ref().lines().map(str::to_string));
        self
    }

    /// Render the function to a CodeBuilder.
    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        let builder = match &self.doc {
            Some(doc) => builder.rust_doc(doc),
            None => builder,
        };

        let builder = self
            .attrs
            .iter()
            .fold(builder, |b, attr| b.line(&format!("#[{attr}]")));

        let vis = if self.is_public { "pub " } else { "" };

        let params = self
            .params
            .iter()
            .map(|p| {
                if p.ty.is_empty() {
                    p.name.clone()
                } else {
                    format!("{}: {}", p.name, p.ty)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        let signature = match &self.return_type {
            Some(ret) => format!("{vis}fn {}({params}) -> {ret} {{", self.name),
            None => format!("{vis}fn {}({params}) {{", self.name),
        };

        builder.block_with_close(&signature, "}", |b| {
            b.each(&self.body, |b, line| {
                if line.is_empty() { b.blank() } else { b.line(line) }
            })
        })
    }

    /// Build the function as a string.
    pub fn build(&self) -> String {
        self.render(CodeBuilder::rust()).build()
    }
}
