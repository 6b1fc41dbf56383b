//! Rust struct builder.

use crate::builder::CodeBuilder;

/// A field in a Rust struct.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
    pub is_public: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            is_public: true,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }
}

/// Builder for Rust structs with named fields.
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    doc: Option<String>,
    derives: Vec<String>,
    attrs: Vec<String>,
    fields: Vec<Field>,
    is_public: bool,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            derives: Vec::new(),
            attrs: Vec::new(),
            fields: Vec::new(),
            is_public: true,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn derive(mut self, derive: impl Into<String>) -> Self {
        self.derives.push(derive.into());
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    /// Render the struct to a CodeBuilder.
    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        let vis = if self.is_public { "pub " } else { "" };

        let builder = match &self.doc {
            Some(doc) => builder.rust_doc(doc),
            None => builder,
        };

        let builder = builder.when(!self.derives.is_empty(), |b| {
            b.line(&format!("#[derive({})]", self.derives.join(", ")))
        });

        let builder = self
            .attrs
            .iter()
            .fold(builder, |b, attr| b.line(&format!("#[{attr}]")));

        if self.fields.is_empty() {
            return builder.line(&format!("{vis}struct {} {{}}", self.name));
        }

        builder.block_with_close(&format!("{vis}struct {} {{", self.name), "}", |b| {
            b.each(&self.fields, |b, field| {
                let vis = if field.is_public { "pub " } else { "" };
                let b = match &field.doc {
                    Some(doc) => b.rust_doc(doc),
                    None => b,
                };
                b.line(&format!("{vis}{}: {},", field.name, field.ty))
            })
        })
    }

    /// Build the struct as a string.
    pub fn build(&self) -> String {
        self.render(CodeBuilder::rust()).build()
    }
}
