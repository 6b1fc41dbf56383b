use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    Punct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub r#type: TokenKind,
    pub text: String,
    pub span: Range<usize>,
}

include!(concat!(env!("OUT_DIR"), "/lexer/token_builder.rs"));
