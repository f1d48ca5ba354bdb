mod collect;

use std::fmt;

use pulldown_cmark::{Options, Parser};
use serde::{Deserialize, Serialize};

/// An ordered sequence of top-level markdown tokens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ast(pub Vec<Token>);

/// A parsed table. Cells are stored column-major since the chart transform
/// consumes whole columns; columns may be ragged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub header: Vec<String>,
    pub columns: Vec<Vec<String>>,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// A fenced or indented code block. `lang` is the full fence info string
/// (empty for indented blocks).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub lang: String,
    pub source: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Style {
    Emphasis,
    Strong,
    Strikethrough,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Inline {
    /// Plain text
    Text(String),
    Styled(Vec<Inline>, Style),
    /// Inline code
    Code(String),
    Link {
        url: String,
        title: String,
        inner: Vec<Inline>,
    },
    Image {
        url: String,
        title: String,
        inner: Vec<Inline>,
    },
    /// Unescaped html.
    Html(String),
    SoftBreak,
    HardBreak,
}

/// One top-level unit of markdown structure. Blank separators between blocks
/// produce no token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Token {
    Heading {
        lvl: u8,
        id: Option<String>,
        classes: Vec<String>,
        inner: Vec<Inline>,
    },
    Paragraph(Vec<Inline>),
    BlockQuote(Vec<Token>),
    Code(CodeBlock),
    Table(Table),
    /// A list - ordered or unordered.
    List(Option<u64>, Vec<Token>),
    ListItem(Vec<Token>),
    Html(String),
    Rule,
}

impl fmt::Display for Inline {
    /// Plain-text rendering, used for table cells and code block bodies.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inline::Text(s) | Inline::Code(s) | Inline::Html(s) => f.write_str(s),
            Inline::Styled(inner, _)
            | Inline::Link { inner, .. }
            | Inline::Image { inner, .. } => {
                inner.iter().try_for_each(|i| fmt::Display::fmt(i, f))
            }
            Inline::SoftBreak => f.write_str(" "),
            Inline::HardBreak => f.write_str("\n"),
        }
    }
}

/// Lex markdown source into its top-level tokens.
pub fn lex(source: &str) -> Ast {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    Parser::new_ext(source, options).collect()
}
