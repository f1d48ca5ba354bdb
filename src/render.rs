use anyhow::Result;
use log::debug;
use pulldown_cmark::escape;
use serde::{Deserialize, Serialize};

use crate::ast::{self, Inline, Style, Token};
use crate::chart::{ChartError, ChartSeries};
use crate::convert::{MarkdownTableConverter, TableConverter};

/// One displayable unit produced by classification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum RenderedItem {
    /// Inline-expanded paragraph html.
    Paragraph(String),
    Chart(ChartSeries),
    /// Any token the classifier has no special handling for, unchanged.
    Raw(Token),
}

/// The classified document: items in source order plus the flat list of
/// chart series derived from tables, for consumers that only want charts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub items: Vec<RenderedItem>,
    pub charts: Vec<ChartSeries>,
}

/// Classifies markdown tokens for display.
///
/// Two-column tables and `chart` code blocks become chart series, paragraphs
/// become inline html, everything else passes through as-is. Each call to
/// [`Renderer::render`] rebuilds the whole document from scratch.
pub struct Renderer {
    converter: Box<dyn TableConverter>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            converter: Box::new(MarkdownTableConverter),
        }
    }

    pub fn with_converter(converter: Box<dyn TableConverter>) -> Self {
        Renderer { converter }
    }

    pub fn render(&self, source: &str) -> Result<RenderedDocument> {
        let mut items = Vec::new();
        let mut charts = Vec::new();

        for token in ast::lex(source).0 {
            match token {
                Token::Table(table) => {
                    if table.column_count() == 2 {
                        debug!("table '{:?}' classified as chart", table.header.first());
                        let series = ChartSeries::from_table(&table)?;
                        charts.push(series.clone());
                        items.push(RenderedItem::Chart(series));
                    } else {
                        items.push(RenderedItem::Raw(Token::Table(table)));
                    }
                }
                Token::Code(code) if code.lang == "chart" => {
                    let tables = self.converter.convert(&code.source)?;
                    let table = tables.first().ok_or(ChartError::NoTable)?;
                    items.push(RenderedItem::Chart(ChartSeries::from_table(table)?));
                }
                Token::Paragraph(inner) => {
                    items.push(RenderedItem::Paragraph(inner.to_html()));
                }
                other => items.push(RenderedItem::Raw(other)),
            }
        }

        Ok(RenderedDocument { items, charts })
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new()
    }
}

pub trait ToHtml {
    fn to_html(self) -> String;
}

impl ToHtml for Vec<Inline> {
    fn to_html(self) -> String {
        self.into_iter().map(|i| i.to_html()).collect()
    }
}

impl ToHtml for Inline {
    fn to_html(self) -> String {
        match self {
            Inline::Text(s) => escape_html(&s),
            Inline::Styled(inner, style) => {
                let tag = match style {
                    Style::Emphasis => "em",
                    Style::Strong => "strong",
                    Style::Strikethrough => "del",
                };
                format!("<{tag}>{}</{tag}>", inner.to_html())
            }
            Inline::Code(s) => format!("<code>{}</code>", escape_html(&s)),
            Inline::Link { url, title, inner } => {
                let href = escape_href(&url);
                if title.is_empty() {
                    format!("<a href=\"{href}\">{}</a>", inner.to_html())
                } else {
                    format!(
                        "<a href=\"{href}\" title=\"{}\">{}</a>",
                        escape_html(&title),
                        inner.to_html()
                    )
                }
            }
            Inline::Image { url, title, inner } => {
                let src = escape_href(&url);
                let alt: String = inner.iter().map(|i| i.to_string()).collect();
                let alt = escape_html(&alt);
                if title.is_empty() {
                    format!("<img src=\"{src}\" alt=\"{alt}\">")
                } else {
                    format!(
                        "<img src=\"{src}\" alt=\"{alt}\" title=\"{}\">",
                        escape_html(&title)
                    )
                }
            }
            Inline::Html(s) => s,
            Inline::SoftBreak => " ".to_string(),
            Inline::HardBreak => "<br>".to_string(),
        }
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // Writing into a String cannot fail.
    let _ = escape::escape_html(&mut out, s);
    out
}

fn escape_href(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let _ = escape::escape_href(&mut out, s);
    out
}
