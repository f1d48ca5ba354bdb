//! Markdown rendering with chart detection.
//!
//! Markdown source is lexed into top-level tokens which are classified for
//! display: two-column tables and fenced code blocks tagged `chart` become
//! color-annotated bar-chart series, paragraphs become inline html, and
//! everything else passes through unchanged.

pub mod ast;
pub mod chart;
pub mod color;
pub mod convert;
pub mod render;

pub use ast::{Ast, CodeBlock, Inline, Table, Token};
pub use chart::{ChartError, ChartItem, ChartSeries};
pub use color::{Color, Gradient};
pub use convert::{MarkdownTableConverter, TableConverter};
pub use render::{RenderedDocument, RenderedItem, Renderer};
