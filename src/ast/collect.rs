use pulldown_cmark::{CodeBlockKind, Event, Tag};

use crate::ast::{Ast, CodeBlock, Inline, Style, Table, Token};

pub(crate) enum InnerContent {
    Blocks(Vec<Token>),
    Inlines(Vec<Inline>),
}

impl InnerContent {
    fn into_blocks(self) -> Vec<Token> {
        if let InnerContent::Blocks(b) = self {
            b
        } else {
            panic!("Expected blocks")
        }
    }

    fn into_inlines(self) -> Vec<Inline> {
        if let InnerContent::Inlines(i) = self {
            i
        } else {
            panic!("Expected inlines")
        }
    }

    fn blocks_mut(&mut self) -> &mut Vec<Token> {
        if let InnerContent::Blocks(b) = self {
            b
        } else {
            panic!("Expected block element")
        }
    }

    fn push_inline(&mut self, item: Inline) {
        match self {
            InnerContent::Blocks(blocks) => match item {
                Inline::Html(s) => blocks.push(Token::Html(s)),
                item => {
                    // Loose inline content at block level (tight list items
                    // mostly) accumulates into a trailing paragraph.
                    if let Some(Token::Paragraph(inner)) = blocks.last_mut() {
                        inner.push(item);
                    } else {
                        blocks.push(Token::Paragraph(vec![item]));
                    }
                }
            },
            InnerContent::Inlines(inlines) => inlines.push(item),
        }
    }
}

#[derive(Default)]
struct TableBuilder {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    in_head: bool,
}

impl TableBuilder {
    fn push_cell(&mut self, text: String) {
        if self.in_head {
            self.header.push(text);
        } else if let Some(row) = self.rows.last_mut() {
            row.push(text);
        }
    }

    /// Rotate the row-major cells into the column-major shape the chart
    /// transform consumes. Short rows leave the trailing columns short.
    fn finish(self) -> Table {
        let width = self
            .header
            .len()
            .max(self.rows.iter().map(Vec::len).max().unwrap_or(0));

        let mut columns = vec![Vec::new(); width];
        for row in self.rows {
            for (idx, cell) in row.into_iter().enumerate() {
                columns[idx].push(cell);
            }
        }

        Table {
            header: self.header,
            columns,
        }
    }
}

fn plain_text(inlines: Vec<Inline>) -> String {
    inlines.iter().map(|i| i.to_string()).collect()
}

impl<'a> FromIterator<Event<'a>> for Ast {
    fn from_iter<T: IntoIterator<Item = Event<'a>>>(iter: T) -> Self {
        let mut inners = vec![InnerContent::Blocks(Vec::new())];
        let mut tables: Vec<TableBuilder> = Vec::new();

        for event in iter {
            match event {
                Event::Start(t) => match t {
                    Tag::Paragraph
                    | Tag::Heading(_, _, _)
                    | Tag::CodeBlock(_)
                    | Tag::Emphasis
                    | Tag::Strong
                    | Tag::Strikethrough
                    | Tag::Link(_, _, _)
                    | Tag::Image(_, _, _)
                    | Tag::TableCell => inners.push(InnerContent::Inlines(Vec::new())),
                    Tag::BlockQuote | Tag::List(_) | Tag::Item | Tag::FootnoteDefinition(_) => {
                        inners.push(InnerContent::Blocks(Vec::new()))
                    }
                    Tag::Table(_) => tables.push(TableBuilder::default()),
                    Tag::TableHead => {
                        if let Some(t) = tables.last_mut() {
                            t.in_head = true;
                        }
                    }
                    Tag::TableRow => {
                        if let Some(t) = tables.last_mut() {
                            t.rows.push(Vec::new());
                        }
                    }
                },
                Event::End(t) => match t {
                    Tag::Paragraph => {
                        let inner = inners.pop().expect("No inner content");
                        inners
                            .last_mut()
                            .expect("No parent")
                            .blocks_mut()
                            .push(Token::Paragraph(inner.into_inlines()));
                    }
                    Tag::Heading(lvl, id, classes) => {
                        let inner = inners.pop().expect("No inner content");
                        inners
                            .last_mut()
                            .expect("No parent")
                            .blocks_mut()
                            .push(Token::Heading {
                                lvl: lvl as u8,
                                id: id.map(|s| s.to_string()),
                                classes: classes.into_iter().map(|s| s.to_string()).collect(),
                                inner: inner.into_inlines(),
                            });
                    }
                    Tag::BlockQuote => {
                        let inner = inners.pop().expect("No inner content");
                        inners
                            .last_mut()
                            .expect("No parent")
                            .blocks_mut()
                            .push(Token::BlockQuote(inner.into_blocks()));
                    }
                    Tag::CodeBlock(kind) => {
                        let inner = inners.pop().expect("No inner content");
                        let lang = match kind {
                            CodeBlockKind::Indented => String::new(),
                            CodeBlockKind::Fenced(s) => s.to_string(),
                        };
                        inners
                            .last_mut()
                            .expect("No parent")
                            .blocks_mut()
                            .push(Token::Code(CodeBlock {
                                lang,
                                source: plain_text(inner.into_inlines()),
                            }));
                    }
                    Tag::List(idx) => {
                        let inner = inners.pop().expect("No inner content");
                        inners
                            .last_mut()
                            .expect("No parent")
                            .blocks_mut()
                            .push(Token::List(idx, inner.into_blocks()));
                    }
                    Tag::Item => {
                        let inner = inners.pop().expect("No inner content");
                        inners
                            .last_mut()
                            .expect("No parent")
                            .blocks_mut()
                            .push(Token::ListItem(inner.into_blocks()));
                    }
                    Tag::FootnoteDefinition(_) => {
                        inners.pop();
                    }
                    Tag::Emphasis => {
                        let inner = inners.pop().expect("No inner content");
                        inners
                            .last_mut()
                            .expect("No parent")
                            .push_inline(Inline::Styled(inner.into_inlines(), Style::Emphasis));
                    }
                    Tag::Strong => {
                        let inner = inners.pop().expect("No inner content");
                        inners
                            .last_mut()
                            .expect("No parent")
                            .push_inline(Inline::Styled(inner.into_inlines(), Style::Strong));
                    }
                    Tag::Strikethrough => {
                        let inner = inners.pop().expect("No inner content");
                        inners.last_mut().expect("No parent").push_inline(Inline::Styled(
                            inner.into_inlines(),
                            Style::Strikethrough,
                        ));
                    }
                    Tag::Link(_, url, title) => {
                        let inner = inners.pop().expect("No inner content");
                        inners.last_mut().expect("No parent").push_inline(Inline::Link {
                            url: url.to_string(),
                            title: title.to_string(),
                            inner: inner.into_inlines(),
                        });
                    }
                    Tag::Image(_, url, title) => {
                        let inner = inners.pop().expect("No inner content");
                        inners.last_mut().expect("No parent").push_inline(Inline::Image {
                            url: url.to_string(),
                            title: title.to_string(),
                            inner: inner.into_inlines(),
                        });
                    }
                    Tag::TableCell => {
                        let inner = inners.pop().expect("No inner content");
                        if let Some(t) = tables.last_mut() {
                            t.push_cell(plain_text(inner.into_inlines()));
                        }
                    }
                    Tag::TableHead => {
                        if let Some(t) = tables.last_mut() {
                            t.in_head = false;
                        }
                    }
                    Tag::TableRow => {}
                    Tag::Table(_) => {
                        let table = tables.pop().expect("No open table");
                        inners
                            .last_mut()
                            .expect("No parent")
                            .blocks_mut()
                            .push(Token::Table(table.finish()));
                    }
                },
                Event::Html(s) => {
                    inners
                        .last_mut()
                        .expect("No parent")
                        .push_inline(Inline::Html(s.to_string()));
                }
                Event::Rule => {
                    if let Some(InnerContent::Blocks(blocks)) = inners.last_mut() {
                        blocks.push(Token::Rule);
                    }
                }
                other => {
                    let inner = match other {
                        Event::Text(s) => Inline::Text(s.to_string()),
                        Event::Code(s) => Inline::Code(s.to_string()),
                        Event::FootnoteReference(s) => Inline::Text(s.to_string()),
                        Event::SoftBreak => Inline::SoftBreak,
                        Event::HardBreak => Inline::HardBreak,
                        // TaskListMarker; the corresponding option is never
                        // enabled by `lex`.
                        _ => continue,
                    };

                    if let Some(c) = inners.last_mut() {
                        c.push_inline(inner)
                    }
                }
            }
        }

        let blocks = inners.remove(0).into_blocks();
        Ast(blocks)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{lex, Inline, Token};

    #[test]
    fn blank_lines_produce_no_tokens() {
        let ast = lex("first\n\n\n\nsecond\n");
        assert_eq!(ast.0.len(), 2);
        assert!(matches!(ast.0[0], Token::Paragraph(_)));
        assert!(matches!(ast.0[1], Token::Paragraph(_)));
    }

    #[test]
    fn table_is_collected_column_major() {
        let src = "\
| Framework | Count |
| --------- | ----- |
| React     | 3     |
| Vue       | 2     |
";
        let ast = lex(src);
        assert_eq!(ast.0.len(), 1);
        let Token::Table(table) = &ast.0[0] else {
            panic!("expected table, got {:?}", ast.0[0]);
        };

        assert_eq!(table.header, vec!["Framework", "Count"]);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.columns[0], vec!["React", "Vue"]);
        assert_eq!(table.columns[1], vec!["3", "2"]);
    }

    #[test]
    fn fenced_code_keeps_lang_and_body() {
        let ast = lex("```chart\nsome body\n```\n");
        assert_eq!(ast.0.len(), 1);
        let Token::Code(code) = &ast.0[0] else {
            panic!("expected code block");
        };
        assert_eq!(code.lang, "chart");
        assert_eq!(code.source, "some body\n");
    }

    #[test]
    fn heading_level_is_preserved() {
        let ast = lex("## Title\n");
        let Token::Heading { lvl, inner, .. } = &ast.0[0] else {
            panic!("expected heading");
        };
        assert_eq!(*lvl, 2);
        assert_eq!(inner, &vec![Inline::Text("Title".into())]);
    }

    #[test]
    fn reference_links_resolve_against_the_document() {
        let ast = lex("See [docs].\n\n[docs]: https://example.com/x\n");
        let Token::Paragraph(inner) = &ast.0[0] else {
            panic!("expected paragraph");
        };
        assert!(inner.iter().any(|i| matches!(
            i,
            Inline::Link { url, .. } if url == "https://example.com/x"
        )));
    }

    #[test]
    fn table_cells_flatten_styled_content() {
        let src = "\
| A | B |
| - | - |
| **x** | [y](https://y.io) |
";
        let ast = lex(src);
        let Token::Table(table) = &ast.0[0] else {
            panic!("expected table");
        };
        assert_eq!(table.columns[0], vec!["x"]);
        assert_eq!(table.columns[1], vec!["y"]);
    }
}
