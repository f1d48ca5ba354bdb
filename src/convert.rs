use anyhow::Result;

use crate::ast::{self, Table, Token};

/// Converts the body of a `chart` code block into tables.
///
/// Implementations own the syntax of the block body; the renderer only cares
/// about getting table-shaped data back.
pub trait TableConverter {
    fn convert(&self, source: &str) -> Result<Vec<Table>>;
}

/// The built-in converter: the block body is itself markdown and every table
/// in it is collected.
#[derive(Debug, Default)]
pub struct MarkdownTableConverter;

impl TableConverter for MarkdownTableConverter {
    fn convert(&self, source: &str) -> Result<Vec<Table>> {
        let ast = ast::lex(source);
        Ok(ast
            .0
            .into_iter()
            .filter_map(|token| match token {
                Token::Table(table) => Some(table),
                _ => None,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_table_from_the_body() {
        let src = "\
intro text

| Quarter | Sales |
| ------- | ----- |
| Q1      | 10    |
| Q2      | 20    |

| Other |
| ----- |
| row   |
";
        let tables = MarkdownTableConverter.convert(src).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].columns[0], vec!["Q1", "Q2"]);
        assert_eq!(tables[0].columns[1], vec!["10", "20"]);
        assert_eq!(tables[1].header, vec!["Other"]);
    }

    #[test]
    fn body_without_tables_yields_nothing() {
        let tables = MarkdownTableConverter.convert("just text\n").unwrap();
        assert!(tables.is_empty());
    }
}
