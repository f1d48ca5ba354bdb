use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ast::Table;
use crate::color::{Color, Gradient};

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("invalid table shape: {0}")]
    InvalidTableShape(&'static str),

    #[error("chart code block produced no table")]
    NoTable,
}

/// One bar of a chart series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartItem {
    pub value: String,
    pub color: Color,
}

/// Bar-chart data derived from a table: the first header cell becomes the
/// title, the first column the category axis, and every remaining column one
/// row of values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub x_axis: Vec<String>,
    pub y_axis: Vec<Vec<ChartItem>>,
}

impl ChartSeries {
    /// Build a series from a table.
    ///
    /// A single data column is colored per category so each bar differs; with
    /// several data columns each column gets one uniform color so the series
    /// stay distinguishable. Short data columns yield short rows.
    pub fn from_table(table: &Table) -> Result<ChartSeries, ChartError> {
        if table.columns.is_empty() {
            return Err(ChartError::InvalidTableShape("table has no columns"));
        }
        if table.header.is_empty() {
            return Err(ChartError::InvalidTableShape("table has no header cells"));
        }

        let gradient = Gradient::default();
        let column_count = table.column_count();

        let y_axis = table
            .columns
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, column)| {
                column
                    .iter()
                    .enumerate()
                    .map(|(j, cell)| {
                        let color = if column_count == 2 {
                            gradient.color_at(j)
                        } else {
                            gradient.color_at(i)
                        };
                        ChartItem {
                            value: cell.clone(),
                            color,
                        }
                    })
                    .collect()
            })
            .collect();

        Ok(ChartSeries {
            title: table.header[0].clone(),
            x_axis: table.columns[0].clone(),
            y_axis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(header: &[&str], columns: &[&[&str]]) -> Table {
        Table {
            header: header.iter().map(|s| s.to_string()).collect(),
            columns: columns
                .iter()
                .map(|c| c.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn two_column_table_colors_per_category() {
        let t = table(&["A", "B"], &[&["x", "y"], &["1", "2"]]);
        let series = ChartSeries::from_table(&t).unwrap();

        assert_eq!(series.title, "A");
        assert_eq!(series.x_axis, vec!["x", "y"]);
        assert_eq!(series.y_axis.len(), 1);

        let gradient = Gradient::default();
        let row = &series.y_axis[0];
        assert_eq!(row.len(), 2);
        assert_eq!(row[0].value, "1");
        assert_eq!(row[0].color, gradient.color_at(0));
        assert_eq!(row[1].value, "2");
        assert_eq!(row[1].color, gradient.color_at(1));
    }

    #[test]
    fn multi_column_table_colors_per_series() {
        let t = table(
            &["A", "B", "C"],
            &[&["x", "y"], &["1", "2"], &["3", "4"]],
        );
        let series = ChartSeries::from_table(&t).unwrap();

        assert_eq!(series.y_axis.len(), 2);

        let gradient = Gradient::default();
        for item in &series.y_axis[0] {
            assert_eq!(item.color, gradient.color_at(1));
        }
        for item in &series.y_axis[1] {
            assert_eq!(item.color, gradient.color_at(2));
        }
    }

    #[test]
    fn empty_first_column_yields_empty_x_axis() {
        let t = table(&["A", "B"], &[&[], &[]]);
        let series = ChartSeries::from_table(&t).unwrap();
        assert!(series.x_axis.is_empty());
        assert_eq!(series.y_axis.len(), 1);
        assert!(series.y_axis[0].is_empty());
    }

    #[test]
    fn short_data_column_yields_short_row() {
        let t = table(&["A", "B"], &[&["x", "y", "z"], &["1"]]);
        let series = ChartSeries::from_table(&t).unwrap();
        assert_eq!(series.x_axis.len(), 3);
        assert_eq!(series.y_axis[0].len(), 1);
    }

    #[test]
    fn degenerate_tables_are_rejected() {
        let no_columns = table(&["A"], &[]);
        assert!(matches!(
            ChartSeries::from_table(&no_columns),
            Err(ChartError::InvalidTableShape(_))
        ));

        let no_header = table(&[], &[&["x"]]);
        assert!(matches!(
            ChartSeries::from_table(&no_header),
            Err(ChartError::InvalidTableShape(_))
        ));
    }
}
