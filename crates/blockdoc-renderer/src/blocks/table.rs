//! Table block.

use serde::Deserialize;
use serde_json::Value;

use super::{InlineText, decode};
use crate::error::RenderError;
use crate::html::SafeHtml;
use crate::registry::BlockRenderer;
use crate::validator::{Validation, Validator, validate_with};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableData {
    content: Vec<Vec<String>>,
    #[serde(default)]
    with_headings: bool,
}

/// `table`: `{ "content": [["a", "b"], ["c", "d"]], "withHeadings": true }`.
///
/// With `withHeadings` the first row goes into `<thead>` as `<th>` cells.
#[derive(Clone, Debug, Default)]
pub struct TableBlock {
    text: InlineText,
}

impl TableBlock {
    pub const TYPE: &'static str = "table";

    pub(crate) fn new(text: InlineText) -> Self {
        Self { text }
    }

    fn push_row(&self, cell: &str, row: &[String], out: &mut SafeHtml) {
        out.push(&SafeHtml::from_trusted("<tr>"));
        for value in row {
            out.push(&SafeHtml::from_trusted(format!("<{cell}>")));
            out.push(&self.text.clean(value));
            out.push(&SafeHtml::from_trusted(format!("</{cell}>")));
        }
        out.push(&SafeHtml::from_trusted("</tr>"));
    }
}

impl Validator for TableBlock {
    fn validate(&self, data: &Value) -> Validation {
        validate_with::<TableData, _>(data, |table, report| {
            let Some(width) = table.content.first().map(Vec::len) else {
                return;
            };
            for (index, row) in table.content.iter().enumerate().skip(1) {
                report.ensure(row.len() == width, || {
                    format!("row {index} has {} cells, expected {width}", row.len())
                });
            }
        })
        .prefixed(Self::TYPE)
    }
}

impl BlockRenderer for TableBlock {
    fn validator(&self) -> &dyn Validator {
        self
    }

    fn render(&self, data: &Value) -> Result<SafeHtml, RenderError> {
        let table: TableData = decode(Self::TYPE, data)?;
        let mut rows = table.content.as_slice();
        let mut html = SafeHtml::from_trusted("<table>");

        if table.with_headings
            && let Some((head, rest)) = rows.split_first()
        {
            html.push(&SafeHtml::from_trusted("<thead>"));
            self.push_row("th", head, &mut html);
            html.push(&SafeHtml::from_trusted("</thead>"));
            rows = rest;
        }

        html.push(&SafeHtml::from_trusted("<tbody>"));
        for row in rows {
            self.push_row("td", row, &mut html);
        }
        html.push(&SafeHtml::from_trusted("</tbody></table>"));
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn render(data: &Value) -> String {
        TableBlock::default().render(data).unwrap().into_string()
    }

    #[test]
    fn test_render_with_headings() {
        assert_eq!(
            render(&json!({"withHeadings": true, "content": [["Name", "Age"], ["Ann", "<b>7</b>"]]})),
            concat!(
                "<table><thead><tr><th>Name</th><th>Age</th></tr></thead>",
                "<tbody><tr><td>Ann</td><td><b>7</b></td></tr></tbody></table>"
            )
        );
    }

    #[test]
    fn test_render_without_headings() {
        assert_eq!(
            render(&json!({"content": [["a"], ["b"]]})),
            "<table><tbody><tr><td>a</td></tr><tr><td>b</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(
            render(&json!({"withHeadings": true, "content": []})),
            "<table><tbody></tbody></table>"
        );
    }

    #[test]
    fn test_validate_ragged_rows() {
        let report = TableBlock::default().validate(&json!({"content": [["a", "b"], ["c"]]}));
        assert_eq!(report.errors(), ["table: row 1 has 1 cells, expected 2".to_owned()]);
    }

    #[test]
    fn test_validate_cells_are_strings() {
        assert!(!TableBlock::default().validate(&json!({"content": [[1]]})).is_valid());
    }
}
