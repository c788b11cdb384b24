//! A tabular list parameterized by column descriptors.

use crate::format::{escape_html, Html};

type Renderer<R> = Box<dyn Fn(&R) -> Html + Send + Sync>;

pub struct Column<R> {
    pub id: &'static str,
    pub header: &'static str,
    pub width: Option<u32>,
    renderer: Renderer<R>,
}

impl<R> Column<R> {
    pub fn new<F>(id: &'static str, header: &'static str, renderer: F) -> Self
    where
        F: Fn(&R) -> Html + Send + Sync + 'static,
    {
        Self {
            id,
            header,
            width: None,
            renderer: Box::new(renderer),
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn render(&self, row: &R) -> Html {
        (self.renderer)(row)
    }
}

impl<R> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("width", &self.width)
            .finish()
    }
}

#[derive(Debug)]
pub struct Grid<R> {
    columns: Vec<Column<R>>,
    css_class: &'static str,
    title: Option<String>,
    hide_headers: bool,
    auto_expand: Option<&'static str>,
}

impl<R> Grid<R> {
    pub fn new(css_class: &'static str, columns: Vec<Column<R>>) -> Self {
        Self {
            columns,
            css_class,
            title: None,
            hide_headers: false,
            auto_expand: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn hide_headers(mut self) -> Self {
        self.hide_headers = true;
        self
    }

    /// Column that takes the remaining width.
    pub fn auto_expand(mut self, column_id: &'static str) -> Self {
        self.auto_expand = Some(column_id);
        self
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn column_ids(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.id).collect()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn render_row(&self, row: &R) -> Vec<Html> {
        self.columns.iter().map(|c| c.render(row)).collect()
    }

    pub fn render_rows(&self, rows: &[R]) -> Vec<Vec<Html>> {
        rows.iter().map(|row| self.render_row(row)).collect()
    }

    pub fn to_html(&self, rows: &[R]) -> Html {
        let mut out = format!("<table class=\"{}\">", self.css_class);

        if let Some(title) = &self.title {
            out.push_str(&format!("<caption>{}</caption>", escape_html(title)));
        }

        if !self.hide_headers {
            out.push_str("<thead><tr>");
            for column in &self.columns {
                out.push_str(&format!(
                    "<th class=\"col-{}\"{}>{}</th>",
                    column.id,
                    self.cell_style(column),
                    escape_html(column.header)
                ));
            }
            out.push_str("</tr></thead>");
        }

        out.push_str("<tbody>");
        for row in rows {
            out.push_str("<tr>");
            for column in &self.columns {
                out.push_str(&format!(
                    "<td class=\"col-{}\"{}>{}</td>",
                    column.id,
                    self.cell_style(column),
                    column.render(row)
                ));
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table>");

        Html::trusted(out)
    }

    fn cell_style(&self, column: &Column<R>) -> String {
        if self.auto_expand == Some(column.id) {
            " style=\"width:100%\"".to_string()
        } else if let Some(width) = column.width {
            format!(" style=\"width:{}px\"", width)
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fruit {
        name: &'static str,
        count: u32,
    }

    fn fruit_grid() -> Grid<Fruit> {
        Grid::new(
            "fruit-grid",
            vec![
                Column::new("name", "Name", |f: &Fruit| Html::text(f.name)),
                Column::new("count", "Count", |f: &Fruit| {
                    Html::text(&f.count.to_string())
                })
                .with_width(40),
            ],
        )
    }

    #[test]
    fn test_render_rows() {
        let grid = fruit_grid();
        let rows = grid.render_rows(&[
            Fruit { name: "apple", count: 3 },
            Fruit { name: "<pear>", count: 1 },
        ]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1].as_str(), "3");
        assert_eq!(rows[1][0].as_str(), "&lt;pear&gt;");
        assert_eq!(grid.column_ids(), vec!["name", "count"]);
    }

    #[test]
    fn test_to_html() {
        let grid = fruit_grid().with_title("Basket").auto_expand("name");
        let html = grid.to_html(&[Fruit { name: "kiwi", count: 7 }]);
        let html = html.as_str();

        assert!(html.starts_with("<table class=\"fruit-grid\">"));
        assert!(html.contains("<caption>Basket</caption>"));
        assert!(html.contains("<th class=\"col-count\" style=\"width:40px\">Count</th>"));
        assert!(html.contains("<td class=\"col-name\" style=\"width:100%\">kiwi</td>"));
    }

    #[test]
    fn test_hidden_headers() {
        let grid = fruit_grid().hide_headers();
        let html = grid.to_html(&[]);

        assert!(!html.as_str().contains("<thead>"));
        assert!(html.as_str().contains("<tbody></tbody>"));
    }
}
