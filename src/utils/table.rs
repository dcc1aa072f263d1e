//! Table rendering utilities for CLI outputs.

pub struct Column {
    pub header: String,
    pub right_aligned: bool,
}

impl Column {
    pub fn left(header: &str) -> Self {
        Self {
            header: header.to_string(),
            right_aligned: false,
        }
    }

    pub fn right(header: &str) -> Self {
        Self {
            header: header.to_string(),
            right_aligned: true,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(col.header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();

        let line = |cells: Vec<&str>| -> String {
            let mut l = String::new();
            for ((cell, col), w) in cells.into_iter().zip(&self.columns).zip(&widths) {
                if col.right_aligned {
                    l.push_str(&format!("{:>width$}  ", cell, width = *w));
                } else {
                    l.push_str(&format!("{:<width$}  ", cell, width = *w));
                }
            }
            l.trim_end().to_string()
        };

        let mut out = String::new();
        out.push_str(&line(self.columns.iter().map(|c| c.header.as_str()).collect()));
        out.push('\n');

        let rule_len = widths.iter().map(|w| w + 2).sum::<usize>().saturating_sub(2);
        out.push_str(&"-".repeat(rule_len));
        out.push('\n');

        for row in &self.rows {
            let cells = (0..self.columns.len())
                .map(|i| row.get(i).map(String::as_str).unwrap_or(""))
                .collect();
            out.push_str(&line(cells));
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_grow_to_fit_content() {
        let mut t = Table::new(vec![Column::right("ID"), Column::left("Name")]);
        t.add_row(vec!["12".into(), "Engineering".into()]);
        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID  Name");
        assert_eq!(lines[2], "12  Engineering");
    }
}
