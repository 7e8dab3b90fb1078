//! Minimal tab-separated table
//!
//! Cells are kept verbatim (no quoting or type inference) so that rewriting a
//! table only changes the cells that were explicitly modified.

use bidsprep_common::{Error, Result};

const BOM: char = '\u{feff}';

/// A header row plus data rows, in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Source started with a UTF-8 byte order mark (written back on render)
    pub bom: bool,
}

impl Table {
    /// Parse TSV text
    ///
    /// A leading byte order mark is stripped before the header is split.
    /// Blank lines are ignored and `\r\n` endings are accepted. A row with more
    /// cells than the header is an error; a shorter row is padded with empty
    /// cells.
    pub fn parse(text: &str) -> Result<Self> {
        let (text, bom) = match text.strip_prefix(BOM) {
            Some(rest) => (rest, true),
            None => (text, false),
        };
        let mut lines = text
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .enumerate()
            .filter(|(_, line)| !line.is_empty());

        let Some((_, header_line)) = lines.next() else {
            return Err(Error::Table("no header row".to_string()));
        };
        let header: Vec<String> = header_line.split('\t').map(str::to_string).collect();

        let mut rows = Vec::new();
        for (index, line) in lines {
            let mut cells: Vec<String> = line.split('\t').map(str::to_string).collect();
            if cells.len() > header.len() {
                return Err(Error::Table(format!(
                    "line {}: expected {} fields, saw {}",
                    index + 1,
                    header.len(),
                    cells.len()
                )));
            }
            cells.resize(header.len(), String::new());
            rows.push(cells);
        }

        Ok(Self { header, rows, bom })
    }

    /// Position of the named column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Render back to TSV, one `\n`-terminated line per row
    pub fn to_tsv_string(&self) -> String {
        let mut out = String::new();
        if self.bom {
            out.push(BOM);
        }
        for line in std::iter::once(&self.header).chain(self.rows.iter()) {
            out.push_str(&line.join("\t"));
            out.push('\n');
        }
        out
    }
}
