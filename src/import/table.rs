//! In-memory shape of a parsed sheet: headers plus header-keyed rows.

/// A raw cell value. Empty cells are always `Text("")`, never missing.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Text rendering; integral numbers print without a fraction.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Self::Number(n) => n.to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// One sheet line, keyed by header name in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, Cell)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, header: impl Into<String>, cell: impl Into<Cell>) {
        self.fields.push((header.into(), cell.into()));
    }

    /// First cell stored under `header`.
    pub fn get(&self, header: &str) -> Option<&Cell> {
        self.fields.iter().find(|(h, _)| h == header).map(|(_, c)| c)
    }

    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, c)| c.is_blank())
    }
}

impl<K: Into<String>, V: Into<Cell>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// Output of the tabular reader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}
