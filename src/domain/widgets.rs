// Dashboard widget domain models
use crate::domain::tire::TreadCondition;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryPoint {
    pub label: String,
    pub value: f64,
}

impl CategoryPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TileData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: f64,
    pub precision: i32,
}

impl TileData {
    pub fn new(id: String, title: String, unit: String, value: f64, precision: i32) -> Self {
        Self {
            id,
            title,
            unit,
            value,
            precision,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub points: Vec<CategoryPoint>,
}

impl SeriesData {
    pub fn new(id: String, name: String, color: Option<String>, points: Vec<CategoryPoint>) -> Self {
        Self {
            id,
            name,
            color,
            points,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub fraction_digits: Option<i32>,
    pub series: Vec<SeriesData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
}

impl ChartData {
    pub fn new(
        id: String,
        title: String,
        unit: Option<String>,
        kind: ChartKind,
        fraction_digits: Option<i32>,
        series: Vec<SeriesData>,
    ) -> Self {
        Self {
            id,
            title,
            unit,
            kind,
            fraction_digits,
            series,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub cells: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<TreadCondition>,
}

impl TableRow {
    pub fn plain(cells: Vec<String>) -> Self {
        Self {
            cells,
            highlight: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TableData {
    pub id: String,
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TableData {
    pub fn new(id: &str, title: &str, columns: Vec<String>, rows: Vec<TableRow>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            columns,
            rows,
        }
    }
}
