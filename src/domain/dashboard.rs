// Dashboard domain model
use super::widgets::{ChartData, TableData, TileData};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub tiles: Vec<TileData>,
    pub charts: Vec<ChartData>,
    pub tables: Vec<TableData>,
}

impl Dashboard {
    pub fn new(
        title: String,
        tiles: Vec<TileData>,
        charts: Vec<ChartData>,
        tables: Vec<TableData>,
    ) -> Self {
        Self {
            title,
            tiles,
            charts,
            tables,
        }
    }

    pub fn tile(&self, id: &str) -> Option<&TileData> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn table(&self, id: &str) -> Option<&TableData> {
        self.tables.iter().find(|t| t.id == id)
    }
}
