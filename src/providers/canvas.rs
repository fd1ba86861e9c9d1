//! Canvas viewport and table placement

use parking_lot::RwLock;
use std::sync::Arc;

use super::ScrollAction;
use crate::app::{AppEvent, EventSink};
use crate::domain::DbTable;

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 2.0;
const ZOOM_STEP: f32 = 0.25;

/// Width of a table card in canvas cells
pub const TABLE_WIDTH: i32 = 24;
const GRID_GAP_X: i32 = 4;
const GRID_GAP_Y: i32 = 2;
const GRID_COLUMNS: i32 = 4;

/// Visible part of the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { x: 0, y: 0, zoom: 1.0 }
    }
}

/// A table rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl TableBox {
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// Shared viewport of the diagram canvas
#[derive(Clone)]
pub struct CanvasState {
    viewport: Arc<RwLock<Viewport>>,
    events: EventSink,
}

impl CanvasState {
    pub fn new(events: EventSink) -> Self {
        Self {
            viewport: Arc::new(RwLock::new(Viewport::default())),
            events,
        }
    }

    pub fn viewport(&self) -> Viewport {
        *self.viewport.read()
    }

    pub fn pan(&self, dx: i32, dy: i32) {
        self.update(|viewport| {
            viewport.x += dx;
            viewport.y += dy;
        });
    }

    pub fn zoom_in(&self) {
        self.update(|viewport| viewport.zoom = (viewport.zoom + ZOOM_STEP).min(MAX_ZOOM));
    }

    pub fn zoom_out(&self) {
        self.update(|viewport| viewport.zoom = (viewport.zoom - ZOOM_STEP).max(MIN_ZOOM));
    }

    pub fn reset(&self) {
        self.update(|viewport| *viewport = Viewport::default());
    }

    /// Mouse wheel on the canvas, `delta` is negative for "up"
    pub fn scroll(&self, delta: i32, action: ScrollAction) {
        match action {
            ScrollAction::Pan => self.pan(0, delta * 2),
            ScrollAction::Zoom if delta < 0 => self.zoom_in(),
            ScrollAction::Zoom => self.zoom_out(),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut Viewport)) {
        let changed = {
            let mut viewport = self.viewport.write();
            let before = *viewport;
            apply(&mut viewport);
            *viewport != before
        };
        if changed {
            self.events.emit(AppEvent::CanvasChanged);
        }
    }
}

/// Height of a table card: border, header, one row per field
pub fn table_height(table: &DbTable) -> i32 {
    table.fields.len().max(1) as i32 + 3
}

/// Canvas placement of every table
///
/// Tables keep their stored position; unplaced tables (at the origin) flow
/// into a grid.
pub fn layout_tables(tables: &[DbTable]) -> Vec<TableBox> {
    let mut row_height = 0;
    let mut cursor_y = 0;
    let mut column = 0;

    tables
        .iter()
        .map(|table| {
            let height = table_height(table);
            if table.x != 0 || table.y != 0 {
                return TableBox {
                    x: table.x,
                    y: table.y,
                    width: TABLE_WIDTH,
                    height,
                };
            }

            if column == GRID_COLUMNS {
                column = 0;
                cursor_y += row_height + GRID_GAP_Y;
                row_height = 0;
            }
            let placed = TableBox {
                x: column * (TABLE_WIDTH + GRID_GAP_X),
                y: cursor_y,
                width: TABLE_WIDTH,
                height,
            };
            row_height = row_height.max(height);
            column += 1;
            placed
        })
        .collect()
}
