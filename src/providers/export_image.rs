//! Render the current diagram to an image file
//!
//! Raster formats draw table cards and relationship lines with the `image`
//! crate; SVG is written as text and also carries table and field names.

use chrono::Utc;
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tracing::info;

use super::{canvas::layout_tables, CanvasState, SchemaStore, TableBox};
use crate::app::{AppEvent, EventSink};
use crate::domain::{Diagram, ImageFormat};

/// Pixels per canvas cell at scale 1
const CELL_WIDTH: u32 = 8;
const CELL_HEIGHT: u32 = 16;
const MARGIN: i32 = 2;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const BORDER: Rgb<u8> = Rgb([71, 85, 105]);
const HEADER: Rgb<u8> = Rgb([147, 51, 234]);
const LINK: Rgb<u8> = Rgb([148, 163, 184]);

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No diagram loaded")]
    NoDiagram,

    #[error("Scale must be between 1 and 4, got {0}")]
    InvalidScale(u32),

    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Writes images of the current diagram into the export directory
#[derive(Clone)]
pub struct ExportImageProvider {
    canvas: CanvasState,
    schema: SchemaStore,
    export_dir: PathBuf,
    events: EventSink,
}

impl ExportImageProvider {
    pub fn new(
        canvas: &CanvasState,
        schema: &SchemaStore,
        export_dir: PathBuf,
        events: EventSink,
    ) -> Self {
        Self {
            canvas: canvas.clone(),
            schema: schema.clone(),
            export_dir,
            events,
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Export the visible tables of the current diagram
    pub async fn export_image(&self, format: ImageFormat, scale: u32) -> Result<PathBuf, ExportError> {
        if !(1..=4).contains(&scale) {
            return Err(ExportError::InvalidScale(scale));
        }
        let mut diagram = self.schema.current_diagram();
        if diagram.id.is_empty() {
            return Err(ExportError::NoDiagram);
        }
        diagram.tables = self.schema.visible_tables();

        tokio::fs::create_dir_all(&self.export_dir).await?;
        let path = self.export_dir.join(file_name(&diagram, format));

        // Rendering is CPU bound; keep it off the UI loop
        let zoom = self.canvas.viewport().zoom;
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_image(&diagram, format, scale, zoom, &target))
            .await??;

        info!("Exported {} image to {}", format.label(), path.display());
        self.events.emit(AppEvent::ImageExported {
            path: path.display().to_string(),
        });
        Ok(path)
    }
}

fn file_name(diagram: &Diagram, format: ImageFormat) -> String {
    let stem: String = diagram
        .name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    let stem = if stem.is_empty() { "diagram".to_string() } else { stem };
    format!(
        "{}-{}.{}",
        stem,
        Utc::now().format("%Y%m%d%H%M%S"),
        format.extension()
    )
}

fn write_image(
    diagram: &Diagram,
    format: ImageFormat,
    scale: u32,
    zoom: f32,
    path: &Path,
) -> Result<(), ExportError> {
    let boxes = layout_tables(&diagram.tables);
    let pixel_scale = (scale as f32 * zoom).max(0.5);

    match format {
        ImageFormat::Svg => {
            std::fs::write(path, render_svg(diagram, &boxes, pixel_scale))?;
        }
        ImageFormat::Png => {
            render_raster(diagram, &boxes, pixel_scale).save_with_format(path, image::ImageFormat::Png)?;
        }
        ImageFormat::Jpeg => {
            render_raster(diagram, &boxes, pixel_scale).save_with_format(path, image::ImageFormat::Jpeg)?;
        }
    }
    Ok(())
}

/// Canvas extent covering every box plus a margin, in cells
fn bounds(boxes: &[TableBox]) -> (i32, i32, i32, i32) {
    let min_x = boxes.iter().map(|b| b.x).min().unwrap_or(0) - MARGIN;
    let min_y = boxes.iter().map(|b| b.y).min().unwrap_or(0) - MARGIN;
    let max_x = boxes.iter().map(|b| b.x + b.width).max().unwrap_or(0) + MARGIN;
    let max_y = boxes.iter().map(|b| b.y + b.height).max().unwrap_or(0) + MARGIN;
    (min_x, min_y, max_x - min_x, max_y - min_y)
}

fn render_raster(diagram: &Diagram, boxes: &[TableBox], scale: f32) -> RgbImage {
    let (origin_x, origin_y, width, height) = bounds(boxes);
    let cw = ((CELL_WIDTH as f32) * scale).max(1.0) as u32;
    let ch = ((CELL_HEIGHT as f32) * scale).max(1.0) as u32;
    let px = |x: i32| (x - origin_x) as u32 * cw;
    let py = |y: i32| (y - origin_y) as u32 * ch;

    let mut img = RgbImage::from_pixel(width.max(1) as u32 * cw, height.max(1) as u32 * ch, BACKGROUND);

    for relationship in &diagram.relationships {
        let source = diagram.tables.iter().position(|t| t.id == relationship.source_table_id);
        let target = diagram.tables.iter().position(|t| t.id == relationship.target_table_id);
        if let (Some(s), Some(t)) = (source, target) {
            let (sx, sy) = boxes[s].center();
            let (tx, ty) = boxes[t].center();
            draw_line(&mut img, (px(sx), py(sy)), (px(tx), py(ty)), LINK);
        }
    }

    for table_box in boxes {
        let (x0, y0) = (px(table_box.x), py(table_box.y));
        let (x1, y1) = (px(table_box.x + table_box.width), py(table_box.y + table_box.height));
        fill_rect(&mut img, (x0, y0), (x1, y1), BACKGROUND);
        fill_rect(&mut img, (x0, y0), (x1, y0 + 2 * ch), HEADER);
        draw_line(&mut img, (x0, y0), (x1, y0), BORDER);
        draw_line(&mut img, (x0, y1), (x1, y1), BORDER);
        draw_line(&mut img, (x0, y0), (x0, y1), BORDER);
        draw_line(&mut img, (x1, y0), (x1, y1), BORDER);
    }

    img
}

fn fill_rect(img: &mut RgbImage, from: (u32, u32), to: (u32, u32), color: Rgb<u8>) {
    for y in from.1..to.1.min(img.height()) {
        for x in from.0..to.0.min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

fn draw_line(img: &mut RgbImage, from: (u32, u32), to: (u32, u32), color: Rgb<u8>) {
    let (x0, y0) = (from.0 as i64, from.1 as i64);
    let (x1, y1) = (to.0 as i64, to.1 as i64);
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
    for i in 0..=steps {
        let x = x0 + (x1 - x0) * i / steps;
        let y = y0 + (y1 - y0) * i / steps;
        if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

fn render_svg(diagram: &Diagram, boxes: &[TableBox], scale: f32) -> String {
    let (origin_x, origin_y, width, height) = bounds(boxes);
    let cw = CELL_WIDTH as f32 * scale;
    let ch = CELL_HEIGHT as f32 * scale;
    let px = |x: i32| (x - origin_x) as f32 * cw;
    let py = |y: i32| (y - origin_y) as f32 * ch;

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n",
        width as f32 * cw,
        height as f32 * ch
    );

    for relationship in &diagram.relationships {
        let source = diagram.tables.iter().position(|t| t.id == relationship.source_table_id);
        let target = diagram.tables.iter().position(|t| t.id == relationship.target_table_id);
        if let (Some(s), Some(t)) = (source, target) {
            let (sx, sy) = boxes[s].center();
            let (tx, ty) = boxes[t].center();
            svg.push_str(&format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#94a3b8\"/>\n",
                px(sx),
                py(sy),
                px(tx),
                py(ty)
            ));
        }
    }

    for (table, table_box) in diagram.tables.iter().zip(boxes) {
        let (x, y) = (px(table_box.x), py(table_box.y));
        svg.push_str(&format!(
            "<g>\n<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#ffffff\" stroke=\"#475569\"/>\n",
            x,
            y,
            table_box.width as f32 * cw,
            table_box.height as f32 * ch
        ));
        svg.push_str(&format!(
            "<text x=\"{}\" y=\"{}\" font-weight=\"bold\">{}</text>\n",
            x + cw,
            y + ch * 1.5,
            escape_xml(&table.qualified_name())
        ));
        for (row, field) in table.fields.iter().enumerate() {
            svg.push_str(&format!(
                "<text x=\"{}\" y=\"{}\">{} {}</text>\n",
                x + cw,
                y + ch * (row as f32 + 3.0),
                escape_xml(&field.name),
                escape_xml(&field.data_type)
            ));
        }
        svg.push_str("</g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DatabaseType, DbField, DbRelationship, DbTable};
    use crate::providers::RedoUndoStack;
    use crate::storage::StorageProvider;
    use tempfile::TempDir;

    async fn provider(dir: &TempDir) -> (ExportImageProvider, SchemaStore) {
        let mut diagram = Diagram::new("Shop <v2>", DatabaseType::Postgresql);
        diagram
            .tables
            .push(DbTable::new("users", None).with_field(DbField::new("id", "int").primary_key()));
        diagram.tables.push(DbTable::new("orders", None));
        let (a, b) = (diagram.tables[0].id.clone(), diagram.tables[1].id.clone());
        diagram.relationships.push(DbRelationship::new("fk", &a, &b));

        let storage = StorageProvider::in_memory().await.unwrap();
        storage.add_diagram(&diagram).await.unwrap();
        let schema = SchemaStore::new(&storage, &RedoUndoStack::default(), EventSink::detached());
        schema.load_diagram(&diagram.id).await.unwrap();

        let canvas = CanvasState::new(EventSink::detached());
        let export = ExportImageProvider::new(
            &canvas,
            &schema,
            dir.path().join("exports"),
            EventSink::detached(),
        );
        (export, schema)
    }

    #[tokio::test]
    async fn test_svg_contains_escaped_names() {
        let dir = TempDir::new().unwrap();
        let (export, _) = provider(&dir).await;

        let path = export.export_image(ImageFormat::Svg, 1).await.unwrap();
        assert_eq!(path.extension().unwrap(), "svg");
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("users"));
        assert!(svg.contains("<line"));
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("Shop__v2_"));
    }

    #[tokio::test]
    async fn test_png_scales_with_factor() {
        let dir = TempDir::new().unwrap();
        let (export, _) = provider(&dir).await;

        let small = export.export_image(ImageFormat::Png, 1).await.unwrap();
        let small_dims = image::image_dimensions(&small).unwrap();
        std::fs::remove_file(&small).unwrap();

        let large = export.export_image(ImageFormat::Png, 2).await.unwrap();
        let large_dims = image::image_dimensions(&large).unwrap();
        assert_eq!(large_dims.0, small_dims.0 * 2);
    }

    #[tokio::test]
    async fn test_rejects_bad_scale_and_missing_diagram() {
        let dir = TempDir::new().unwrap();
        let (export, schema) = provider(&dir).await;
        assert!(matches!(
            export.export_image(ImageFormat::Png, 8).await,
            Err(ExportError::InvalidScale(8))
        ));

        schema.delete_diagram().await.unwrap();
        assert!(matches!(
            export.export_image(ImageFormat::Jpeg, 1).await,
            Err(ExportError::NoDiagram)
        ));
    }
}
