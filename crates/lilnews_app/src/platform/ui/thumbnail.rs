use image::imageops::FilterType;
use lilnews_logging::news_debug;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use super::theme::COLOR_PLACEHOLDER;

/// Terminal cells across one thumbnail.
pub const THUMB_COLS: u16 = 10;
/// Terminal rows per thumbnail; each row shows two pixel rows.
pub const THUMB_ROWS: u16 = 3;

const HALF_BLOCK: &str = "▀";

/// A thumbnail scaled down to half-block cells: `(top, bottom)` colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailCells {
    rows: Vec<Vec<(Color, Color)>>,
}

impl ThumbnailCells {
    pub fn line(&self, row: usize) -> Vec<Span<'static>> {
        match self.rows.get(row) {
            Some(cells) => cells
                .iter()
                .map(|&(top, bottom)| Span::styled(HALF_BLOCK, Style::default().fg(top).bg(bottom)))
                .collect(),
            None => vec![placeholder_span()],
        }
    }
}

/// Blank cell run drawn while the image is missing or undecodable.
pub fn placeholder_span() -> Span<'static> {
    Span::styled(
        " ".repeat(usize::from(THUMB_COLS)),
        Style::default().bg(COLOR_PLACEHOLDER),
    )
}

/// Decodes image bytes and fills the thumbnail box, cropping the overflow.
/// Bytes that are not an image yield `None`.
pub fn decode_thumbnail(bytes: &[u8]) -> Option<ThumbnailCells> {
    let image = match image::load_from_memory(bytes) {
        Ok(image) => image,
        Err(err) => {
            news_debug!("Undecodable thumbnail ({} bytes): {}", bytes.len(), err);
            return None;
        }
    };

    let width = u32::from(THUMB_COLS);
    let height = u32::from(THUMB_ROWS) * 2;
    let pixels = image
        .resize_to_fill(width, height, FilterType::Triangle)
        .to_rgb8();

    let rows = (0..u32::from(THUMB_ROWS))
        .map(|row| {
            (0..width)
                .map(|col| {
                    let top = pixels.get_pixel(col, row * 2);
                    let bottom = pixels.get_pixel(col, row * 2 + 1);
                    (
                        Color::Rgb(top[0], top[1], top[2]),
                        Color::Rgb(bottom[0], bottom[1], bottom[2]),
                    )
                })
                .collect()
        })
        .collect();

    Some(ThumbnailCells { rows })
}
