// SVG backend - replays a draw list onto plotters' SVG backend
use plotters::backend::SVGBackend;
use plotters::style::{FontDesc, FontFamily, FontStyle, RGBAColor, ShapeStyle};
use plotters_backend::{BackendCoord, DrawingBackend, text_anchor};

use super::colors::Rgba;
use super::commands::{DrawCommand, DrawList, Point, TextAnchor};

/// Render `list` as a standalone SVG document of the given size.
///
/// Draw lists use a bottom-left origin; SVG's origin is top-left, so every y
/// is flipped against `height`.
pub fn to_svg(list: &DrawList, width: f64, height: f64) -> anyhow::Result<String> {
    let size = (pixels(width), pixels(height));
    let flip = |p: &Point| -> BackendCoord { (p.x.round() as i32, (height - p.y).round() as i32) };

    let mut out = String::new();
    {
        let mut backend = SVGBackend::with_string(&mut out, size);

        for command in list.commands() {
            match command {
                DrawCommand::FillRect { rect, color } => backend.draw_rect(
                    flip(&Point::new(rect.x, rect.y + rect.height)),
                    flip(&Point::new(rect.x + rect.width, rect.y)),
                    &shape(*color, 1.0, true),
                    true,
                )?,
                DrawCommand::Line {
                    from,
                    to,
                    width,
                    color,
                } => backend.draw_line(flip(from), flip(to), &shape(*color, *width, false))?,
                DrawCommand::Polyline {
                    points,
                    width,
                    color,
                } => backend.draw_path(points.iter().map(flip), &shape(*color, *width, false))?,
                DrawCommand::Text {
                    text,
                    position,
                    anchor,
                    font_size,
                    color,
                } => {
                    let v_pos = match anchor {
                        TextAnchor::BottomLeft => text_anchor::VPos::Bottom,
                        TextAnchor::MiddleLeft => text_anchor::VPos::Center,
                    };
                    let style = FontDesc::new(FontFamily::SansSerif, *font_size, FontStyle::Normal)
                        .color(&backend_color(*color))
                        .pos(text_anchor::Pos::new(text_anchor::HPos::Left, v_pos));
                    backend.draw_text(text, &style, flip(position))?
                }
                DrawCommand::FillEllipse { rect, color } => {
                    let radius = (rect.width.min(rect.height) / 2.0).round().max(1.0) as u32;
                    backend.draw_circle(flip(&rect.center()), radius, &shape(*color, 1.0, true), true)?
                }
            }
        }

        backend.present()?;
    }
    Ok(out)
}

fn pixels(size: f64) -> u32 {
    size.round().max(1.0) as u32
}

fn backend_color(color: Rgba) -> RGBAColor {
    let (r, g, b) = color.to_u8();
    RGBAColor(r, g, b, f64::from(color.a.clamp(0.0, 1.0)))
}

fn shape(color: Rgba, width: f64, filled: bool) -> ShapeStyle {
    ShapeStyle {
        color: backend_color(color),
        filled,
        stroke_width: width.round().max(1.0) as u32,
    }
}
