use std::f64::consts::FRAC_PI_2;
use std::path::Path;

use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use scorus::coordinates::{SphCoord, Vec2d};
use scorus::map_proj::mollweide::{iproj, proj};

use super::healpix::RingMap;
use crate::color::ColorScale;
use crate::data::transform::SkyMap;
use crate::error::SkyError;

/// Narrowest figure that still leaves room for the labels.
pub const MIN_WIDTH: u32 = 200;
/// Widest figure accepted; keeps the raster well inside `u32` geometry.
pub const MAX_WIDTH: u32 = 8000;

/// Half axes of the ellipse `proj` maps the sphere onto.
const HALF_WIDTH: f64 = 1.0;
const HALF_HEIGHT: f64 = 0.5;

const MERIDIAN_SPACING: i32 = 60;
const PARALLEL_SPACING: i32 = 30;

// ---------------------------------------------------------------------------
// Figure options and result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FigureOptions {
    /// Figure width in pixels; the height follows from it.
    pub width: u32,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self { width: 1400 }
    }
}

/// A rendered sky map, kept as a plain RGB raster.
#[derive(Debug, Clone)]
pub struct SkyFigure {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Row-major RGB bytes, `width * height * 3` long.
    pub rgb: Vec<u8>,
}

impl SkyFigure {
    /// Write the figure to `path`; the format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<(), SkyError> {
        let image = RgbImage::from_raw(self.width, self.height, self.rgb.clone())
            .ok_or_else(|| SkyError::Drawing("figure buffer has the wrong size".to_string()))?;
        image.save(path)?;
        log::info!("Saved sky map to {}", path.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Pixel geometry of the figure, scaled with its width.
#[derive(Debug, Clone, Copy)]
struct Layout {
    scale: f64,
    width: u32,
    height: u32,
    map_left: u32,
    map_top: u32,
    map_width: u32,
    map_height: u32,
    bar_left: u32,
    bar_top: u32,
    bar_width: u32,
    bar_height: u32,
}

impl Layout {
    fn new(width: u32) -> Self {
        let scale = width as f64 / 1400.0;
        let px = |v: f64| (v * scale).round() as u32;

        let map_width = px(1200.0);
        let map_height = map_width / 2;
        let map_left = (width - map_width) / 2;
        let map_top = px(90.0);

        let bar_width = (width as f64 * 0.6).round() as u32;
        let bar_left = (width - bar_width) / 2;
        let bar_top = map_top + map_height + px(70.0);
        let bar_height = px(22.0).max(2);

        Layout {
            scale,
            width,
            height: bar_top + bar_height + px(90.0),
            map_left,
            map_top,
            map_width,
            map_height,
            bar_left,
            bar_top,
            bar_width,
            bar_height,
        }
    }

    /// Mollweide plane coordinates of a pixel inside the map box.
    /// Longitude grows to the left, as on the sky seen from inside.
    fn to_plane(&self, column: u32, row: u32) -> Vec2d<f64> {
        let u = (column as f64 + 0.5) / self.map_width as f64 * 2.0 - 1.0;
        let v = 1.0 - (row as f64 + 0.5) / self.map_height as f64 * 2.0;
        Vec2d::new(-u * HALF_WIDTH, v * HALF_HEIGHT)
    }

    /// Figure pixel of a point on the Mollweide plane.
    fn plane_to_pixel(&self, point: Vec2d<f64>) -> (i32, i32) {
        let column = self.map_left as f64 + (1.0 - point.x / HALF_WIDTH) / 2.0 * self.map_width as f64;
        let row = self.map_top as f64 + (1.0 - point.y / HALF_HEIGHT) / 2.0 * self.map_height as f64;
        (column.round() as i32, row.round() as i32)
    }

    /// Figure pixel of a longitude / latitude pair in degrees.
    fn to_pixel(&self, longitude: f64, latitude: f64) -> (i32, i32) {
        self.plane_to_pixel(proj(direction(longitude, latitude)))
    }

    /// Left and right ends of the parallel at `latitude` degrees, on the
    /// ellipse outline.
    fn parallel_ends(&self, latitude: f64) -> [(i32, i32); 2] {
        let y = proj(direction(0.0, latitude)).y;
        let x = HALF_WIDTH * (1.0 - (y / HALF_HEIGHT).powi(2)).max(0.0).sqrt();
        [
            self.plane_to_pixel(Vec2d::new(x, y)),
            self.plane_to_pixel(Vec2d::new(-x, y)),
        ]
    }

    fn font_size(&self, points: f64) -> f64 {
        (points * self.scale).max(6.0)
    }
}

/// Sky direction of a longitude / latitude pair in degrees.
fn direction(longitude: f64, latitude: f64) -> SphCoord<f64> {
    SphCoord::new(FRAC_PI_2 - latitude.to_radians(), longitude.to_radians())
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Draw `map` as a Mollweide sky map with graticule, colour bar and title.
pub fn render_figure(map: &SkyMap, options: &FigureOptions) -> Result<SkyFigure, SkyError> {
    if !(MIN_WIDTH..=MAX_WIDTH).contains(&options.width) {
        return Err(SkyError::InvalidFigureSize(options.width));
    }
    let sky = RingMap::new(&map.values)?;
    let colors = ColorScale::spanning(&map.values);
    log::debug!(
        "Rendering nside {} sky, colour range [{}, {}]",
        sky.nside(),
        colors.min,
        colors.max
    );

    let layout = Layout::new(options.width);
    let title = map.title();
    let mut rgb = vec![255u8; layout.width as usize * layout.height as usize * 3];

    paint_sky(&mut rgb, &layout, &sky, &colors);
    paint_color_bar(&mut rgb, &layout, &colors);

    {
        let root = BitMapBackend::with_buffer(&mut rgb, (layout.width, layout.height))
            .into_drawing_area();
        draw_graticule(&root, &layout)?;
        draw_labels(&root, &layout, &title, &map.unit_label, &colors)?;
        root.present().map_err(drawing_error)?;
    }

    Ok(SkyFigure {
        title,
        width: layout.width,
        height: layout.height,
        rgb,
    })
}

fn put_pixel(rgb: &mut [u8], width: u32, column: u32, row: u32, color: [u8; 3]) {
    let offset = (row as usize * width as usize + column as usize) * 3;
    rgb[offset..offset + 3].copy_from_slice(&color);
}

fn paint_sky(rgb: &mut [u8], layout: &Layout, sky: &RingMap, colors: &ColorScale) {
    for row in 0..layout.map_height {
        for column in 0..layout.map_width {
            if let Some(direction) = iproj(layout.to_plane(column, row)) {
                let color = colors.color_for(sky.value_at(direction));
                put_pixel(
                    rgb,
                    layout.width,
                    layout.map_left + column,
                    layout.map_top + row,
                    color,
                );
            }
        }
    }
}

fn paint_color_bar(rgb: &mut [u8], layout: &Layout, colors: &ColorScale) {
    let steps = (layout.bar_width - 1).max(1) as f64;
    for column in 0..layout.bar_width {
        let color = colors.color_at(column as f64 / steps);
        for row in 0..layout.bar_height {
            put_pixel(
                rgb,
                layout.width,
                layout.bar_left + column,
                layout.bar_top + row,
                color,
            );
        }
    }
}

fn draw_graticule(root: &DrawingArea<BitMapBackend, Shift>, layout: &Layout) -> Result<(), SkyError> {
    let grid_style = || BLACK.mix(0.35).stroke_width(1);

    for longitude in (-180 + MERIDIAN_SPACING..180).step_by(MERIDIAN_SPACING as usize) {
        let points: Vec<(i32, i32)> = (-90..=90)
            .map(|latitude| layout.to_pixel(longitude as f64, latitude as f64))
            .collect();
        root.draw(&PathElement::new(points, grid_style()))
            .map_err(drawing_error)?;
    }
    for latitude in (-90 + PARALLEL_SPACING..90).step_by(PARALLEL_SPACING as usize) {
        let ends = layout.parallel_ends(latitude as f64);
        root.draw(&PathElement::new(ends.to_vec(), grid_style()))
            .map_err(drawing_error)?;
    }

    // ellipse outline
    let outline: Vec<(i32, i32)> = (0..=360)
        .map(|step| {
            let t = (step as f64).to_radians();
            layout.plane_to_pixel(Vec2d::new(HALF_WIDTH * t.cos(), HALF_HEIGHT * t.sin()))
        })
        .collect();
    root.draw(&PathElement::new(outline, BLACK.stroke_width(1)))
        .map_err(drawing_error)?;

    root.draw(&Rectangle::new(
        [
            (layout.bar_left as i32, layout.bar_top as i32),
            (
                (layout.bar_left + layout.bar_width) as i32,
                (layout.bar_top + layout.bar_height) as i32,
            ),
        ],
        BLACK.stroke_width(1),
    ))
    .map_err(drawing_error)?;
    Ok(())
}

fn draw_labels(
    root: &DrawingArea<BitMapBackend, Shift>,
    layout: &Layout,
    title: &str,
    unit_label: &str,
    colors: &ColorScale,
) -> Result<(), SkyError> {
    let text = |points: f64, color: &RGBColor, pos: Pos| {
        ("sans-serif", layout.font_size(points))
            .into_font()
            .color(color)
            .pos(pos)
    };
    let centered = Pos::new(HPos::Center, VPos::Center);

    let title_style = text(30.0, &BLACK, centered);
    if let Err(e) = root.estimate_text_size(title, &title_style) {
        log::warn!("Skipping figure labels, no usable font: {e}");
        return Ok(());
    }

    let draw = |label: &str, style: &TextStyle, at: (i32, i32)| {
        root.draw_text(label, style, at).map_err(drawing_error)
    };
    let px = |v: f64| (v * layout.scale).round() as i32;

    draw(title, &title_style, ((layout.width / 2) as i32, px(45.0)))?;

    // longitude labels sit on the equator, inside the map
    let longitude_style = text(16.0, &WHITE, Pos::new(HPos::Center, VPos::Top));
    for longitude in (-180 + MERIDIAN_SPACING..180).step_by(MERIDIAN_SPACING as usize) {
        let (x, y) = layout.to_pixel(longitude as f64, 0.0);
        draw(&format!("{longitude}°"), &longitude_style, (x, y + px(4.0)))?;
    }

    let latitude_style = text(16.0, &BLACK, Pos::new(HPos::Right, VPos::Center));
    for latitude in (-90 + PARALLEL_SPACING..90).step_by(PARALLEL_SPACING as usize) {
        let [(x, y), _] = layout.parallel_ends(latitude as f64);
        draw(&format!("{latitude}°"), &latitude_style, (x - px(6.0), y))?;
    }

    let axis_style = text(20.0, &BLACK, centered);
    draw(
        "Longitude",
        &axis_style,
        (
            (layout.width / 2) as i32,
            (layout.map_top + layout.map_height) as i32 + px(28.0),
        ),
    )?;
    let rotated = ("sans-serif", layout.font_size(20.0))
        .into_font()
        .transform(FontTransform::Rotate270)
        .color(&BLACK)
        .pos(centered);
    draw(
        "Latitude",
        &rotated,
        (
            layout.map_left as i32 - px(70.0),
            (layout.map_top + layout.map_height / 2) as i32,
        ),
    )?;

    let tick_style = text(16.0, &BLACK, Pos::new(HPos::Center, VPos::Top));
    let tick_y = (layout.bar_top + layout.bar_height) as i32 + px(6.0);
    let mid = (colors.min + colors.max) / 2.0;
    for (fraction, value) in [(0.0, colors.min), (0.5, mid), (1.0, colors.max)] {
        let x = layout.bar_left as f64 + fraction * layout.bar_width as f64;
        draw(&tick_label(value), &tick_style, (x.round() as i32, tick_y))?;
    }

    let unit_style = text(20.0, &BLACK, Pos::new(HPos::Center, VPos::Top));
    draw(
        unit_label,
        &unit_style,
        (
            (layout.width / 2) as i32,
            (layout.bar_top + layout.bar_height) as i32 + px(40.0),
        ),
    )?;
    Ok(())
}

/// Colour bar tick text: fixed point for moderate magnitudes, else scientific.
fn tick_label(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-2..1e4).contains(&magnitude) {
        format!("{value:.2}")
    } else {
        format!("{value:.2e}")
    }
}

fn drawing_error<E: std::error::Error + Send + Sync>(error: DrawingAreaErrorKind<E>) -> SkyError {
    SkyError::Drawing(error.to_string())
}
