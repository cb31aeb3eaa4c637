use std::f64::consts::PI;

use anyhow::{bail, Context, Result};
use image::ImageEncoder;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::dispatch::{ChartRenderer, RenderTarget};
use crate::ir::{CanonicalChartSpec, EmptyState};
use crate::palette::series_color;
use crate::scale::{category_scale, series_values, value_scale};
use crate::ticks::format_tick;
use crate::{OutputFormat, RenderOptions};

const FOOTER_HEIGHT: i32 = 28;
const RADAR_RINGS: usize = 4;
const RADAR_EXTENT: f64 = 1.35;

/// Run one drawing routine against the backend the options ask for.
macro_rules! paint {
    ($options:expr, |$root:ident| $draw:expr) => {{
        let (width, height) = ($options.width, $options.height);
        match $options.format {
            OutputFormat::Svg => {
                let mut svg = String::new();
                {
                    let $root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
                    $draw?;
                    $root.present().context("Failed to present drawing")?;
                }
                Ok(svg.into_bytes())
            }
            _ => {
                let mut buffer = vec![0u8; rgb_buffer_len(width, height)?];
                {
                    let $root = BitMapBackend::with_buffer(&mut buffer, (width, height))
                        .into_drawing_area();
                    $draw?;
                    $root.present().context("Failed to present drawing")?;
                }
                encode_png(&buffer, width, height)
            }
        }
    }};
}

/// Paints canonical specs with plotters, as PNG or SVG.
#[derive(Debug, Clone, Default)]
pub struct PlotRenderer {
    options: RenderOptions,
}

impl PlotRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl ChartRenderer for PlotRenderer {
    fn render(&self, target: RenderTarget, spec: &CanonicalChartSpec) -> Result<Vec<u8>> {
        paint!(self.options, |root| draw_chart(&root, target, spec))
    }

    fn render_empty(&self, state: &EmptyState) -> Result<Vec<u8>> {
        paint!(self.options, |root| draw_message(&root, &state.message))
    }
}

/// Byte length of an RGB canvas, refusing sizes that do not fit in memory.
fn rgb_buffer_len(width: u32, height: u32) -> Result<usize> {
    match (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
    {
        Some(len) => Ok(len),
        None => bail!("Canvas {}x{} is too large", width, height),
    }
}

/// Encode an RGB buffer as PNG
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png_bytes = Vec::new();
    {
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(buffer, width, height, image::ColorType::Rgb8)
            .context("Failed to encode PNG")?;
    }
    Ok(png_bytes)
}

fn draw_message<DB>(root: &DrawingArea<DB, Shift>, message: &str) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).context("Failed to fill background")?;
    let (width, height) = root.dim_in_pixel();
    let style = ("sans-serif", 20)
        .into_font()
        .color(&BLACK.mix(0.6))
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw_text(message, &style, (width as i32 / 2, height as i32 / 2))
        .context("Failed to draw message")?;
    Ok(())
}

/// Draw header, footer and the plot body for one target.
fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    target: RenderTarget,
    spec: &CanonicalChartSpec,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).context("Failed to fill background")?;
    let (_, height) = root.dim_in_pixel();

    let body = match &spec.labels.footer {
        Some(footer) => {
            let (body, foot) = root.split_vertically(height as i32 - FOOTER_HEIGHT);
            let style = ("sans-serif", 13).into_font().color(&BLACK.mix(0.7));
            foot.draw_text(footer, &style, (12, 6))
                .context("Failed to draw footer")?;
            body
        }
        None => root.clone(),
    };

    let body = body
        .titled(&spec.labels.title, ("sans-serif", 22))
        .context("Failed to draw title")?;
    let plot = body
        .titled(&spec.labels.subtitle, ("sans-serif", 14))
        .context("Failed to draw subtitle")?;

    match target {
        RenderTarget::AreaTrend => draw_area_trend(&plot, spec),
        RenderTarget::GroupedBars => draw_grouped_bars(&plot, spec),
        RenderTarget::SkillRadar => draw_radar(&plot, spec, 0.6, false),
        RenderTarget::SkillRadarCompare => draw_radar(&plot, spec, 0.3, true),
        RenderTarget::RankedBars => draw_ranked_bars(&plot, spec),
    }
}

/// Tick text for a categorical slot at integer positions.
fn slot_label(categories: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 0.01 || idx < 0.0 || idx as usize >= categories.len() {
        return String::new();
    }
    format_tick(&categories[idx as usize])
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.1}", v)
    }
}

fn draw_area_trend<DB>(area: &DrawingArea<DB, Shift>, spec: &CanonicalChartSpec) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let categories = category_scale(spec).categories;
    let n = categories.len();
    let (y_min, y_max) = value_scale(spec).domain;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_min..y_max)
        .context("Failed to build chart")?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n.clamp(2, 12))
        .x_label_formatter(&|x| slot_label(&categories, *x))
        .draw()
        .context("Failed to draw mesh")?;

    let color = series_color(0);
    for key in &spec.series_keys {
        let points: Vec<(f64, f64)> = series_values(spec, key)
            .into_iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
            .collect();

        chart
            .draw_series(
                AreaSeries::new(points, y_min, color.mix(0.2).filled())
                    .border_style(color.stroke_width(3)),
            )
            .context("Failed to draw area series")?;
    }

    Ok(())
}

fn draw_grouped_bars<DB>(area: &DrawingArea<DB, Shift>, spec: &CanonicalChartSpec) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let categories = category_scale(spec).categories;
    let n = categories.len();
    let (y_min, y_max) = value_scale(spec).domain;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_min..y_max)
        .context("Failed to build chart")?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n.clamp(2, 12))
        .x_label_formatter(&|x| slot_label(&categories, *x))
        .draw()
        .context("Failed to draw mesh")?;

    // Side-by-side bars, one colour per series
    let num_series = spec.series_keys.len().max(1);
    let bar_width = 0.8 / num_series as f64;

    for (series_idx, key) in spec.series_keys.iter().enumerate() {
        let color = series_color(series_idx);
        let offset = (series_idx as f64 - (num_series as f64 - 1.0) / 2.0) * bar_width;
        let bars: Vec<Rectangle<(f64, f64)>> = series_values(spec, key)
            .into_iter()
            .enumerate()
            .filter_map(|(cat_idx, v)| {
                let v = v?;
                let x_center = cat_idx as f64 + offset;
                Some(Rectangle::new(
                    [(x_center - bar_width / 2.0, 0.0), (x_center + bar_width / 2.0, v)],
                    color.filled(),
                ))
            })
            .collect();

        chart
            .draw_series(bars)
            .context("Failed to draw bar")?
            .label(key.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK.mix(0.3))
        .draw()
        .context("Failed to draw legend")?;

    Ok(())
}

fn draw_ranked_bars<DB>(area: &DrawingArea<DB, Shift>, spec: &CanonicalChartSpec) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let names = category_scale(spec).categories;
    let n = names.len();
    let (x_min, x_max) = value_scale(spec).domain;

    // First-ranked row at the top.
    let slot = |i: usize| (n - 1 - i) as f64;
    let name_at = |y: f64| -> String {
        let idx = y.round();
        if (y - idx).abs() > 0.01 || idx < 0.0 || idx as usize >= n {
            return String::new();
        }
        names[n - 1 - idx as usize].clone()
    };

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .margin_right(40)
        .x_label_area_size(30)
        .y_label_area_size(130)
        .build_cartesian_2d(x_min..x_max, -0.5..(n as f64 - 0.5))
        .context("Failed to build chart")?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n.max(2))
        .y_label_formatter(&|y| name_at(*y))
        .draw()
        .context("Failed to draw mesh")?;

    let color = series_color(0);
    let label_style = ("sans-serif", 12).into_font().color(&BLACK);
    for key in &spec.series_keys {
        let values = series_values(spec, key);
        for (i, v) in values.into_iter().enumerate() {
            let Some(v) = v else { continue };
            let y = slot(i);
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(0.0, y - 0.35), (v, y + 0.35)],
                    color.filled(),
                )))
                .context("Failed to draw bar")?;
            chart
                .draw_series(std::iter::once(Text::new(
                    format_value(v),
                    (v, y + 0.1),
                    label_style.clone(),
                )))
                .context("Failed to draw bar label")?;
        }
    }

    Ok(())
}

/// Point on the radar for spoke `i` of `n` at normalized radius `r`.
/// Spoke 0 points straight up; spokes proceed clockwise.
fn radar_point(i: usize, n: usize, r: f64) -> (f64, f64) {
    let theta = PI / 2.0 - 2.0 * PI * i as f64 / n.max(1) as f64;
    (r * theta.cos(), r * theta.sin())
}

fn draw_radar<DB>(
    area: &DrawingArea<DB, Shift>,
    spec: &CanonicalChartSpec,
    fill_alpha: f64,
    with_legend: bool,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let categories = category_scale(spec).categories;
    let n = categories.len();
    let (lo, hi) = value_scale(spec).domain;
    let span = hi - lo;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .build_cartesian_2d(-RADAR_EXTENT..RADAR_EXTENT, -RADAR_EXTENT..RADAR_EXTENT)
        .context("Failed to build chart")?;

    // Grid: concentric rings and one spoke per category
    let grid = BLACK.mix(0.15).stroke_width(1);
    for ring in 1..=RADAR_RINGS {
        let r = ring as f64 / RADAR_RINGS as f64;
        let mut outline: Vec<(f64, f64)> = (0..n).map(|i| radar_point(i, n, r)).collect();
        if let Some(first) = outline.first().copied() {
            outline.push(first);
        }
        chart
            .draw_series(std::iter::once(PathElement::new(outline, grid)))
            .context("Failed to draw radar grid")?;
    }
    let label_style = ("sans-serif", 14).into_font().color(&BLACK);
    for (i, category) in categories.iter().enumerate() {
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0.0, 0.0), radar_point(i, n, 1.0)],
                grid,
            )))
            .context("Failed to draw radar spoke")?;
        chart
            .draw_series(std::iter::once(Text::new(
                category.clone(),
                radar_point(i, n, 1.12),
                label_style.clone(),
            )))
            .context("Failed to draw radar label")?;
    }

    for (series_idx, key) in spec.series_keys.iter().enumerate() {
        let color = series_color(series_idx);
        let points: Vec<(f64, f64)> = series_values(spec, key)
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                let r = ((v.unwrap_or(lo) - lo) / span).clamp(0.0, 1.0);
                radar_point(i, n, r)
            })
            .collect();

        let mut outline = points.clone();
        if let Some(first) = outline.first().copied() {
            outline.push(first);
        }

        chart
            .draw_series(std::iter::once(Polygon::new(points, color.mix(fill_alpha).filled())))
            .context("Failed to draw radar area")?;
        chart
            .draw_series(std::iter::once(PathElement::new(outline, color.stroke_width(2))))
            .context("Failed to draw radar outline")?
            .label(key.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    if with_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK.mix(0.3))
            .draw()
            .context("Failed to draw legend")?;
    }

    Ok(())
}
