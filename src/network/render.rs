// Network image rendering.
//
// Draws the spring layout with edge width and colour scaled by interaction
// weight and node size scaled by weighted degree. Raster formats go through
// `image`/`imageproc`; a `.svg` path gets a vector drawing with name labels.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut};
use tracing::info;

use super::graph::InteractionGraph;
use super::layout::{spring_layout, LayoutParams, Point};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const NODE_COLOR: Rgb<u8> = Rgb([31, 119, 180]);

/// Everything that differs between a small preview and a full-size poster.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Width and height of the output, in pixels
    pub image_size: u32,
    /// Spring constant factor: optimal distance is `k_factor / sqrt(order)`
    pub k_factor: f64,
    pub iterations: usize,
    pub seed: u64,
    /// Node radius is `node_scale * sqrt(weighted degree)` pixels
    pub node_scale: f64,
    /// Width of the heaviest edge, in pixels
    pub max_edge_width: f64,
    /// Blank border around the drawing, as a fraction of `image_size`
    pub margin: f64,
    /// Label size for SVG output, in pixels
    pub font_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_size: 4000,
            k_factor: 24.0,
            iterations: 50,
            seed: 42,
            node_scale: 2.0,
            max_edge_width: 40.0,
            margin: 0.06,
            font_size: 18,
        }
    }
}

impl RenderConfig {
    /// A small, quick rendering for eyeballing the graph.
    pub fn preview() -> Self {
        Self {
            image_size: 1200,
            k_factor: 4.0,
            node_scale: 0.6,
            max_edge_width: 12.0,
            font_size: 10,
            ..Self::default()
        }
    }

    fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            k_factor: self.k_factor,
            iterations: self.iterations,
            seed: self.seed,
        }
    }
}

/// One edge ready to draw, in pixel space.
struct EdgeShape {
    from: (f64, f64),
    to: (f64, f64),
    width: f64,
    color: Rgb<u8>,
}

/// One node ready to draw, in pixel space.
struct NodeShape<'a> {
    name: &'a str,
    center: (f64, f64),
    radius: f64,
}

/// Lay out and draw the graph to `path`.
///
/// The format follows the extension: `.svg` writes a labelled vector
/// drawing, anything else is handed to `image` as a raster format.
pub fn render_network(graph: &InteractionGraph, path: &Path, config: &RenderConfig) -> Result<()> {
    let (edges, nodes) = prepare(graph, config)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let is_svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if is_svg {
        let svg = to_svg(&edges, &nodes, config).context("Failed to format SVG")?;
        fs::write(path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        let img = rasterize(&edges, &nodes, config);
        img.save(path)
            .with_context(|| format!("Failed to write image {}", path.display()))?;
    }

    info!(
        path = %path.display(),
        nodes = nodes.len(),
        edges = edges.len(),
        "Network image saved"
    );
    Ok(())
}

/// Compute layout and turn edges/nodes into pixel-space shapes.
fn prepare<'a>(
    graph: &'a InteractionGraph,
    config: &RenderConfig,
) -> Result<(Vec<EdgeShape>, Vec<NodeShape<'a>>)> {
    let Some((min_weight, max_weight)) = graph.weight_range() else {
        anyhow::bail!("The interaction graph has no edges, nothing to draw");
    };

    let positions = spring_layout(graph, &config.layout_params());
    let size = f64::from(config.image_size);
    let margin = size * config.margin;
    let to_pixels = |p: Point| {
        (
            margin + p.x * (size - 2.0 * margin),
            margin + p.y * (size - 2.0 * margin),
        )
    };

    let nodes: Vec<NodeShape> = graph
        .nodes()
        .zip(&positions)
        .map(|(name, p)| NodeShape {
            name,
            center: to_pixels(*p),
            radius: (config.node_scale * (graph.weighted_degree(name) as f64).sqrt()).max(3.0),
        })
        .collect();

    let mut graph_edges = graph.edges();
    // Heaviest edges last, so they are drawn on top
    graph_edges.sort_by_key(|(_, _, w)| *w);

    let edges = graph_edges
        .into_iter()
        .filter_map(|(u, v, w)| {
            let from = nodes.get(graph.index_of(u)?)?.center;
            let to = nodes.get(graph.index_of(v)?)?.center;
            Some(EdgeShape {
                from,
                to,
                width: (f64::from(w) / f64::from(max_weight) * config.max_edge_width).max(1.0),
                color: jet(normalize_weight(w, min_weight, max_weight)),
            })
        })
        .collect();

    Ok((edges, nodes))
}

/// Map a weight into `[0, 1]` over the graph's weight range.
pub fn normalize_weight(weight: u32, min: u32, max: u32) -> f64 {
    if max <= min {
        return 0.0;
    }
    f64::from(weight.saturating_sub(min)) / f64::from(max - min)
}

/// The "jet" colour map: blue through cyan, green and yellow to red.
pub fn jet(t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let channel = |offset: f64| {
        let v = (1.5 - (4.0 * t - offset).abs()).clamp(0.0, 1.0);
        (v * 255.0).round() as u8
    };
    Rgb([channel(3.0), channel(2.0), channel(1.0)])
}

fn rasterize(edges: &[EdgeShape], nodes: &[NodeShape], config: &RenderConfig) -> RgbImage {
    let mut img = RgbImage::from_pixel(config.image_size, config.image_size, BACKGROUND);

    for edge in edges {
        draw_thick_line(&mut img, edge);
    }
    for node in nodes {
        draw_filled_circle_mut(
            &mut img,
            (node.center.0.round() as i32, node.center.1.round() as i32),
            node.radius.round() as i32,
            NODE_COLOR,
        );
    }
    img
}

/// Draw an edge as a filled quad so its width survives rasterization.
fn draw_thick_line(img: &mut RgbImage, edge: &EdgeShape) {
    let (x0, y0) = edge.from;
    let (x1, y1) = edge.to;
    let (dx, dy) = (x1 - x0, y1 - y0);
    let length = (dx * dx + dy * dy).sqrt();

    if edge.width < 2.0 || length < 1.0 {
        draw_line_segment_mut(
            img,
            (x0 as f32, y0 as f32),
            (x1 as f32, y1 as f32),
            edge.color,
        );
        return;
    }

    let (nx, ny) = (-dy / length * edge.width / 2.0, dx / length * edge.width / 2.0);
    let corners = [
        (x0 + nx, y0 + ny),
        (x1 + nx, y1 + ny),
        (x1 - nx, y1 - ny),
        (x0 - nx, y0 - ny),
    ];
    let poly: Vec<imageproc::point::Point<i32>> = corners
        .iter()
        .map(|(x, y)| imageproc::point::Point::new(x.round() as i32, y.round() as i32))
        .collect();

    // draw_polygon_mut rejects an explicitly closed polygon
    if poly.first() == poly.last() {
        draw_line_segment_mut(
            img,
            (x0 as f32, y0 as f32),
            (x1 as f32, y1 as f32),
            edge.color,
        );
    } else {
        draw_polygon_mut(img, &poly, edge.color);
    }
}

fn to_svg(
    edges: &[EdgeShape],
    nodes: &[NodeShape],
    config: &RenderConfig,
) -> Result<String, std::fmt::Error> {
    let size = config.image_size;
    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    )?;
    writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#)?;

    for edge in edges {
        let Rgb([r, g, b]) = edge.color;
        writeln!(
            svg,
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="rgb({r},{g},{b})" stroke-width="{:.1}" stroke-linecap="round"/>"#,
            edge.from.0, edge.from.1, edge.to.0, edge.to.1, edge.width
        )?;
    }

    let Rgb([r, g, b]) = NODE_COLOR;
    for node in nodes {
        writeln!(
            svg,
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="rgb({r},{g},{b})"/>"#,
            node.center.0, node.center.1, node.radius
        )?;
        writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            node.center.0,
            node.center.1,
            config.font_size,
            xml_escape(node.name)
        )?;
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
