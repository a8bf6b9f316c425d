//! SVG rendering of a coloring on a circular vertex layout.

use crate::assignment::ColoringAssignment;
use crate::error::Result;
use crate::score::Color;
use std::f64::consts::TAU;
use std::path::Path;
use svg::Document;
use svg::node::element::{Circle, Line, Text};

const SIZE: f64 = 640.0;
const MARGIN: f64 = 40.0;
const VERTEX_RADIUS: f64 = 12.0;

fn stroke(c: Color) -> &'static str {
    match c {
        Color::A => "#3b6fd8",
        Color::B => "#d83b3b",
    }
}

/// Vertex positions evenly spaced on a circle, vertex `0` at the top.
pub fn circular_layout(n: usize) -> Vec<(f64, f64)> {
    let center = SIZE / 2.0;
    let radius = center - MARGIN;
    (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n.max(1) as f64 - TAU / 4.0;
            (center + radius * angle.cos(), center + radius * angle.sin())
        })
        .collect()
}

/// Renders every colored edge as a line in its color, vertices on top.
pub fn render_svg(assignment: &ColoringAssignment) -> String {
    let positions = circular_layout(assignment.n());
    let mut document = Document::new()
        .set("viewBox", (0.0, 0.0, SIZE, SIZE))
        .set("width", SIZE)
        .set("height", SIZE);

    for (edge, color) in assignment.iter() {
        let (u, v) = edge.endpoints();
        let line = Line::new()
            .set("x1", positions[u].0)
            .set("y1", positions[u].1)
            .set("x2", positions[v].0)
            .set("y2", positions[v].1)
            .set("stroke", stroke(color))
            .set("stroke-width", 1.5)
            .set("class", format!("color-{color}"));
        document = document.add(line);
    }

    for (i, &(x, y)) in positions.iter().enumerate() {
        let circle = Circle::new()
            .set("cx", x)
            .set("cy", y)
            .set("r", VERTEX_RADIUS)
            .set("fill", "lightgrey")
            .set("stroke", "black");
        document = document.add(circle);

        let label = Text::new(i.to_string())
            .set("x", x)
            .set("y", y + 4.0)
            .set("text-anchor", "middle")
            .set("font-size", "11px");
        document = document.add(label);
    }

    document.to_string()
}

/// Writes [`render_svg`] output to `path`.
///
/// # Errors
/// [`crate::ColoringError::Io`] if the file cannot be written.
pub fn save_svg(assignment: &ColoringAssignment, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, render_svg(assignment))?;
    Ok(())
}
