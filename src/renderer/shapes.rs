//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in screen space (pixels, +y down)
//! and appended to a caller-owned buffer.

use std::f32::consts::PI;

use glam::Vec2;

use super::vertex::Vertex;

/// Filled axis-aligned rectangle
pub fn rect(out: &mut Vec<Vertex>, pos: Vec2, size: Vec2, color: [f32; 4]) {
    gradient_rect(out, pos, size, color, color);
}

/// Rectangle with a vertical color gradient
pub fn gradient_rect(
    out: &mut Vec<Vertex>,
    pos: Vec2,
    size: Vec2,
    top: [f32; 4],
    bottom: [f32; 4],
) {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);

    // Two triangles
    out.push(Vertex::new(x0, y0, top));
    out.push(Vertex::new(x1, y0, top));
    out.push(Vertex::new(x0, y1, bottom));

    out.push(Vertex::new(x0, y1, bottom));
    out.push(Vertex::new(x1, y0, top));
    out.push(Vertex::new(x1, y1, bottom));
}

/// Vertical line of the given thickness, centred on `x`
pub fn vertical_line(
    out: &mut Vec<Vertex>,
    x: f32,
    top: f32,
    bottom: f32,
    thickness: f32,
    color: [f32; 4],
) {
    rect(
        out,
        Vec2::new(x - thickness / 2.0, top),
        Vec2::new(thickness, bottom - top),
        color,
    );
}

/// Upper half of a disc sitting on `center` (a hill)
pub fn half_disc(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    color: [f32; 4],
    segments: usize,
) {
    let segments = segments.max(2);
    for i in 0..segments {
        // Sweep from PI to 2*PI; with +y down that is the upper half
        let theta1 = PI + (i as f32 / segments as f32) * PI;
        let theta2 = PI + ((i + 1) as f32 / segments as f32) * PI;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_bounds() {
        let mut out = Vec::new();
        rect(&mut out, Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), [1.0; 4]);
        assert_eq!(out.len(), 6);
        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = out.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_half_disc_stays_above_base() {
        let mut out = Vec::new();
        half_disc(&mut out, Vec2::new(0.0, 600.0), 150.0, [1.0; 4], 16);
        assert_eq!(out.len(), 16 * 3);
        assert!(out.iter().all(|v| v.position[1] <= 600.0 + 1e-3));
        assert!(out.iter().any(|v| v.position[1] < 460.0));
    }
}
