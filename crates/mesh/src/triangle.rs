use serde::Serialize;

/// A single triangle with one color per vertex, drawn directly in clip space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColoredTriangle {
    pub positions: [[f32; 3]; 3],
    pub colors: [[f32; 3]; 3],
    pub indices: [u16; 3],
}

impl Default for ColoredTriangle {
    fn default() -> Self {
        #[rustfmt::skip]
        let triangle = Self {
            positions: [
                [ 0.5, -0.5, 0.0],
                [-0.5, -0.5, 0.0],
                [ 0.0,  0.5, 0.0],
            ],
            colors: [
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
            ],
            indices: [0, 1, 2],
        };
        triangle
    }
}

impl ColoredTriangle {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_triangle_layout() {
        let tri = ColoredTriangle::new();
        assert_eq!(tri.indices, [0, 1, 2]);
        assert_eq!(tri.positions[2], [0.0, 0.5, 0.0]);
        // Red, green, blue in vertex order.
        assert_eq!(tri.colors[0], [1.0, 0.0, 0.0]);
        assert_eq!(tri.colors[1], [0.0, 1.0, 0.0]);
        assert_eq!(tri.colors[2], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn triangle_winds_clockwise_on_screen() {
        let p = ColoredTriangle::new().positions;
        let z = (p[1][0] - p[0][0]) * (p[2][1] - p[0][1])
            - (p[1][1] - p[0][1]) * (p[2][0] - p[0][0]);
        assert!(z < 0.0);
    }
}
