#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// RGBA8 pixel buffer backing the drawing canvas.
///
/// A fresh raster is transparent black, the same backing store an unpainted
/// HTML canvas exposes. The emptiness check below relies on that: a raster is
/// empty exactly when every channel of every pixel is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn has_area(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.iter().all(|&channel| channel == 0)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let idx = ((y * self.width + x) * 4) as usize;
        Rgba {
            r: self.pixels[idx],
            g: self.pixels[idx + 1],
            b: self.pixels[idx + 2],
            a: self.pixels[idx + 3],
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn put_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels[idx] = color.r;
        self.pixels[idx + 1] = color.g;
        self.pixels[idx + 2] = color.b;
        self.pixels[idx + 3] = color.a;
    }

    /// Stamp a filled circle, clipped to the raster bounds.
    pub fn stamp_circle(&mut self, center: (f32, f32), radius: f32, color: Rgba) {
        if radius <= 0.0 || !self.has_area() {
            return;
        }
        let radius_sq = radius * radius;
        let width = self.width as i32;
        let height = self.height as i32;
        let min_x = (center.0 - radius).floor().max(0.0) as i32;
        let max_x = (center.0 + radius).ceil().min((width - 1) as f32) as i32;
        let min_y = (center.1 - radius).floor().max(0.0) as i32;
        let max_y = (center.1 + radius).ceil().min((height - 1) as f32) as i32;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f32 + 0.5 - center.0;
                let dy = y as f32 + 0.5 - center.1;
                if dx * dx + dy * dy <= radius_sq {
                    self.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }

    /// Paint a thick segment as a swept circle, giving round caps and joins.
    pub fn stroke_line(&mut self, start: (f32, f32), end: (f32, f32), width: f32, color: Rgba) {
        let dx = end.0 - start.0;
        let dy = end.1 - start.1;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i32;
        let radius = (width / 2.0).max(0.5);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let point = (start.0 + dx * t, start.1 + dy * t);
            self.stamp_circle(point, radius, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_raster_is_empty() {
        let raster = Raster::new(16, 16);
        assert!(raster.is_empty());
        assert_eq!(raster.pixels().len(), 16 * 16 * 4);
    }

    #[test]
    fn stamp_marks_raster_non_empty() {
        let mut raster = Raster::new(16, 16);
        raster.stamp_circle((8.0, 8.0), 2.0, Rgba::WHITE);
        assert!(!raster.is_empty());
        assert_eq!(raster.pixel(8, 8), Rgba::WHITE);
    }

    #[test]
    fn clear_restores_emptiness() {
        let mut raster = Raster::new(8, 8);
        raster.stroke_line((0.0, 0.0), (7.0, 7.0), 3.0, Rgba::WHITE);
        assert!(!raster.is_empty());
        raster.clear();
        assert!(raster.is_empty());
    }

    #[test]
    fn painting_outside_bounds_is_clipped() {
        let mut raster = Raster::new(8, 8);
        raster.stroke_line((-20.0, -20.0), (30.0, 30.0), 4.0, Rgba::WHITE);
        assert!(!raster.is_empty());
        raster.stamp_circle((-50.0, -50.0), 3.0, Rgba::WHITE);
    }

    #[test]
    fn zero_area_raster_ignores_paint_calls() {
        let mut raster = Raster::new(0, 0);
        raster.stamp_circle((0.0, 0.0), 5.0, Rgba::WHITE);
        raster.stroke_line((0.0, 0.0), (10.0, 10.0), 5.0, Rgba::WHITE);
        assert!(raster.is_empty());
    }
}
