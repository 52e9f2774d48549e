use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    pixelcolor::Rgb888,
    primitives::Rectangle,
};

#[allow(unused_imports)]
use micromath::F32Ext;

use crate::paint::PaintStyle;
use crate::types::Quad;

/// Consumer of a frame's geometry.
pub trait Renderer {
    type Error;

    fn submit(&mut self, batch: &[Quad], paint: &PaintStyle) -> Result<(), Self::Error>;
}

/// Rasterizes quads onto any embedded-graphics target.
///
/// Quads are area-relative; `origin` is where the area's top-left corner
/// sits on the target. Edges are rounded to whole pixels and every quad
/// covers at least one pixel in each direction.
///
/// With a mirror center set, an edge exactly halfway between two pixel
/// boundaries rounds away from that center on its axis, so geometry that is
/// symmetric about the center stays symmetric in pixels. Without one, half
/// pixels round away from zero.
pub struct DrawTargetRenderer<D> {
    target: D,
    origin: Point,
    mirror_center: Option<(f32, f32)>,
}

impl<D> DrawTargetRenderer<D>
where
    D: DrawTarget<Color = Rgb888>,
{
    pub fn new(target: D, origin: Point) -> Self {
        Self {
            target,
            origin,
            mirror_center: None,
        }
    }

    /// Area-relative point the drawn geometry is mirrored about.
    pub fn with_mirror_center(mut self, center_x: f32, center_y: f32) -> Self {
        self.mirror_center = Some((center_x, center_y));
        self
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Pixel rectangle covered by `quad`.
    pub fn pixel_bounds(&self, quad: &Quad) -> Rectangle {
        let (axis_x, axis_y) = match self.mirror_center {
            Some((x, y)) => (Some(x), Some(y)),
            None => (None, None),
        };
        let left = round_edge(quad.left, axis_x);
        let top = round_edge(quad.top, axis_y);
        let right = round_edge(quad.right, axis_x).max(left + 1);
        let bottom = round_edge(quad.bottom, axis_y).max(top + 1);

        Rectangle::new(
            self.origin + Point::new(left, top),
            Size::new((right - left) as u32, (bottom - top) as u32),
        )
    }

    fn draw_quad(&mut self, quad: &Quad, paint: &PaintStyle) -> Result<(), D::Error> {
        let bounds = self.pixel_bounds(quad);
        if paint.is_solid() {
            return self.target.fill_solid(&bounds, paint.color_at(0.0));
        }

        let rows = bounds.size.height;
        let span = rows.saturating_sub(1).max(1) as f32;
        for row in 0..rows {
            let line = Rectangle::new(
                bounds.top_left + Point::new(0, row as i32),
                Size::new(bounds.size.width, 1),
            );
            self.target.fill_solid(&line, paint.color_at(row as f32 / span))?;
        }
        Ok(())
    }
}

/// Nearest pixel boundary; ties go away from `axis` when one is given.
fn round_edge(edge: f32, axis: Option<f32>) -> i32 {
    let Some(axis) = axis else {
        return edge.round() as i32;
    };
    let floor = edge.floor();
    let frac = edge - floor;
    let rounded = if frac < 0.5 || (frac == 0.5 && edge < axis) {
        floor
    } else if frac > 0.5 || edge > axis {
        floor + 1.0
    } else {
        edge.round()
    };
    rounded as i32
}

impl<D> Renderer for DrawTargetRenderer<D>
where
    D: DrawTarget<Color = Rgb888>,
{
    type Error = D::Error;

    fn submit(&mut self, batch: &[Quad], paint: &PaintStyle) -> Result<(), D::Error> {
        for quad in batch {
            self.draw_quad(quad, paint)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{vec, vec::Vec};
    use core::convert::Infallible;
    use embedded_graphics::{pixelcolor::RgbColor, prelude::*, Pixel};

    /// Records every pixel written, last write wins.
    struct Canvas {
        size: Size,
        pixels: Vec<Option<Rgb888>>,
    }

    impl Canvas {
        fn new(width: u32, height: u32) -> Self {
            Self {
                size: Size::new(width, height),
                pixels: vec![None; (width * height) as usize],
            }
        }

        fn get(&self, x: i32, y: i32) -> Option<Rgb888> {
            self.pixels[(y as u32 * self.size.width + x as u32) as usize]
        }

        fn painted(&self) -> usize {
            self.pixels.iter().filter(|p| p.is_some()).count()
        }
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size {
            self.size
        }
    }

    impl DrawTarget for Canvas {
        type Color = Rgb888;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if point.x >= 0
                    && point.y >= 0
                    && (point.x as u32) < self.size.width
                    && (point.y as u32) < self.size.height
                {
                    let index = point.y as u32 * self.size.width + point.x as u32;
                    self.pixels[index as usize] = Some(color);
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_solid_quad_is_offset_by_origin() {
        let mut renderer = DrawTargetRenderer::new(Canvas::new(32, 32), Point::new(10, 10));
        let batch = [Quad::new(2.0, 3.0, 4.0, 6.0)];
        renderer
            .submit(&batch, &PaintStyle::Solid(Rgb888::RED))
            .unwrap();

        let canvas = renderer.into_inner();
        assert_eq!(canvas.painted(), 6);
        assert_eq!(canvas.get(12, 13), Some(Rgb888::RED));
        assert_eq!(canvas.get(13, 15), Some(Rgb888::RED));
        assert_eq!(canvas.get(14, 13), None);
        assert_eq!(canvas.get(2, 3), None);
    }

    #[test]
    fn test_sliver_still_covers_a_pixel() {
        let renderer = DrawTargetRenderer::new(Canvas::new(8, 8), Point::zero());
        let bounds = renderer.pixel_bounds(&Quad::new(1.2, 1.0, 1.4, 1.1));
        assert_eq!(bounds, Rectangle::new(Point::new(1, 1), Size::new(1, 1)));
    }

    #[test]
    fn test_mirrored_bars_paint_mirrored_columns() {
        use crate::{LayoutConfig, MirrorSpectrum};

        let config = LayoutConfig::default();
        let mut spectrum = MirrorSpectrum::new(config).unwrap();
        let batch = spectrum.update(&[0.0; 512]).unwrap();

        let mut renderer = DrawTargetRenderer::new(Canvas::new(512, 288), Point::zero())
            .with_mirror_center(config.area_width / 2.0, config.area_height / 2.0);
        renderer
            .submit(&batch[..6], &PaintStyle::Solid(Rgb888::WHITE))
            .unwrap();

        let canvas = renderer.target();
        let columns: Vec<i32> = (0..512).filter(|&x| canvas.get(x, 144).is_some()).collect();
        assert_eq!(columns, vec![253, 254, 257, 258]);
        for &x in columns.iter() {
            assert!(columns.contains(&(511 - x)), "column {} has no mirror", x);
        }
    }

    #[test]
    fn test_full_frame_is_column_symmetric() {
        use crate::{LayoutConfig, MirrorSpectrum};

        let config = LayoutConfig::default();
        let mut spectrum = MirrorSpectrum::new(config).unwrap();
        let frame: Vec<f32> = (0..512).map(|i| (i % 7) as f32 / 7.0).collect();
        let batch = spectrum.update(&frame).unwrap();

        let mut renderer = DrawTargetRenderer::new(Canvas::new(512, 288), Point::zero())
            .with_mirror_center(config.area_width / 2.0, config.area_height / 2.0);
        renderer
            .submit(batch, &PaintStyle::Solid(Rgb888::WHITE))
            .unwrap();

        let canvas = renderer.target();
        for y in 0..288 {
            for x in 0..256 {
                assert_eq!(canvas.get(x, y), canvas.get(511 - x, y), "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_half_pixel_ties_leave_the_center() {
        assert_eq!(round_edge(253.5, Some(256.0)), 253);
        assert_eq!(round_edge(258.5, Some(256.0)), 259);
        assert_eq!(round_edge(253.4, Some(256.0)), 253);
        assert_eq!(round_edge(253.6, Some(256.0)), 254);
        assert_eq!(round_edge(253.5, None), 254);
    }

    #[test]
    fn test_gradient_runs_top_to_bottom() {
        let mut renderer = DrawTargetRenderer::new(Canvas::new(8, 8), Point::zero());
        let paint = PaintStyle::VerticalGradient {
            top: Rgb888::BLACK,
            bottom: Rgb888::WHITE,
        };
        renderer
            .submit(&[Quad::new(0.0, 0.0, 2.0, 5.0)], &paint)
            .unwrap();

        let canvas = renderer.target();
        assert_eq!(canvas.get(0, 0), Some(Rgb888::BLACK));
        assert_eq!(canvas.get(1, 4), Some(Rgb888::WHITE));
        assert_eq!(canvas.get(0, 2), Some(Rgb888::new(128, 128, 128)));
        assert_eq!(canvas.painted(), 10);
    }
}
