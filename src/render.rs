//! Rasterizing SVG documents to PNG.

use resvg::tiny_skia;
use resvg::usvg;
use thiserror::Error;

use crate::size::{ResizeStrategy, Size};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{0}")]
    Parse(#[from] usvg::Error),

    #[error("the SVG has no dimensions")]
    EmptySize,

    #[error("the resulting image would be too large ({w} x {h} pixels)")]
    TooLarge { w: f64, h: f64 },

    #[error("could not encode PNG: {0}")]
    Encode(String),
}

/// Renders SVG data to PNG data.
///
/// The parsing options (including the font database) are set up once and
/// shared by every file of a run.
pub struct Rasterizer {
    options: usvg::Options<'static>,
    strategy: ResizeStrategy,
}

impl Rasterizer {
    pub fn new(width: Option<u32>) -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();

        Rasterizer {
            options,
            strategy: ResizeStrategy::from_width(width),
        }
    }

    pub fn render_png(&self, svg: &[u8]) -> Result<Vec<u8>, RenderError> {
        let tree = usvg::Tree::from_data(svg, &self.options)?;

        let natural_size = Size::new(
            f64::from(tree.size().width()),
            f64::from(tree.size().height()),
        );

        let final_size = self
            .strategy
            .apply(&natural_size)
            .ok_or(RenderError::EmptySize)?;

        let too_large = || RenderError::TooLarge {
            w: final_size.w,
            h: final_size.h,
        };

        // ceil() keeps a partially covered last pixel.
        let w = cast::u32(final_size.w.ceil()).map_err(|_| too_large())?;
        let h = cast::u32(final_size.h.ceil()).map_err(|_| too_large())?;

        crate::convert_log!(
            "rendering {}x{} SVG to a {}x{} image",
            natural_size.w,
            natural_size.h,
            w,
            h
        );

        let mut pixmap = tiny_skia::Pixmap::new(w, h).ok_or_else(too_large)?;

        let transform = tiny_skia::Transform::from_scale(
            (final_size.w / natural_size.w) as f32,
            (final_size.h / natural_size.h) as f32,
        );

        resvg::render(&tree, transform, &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: &[u8] = br#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10">
  <rect width="20" height="10" fill="blue"/>
</svg>"#;

    fn png_size(data: &[u8]) -> (u32, u32) {
        let reader = png::Decoder::new(data).read_info().unwrap();
        let info = reader.info();
        (info.width, info.height)
    }

    #[test]
    fn renders_at_natural_size() {
        let png = Rasterizer::new(None).render_png(RECT).unwrap();
        assert_eq!(png_size(&png), (20, 10));
    }

    #[test]
    fn width_keeps_aspect_ratio() {
        let png = Rasterizer::new(Some(60)).render_png(RECT).unwrap();
        assert_eq!(png_size(&png), (60, 30));
    }

    #[test]
    fn sub_pixel_sizes_get_at_least_one_pixel() {
        let tiny = br#"<svg xmlns="http://www.w3.org/2000/svg" width="0.4" height="0.4"/>"#;
        let png = Rasterizer::new(None).render_png(tiny).unwrap();
        assert_eq!(png_size(&png), (1, 1));
    }

    #[test]
    fn thin_images_keep_their_last_row() {
        let thin = br#"<svg xmlns="http://www.w3.org/2000/svg" width="1000" height="1"/>"#;

        let png = Rasterizer::new(Some(10)).render_png(thin).unwrap();
        assert_eq!(png_size(&png), (10, 1));

        let png = Rasterizer::new(None).render_png(thin).unwrap();
        assert_eq!(png_size(&png), (1000, 1));
    }

    #[test]
    fn fractional_sizes_round_up() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10.2" height="4.5"/>"#;
        let png = Rasterizer::new(None).render_png(svg).unwrap();
        assert_eq!(png_size(&png), (11, 5));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        match Rasterizer::new(None).render_png(b"this is not xml") {
            Err(RenderError::Parse(_)) => (),
            other => panic!("expected a parse error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let rasterizer = Rasterizer::new(None);
        assert_eq!(
            rasterizer.render_png(RECT).unwrap(),
            rasterizer.render_png(RECT).unwrap()
        );
    }
}
