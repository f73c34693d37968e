//! Image backend implementations.

mod color;

use crate::error::{Error, Result};
pub use crate::image::color::Color;

use cairo::ImageSurface;
use libvips::{ops, VipsApp, VipsImage};
use pango::prelude::FontMapExt;

/// Raw 8-bit RGBA pixels of a rendered composite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Raster surface a scene draws into.
///
/// A render pass always starts with [`Backend::new_canvas`] and then draws
/// on top of it in call order.
pub trait Backend {
    type Image;

    /// Decodes an encoded photo.
    fn decode(&self, data: &[u8]) -> Result<Self::Image>;

    /// Starts a new surface filled with `bg`, discarding the previous one.
    fn new_canvas(&mut self, bg: &Color, width: i32, height: i32) -> Result<()>;

    /// Drops the current surface.
    fn clear(&mut self);

    /// Draws `img` stretched to the `w`×`h` box at (`x`, `y`).
    fn draw_image(&mut self, img: &Self::Image, x: i32, y: i32, w: i32, h: i32) -> Result<()>;

    /// Draws `glyph` at a pixel size of `size`, centered on (`cx`, `cy`).
    fn draw_glyph(&mut self, glyph: &str, cx: f64, cy: f64, size: f64) -> Result<()>;

    fn pixels(&self) -> Result<Pixels>;
}

pub struct ImgBackend {
    vips_app: VipsApp,
    canvas: Option<VipsImage>,
    font: String,
}

impl ImgBackend {
    pub const DEFAULT_FONT: &'static str = "sans-serif";

    pub fn new() -> Result<Self> {
        Ok(Self {
            vips_app: VipsApp::default("photomata")
                .map_err(|e| Error::VipsError(e.to_string()))?,
            canvas: None,
            font: Self::DEFAULT_FONT.to_string(),
        })
    }

    /// Sets the font family used for sticker glyphs.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    pub fn err(&self, e: libvips::error::Error) -> Error {
        Error::VipsError(format!(
            "{e}\n{}",
            self.vips_app.error_buffer().unwrap_or_default()
        ))
    }

    fn reinterpret(&self, img: &VipsImage) -> Result<VipsImage> {
        let img = ops::cast(img, ops::BandFormat::Uchar).map_err(|e| self.err(e))?;
        let img = ops::copy_with_opts(
            &img,
            &ops::CopyOptions {
                interpretation: ops::Interpretation::Srgb,
                width: img.get_width(),
                height: img.get_height(),
                bands: img.get_bands(),
                format: ops::BandFormat::Uchar,
                ..Default::default()
            },
        )
        .map_err(|e| self.err(e))?;
        if img.get_bands() == 3 {
            ops::bandjoin_const(&img, &mut [255.0]).map_err(|e| self.err(e))
        } else {
            Ok(img)
        }
    }

    fn canvas(&self) -> Result<&VipsImage> {
        self.canvas.as_ref().ok_or(Error::NoCanvas)
    }

    pub fn cairo_to_vips(&self, img: ImageSurface) -> Result<VipsImage> {
        let mut buffer = Vec::new();
        img.write_to_png(&mut buffer)
            .map_err(|_| Error::ImageConversionError("cairo", "vips"))?;
        let mut img = VipsImage::new_from_buffer(&buffer, "").map_err(|e| self.err(e))?;
        img.image_wio_input().map_err(|e| self.err(e))?;
        self.reinterpret(&img)
    }

    pub fn scale(&self, img: &VipsImage, sx: f64, sy: f64) -> Result<VipsImage> {
        ops::resize_with_opts(
            img,
            sx,
            &ops::ResizeOptions {
                vscale: sy,
                ..Default::default()
            },
        )
        .map_err(|e| self.err(e))
    }

    /// Composites `src` over `base` with its top-left corner at (`x`, `y`).
    pub fn overlay(&self, base: &VipsImage, src: &VipsImage, x: i32, y: i32) -> Result<VipsImage> {
        let (bw, bh) = (base.get_width(), base.get_height());
        let src = ops::embed(src, x, y, bw, bh).map_err(|e| self.err(e))?;
        ops::composite_2(base, &src, ops::BlendMode::Over).map_err(|e| self.err(e))
    }

    /// Rasterises a single glyph at an absolute pixel size.
    pub fn print(&self, glyph: &str, size: f64) -> Result<VipsImage> {
        let err = |e: cairo::Error| Error::CairoError(e.to_string());
        let ctx = pangocairo::FontMap::new().create_context();
        let layout = pango::Layout::new(&ctx);

        let mut opt = cairo::FontOptions::new().map_err(err)?;
        opt.set_antialias(cairo::Antialias::Good);
        pangocairo::functions::context_set_font_options(&ctx, Some(&opt));

        let mut desc = pango::FontDescription::from_string(&self.font);
        desc.set_absolute_size(size * pango::SCALE as f64);
        layout.set_font_description(Some(&desc));
        layout.set_text(glyph);

        let (_, log_rect) = layout.pixel_extents();
        let base = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            log_rect.width().max(1),
            log_rect.height().max(1),
        )
        .map_err(err)?;
        {
            let cr = cairo::Context::new(&base).map_err(err)?;
            let (r, g, b, a) = Color::BLACK.rgba();
            cr.set_source_rgba(r, g, b, a);
            pangocairo::functions::show_layout(&cr, &layout);
        }
        self.cairo_to_vips(base)
    }
}

impl Backend for ImgBackend {
    type Image = VipsImage;

    fn decode(&self, data: &[u8]) -> Result<VipsImage> {
        let mut img = VipsImage::new_from_buffer(data, "").map_err(|e| self.err(e))?;
        img.image_wio_input().map_err(|e| self.err(e))?;
        // greyscale photos become sRGB before the alpha band is added
        let img = ops::colourspace(&img, ops::Interpretation::Srgb).map_err(|e| self.err(e))?;
        self.reinterpret(&img)
    }

    fn new_canvas(&mut self, bg: &Color, width: i32, height: i32) -> Result<()> {
        let (r, g, b, a) = bg.scaled_rgba();
        let img = ops::black_with_opts(width, height, &ops::BlackOptions { bands: 4 })
            .map_err(|e| self.err(e))?;
        let img = VipsImage::new_from_image(&img, &[r, g, b, a]).map_err(|e| self.err(e))?;
        self.canvas = Some(self.reinterpret(&img)?);
        Ok(())
    }

    fn clear(&mut self) {
        self.canvas = None;
    }

    fn draw_image(&mut self, img: &VipsImage, x: i32, y: i32, w: i32, h: i32) -> Result<()> {
        let (iw, ih) = (img.get_width() as f64, img.get_height() as f64);
        let img = self.scale(img, w as f64 / iw, h as f64 / ih)?;
        let canvas = self.overlay(self.canvas()?, &img, x, y)?;
        self.canvas = Some(canvas);
        Ok(())
    }

    fn draw_glyph(&mut self, glyph: &str, cx: f64, cy: f64, size: f64) -> Result<()> {
        let img = self.print(glyph, size)?;
        let (w, h) = (img.get_width() as f64, img.get_height() as f64);
        let (x, y) = ((cx - w / 2.0).round() as i32, (cy - h / 2.0).round() as i32);
        let canvas = self.overlay(self.canvas()?, &img, x, y)?;
        self.canvas = Some(canvas);
        Ok(())
    }

    fn pixels(&self) -> Result<Pixels> {
        let canvas = self.reinterpret(self.canvas()?)?;
        Ok(Pixels {
            width: canvas.get_width() as u32,
            height: canvas.get_height() as u32,
            rgba: canvas.image_write_to_memory(),
        })
    }
}
