//! PNG export of a finished composite.

use crate::error::{Error, Result};
use crate::image::Pixels;

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Encoded composite together with the name it should be saved under.
#[derive(Debug, Clone)]
pub struct Export {
    pub filename: String,
    pub png: Vec<u8>,
}

/// Calendar date in the proleptic Gregorian calendar.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IsoDate {
    pub year: i64,
    pub month: u32,
    pub day: u32,
}

impl IsoDate {
    /// Current UTC date.
    pub fn today() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        Self::from_unix_days(secs.div_euclid(86_400))
    }

    /// Date `days` days after 1970-01-01.
    pub fn from_unix_days(days: i64) -> Self {
        // http://howardhinnant.github.io/date_algorithms.html#civil_from_days
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
        let year = yoe + era * 400 + i64::from(month <= 2);
        Self { year, month, day }
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// `<product>-<YYYY-MM-DD>.png`
pub fn filename(product: &str, date: IsoDate) -> String {
    format!("{product}-{date}.png")
}

/// Encodes RGBA pixels as PNG, tagged with the product name and a title.
pub fn encode_png(pixels: &Pixels, product: &str, title: &str) -> Result<Vec<u8>> {
    let err = |e: png::EncodingError| Error::PngError(e.to_string());
    let expected = pixels.width as usize * pixels.height as usize * 4;
    if pixels.rgba.len() != expected {
        return Err(Error::PixelBufferSize(expected, pixels.rgba.len()));
    }

    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, pixels.width, pixels.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .add_text_chunk("Software".to_string(), product.to_string())
            .map_err(err)?;
        encoder
            .add_text_chunk("Title".to_string(), title.to_string())
            .map_err(err)?;
        let mut writer = encoder.write_header().map_err(err)?;
        writer.write_image_data(&pixels.rgba).map_err(err)?;
        writer.finish().map_err(err)?;
    }
    Ok(buffer)
}
