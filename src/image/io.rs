//! PPM and JSON I/O helpers.
//!
//! - `read_ppm` / `load_ppm`: decode a PNM image into a suite-backed `Pixmap`.
//!   `P3`/`P6` samples are kept as stored, together with the file's maxval.
//! - `write_ppm` / `save_ppm`: encode a `Pixmap` as binary `P6` with its own
//!   maxval (one byte per sample up to 255, two big-endian bytes above).
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{Pixmap, Rgb};
use crate::methods::MethodSuite;
use image::codecs::pnm::{PixmapHeader, PnmDecoder, PnmEncoder, PnmSubtype, SampleEncoding};
use image::{DynamicImage, ExtendedColorType};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// Raw samples of a decoded image, row-major, three per pixel.
struct Raster {
    width: usize,
    height: usize,
    maxval: u16,
    samples: Vec<u16>,
}

/// Decode a PNM image held in memory into grids allocated by `suite`.
///
/// Pixmaps (`P3`, `P6`) keep their maxval and samples untouched. Other PNM
/// kinds are converted to RGB at 8 or 16 bits by the `image` crate.
pub fn decode_ppm(bytes: &[u8], suite: MethodSuite<Rgb>) -> Result<Pixmap, String> {
    let decoder = PnmDecoder::new(bytes).map_err(|e| format!("Failed to decode PPM: {e}"))?;
    let raster = match decoder.subtype() {
        PnmSubtype::Pixmap(encoding) => read_pixmap_raster(decoder, encoding)?,
        _ => convert_to_rgb(decoder)?,
    };
    let Raster {
        width,
        height,
        maxval,
        samples,
    } = raster;
    let pixmap = Pixmap::from_fn(suite, width, height, |col, row| {
        let i = (row * width + col) * 3;
        Rgb::new(samples[i], samples[i + 1], samples[i + 2])
    })
    .and_then(|pixmap| pixmap.with_maxval(maxval))
    .map_err(|e| format!("Failed to allocate {width}x{height} image: {e}"))?;
    log::debug!(
        "decoded {width}x{height} PPM (maxval {maxval}) into {} layout",
        suite.kind()
    );
    Ok(pixmap)
}

fn read_pixmap_raster(
    decoder: PnmDecoder<&[u8]>,
    encoding: SampleEncoding,
) -> Result<Raster, String> {
    let (body, header) = decoder.into_inner();
    let maxval = u16::try_from(header.maximal_sample())
        .ok()
        .filter(|&m| m > 0)
        .ok_or_else(|| {
            format!(
                "Failed to decode PPM: maxval must be in 1..=65535, got {}",
                header.maximal_sample()
            )
        })?;
    let (width, height) = (header.width() as usize, header.height() as usize);
    let count = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| format!("Failed to decode PPM: {width}x{height} is too large"))?;

    let samples = match encoding {
        SampleEncoding::Binary if maxval <= u16::from(u8::MAX) => body
            .get(..count)
            .map(|bytes| bytes.iter().map(|&b| u16::from(b)).collect::<Vec<_>>()),
        SampleEncoding::Binary => count
            .checked_mul(2)
            .and_then(|len| body.get(..len))
            .map(|bytes| {
                bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                    .collect()
            }),
        SampleEncoding::Ascii => {
            let samples: Vec<u16> = body
                .split(|b| b.is_ascii_whitespace())
                .filter(|token| !token.is_empty())
                .take(count)
                .map(|token| std::str::from_utf8(token).ok()?.parse().ok())
                .collect::<Option<_>>()
                .ok_or("Failed to decode PPM: malformed ASCII sample")?;
            Some(samples).filter(|s| s.len() == count)
        }
    }
    .ok_or_else(|| format!("Failed to decode PPM: raster shorter than {count} samples"))?;

    if let Some(&bad) = samples.iter().find(|&&s| s > maxval) {
        return Err(format!(
            "Failed to decode PPM: sample {bad} exceeds maxval {maxval}"
        ));
    }
    Ok(Raster {
        width,
        height,
        maxval,
        samples,
    })
}

fn convert_to_rgb(decoder: PnmDecoder<&[u8]>) -> Result<Raster, String> {
    let image =
        DynamicImage::from_decoder(decoder).map_err(|e| format!("Failed to decode PPM: {e}"))?;
    let color = image.color();
    log::warn!("converting {color:?} input to RGB");
    let (width, height) = (image.width() as usize, image.height() as usize);
    let (maxval, samples) = if color.bytes_per_pixel() > color.channel_count() {
        (u16::MAX, image.into_rgb16().into_raw())
    } else {
        let rgb = image.into_rgb8().into_raw();
        (u16::from(u8::MAX), rgb.into_iter().map(u16::from).collect())
    };
    Ok(Raster {
        width,
        height,
        maxval,
        samples,
    })
}

/// Read a whole PNM stream (file or stdin) and decode it.
pub fn read_ppm<R: Read>(mut reader: R, suite: MethodSuite<Rgb>) -> Result<Pixmap, String> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| format!("Failed to read image: {e}"))?;
    decode_ppm(&bytes, suite)
}

/// Load a PNM image from disk.
pub fn load_ppm(path: &Path, suite: MethodSuite<Rgb>) -> Result<Pixmap, String> {
    let bytes =
        fs::read(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    decode_ppm(&bytes, suite).map_err(|e| format!("{}: {e}", path.display()))
}

/// Encode `pixmap` as a binary `P6` image with the pixmap's maxval.
pub fn write_ppm<W: Write>(writer: W, pixmap: &Pixmap) -> Result<(), String> {
    let maxval = pixmap.maxval();
    let samples = pixmap
        .samples()
        .map_err(|e| format!("Failed to read pixels: {e}"))?;
    if let Some(&bad) = samples.iter().find(|&&s| s > maxval) {
        return Err(format!(
            "Failed to encode PPM: sample {bad} exceeds maxval {maxval}"
        ));
    }
    let (width, height) = (pixmap.width() as u32, pixmap.height() as u32);
    let header = PixmapHeader {
        encoding: SampleEncoding::Binary,
        width,
        height,
        maxval: u32::from(maxval),
    };
    let mut encoder = PnmEncoder::new(writer).with_header(header.into());
    // The PPM header only admits Rgb8; the sample width picks one or two
    // bytes per sample.
    let encoded = if maxval <= u16::from(u8::MAX) {
        let bytes: Vec<u8> = samples.iter().map(|&s| s as u8).collect();
        encoder.encode(bytes.as_slice(), width, height, ExtendedColorType::Rgb8)
    } else {
        encoder.encode(samples.as_slice(), width, height, ExtendedColorType::Rgb8)
    };
    encoded.map_err(|e| format!("Failed to encode PPM: {e}"))
}

/// Save `pixmap` to `path` as a binary `P6` image.
pub fn save_ppm(pixmap: &Pixmap, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let file =
        File::create(path).map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_ppm(&mut writer, pixmap).map_err(|e| format!("{}: {e}", path.display()))?;
    writer
        .flush()
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
