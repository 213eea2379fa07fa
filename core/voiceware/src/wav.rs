use crate::error::{Result, VoicewareError};
use byteorder::{LE, WriteBytesExt};
use std::io::Write;

pub const SAMPLE_RATE: u32 = 8000;

const INFO_ALBUM: &str = "Nortel Millennium VoiceWare";

/// Metadata carried into the LIST/INFO chunk of every emitted WAV.
pub struct WavInfo {
    /// ROM base filename (IART).
    pub artist: String,
    /// Output base filename (INAM).
    pub title: String,
    /// Absolute message index (ITRK).
    pub track: u32,
    /// Local date, `YYYY-MM-DD` (ICRD).
    pub date: String,
    /// Mapping comment (ICMT), omitted when empty.
    pub comment: Option<String>,
}

/// Emit a complete RIFF/WAVE file: PCM `fmt `, LIST/INFO metadata, then the
/// sample data. All chunk sizes are computed before anything is written, so
/// the prefix always matches the bytes that follow.
pub fn write_wav<W: Write>(writer: &mut W, samples: &[i16], info: &WavInfo) -> Result<()> {
    let data_size = samples.len() as u64 * 2;
    if data_size > u32::MAX as u64 {
        return Err(VoicewareError::DataTooLarge { bytes: data_size });
    }
    let data_pad = data_size % 2;

    let mut list_data = Vec::new();
    list_data.extend_from_slice(b"INFO");
    append_info(&mut list_data, b"IALB", INFO_ALBUM);
    append_info(&mut list_data, b"IART", &info.artist);
    append_info(&mut list_data, b"INAM", &info.title);
    append_info(&mut list_data, b"ITRK", &info.track.to_string());
    append_info(&mut list_data, b"ICRD", &info.date);
    if let Some(comment) = info.comment.as_deref() {
        if !comment.is_empty() {
            append_info(&mut list_data, b"ICMT", comment);
        }
    }

    // "WAVE" + (fmt header + body) + (LIST header + body) + (data header +
    // body + pad).
    let riff_size = 4 + (8 + 16) + (8 + list_data.len() as u64) + (8 + data_size + data_pad);
    if riff_size > u32::MAX as u64 {
        return Err(VoicewareError::DataTooLarge { bytes: riff_size });
    }

    writer.write_all(b"RIFF")?;
    writer.write_u32::<LE>(riff_size as u32)?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_u32::<LE>(16)?;
    writer.write_u16::<LE>(1)?; // PCM
    writer.write_u16::<LE>(1)?; // mono
    writer.write_u32::<LE>(SAMPLE_RATE)?;
    writer.write_u32::<LE>(SAMPLE_RATE * 2)?;
    writer.write_u16::<LE>(2)?; // block align
    writer.write_u16::<LE>(16)?; // bits per sample

    writer.write_all(b"LIST")?;
    writer.write_u32::<LE>(list_data.len() as u32)?;
    writer.write_all(&list_data)?;

    writer.write_all(b"data")?;
    writer.write_u32::<LE>(data_size as u32)?;
    for &sample in samples {
        writer.write_i16::<LE>(sample)?;
    }
    if data_pad != 0 {
        writer.write_u8(0)?;
    }

    Ok(())
}

/// One INFO sub-chunk: id, size including the trailing NUL, NUL-terminated
/// text, and a pad byte iff the size is odd.
fn append_info(out: &mut Vec<u8>, id: &[u8; 4], text: &str) {
    let size = text.len() as u32 + 1;
    out.extend_from_slice(id);
    out.extend_from_slice(&size.to_le_bytes());
    out.extend_from_slice(text.as_bytes());
    out.push(0);
    if size % 2 != 0 {
        out.push(0);
    }
}
