use crate::adpcm::AdpcmDecoder;
use crate::error::{Result, VoicewareError};
use crate::list;
use crate::mapping::MappingIndex;
use crate::rom::{MessageMode, RomImage, Segment, SEGMENT_SIZE};
use crate::wav::{write_wav, WavInfo};
use log::{info, warn};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Everything one run needs. The output directory is not exposed on the
/// command line; it exists so tests can redirect file output.
pub struct DecodeConfig {
    pub rom_path: PathBuf,
    pub mapping_path: Option<PathBuf>,
    pub target: Option<u32>,
    pub list: bool,
    pub out_dir: PathBuf,
}

/// Load the ROM and mapping file, then list or decode every message.
pub fn run(config: &DecodeConfig) -> Result<()> {
    let rom = RomImage::new(fs::read(&config.rom_path)?)?;
    let rom_name = base_name(&config.rom_path);
    let mappings = match &config.mapping_path {
        Some(path) => MappingIndex::from_file(path)?,
        None => MappingIndex::new(),
    };

    if config.list {
        if config.target.is_some() {
            info!("target index is ignored in list mode");
        }
        let stdout = io::stdout();
        list_rom(&rom, &rom_name, &mappings, &mut stdout.lock())
    } else {
        decode_rom(&rom, &rom_name, &mappings, config.target, &config.out_dir)
    }
}

/// Emit the inventory of every message in mapping-file format.
pub fn list_rom<W: Write>(
    rom: &RomImage,
    rom_name: &str,
    mappings: &MappingIndex,
    out: &mut W,
) -> Result<()> {
    list::write_header(out, rom_name)?;
    for segment in rom.segments() {
        let segment = segment?;
        for i in 0..segment.message_count() {
            let (base, comment) = output_base(mappings, &segment, i);
            let is_pcm = match rom.byte(segment.message_start(i)) {
                Ok(byte) => MessageMode::from_byte(byte) == MessageMode::RawPcm,
                Err(_) => {
                    warn!(
                        "message ({}, {}): offset {:#X} is outside the ROM",
                        segment.index,
                        i,
                        segment.message_start(i)
                    );
                    false
                }
            };
            list::write_line(
                out,
                segment.index as u32,
                i as u32,
                &base,
                is_pcm,
                comment.as_deref(),
            )?;
        }
    }
    Ok(())
}

/// Decode every message (or just the target) into WAV / raw-PCM files.
pub fn decode_rom(
    rom: &RomImage,
    rom_name: &str,
    mappings: &MappingIndex,
    target: Option<u32>,
    out_dir: &Path,
) -> Result<()> {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    let mut absolute: u32 = 0;

    for segment in rom.segments() {
        let segment = segment?;
        for i in 0..segment.message_count() {
            if target.is_none() || target == Some(absolute) {
                decode_message(rom, rom_name, mappings, &segment, i, absolute, &date, out_dir);
                if target.is_some() {
                    return Ok(());
                }
            }
            absolute += 1;
        }
    }

    match target {
        Some(index) => Err(VoicewareError::TargetNotFound { index }),
        None => Ok(()),
    }
}

/// Decode a single message. Failures are reported and skipped; they never
/// stop the traversal.
#[allow(clippy::too_many_arguments)]
fn decode_message(
    rom: &RomImage,
    rom_name: &str,
    mappings: &MappingIndex,
    segment: &Segment,
    i: usize,
    absolute: u32,
    date: &str,
    out_dir: &Path,
) {
    let (base, comment) = output_base(mappings, segment, i);
    let start = segment.message_start(i);
    let mode = match rom.byte(start) {
        Ok(byte) => MessageMode::from_byte(byte),
        Err(_) => {
            warn!(
                "message {absolute} ({}, {i}): offset {start:#X} is outside the ROM, skipping",
                segment.index
            );
            return;
        }
    };

    let result = match mode {
        MessageMode::Adpcm => {
            save_adpcm(rom, rom_name, start, absolute, &base, comment, date, out_dir)
        }
        MessageMode::RawPcm => save_raw_pcm(rom, segment, i, &base, out_dir),
        MessageMode::Unknown(byte) => {
            warn!("message {absolute} ({}, {i}): unknown mode {byte:#04X}, skipping", segment.index);
            Ok(())
        }
    };
    if let Err(e) = result {
        warn!("message {absolute} ({}, {i}): {e}", segment.index);
    }
}

#[allow(clippy::too_many_arguments)]
fn save_adpcm(
    rom: &RomImage,
    rom_name: &str,
    start: usize,
    absolute: u32,
    base: &str,
    comment: Option<String>,
    date: &str,
    out_dir: &Path,
) -> Result<()> {
    let samples = AdpcmDecoder::new(rom, start + 1).decode()?;
    if samples.is_empty() {
        info!("message {absolute}: no samples, nothing to write");
        return Ok(());
    }

    let info = WavInfo {
        artist: rom_name.to_string(),
        title: base.to_string(),
        track: absolute,
        date: date.to_string(),
        comment,
    };
    let path = out_dir.join(format!("{base}.wav"));
    let mut writer = BufWriter::new(File::create(&path)?);
    write_wav(&mut writer, &samples, &info)?;
    writer.flush()?;
    info!("wrote {} ({} samples)", path.display(), samples.len());
    Ok(())
}

/// Copy a raw-PCM message's byte range verbatim, mode byte included. The
/// range ends at the next message's offset, or at the segment end for the
/// last message, clamped to the ROM.
fn save_raw_pcm(
    rom: &RomImage,
    segment: &Segment,
    i: usize,
    base: &str,
    out_dir: &Path,
) -> Result<()> {
    let start = segment.message_start(i);
    let end = if i + 1 < segment.message_count() {
        segment.message_start(i + 1)
    } else {
        segment.base + SEGMENT_SIZE
    };
    let end = end.min(rom.len());
    if end <= start {
        warn!("raw message ({}, {i}): empty range {start:#X}..{end:#X}, skipping", segment.index);
        return Ok(());
    }

    let path = out_dir.join(format!("{base}.pcm"));
    let mut file = File::create(&path)?;
    file.write_all(rom.bytes(start, end - start)?)?;
    info!("wrote {} ({} bytes)", path.display(), end - start);
    Ok(())
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn output_base(
    mappings: &MappingIndex,
    segment: &Segment,
    i: usize,
) -> (String, Option<String>) {
    match mappings.lookup(segment.index as u32, i as u32) {
        Some(m) => (m.output_base.clone(), m.comment.clone()),
        None => (format!("message_{}_{:03}", segment.index, i), None),
    }
}
