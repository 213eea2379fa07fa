//! voiceware library for decoding Nortel Millennium VoiceWare ROM images.

pub mod adpcm;
pub mod error;
pub mod list;
pub mod mapping;
pub mod process;
pub mod rom;
pub mod wav;

pub use adpcm::AdpcmDecoder;
pub use error::{Result, VoicewareError};
pub use mapping::{MappingIndex, MessageMapping};
pub use process::{run, DecodeConfig};
pub use rom::{MessageMode, RomImage, Segment, SEGMENT_MAGIC, SEGMENT_SIZE};
pub use wav::{write_wav, WavInfo, SAMPLE_RATE};
