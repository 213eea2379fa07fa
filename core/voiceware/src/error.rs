use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoicewareError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ROM image is empty")]
    EmptyRom,
    #[error("invalid segment header at offset {offset:#X}")]
    InvalidHeader { offset: usize },
    #[error("read of {len} byte(s) at offset {offset:#X} is past the end of the ROM")]
    OutOfRange { offset: usize, len: usize },
    #[error("command stream truncated at offset {offset:#X} before any sample was produced")]
    TruncatedStream { offset: usize },
    #[error("decoded data is {bytes} bytes, larger than a RIFF chunk can hold")]
    DataTooLarge { bytes: u64 },
    #[error("mapping file line {line}: {message}")]
    Mapping { line: usize, message: String },
    #[error("message index {index} not found in ROM")]
    TargetNotFound { index: u32 },
}

impl VoicewareError {
    pub fn mapping(line: usize, message: impl Into<String>) -> Self {
        VoicewareError::Mapping {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VoicewareError>;
