use crate::error::{Result, VoicewareError};
use std::fs;
use std::path::Path;

/// One record from a mapping file: names and annotates a single message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageMapping {
    pub segment: u32,
    pub message: u32,
    pub output_base: String,
    pub comment: Option<String>,
}

/// Keyed lookup from (segment, in-segment index) to a user-supplied output
/// name. Lookup is a linear scan; a duplicate key replaces the earlier entry.
#[derive(Debug, Default)]
pub struct MappingIndex {
    entries: Vec<MessageMapping>,
}

impl MappingIndex {
    pub fn new() -> Self {
        MappingIndex::default()
    }

    pub fn insert(&mut self, mapping: MessageMapping) {
        match self
            .entries
            .iter_mut()
            .find(|m| m.segment == mapping.segment && m.message == mapping.message)
        {
            Some(existing) => *existing = mapping,
            None => self.entries.push(mapping),
        }
    }

    pub fn lookup(&self, segment: u32, message: u32) -> Option<&MessageMapping> {
        self.entries
            .iter()
            .find(|m| m.segment == segment && m.message == message)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }

    /// Parse mapping-file text: `seg TAB msg TAB name [TAB comment]` per
    /// line, with blank lines and `#` comment lines skipped. Malformed lines
    /// abort the load with their line number.
    pub fn parse(text: &str) -> Result<Self> {
        let mut index = MappingIndex::new();
        for (number, raw) in text.lines().enumerate() {
            let number = number + 1;
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let mut fields = line.splitn(4, '\t');
            let segment = parse_index(fields.next(), number, "segment index")?;
            let message = parse_index(fields.next(), number, "message index")?;
            let output_base = fields
                .next()
                .map(|name| name.trim_end().to_string())
                .filter(|name| !name.is_empty())
                .ok_or_else(|| VoicewareError::mapping(number, "missing output filename"))?;
            let comment = fields
                .next()
                .map(clean_comment)
                .filter(|c| !c.is_empty())
                .map(str::to_string);

            index.insert(MessageMapping {
                segment,
                message,
                output_base,
                comment,
            });
        }
        Ok(index)
    }
}

fn parse_index(field: Option<&str>, line: usize, what: &str) -> Result<u32> {
    let field = field.ok_or_else(|| VoicewareError::mapping(line, format!("missing {what}")))?;
    field
        .trim()
        .parse()
        .map_err(|_| VoicewareError::mapping(line, format!("invalid {what} {field:?}")))
}

/// Strip leading whitespace, then a single leading `#`, then any whitespace
/// that follows it.
pub fn clean_comment(raw: &str) -> &str {
    let s = raw.trim_start();
    let s = s.strip_prefix('#').unwrap_or(s);
    s.trim_start()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_and_skips_noise() {
        let text = "# comment line\n\n0\t0\thello\n1\t2\tworld\tgreeting\n";
        let index = MappingIndex::parse(text).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup(0, 0).unwrap().output_base, "hello");
        let world = index.lookup(1, 2).unwrap();
        assert_eq!(world.output_base, "world");
        assert_eq!(world.comment.as_deref(), Some("greeting"));
        assert!(index.lookup(0, 1).is_none());
    }

    #[test]
    fn handles_crlf_and_trailing_whitespace() {
        let index = MappingIndex::parse("0\t0\thello  \r\n").unwrap();
        assert_eq!(index.lookup(0, 0).unwrap().output_base, "hello");
    }

    #[test]
    fn comment_field_is_cleaned() {
        let index = MappingIndex::parse("0\t3\thello\t  #  (PCM) greeting\n").unwrap();
        assert_eq!(
            index.lookup(0, 3).unwrap().comment.as_deref(),
            Some("(PCM) greeting")
        );
    }

    #[test]
    fn clean_comment_strips_one_hash_only() {
        assert_eq!(clean_comment("  # note"), "note");
        assert_eq!(clean_comment("## note"), "# note");
        assert_eq!(clean_comment("plain"), "plain");
        assert_eq!(clean_comment("   "), "");
    }

    #[test]
    fn empty_comment_field_becomes_none() {
        let index = MappingIndex::parse("0\t0\thello\t# \n").unwrap();
        assert_eq!(index.lookup(0, 0).unwrap().comment, None);
    }

    #[test]
    fn duplicate_keys_last_writer_wins() {
        let index = MappingIndex::parse("0\t0\tfirst\n0\t0\tsecond\n").unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.lookup(0, 0).unwrap().output_base, "second");
    }

    #[test]
    fn malformed_lines_report_their_number() {
        let err = MappingIndex::parse("0\t0\tok\nnot-a-number\t0\tbad\n").unwrap_err();
        match err {
            VoicewareError::Mapping { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }

        assert!(MappingIndex::parse("0\t1\n").is_err());
        assert!(MappingIndex::parse("0\t1\t   \n").is_err());
    }
}
