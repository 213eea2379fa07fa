use std::io::{self, Write};

const TAB_WIDTH: usize = 8;
const NAME_COLUMN: usize = 40;

/// Inventory header, once per run.
pub fn write_header<W: Write>(out: &mut W, rom_name: &str) -> io::Result<()> {
    writeln!(out, "# ROM: {rom_name}")?;
    writeln!(out)
}

/// One inventory line in the mapping-file format. `(PCM)` is added for raw
/// messages unless the user comment already carries it.
pub fn write_line<W: Write>(
    out: &mut W,
    segment: u32,
    message: u32,
    output_base: &str,
    is_pcm: bool,
    comment: Option<&str>,
) -> io::Result<()> {
    write!(out, "{segment}\t{message}\t{output_base}")?;
    for _ in 0..padding_tabs(output_base.len()) {
        out.write_all(b"\t")?;
    }
    write!(out, "#")?;
    if is_pcm && !comment.is_some_and(|c| c.contains("(PCM)")) {
        write!(out, " (PCM)")?;
    }
    if let Some(comment) = comment {
        write!(out, " {comment}")?;
    }
    writeln!(out)
}

/// Tabs needed to reach the comment column, never fewer than one so the name
/// stays separated from the `#` field.
fn padding_tabs(name_len: usize) -> usize {
    let existing_stops = name_len / TAB_WIDTH;
    let target_stops = NAME_COLUMN.div_ceil(TAB_WIDTH);
    target_stops.saturating_sub(existing_stops).max(1)
}
