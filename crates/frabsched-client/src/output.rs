//! Rendering of event records for the terminal.

use std::io::Write;

use frabsched_core::EventRecord;

use crate::error::ClientResult;

/// How records are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One human-readable line per record.
    #[default]
    Text,
    /// A pretty-printed JSON array.
    Json,
}

impl OutputFormat {
    /// Picks the format from the `--json` flag.
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Writes `records` to `out` in the given format.
pub fn write_records<W: Write>(
    out: &mut W,
    records: &[EventRecord],
    format: OutputFormat,
) -> ClientResult<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for record in records {
                writeln!(out, "{}", format_line(record))?;
            }
        }
    }
    Ok(())
}

/// Formats one record as `[group] HH:MM-HH:MM place  title (speakers)`.
pub fn format_line(record: &EventRecord) -> String {
    let mut line = format!("[{}] {}", record.group, record.time_range());
    if !record.place.is_empty() {
        line.push(' ');
        line.push_str(&record.place);
    }
    line.push_str("  ");
    line.push_str(if record.title.is_empty() {
        "(untitled)"
    } else {
        &record.title
    });
    if record.has_speakers() {
        line.push_str(&format!(" ({})", record.speakers.join(", ")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<EventRecord> {
        let xml = br#"<schedule><day><room name="Saal 1">
  <event id="1"><date>2024-03-01T10:00:00+01:00</date><duration>01:30</duration>
    <room>Saal 1</room><title>Opening</title>
    <persons><person>Ada</person><person>Grace</person></persons></event>
  <event id="2"><date>2024-03-01T12:00:00+01:00</date><duration>00:30</duration></event>
</room></day></schedule>"#;
        frabsched_core::parse(xml, "demo").unwrap()
    }

    #[test]
    fn text_lines() {
        let records = records();
        assert_eq!(
            format_line(&records[0]),
            "[demo] 10:00-11:30 Saal 1  Opening (Ada, Grace)"
        );
        assert_eq!(format_line(&records[1]), "[demo] 12:00-12:30  (untitled)");
    }

    #[test]
    fn text_output() {
        let mut out = Vec::new();
        write_records(&mut out, &records(), OutputFormat::Text).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn json_output_round_trips() {
        let records = records();
        let mut out = Vec::new();
        write_records(&mut out, &records, OutputFormat::Json).unwrap();

        let parsed: Vec<EventRecord> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn empty_json_is_array() {
        let mut out = Vec::new();
        write_records(&mut out, &[], OutputFormat::Json).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "[]");
    }

    #[test]
    fn format_from_flag() {
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Text);
    }
}
