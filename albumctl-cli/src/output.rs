//! Result printing (human-readable text or JSON lines)

use std::io::{self, Write};

use albumctl_store::Album;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

/// Writes command results to stdout (or any writer in tests)
pub struct Printer<W: Write> {
    format: Format,
    writer: W,
}

impl<W: Write> Printer<W> {
    pub fn new(format: Format, writer: W) -> Self {
        Self { format, writer }
    }

    pub fn greeting(&mut self, greeting: &str) -> io::Result<()> {
        match self.format {
            Format::Text => writeln!(self.writer, "{greeting}"),
            Format::Json => self.json_line(json!({ "greeting": greeting })),
        }
    }

    pub fn albums(&mut self, albums: &[Album]) -> io::Result<()> {
        match self.format {
            Format::Text => {
                let listed: Vec<String> = albums.iter().map(Album::to_string).collect();
                writeln!(self.writer, "Albums found: [{}]", listed.join(", "))
            }
            Format::Json => self.json_line(json!({ "albums": albums })),
        }
    }

    pub fn album(&mut self, album: &Album) -> io::Result<()> {
        match self.format {
            Format::Text => writeln!(self.writer, "Album found: {album}"),
            Format::Json => self.json_line(json!({ "album": album })),
        }
    }

    pub fn added(&mut self, id: i64) -> io::Result<()> {
        match self.format {
            Format::Text => writeln!(self.writer, "ID of added album: {id}"),
            Format::Json => self.json_line(json!({ "id": id })),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn json_line(&mut self, value: serde_json::Value) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, &value)?;
        writeln!(self.writer)
    }
}
