use crate::app::ports::RendererPort;
use crate::error::Result;
use crate::types::{CatalogEntry, CatalogKind};
use std::io::Write;

/// Plain-text listing, one block per entry, in the order given.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn variant_line(kind: CatalogKind, count: usize) -> String {
    match kind {
        CatalogKind::Components => format!("number of variant(s) {count}"),
        CatalogKind::Patterns => format!("Number of variant(s): {count}"),
    }
}

impl<W: Write> RendererPort for TextRenderer<W> {
    fn render(&mut self, kind: CatalogKind, entries: &[CatalogEntry]) -> Result<()> {
        writeln!(self.out, "== {} {} ==", entries.len(), kind)?;
        for entry in entries {
            writeln!(self.out)?;
            if kind == CatalogKind::Patterns {
                writeln!(self.out, "[{}]", entry.category.as_deref().unwrap_or_default())?;
            }
            writeln!(self.out, "{}", entry.name)?;
            writeln!(self.out, "{}", variant_line(kind, entry.variant_count))?;
            for variant in &entry.items {
                writeln!(self.out, "  - {} <{}>", variant.organisation, variant.url)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

/// One compact JSON array per render, newline-terminated.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RendererPort for JsonRenderer<W> {
    fn render(&mut self, _kind: CatalogKind, entries: &[CatalogEntry]) -> Result<()> {
        serde_json::to_writer(&mut self.out, entries)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
