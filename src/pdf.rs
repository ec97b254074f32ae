//! PDF → ordered page strings. `pdf-extract` returns the whole document as
//! one string with form feeds between pages; splitting on those keeps page
//! indices aligned with the book, empty pages included.

use std::path::Path;

use anyhow::{Context, Result};

pub fn read_pages(path: &Path) -> Result<Vec<String>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let text = pdf_extract::extract_text_from_mem(&bytes)
        .with_context(|| format!("failed to extract text from {}", path.display()))?;
    Ok(split_pages(&text))
}

fn split_pages(text: &str) -> Vec<String> {
    text.split('\x0C').map(|page| page.trim().to_string()).collect()
}

// ── Tests ──
