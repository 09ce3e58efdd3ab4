use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

pub type SourceId = usize;

static SOURCE_ID: AtomicUsize = AtomicUsize::new(0);

fn next_id() -> usize {
    SOURCE_ID.fetch_add(1, Ordering::Relaxed)
}

/// All sources taking part in one parse session, keyed by id.
/// Used to render error reports after the fact.
pub struct SourceMap {
    map: HashMap<SourceId, Source>,
    order: Vec<SourceId>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn add(&mut self, source: Source) -> SourceId {
        let id = source.id;
        self.order.push(id);
        self.map.insert(id, source);
        id
    }

    pub fn get(&self, id: SourceId) -> Option<&Source> {
        self.map.get(&id)
    }

    /// Sources in the order they were added.
    pub fn ordered(&self) -> impl Iterator<Item = &Source> {
        self.order.iter().filter_map(|id| self.map.get(id))
    }
}

#[derive(Debug)]
pub struct Source {
    pub id: SourceId,
    pub filepath: String,
    /// File contents
    pub src: Vec<u8>,
    /// File size in bytes
    pub size: usize,
    /// List of byte offsets for first character in each line.
    pub lines: Vec<usize>,
}

impl Source {
    /// Create new source object using given text.
    pub fn new(filepath: String, src: Vec<u8>) -> Source {
        Source {
            id: next_id(),
            filepath,
            lines: Source::get_line_beginnings(src.as_slice()),
            size: src.len(),
            src,
        }
    }

    pub fn new_from_string(src: &str) -> Source {
        Self::new("".into(), src.to_string().into_bytes())
    }

    /// Gets a list of offsets for the first character of each line.
    /// First item will always be 0.
    fn get_line_beginnings(src: &[u8]) -> Vec<usize> {
        let mut lines = Vec::new();
        let mut i: usize = 0;

        while i < src.len() {
            lines.push(i);

            // Find the end of the current line
            let end = Self::find_end_of_line(src, i);

            if end == i {
                // Empty line, move to next character
                i += 1;
                continue;
            }

            // Move to the start of the next line
            i = end + 1;
        }

        // Guarantee at least one index
        if lines.is_empty() {
            lines.push(0);
        }

        lines
    }

    /// Get the source text at a given row (linenr -1).
    pub fn line(&self, row: usize) -> &str {
        // Tokens get their positions from the actual file
        // A failed assert here is a bug
        assert!(
            row < self.lines.len(),
            "row out of bounds: {} of {}",
            row,
            self.lines.len()
        );

        let start = self.lines[row];
        let end = Source::find_end_of_line(&self.src, start);
        self.str_range(start, end + 1) // Range is non-inclusive
    }

    /// Get string in range of (from, to) where both are byte offsets.
    /// Panics if to <= from.
    pub fn str_range(&self, from: usize, to: usize) -> &str {
        assert!(from <= to, "range (from, to) where to <= from");
        str::from_utf8(&self.src[from..to]).expect("invalid utf-8")
    }

    /// Returns the position of the next newline character
    /// or the last character in `src` if none is found.
    fn find_end_of_line(src: &[u8], offset: usize) -> usize {
        match src[offset..].iter().position(|&c| c == b'\n') {
            Some(pos) => offset + pos, // character before newline
            None => src.len() - 1,     // no newline found
        }
    }
}
