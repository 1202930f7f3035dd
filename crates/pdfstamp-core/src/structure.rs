//! Byte-level PDF structure access
//!
//! Minimal parsing over a [`RangeReader`]: header and version, classic
//! cross-reference tables (including `/Prev` update chains), trailer,
//! on-demand object reads, and the page tree. Nothing is decoded beyond
//! what page stamping needs, and nothing larger than one object is ever
//! buffered, so memory stays bounded regardless of document size.
//!
//! PDF layout handled here:
//! ```text
//! %PDF-1.x
//! ... objects ...
//! xref
//! 0 N
//! 0000000000 65535 f
//! 0000000015 00000 n
//! ...
//! trailer
//! << /Root X 0 R /Size N [/Prev OFFSET] >>
//! startxref
//! OFFSET
//! %%EOF
//! ```
//!
//! Cross-reference streams and object streams (PDF 1.5 compressed layouts)
//! are rejected with a parse error.

use std::collections::{HashMap, HashSet};
use std::io;

use crate::error::StampError;
use crate::reader::RangeReader;

/// Object reference (object number, generation number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjRef(pub u32, pub u16);

/// Cross-reference entry
#[derive(Debug, Clone)]
pub struct XrefEntry {
    pub offset: u64,
    pub generation: u16,
    pub in_use: bool,
}

/// Trailer information from the newest cross-reference section
#[derive(Debug, Clone)]
pub struct TrailerInfo {
    pub root: ObjRef,
    pub size: u32,
    pub info: Option<ObjRef>,
}

/// Window for locating `startxref` at the end of the file.
const TAIL_WINDOW: usize = 1024;
/// Initial read window for a cross-reference section; doubled until the
/// whole section fits.
const XREF_WINDOW: usize = 8 * 1024;
/// Initial read window for a single object; doubled until `endobj` appears.
const OBJECT_WINDOW: usize = 4 * 1024;
/// Guard against cyclic or absurd `/Prev` chains.
const MAX_XREF_SECTIONS: usize = 1024;
/// Guard against cyclic page trees and `/Parent` chains.
const MAX_TREE_DEPTH: usize = 64;

/// US Letter, the fallback when no `/MediaBox` is present anywhere.
const DEFAULT_MEDIA_BOX: [f64; 4] = [0.0, 0.0, 612.0, 792.0];

/// Parsed document structure, reading objects on demand through `R`.
#[derive(Debug)]
pub struct PdfStructure<R: RangeReader> {
    reader: R,
    len: u64,
    pub version: String,
    pub xref: HashMap<u32, XrefEntry>,
    pub trailer: TrailerInfo,
    /// Offset of the newest cross-reference section; the first appended
    /// update section points its `/Prev` here.
    pub startxref: u64,
}

#[derive(Debug, Default)]
struct RawTrailer {
    root: Option<ObjRef>,
    size: Option<u32>,
    info: Option<ObjRef>,
    prev: Option<u64>,
}

enum XrefParse {
    /// The read window ended mid-section; retry with a larger window.
    Truncated,
    Malformed(String),
}

fn read_failed(e: io::Error) -> StampError {
    StampError::Parse(format!("read failed: {}", e))
}

impl<R: RangeReader> PdfStructure<R> {
    /// Parse the document's skeleton: header, cross-reference chain, trailer.
    pub fn load(mut reader: R) -> Result<Self, StampError> {
        let len = reader.total_len();
        if len < 16 {
            return Err(StampError::Parse("file too small to be a PDF".into()));
        }

        let mut head = [0u8; 16];
        reader.read_at(0, &mut head).map_err(read_failed)?;
        if !head.starts_with(b"%PDF-") {
            return Err(StampError::Parse("missing %PDF- header".into()));
        }
        let version = String::from_utf8_lossy(&head[5..8]).into_owned();

        let tail_len = len.min(TAIL_WINDOW as u64) as usize;
        let mut tail = vec![0u8; tail_len];
        reader
            .read_at(len - tail_len as u64, &mut tail)
            .map_err(read_failed)?;
        let sx = rfind_pattern(&tail, b"startxref")
            .ok_or_else(|| StampError::Parse("startxref not found".into()))?;
        let startxref = parse_offset_after(&tail[sx + 9..])
            .ok_or_else(|| StampError::Parse("invalid startxref offset".into()))?;

        // Walk the update chain newest-first; the first entry seen for an
        // object number is the current one.
        let mut xref = HashMap::new();
        let mut root = None;
        let mut size = None;
        let mut info = None;
        let mut next = Some(startxref);
        let mut seen = HashSet::new();
        while let Some(offset) = next {
            if !seen.insert(offset) {
                return Err(StampError::Parse("cyclic /Prev chain in xref".into()));
            }
            if seen.len() > MAX_XREF_SECTIONS {
                return Err(StampError::Parse("too many xref sections".into()));
            }
            let (entries, trailer) = read_xref_section(&mut reader, len, offset)?;
            for (id, entry) in entries {
                xref.entry(id).or_insert(entry);
            }
            root = root.or(trailer.root);
            size = size.or(trailer.size);
            info = info.or(trailer.info);
            next = trailer.prev;
        }

        let root = root.ok_or_else(|| StampError::Parse("trailer has no /Root".into()))?;
        let size = size.unwrap_or_else(|| xref.keys().max().map_or(1, |m| m + 1));

        Ok(Self {
            reader,
            len,
            version,
            xref,
            trailer: TrailerInfo { root, size, info },
            startxref,
        })
    }

    /// Read raw object bytes (header through `endobj`) at the given
    /// reference. Free and unknown objects are errors.
    pub fn read_object(&mut self, obj_ref: ObjRef) -> Result<Vec<u8>, StampError> {
        let (offset, in_use) = {
            let entry = self.xref.get(&obj_ref.0).ok_or_else(|| {
                StampError::Parse(format!("object {} not in xref", obj_ref.0))
            })?;
            (entry.offset, entry.in_use)
        };
        if !in_use {
            return Err(StampError::Parse(format!("object {} is free", obj_ref.0)));
        }
        if offset >= self.len {
            return Err(StampError::Parse(format!(
                "object {} offset beyond end of file",
                obj_ref.0
            )));
        }

        let mut window = OBJECT_WINDOW;
        loop {
            let avail = (self.len - offset) as usize;
            let take = window.min(avail);
            let mut buf = vec![0u8; take];
            self.reader.read_at(offset, &mut buf).map_err(read_failed)?;
            if let Some(p) = find_pattern(&buf, b"endobj") {
                buf.truncate(p + 6);
                return Ok(buf);
            }
            if take == avail {
                return Err(StampError::Parse(format!(
                    "object {}: endobj not found",
                    obj_ref.0
                )));
            }
            window *= 2;
        }
    }

    /// Page count from the page tree root's `/Count`.
    pub fn page_count(&mut self) -> Result<u32, StampError> {
        let pages_root = self.pages_root()?;
        let body = self.read_object(pages_root)?;
        dict_int(&body, b"/Count")
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| StampError::Parse("no /Count in page tree root".into()))
    }

    /// All page object references in document order.
    pub fn page_refs(&mut self) -> Result<Vec<ObjRef>, StampError> {
        let pages_root = self.pages_root()?;
        let mut out = Vec::new();
        self.collect_pages(pages_root, &mut out, 0)?;
        Ok(out)
    }

    fn pages_root(&mut self) -> Result<ObjRef, StampError> {
        let root = self.trailer.root;
        let catalog = self.read_object(root)?;
        dict_ref(&catalog, b"/Pages")
            .ok_or_else(|| StampError::Parse("no /Pages in catalog".into()))
    }

    /// Recursively collect page references from the page tree. A node with
    /// `/Kids` is an internal node; anything else is a leaf page. An
    /// unreadable leaf still occupies its index slot: the failure surfaces
    /// when the page is acquired for mutation, where it is non-fatal.
    fn collect_pages(
        &mut self,
        node: ObjRef,
        out: &mut Vec<ObjRef>,
        depth: usize,
    ) -> Result<(), StampError> {
        if depth > MAX_TREE_DEPTH {
            return Err(StampError::Parse("page tree too deep".into()));
        }
        let body = match self.read_object(node) {
            Ok(body) => body,
            Err(_) if depth > 0 => {
                out.push(node);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        match body_dict_get(&body, b"/Kids") {
            Some((s, e)) => {
                for kid in extract_all_refs(&body[s..e]) {
                    self.collect_pages(kid, out, depth + 1)?;
                }
                Ok(())
            }
            None => {
                out.push(node);
                Ok(())
            }
        }
    }

    /// Effective `/MediaBox` for a page, following `/Parent` inheritance.
    /// Falls back to US Letter when absent, matching common reader behavior.
    pub fn media_box(&mut self, page_ref: ObjRef) -> Result<[f64; 4], StampError> {
        let mut body = self.read_object(page_ref)?;
        for _ in 0..MAX_TREE_DEPTH {
            if let Some((s, e)) = body_dict_get(&body, b"/MediaBox") {
                let span = body[s..e].to_vec();
                return self.resolve_rect(&span);
            }
            match dict_ref(&body, b"/Parent") {
                Some(parent) => body = self.read_object(parent)?,
                None => break,
            }
        }
        Ok(DEFAULT_MEDIA_BOX)
    }

    fn resolve_rect(&mut self, span: &[u8]) -> Result<[f64; 4], StampError> {
        let direct;
        let array = if span.first() == Some(&b'[') {
            span
        } else {
            let r = parse_ref(span)
                .ok_or_else(|| StampError::Parse("invalid /MediaBox".into()))?;
            let obj = self.read_object(r)?;
            let s = find_pattern(&obj, b"[")
                .ok_or_else(|| StampError::Parse("invalid indirect /MediaBox".into()))?;
            let e = object_end(&obj, s)
                .ok_or_else(|| StampError::Parse("invalid indirect /MediaBox".into()))?;
            direct = obj[s..e].to_vec();
            &direct[..]
        };
        parse_rect(array).ok_or_else(|| StampError::Parse("invalid /MediaBox".into()))
    }
}

fn read_xref_section<R: RangeReader>(
    reader: &mut R,
    len: u64,
    offset: u64,
) -> Result<(Vec<(u32, XrefEntry)>, RawTrailer), StampError> {
    if offset >= len {
        return Err(StampError::Parse("xref offset beyond end of file".into()));
    }
    let mut window = XREF_WINDOW;
    loop {
        let avail = (len - offset) as usize;
        let take = window.min(avail);
        let mut buf = vec![0u8; take];
        reader.read_at(offset, &mut buf).map_err(read_failed)?;
        match parse_xref_section(&buf) {
            Ok(parsed) => return Ok(parsed),
            Err(XrefParse::Truncated) if take < avail => window *= 2,
            Err(XrefParse::Truncated) => {
                return Err(StampError::Parse("truncated xref section".into()))
            }
            Err(XrefParse::Malformed(msg)) => return Err(StampError::Parse(msg)),
        }
    }
}

fn parse_xref_section(bytes: &[u8]) -> Result<(Vec<(u32, XrefEntry)>, RawTrailer), XrefParse> {
    if bytes.len() < 4 {
        return Err(XrefParse::Truncated);
    }
    if !bytes.starts_with(b"xref") {
        return Err(XrefParse::Malformed(
            "expected 'xref' keyword (cross-reference streams are not supported)".into(),
        ));
    }

    let mut pos = next_non_ws(bytes, 4);
    let mut entries = Vec::new();
    loop {
        if pos >= bytes.len() {
            return Err(XrefParse::Truncated);
        }
        if bytes[pos] == b't' {
            break;
        }

        // Subsection header: "start count"
        let line_end = find_pattern(&bytes[pos..], b"\n")
            .map(|p| pos + p)
            .ok_or(XrefParse::Truncated)?;
        let line = std::str::from_utf8(&bytes[pos..line_end])
            .map_err(|_| XrefParse::Malformed("invalid xref subsection header".into()))?;
        let mut parts = line.split_whitespace();
        let (start, count) = match (parts.next(), parts.next(), parts.next()) {
            (Some(s), Some(c), None) => {
                let start = s.parse::<u32>().map_err(|_| {
                    XrefParse::Malformed("invalid xref subsection start".into())
                })?;
                let count = c.parse::<u32>().map_err(|_| {
                    XrefParse::Malformed("invalid xref subsection count".into())
                })?;
                (start, count)
            }
            _ => return Err(XrefParse::Malformed("invalid xref subsection header".into())),
        };
        pos = line_end + 1;

        // Fixed 20-byte entries
        for i in 0..count {
            if pos + 20 > bytes.len() {
                return Err(XrefParse::Truncated);
            }
            let entry = std::str::from_utf8(&bytes[pos..pos + 20])
                .map_err(|_| XrefParse::Malformed("invalid xref entry".into()))?;
            let offset = entry[0..10]
                .trim()
                .parse::<u64>()
                .map_err(|_| XrefParse::Malformed("invalid xref offset".into()))?;
            let generation = entry[11..16]
                .trim()
                .parse::<u16>()
                .map_err(|_| XrefParse::Malformed("invalid xref generation".into()))?;
            let in_use = entry.as_bytes()[17] == b'n';
            entries.push((
                start + i,
                XrefEntry {
                    offset,
                    generation,
                    in_use,
                },
            ));
            pos += 20;
        }
        pos = next_non_ws(bytes, pos);
    }

    if pos + 7 > bytes.len() {
        return Err(XrefParse::Truncated);
    }
    if !bytes[pos..].starts_with(b"trailer") {
        return Err(XrefParse::Malformed("expected 'trailer' keyword".into()));
    }
    pos = next_non_ws(bytes, pos + 7);
    if pos + 2 > bytes.len() {
        return Err(XrefParse::Truncated);
    }
    if &bytes[pos..pos + 2] != b"<<" {
        return Err(XrefParse::Malformed("trailer dictionary not found".into()));
    }
    let dict_end = object_end(bytes, pos).ok_or(XrefParse::Truncated)?;
    let dict = &bytes[pos..dict_end];

    Ok((
        entries,
        RawTrailer {
            root: dict_ref(dict, b"/Root"),
            size: dict_int(dict, b"/Size").and_then(|v| u32::try_from(v).ok()),
            info: dict_ref(dict, b"/Info"),
            prev: dict_int(dict, b"/Prev").and_then(|v| u64::try_from(v).ok()),
        },
    ))
}

/// Parse the decimal offset following a keyword such as `startxref`.
fn parse_offset_after(bytes: &[u8]) -> Option<u64> {
    let start = next_non_ws(bytes, 0);
    let end = bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |p| start + p);
    std::str::from_utf8(&bytes[start..end]).ok()?.parse().ok()
}

// ─────────────────────────────────────────────────────────────────────────
// Byte-level dictionary and token helpers
// ─────────────────────────────────────────────────────────────────────────

pub(crate) fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'\x0c' | b'\0')
}

pub(crate) fn is_delim(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

/// Find first occurrence of `pattern` in `bytes`.
pub(crate) fn find_pattern(bytes: &[u8], pattern: &[u8]) -> Option<usize> {
    bytes
        .windows(pattern.len())
        .position(|window| window == pattern)
}

/// Find last occurrence of `pattern` in `bytes`.
pub(crate) fn rfind_pattern(bytes: &[u8], pattern: &[u8]) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > bytes.len() {
        return None;
    }
    (0..=(bytes.len() - pattern.len()))
        .rev()
        .find(|&i| &bytes[i..i + pattern.len()] == pattern)
}

/// Advance past whitespace and `%` comments.
pub(crate) fn next_non_ws(bytes: &[u8], mut i: usize) -> usize {
    loop {
        while i < bytes.len() && is_ws(bytes[i]) {
            i += 1;
        }
        if bytes.get(i) == Some(&b'%') {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
        } else {
            return i;
        }
    }
}

/// End of the name token starting at `i` (which must point at `/`).
pub(crate) fn name_end(bytes: &[u8], i: usize) -> usize {
    let mut j = i + 1;
    while j < bytes.len() && !is_ws(bytes[j]) && !is_delim(bytes[j]) {
        j += 1;
    }
    j
}

/// End of the literal string starting at `i` (which must point at `(`).
/// Handles backslash escapes and balanced nested parentheses.
fn string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = start;
    loop {
        match *bytes.get(i)? {
            b'\\' => i += 2,
            b'(' => {
                depth += 1;
                i += 1;
            }
            b')' => {
                depth -= 1;
                i += 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => i += 1,
        }
    }
}

/// End index (exclusive) of the single object starting at `start`: a
/// dictionary, array, string, hex string, name, or bare token. Returns None
/// when the object is unterminated within `bytes`.
pub(crate) fn object_end(bytes: &[u8], start: usize) -> Option<usize> {
    match *bytes.get(start)? {
        b'(' => string_end(bytes, start),
        b'/' => Some(name_end(bytes, start)),
        b'<' if bytes.get(start + 1) != Some(&b'<') => {
            find_pattern(&bytes[start + 1..], b">").map(|p| start + p + 2)
        }
        b'[' | b'<' => {
            let mut stack: Vec<u8> = Vec::new();
            let mut i = start;
            loop {
                match *bytes.get(i)? {
                    b'(' => i = string_end(bytes, i)?,
                    b'<' if bytes.get(i + 1) == Some(&b'<') => {
                        stack.push(b'd');
                        i += 2;
                    }
                    b'<' => {
                        let p = find_pattern(&bytes[i + 1..], b">")?;
                        i += p + 2;
                    }
                    b'>' if bytes.get(i + 1) == Some(&b'>') => {
                        if stack.pop()? != b'd' {
                            return None;
                        }
                        i += 2;
                        if stack.is_empty() {
                            return Some(i);
                        }
                    }
                    b'[' => {
                        stack.push(b'a');
                        i += 1;
                    }
                    b']' => {
                        if stack.pop()? != b'a' {
                            return None;
                        }
                        i += 1;
                        if stack.is_empty() {
                            return Some(i);
                        }
                    }
                    b'%' => {
                        while i < bytes.len() && bytes[i] != b'\n' {
                            i += 1;
                        }
                    }
                    _ => i += 1,
                }
            }
        }
        _ => {
            let mut i = start;
            while i < bytes.len() && !is_ws(bytes[i]) && !is_delim(bytes[i]) {
                i += 1;
            }
            (i > start).then_some(i)
        }
    }
}

/// Like [`object_end`], but coalesces an indirect reference `N G R` into a
/// single value span.
pub(crate) fn value_end(bytes: &[u8], start: usize) -> Option<usize> {
    let end = object_end(bytes, start)?;
    if bytes[start..end].iter().all(|b| b.is_ascii_digit()) {
        let gen_start = next_non_ws(bytes, end);
        if bytes.get(gen_start).map_or(false, |b| b.is_ascii_digit()) {
            if let Some(gen_end) = object_end(bytes, gen_start) {
                if bytes[gen_start..gen_end].iter().all(|b| b.is_ascii_digit()) {
                    let r_pos = next_non_ws(bytes, gen_end);
                    let r_ok = bytes.get(r_pos) == Some(&b'R')
                        && bytes
                            .get(r_pos + 1)
                            .map_or(true, |&b| is_ws(b) || is_delim(b));
                    if r_ok {
                        return Some(r_pos + 1);
                    }
                }
            }
        }
    }
    Some(end)
}

/// Top-level lookup of `key` in the dictionary starting at `dict_start`
/// (which must point at `<<`). Returns the value's byte span. Unlike a raw
/// pattern search this never matches keys of nested dictionaries.
pub(crate) fn dict_get(bytes: &[u8], dict_start: usize, key: &[u8]) -> Option<(usize, usize)> {
    if bytes.get(dict_start..dict_start + 2)? != b"<<" {
        return None;
    }
    let mut i = dict_start + 2;
    loop {
        i = next_non_ws(bytes, i);
        if bytes.get(i..i + 2) == Some(b">>".as_slice()) {
            return None;
        }
        if *bytes.get(i)? != b'/' {
            return None;
        }
        let key_end = name_end(bytes, i);
        let matches = &bytes[i..key_end] == key;
        let value_start = next_non_ws(bytes, key_end);
        let value_stop = value_end(bytes, value_start)?;
        if matches {
            return Some((value_start, value_stop));
        }
        i = value_stop;
    }
}

/// [`dict_get`] against the first dictionary in an object's raw bytes.
pub(crate) fn body_dict_get(body: &[u8], key: &[u8]) -> Option<(usize, usize)> {
    let dict_start = find_pattern(body, b"<<")?;
    dict_get(body, dict_start, key)
}

/// Indirect-reference value of `key`, if present and a reference.
pub(crate) fn dict_ref(body: &[u8], key: &[u8]) -> Option<ObjRef> {
    let (s, e) = body_dict_get(body, key)?;
    parse_ref(&body[s..e])
}

/// Integer value of `key`, if present and numeric.
pub(crate) fn dict_int(body: &[u8], key: &[u8]) -> Option<i64> {
    let (s, e) = body_dict_get(body, key)?;
    std::str::from_utf8(&body[s..e]).ok()?.trim().parse().ok()
}

/// Parse a lone `N G R` reference.
pub(crate) fn parse_ref(bytes: &[u8]) -> Option<ObjRef> {
    let mut it = std::str::from_utf8(bytes).ok()?.split_whitespace();
    let num = it.next()?.parse().ok()?;
    let gen = it.next()?.parse().ok()?;
    (it.next()? == "R" && it.next().is_none()).then_some(ObjRef(num, gen))
}

/// Span of an object's body: the bytes between the `N G obj` header and the
/// trailing `endobj`.
pub(crate) fn object_body_span(full: &[u8]) -> Option<(usize, usize)> {
    let start = find_pattern(full, b"obj")? + 3;
    let end = rfind_pattern(full, b"endobj")?;
    (start <= end).then_some((start, end))
}

/// Extract all `N G R` references from bytes (binary-safe). A digit only
/// starts a reference when it follows whitespace or a delimiter, so names
/// with embedded digits like `/F0` never confuse the scan.
pub(crate) fn extract_all_refs(bytes: &[u8]) -> Vec<ObjRef> {
    let mut refs = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        if i > 0 && !is_ws(bytes[i - 1]) && !is_delim(bytes[i - 1]) {
            // part of a longer token such as a name; skip it
            i += 1;
            continue;
        }
        let num_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let gen_start = next_non_ws(bytes, i);
        let mut j = gen_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j == gen_start {
            continue;
        }
        let r_pos = next_non_ws(bytes, j);
        let r_ok = bytes.get(r_pos) == Some(&b'R')
            && bytes
                .get(r_pos + 1)
                .map_or(true, |&b| is_ws(b) || is_delim(b));
        if !r_ok {
            continue;
        }
        let num = std::str::from_utf8(&bytes[num_start..i])
            .ok()
            .and_then(|s| s.parse().ok());
        let gen = std::str::from_utf8(&bytes[gen_start..j])
            .ok()
            .and_then(|s| s.parse().ok());
        if let (Some(num), Some(gen)) = (num, gen) {
            refs.push(ObjRef(num, gen));
        }
        i = r_pos + 1;
    }
    refs
}

fn parse_rect(span: &[u8]) -> Option<[f64; 4]> {
    let inner = span.strip_prefix(b"[")?.strip_suffix(b"]")?;
    let mut it = std::str::from_utf8(inner).ok()?.split_whitespace();
    let mut out = [0f64; 4];
    for v in out.iter_mut() {
        *v = it.next()?.parse().ok()?;
    }
    it.next().is_none().then_some(out)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: extract_all_refs never panics on arbitrary input.
        #[test]
        fn extract_refs_never_panics(input in prop::collection::vec(any::<u8>(), 0..1000)) {
            let _ = extract_all_refs(&input);
        }

        /// Property: a well-formed ref preceded by whitespace is found.
        #[test]
        fn valid_ref_is_found(num in 1u32..10000, gen in 0u16..100) {
            let input = format!(" {} {} R", num, gen);
            prop_assert_eq!(extract_all_refs(input.as_bytes()), vec![ObjRef(num, gen)]);
        }

        /// Property: digits embedded in a name never start a reference.
        #[test]
        fn digit_after_letter_not_ref(name in "[A-Za-z]+[0-9]+", num in 1u32..1000) {
            let input = format!("/{} {} 0 R", name, num);
            let refs = extract_all_refs(input.as_bytes());
            prop_assert_eq!(refs.len(), 1);
            prop_assert_eq!(refs[0].0, num);
        }

        /// Property: object_end never panics and never overruns.
        #[test]
        fn object_end_in_bounds(input in prop::collection::vec(any::<u8>(), 0..300)) {
            if let Some(end) = object_end(&input, 0) {
                prop_assert!(end <= input.len());
            }
        }
    }
}
