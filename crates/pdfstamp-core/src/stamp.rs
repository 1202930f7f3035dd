//! Batched incremental stamping
//!
//! The core control loop: load the document structure, copy the original
//! bytes verbatim into the sink, then walk the page index range in
//! fixed-size batches. Each selected page gets a text stamp (a new content
//! stream plus a rewritten page dictionary); after each batch the pending
//! objects are flushed as one incremental update section. No state from a
//! finished batch is retained, so peak memory holds one batch's objects.

use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::delta::IncrementalUpdate;
use crate::error::StampError;
use crate::page_ranges::parse_page_spec;
use crate::reader::{FileRangeReader, RangeReader};
use crate::sink::AppendSink;
use crate::structure::{
    body_dict_get, dict_get, dict_ref, find_pattern, object_body_span, object_end, parse_ref,
    ObjRef, PdfStructure,
};

/// Pages per incremental flush. Smaller steps bound memory tighter and
/// produce more frequent small deltas; larger steps amortize per-flush
/// overhead across more pages.
pub const DEFAULT_STEP: usize = 40;

/// Resource name the stamp's font is registered under.
const FONT_RESOURCE: &str = "FS0";

const STANDARD_FONT_BODY: &[u8] = b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>";

const MAX_PARENT_DEPTH: usize = 64;

/// Standard-14 Helvetica advance widths in thousandths of an em, for the
/// printable ASCII range (32..=126). Lets the stamp center itself without
/// shipping font files.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722,
    667, 611, 722, 667, 944, 667, 667, 611, // A..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333,
    500, 278, 556, 500, 722, 500, 500, 500, // a..z
    334, 260, 334, 584, // {..~
];

const HELVETICA_DESCENT: f64 = 0.207;

#[derive(Debug, Clone)]
pub struct StampOptions {
    /// Page selection spec, e.g. `all`, `1,3,5`, `10-20`.
    pub spec: String,
    /// Stamp text payload.
    pub text: String,
    pub font_size: f64,
    /// RGB fill color, each component in `0..=1`.
    pub color: [f32; 3],
    /// Distance from the page's bottom edge to the stamp's bounding box.
    pub bottom_margin: f64,
    /// Pages per incremental flush.
    pub step: usize,
}

impl Default for StampOptions {
    fn default() -> Self {
        Self {
            spec: "all".into(),
            text: "DRAFT".into(),
            font_size: 24.0,
            color: [0.0, 0.0, 1.0],
            bottom_margin: 30.0,
            step: DEFAULT_STEP,
        }
    }
}

/// What a run did, for callers and the CLI's summary line.
#[derive(Debug, Clone, Default)]
pub struct StampReport {
    pub page_count: u32,
    pub pages_stamped: Vec<u32>,
    /// Pages that failed to load or rewrite; never fatal.
    pub pages_skipped: Vec<u32>,
    pub batches_flushed: u32,
    pub bytes_copied: u64,
    pub output_len: u64,
}

/// Stamp `input` into `output` on disk.
pub fn stamp_file(
    input: &Path,
    output: &Path,
    opts: &StampOptions,
) -> Result<StampReport, StampError> {
    let open_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| StampError::Open { path, source }
    };

    let reader = FileRangeReader::open(input).map_err(open_err(input))?;
    let mut doc = PdfStructure::load(reader)?;
    let mut source = File::open(input).map_err(open_err(input))?;
    let mut sink = AppendSink::create(output).map_err(open_err(output))?;
    stamp_document(&mut doc, &mut source, &mut sink, opts)
}

/// Stamp a loaded document into `sink`. `source` supplies the original
/// bytes for the verbatim copy phase and must refer to the same data the
/// document was loaded from.
pub fn stamp_document<R, S, W>(
    doc: &mut PdfStructure<R>,
    source: &mut S,
    sink: &mut AppendSink<W>,
    opts: &StampOptions,
) -> Result<StampReport, StampError>
where
    R: RangeReader,
    S: Read,
    W: Write + Seek,
{
    let page_count = doc.page_count()?;
    debug!(page_count, version = %doc.version, "document loaded");

    let bytes_copied = sink.copy_from(source)?;
    sink.mark_append_point()?;
    debug!(bytes_copied, "verbatim copy complete");

    // Selection runs after the copy: on a bad or empty spec the output holds
    // exactly the verbatim (still loadable) original.
    let selected = parse_page_spec(&opts.spec, page_count)?;
    if selected.is_empty() {
        return Err(StampError::EmptySelection);
    }

    let pages = doc.page_refs()?;
    if pages.len() != page_count as usize {
        warn!(
            count = page_count,
            walked = pages.len(),
            "page tree /Count disagrees with tree walk"
        );
    }

    let mut report = StampReport {
        page_count,
        bytes_copied,
        ..Default::default()
    };
    let mut update = IncrementalUpdate::new();
    let mut next_id = doc.trailer.size;
    let mut prev_startxref = doc.startxref;
    let mut font_id: Option<u32> = None;
    let mut patched: HashSet<u32> = HashSet::new();

    let step = opts.step.max(1) as u32;
    let mut start = 1u32;
    while start <= page_count {
        let end = start.saturating_add(step - 1).min(page_count);

        for page_no in start..=end {
            if !selected.contains(&page_no) {
                continue;
            }
            match stamp_one_page(
                doc,
                &pages,
                page_no,
                opts,
                &mut next_id,
                &mut font_id,
                &mut patched,
                &mut update,
            ) {
                Ok(()) => report.pages_stamped.push(page_no),
                Err(e) => {
                    warn!(page = page_no, error = %e, "failed to stamp page; skipping");
                    report.pages_skipped.push(page_no);
                }
            }
        }

        if !update.is_empty() {
            let objects = update.object_count();
            prev_startxref = update.write_to(
                sink,
                doc.trailer.root,
                doc.trailer.info,
                next_id,
                prev_startxref,
            )?;
            report.batches_flushed += 1;
            debug!(
                batch_end = end,
                objects,
                startxref = prev_startxref,
                "incremental update flushed"
            );
        }

        start = end + 1;
    }

    sink.flush()?;
    report.output_len = sink.position();
    info!(
        stamped = report.pages_stamped.len(),
        skipped = report.pages_skipped.len(),
        batches = report.batches_flushed,
        "stamping complete"
    );
    Ok(report)
}

#[allow(clippy::too_many_arguments)]
fn stamp_one_page<R: RangeReader>(
    doc: &mut PdfStructure<R>,
    pages: &[ObjRef],
    page_no: u32,
    opts: &StampOptions,
    next_id: &mut u32,
    font_id: &mut Option<u32>,
    patched: &mut HashSet<u32>,
    update: &mut IncrementalUpdate,
) -> Result<(), StampError> {
    let page_ref = *pages.get(page_no as usize - 1).ok_or_else(|| {
        StampError::Parse(format!("page {} missing from page tree", page_no))
    })?;

    // Allocate ids up front; the rewritten bytes embed them. Ids burned by a
    // failed page leave harmless numbering gaps.
    let font = match *font_id {
        Some(f) => f,
        None => {
            let f = *next_id;
            *next_id += 1;
            f
        }
    };
    let content_id = *next_id;
    *next_id += 1;

    // All fallible work happens before anything is queued, so a failed page
    // leaves the pending update untouched.
    let patch = build_page_patch(doc, page_ref, content_id, font, patched)?;

    if font_id.is_none() {
        update.push_object(font, 0, STANDARD_FONT_BODY.to_vec());
        *font_id = Some(font);
    }
    update.push_object(content_id, 0, content_stream_body(opts, patch.media_box));
    update.push_object(page_ref.0, page_ref.1, patch.page_body);
    if let Some((obj, body)) = patch.side_object {
        update.push_object(obj.0, obj.1, body);
        patched.insert(obj.0);
    }
    Ok(())
}

struct PagePatch {
    page_body: Vec<u8>,
    /// A rewritten resources/font object, when the page's resources live
    /// outside the page dictionary.
    side_object: Option<(ObjRef, Vec<u8>)>,
    media_box: [f64; 4],
}

/// Where a page's resources dictionary lives.
enum ResourcesOwner {
    PageInline,
    Indirect(ObjRef),
    AncestorInline(ObjRef),
    Missing,
}

enum FontPatch {
    Patched(Vec<u8>),
    /// `/Font` is an indirect reference; the referenced object must be
    /// rewritten instead.
    FollowRef(ObjRef),
    AlreadyPresent,
}

fn build_page_patch<R: RangeReader>(
    doc: &mut PdfStructure<R>,
    page_ref: ObjRef,
    content_id: u32,
    font_id: u32,
    patched: &HashSet<u32>,
) -> Result<PagePatch, StampError> {
    let full = doc.read_object(page_ref)?;
    let (bs, be) = object_body_span(&full).ok_or_else(|| {
        StampError::Parse(format!("page object {} has no body", page_ref.0))
    })?;
    let body = &full[bs..be];
    let media_box = doc.media_box(page_ref)?;

    let mut page_body = append_content_ref(body, content_id).ok_or_else(|| {
        StampError::Parse(format!("page object {} has no dictionary", page_ref.0))
    })?;

    let mut side_object = None;
    match find_resources_owner(doc, body)? {
        ResourcesOwner::PageInline => {
            let (rs, _) = body_dict_get(&page_body, b"/Resources")
                .ok_or_else(|| StampError::Parse("page resources vanished".into()))?;
            match patch_font_in_resources(&page_body, rs, font_id)? {
                FontPatch::Patched(b) => page_body = b,
                FontPatch::AlreadyPresent => {}
                FontPatch::FollowRef(f) => {
                    side_object = patch_font_container(doc, f, font_id, patched)?
                }
            }
        }
        ResourcesOwner::Indirect(r) => {
            side_object = patch_resources_object(doc, r, font_id, patched)?
        }
        ResourcesOwner::AncestorInline(node) => {
            side_object = patch_ancestor_resources(doc, node, font_id, patched)?
        }
        ResourcesOwner::Missing => {
            let entry = format!("/Resources << /Font << /{} {} 0 R >> >>", FONT_RESOURCE, font_id);
            page_body = insert_before_dict_close(&page_body, entry.as_bytes())
                .ok_or_else(|| StampError::Parse("page dictionary not found".into()))?;
        }
    }

    Ok(PagePatch {
        page_body,
        side_object,
        media_box,
    })
}

fn find_resources_owner<R: RangeReader>(
    doc: &mut PdfStructure<R>,
    page_body: &[u8],
) -> Result<ResourcesOwner, StampError> {
    if let Some((s, e)) = body_dict_get(page_body, b"/Resources") {
        return if page_body[s] == b'<' {
            Ok(ResourcesOwner::PageInline)
        } else {
            parse_ref(&page_body[s..e])
                .map(ResourcesOwner::Indirect)
                .ok_or_else(|| StampError::Parse("invalid /Resources entry".into()))
        };
    }
    let mut cur = dict_ref(page_body, b"/Parent");
    for _ in 0..MAX_PARENT_DEPTH {
        let Some(node) = cur else { break };
        let full = doc.read_object(node)?;
        if let Some((s, e)) = body_dict_get(&full, b"/Resources") {
            return if full[s] == b'<' {
                Ok(ResourcesOwner::AncestorInline(node))
            } else {
                parse_ref(&full[s..e])
                    .map(ResourcesOwner::Indirect)
                    .ok_or_else(|| StampError::Parse("invalid /Resources entry".into()))
            };
        }
        cur = dict_ref(&full, b"/Parent");
    }
    Ok(ResourcesOwner::Missing)
}

/// Rewrite the indirect resources dictionary `r` so the stamp font is
/// reachable. Returns None when a previous page already took care of it.
fn patch_resources_object<R: RangeReader>(
    doc: &mut PdfStructure<R>,
    r: ObjRef,
    font_id: u32,
    patched: &HashSet<u32>,
) -> Result<Option<(ObjRef, Vec<u8>)>, StampError> {
    if patched.contains(&r.0) {
        return Ok(None);
    }
    let full = doc.read_object(r)?;
    let (bs, be) = object_body_span(&full)
        .ok_or_else(|| StampError::Parse(format!("object {} has no body", r.0)))?;
    let body = &full[bs..be];
    let dict_start = find_pattern(body, b"<<")
        .ok_or_else(|| StampError::Parse("resources object is not a dictionary".into()))?;
    match patch_font_in_resources(body, dict_start, font_id)? {
        FontPatch::Patched(new_body) => Ok(Some((r, new_body))),
        FontPatch::AlreadyPresent => Ok(None),
        FontPatch::FollowRef(f) => patch_font_container(doc, f, font_id, patched),
    }
}

/// Rewrite an ancestor pages node whose inline resources the page inherits.
fn patch_ancestor_resources<R: RangeReader>(
    doc: &mut PdfStructure<R>,
    node: ObjRef,
    font_id: u32,
    patched: &HashSet<u32>,
) -> Result<Option<(ObjRef, Vec<u8>)>, StampError> {
    if patched.contains(&node.0) {
        return Ok(None);
    }
    let full = doc.read_object(node)?;
    let (bs, be) = object_body_span(&full)
        .ok_or_else(|| StampError::Parse(format!("object {} has no body", node.0)))?;
    let body = &full[bs..be];
    let (rs, _) = body_dict_get(body, b"/Resources")
        .ok_or_else(|| StampError::Parse("ancestor resources vanished".into()))?;
    match patch_font_in_resources(body, rs, font_id)? {
        FontPatch::Patched(new_body) => Ok(Some((node, new_body))),
        FontPatch::AlreadyPresent => Ok(None),
        FontPatch::FollowRef(f) => patch_font_container(doc, f, font_id, patched),
    }
}

/// Rewrite a standalone font-container dictionary (the value of an indirect
/// `/Font` entry).
fn patch_font_container<R: RangeReader>(
    doc: &mut PdfStructure<R>,
    f: ObjRef,
    font_id: u32,
    patched: &HashSet<u32>,
) -> Result<Option<(ObjRef, Vec<u8>)>, StampError> {
    if patched.contains(&f.0) {
        return Ok(None);
    }
    let full = doc.read_object(f)?;
    let (bs, be) = object_body_span(&full)
        .ok_or_else(|| StampError::Parse(format!("object {} has no body", f.0)))?;
    let body = &full[bs..be];
    let dict_start = find_pattern(body, b"<<")
        .ok_or_else(|| StampError::Parse("font container is not a dictionary".into()))?;
    if dict_get(body, dict_start, format!("/{}", FONT_RESOURCE).as_bytes()).is_some() {
        return Ok(None);
    }
    let entry = format!(" /{} {} 0 R ", FONT_RESOURCE, font_id);
    Ok(Some((
        f,
        splice(body, dict_start + 2, dict_start + 2, entry.as_bytes()),
    )))
}

/// Insert the stamp font into the `/Font` sub-dictionary of the resources
/// dictionary starting at `dict_start` in `buf`.
fn patch_font_in_resources(
    buf: &[u8],
    dict_start: usize,
    font_id: u32,
) -> Result<FontPatch, StampError> {
    match dict_get(buf, dict_start, b"/Font") {
        Some((s, e)) => {
            if buf.get(s..s + 2) == Some(b"<<".as_slice()) {
                if dict_get(buf, s, format!("/{}", FONT_RESOURCE).as_bytes()).is_some() {
                    return Ok(FontPatch::AlreadyPresent);
                }
                let entry = format!(" /{} {} 0 R ", FONT_RESOURCE, font_id);
                Ok(FontPatch::Patched(splice(
                    buf,
                    s + 2,
                    s + 2,
                    entry.as_bytes(),
                )))
            } else if let Some(r) = parse_ref(&buf[s..e]) {
                Ok(FontPatch::FollowRef(r))
            } else {
                Err(StampError::Parse(
                    "unsupported /Font entry in resources".into(),
                ))
            }
        }
        None => {
            let fresh = format!(" /Font << /{} {} 0 R >> ", FONT_RESOURCE, font_id);
            Ok(FontPatch::Patched(splice(
                buf,
                dict_start + 2,
                dict_start + 2,
                fresh.as_bytes(),
            )))
        }
    }
}

/// Rewrite `/Contents` to an array that appends the new content stream ref.
fn append_content_ref(body: &[u8], content_id: u32) -> Option<Vec<u8>> {
    let new_ref = format!("{} 0 R", content_id);
    match body_dict_get(body, b"/Contents") {
        Some((s, e)) => {
            let old = String::from_utf8_lossy(&body[s..e]).into_owned();
            let old = old.trim();
            let rewritten = if let Some(inner) = old.strip_prefix('[') {
                let inner = inner.strip_suffix(']')?;
                format!("[{} {}]", inner.trim(), new_ref)
            } else {
                format!("[{} {}]", old, new_ref)
            };
            Some(splice(body, s, e, rewritten.as_bytes()))
        }
        None => insert_before_dict_close(body, format!("/Contents [{}]", new_ref).as_bytes()),
    }
}

/// Insert a dictionary entry immediately before the closing `>>` of the
/// first dictionary in `body`.
fn insert_before_dict_close(body: &[u8], entry: &[u8]) -> Option<Vec<u8>> {
    let dict_start = find_pattern(body, b"<<")?;
    let dict_end = object_end(body, dict_start)?;
    let insert_at = dict_end - 2;
    let mut ins = Vec::with_capacity(entry.len() + 2);
    ins.push(b'\n');
    ins.extend_from_slice(entry);
    ins.push(b'\n');
    Some(splice(body, insert_at, insert_at, &ins))
}

fn splice(buf: &[u8], start: usize, end: usize, replacement: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(buf.len() - (end - start) + replacement.len());
    out.extend_from_slice(&buf[..start]);
    out.extend_from_slice(replacement);
    out.extend_from_slice(&buf[end..]);
    out
}

/// Content stream drawing the stamp text centered horizontally, a fixed
/// margin above the bottom edge.
fn content_stream_body(opts: &StampOptions, media_box: [f64; 4]) -> Vec<u8> {
    let [x0, y0, x1, _] = media_box;
    let text_w = text_width(&opts.text, opts.font_size);
    let x = x0 + ((x1 - x0) - text_w) / 2.0;
    // Baseline sits one descender above the margin so the glyph box clears it.
    let y = y0 + opts.bottom_margin + HELVETICA_DESCENT * opts.font_size;
    let [r, g, b] = opts.color;
    let fs = opts.font_size;
    let text = escape_pdf_string(&opts.text);

    let content = format!(
        "q\nBT\n/{FONT_RESOURCE} {fs} Tf\n{r} {g} {b} rg\n{x:.2} {y:.2} Td\n({text}) Tj\nET\nQ"
    );

    let mut body = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
    body.extend_from_slice(content.as_bytes());
    body.extend_from_slice(b"\nendstream");
    body
}

fn text_width(text: &str, font_size: f64) -> f64 {
    let units: u64 = text
        .chars()
        .map(|c| match u32::from(c) {
            32..=126 => u64::from(HELVETICA_WIDTHS[(u32::from(c) - 32) as usize]),
            // escape_pdf_string renders anything else as '?'
            _ => u64::from(HELVETICA_WIDTHS[(b'?' - 32) as usize]),
        })
        .sum();
    units as f64 * font_size / 1000.0
}

/// Escape special characters for PDF string literals
fn escape_pdf_string(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '(' => "\\(".to_string(),
            ')' => "\\)".to_string(),
            '\\' => "\\\\".to_string(),
            _ if c.is_ascii() => c.to_string(),
            _ => "?".to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escape_pdf_string_basic() {
        assert_eq!(escape_pdf_string("Hello"), "Hello");
        assert_eq!(escape_pdf_string("(test)"), "\\(test\\)");
        assert_eq!(escape_pdf_string("back\\slash"), "back\\\\slash");
        assert_eq!(escape_pdf_string("naïve"), "na?ve");
    }

    #[test]
    fn text_width_uses_helvetica_metrics() {
        // 'W' is the widest letter, 'i' among the narrowest.
        assert!(text_width("W", 24.0) > text_width("i", 24.0));
        // "HH" at 1000 units/em: 722 + 722 = 1444 units.
        assert_eq!(text_width("HH", 1000.0), 1444.0);
        // Width scales linearly with font size.
        assert_eq!(text_width("abc", 24.0), 2.0 * text_width("abc", 12.0));
    }

    #[test]
    fn content_ref_appended_to_single_ref() {
        let body = b"<< /Type /Page /Contents 4 0 R /Parent 2 0 R >>";
        let out = append_content_ref(body, 9).unwrap();
        assert!(find_pattern(&out, b"/Contents [4 0 R 9 0 R]").is_some());
        assert!(find_pattern(&out, b"/Parent 2 0 R").is_some());
    }

    #[test]
    fn content_ref_appended_to_array() {
        let body = b"<< /Contents [4 0 R 5 0 R] >>";
        let out = append_content_ref(body, 9).unwrap();
        assert!(find_pattern(&out, b"/Contents [4 0 R 5 0 R 9 0 R]").is_some());
    }

    #[test]
    fn content_ref_inserted_when_missing() {
        let body = b"<< /Type /Page /Parent 2 0 R >>";
        let out = append_content_ref(body, 9).unwrap();
        assert!(find_pattern(&out, b"/Contents [9 0 R]").is_some());
        // Still one well-formed dictionary.
        assert!(object_end(&out, find_pattern(&out, b"<<").unwrap()).is_some());
    }

    #[test]
    fn font_patched_into_inline_font_dict() {
        let body = b"<< /Font << /F1 7 0 R >> /ProcSet [/PDF /Text] >>";
        match patch_font_in_resources(body, 0, 12).unwrap() {
            FontPatch::Patched(out) => {
                assert!(find_pattern(&out, b"/FS0 12 0 R").is_some());
                assert!(find_pattern(&out, b"/F1 7 0 R").is_some());
            }
            _ => panic!("expected Patched"),
        }
    }

    #[test]
    fn font_dict_created_when_missing() {
        let body = b"<< /ProcSet [/PDF] >>";
        match patch_font_in_resources(body, 0, 12).unwrap() {
            FontPatch::Patched(out) => {
                assert!(find_pattern(&out, b"/Font << /FS0 12 0 R >>").is_some());
            }
            _ => panic!("expected Patched"),
        }
    }

    #[test]
    fn existing_stamp_font_detected() {
        let body = b"<< /Font << /FS0 12 0 R >> >>";
        assert!(matches!(
            patch_font_in_resources(body, 0, 12).unwrap(),
            FontPatch::AlreadyPresent
        ));
    }

    #[test]
    fn indirect_font_entry_is_followed() {
        let body = b"<< /Font 7 0 R >>";
        match patch_font_in_resources(body, 0, 12).unwrap() {
            FontPatch::FollowRef(r) => assert_eq!(r, ObjRef(7, 0)),
            _ => panic!("expected FollowRef"),
        }
    }

    #[test]
    fn stamp_centers_on_media_box() {
        let opts = StampOptions {
            text: "X".into(),
            ..Default::default()
        };
        let body = content_stream_body(&opts, [0.0, 0.0, 612.0, 792.0]);
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("/FS0 24 Tf"));
        assert!(text.contains("(X) Tj"));
        assert!(text.contains("stream\n"));
        assert!(text.ends_with("endstream"));

        // 'X' is 667 units wide: x = (612 - 16.008) / 2 = 297.996
        assert!(text.contains("298.00"));
        // y = 30 + 0.207 * 24 = 34.968
        assert!(text.contains("34.97"));
    }

    #[test]
    fn stamp_respects_media_box_origin() {
        let opts = StampOptions {
            text: "X".into(),
            ..Default::default()
        };
        let body = content_stream_body(&opts, [100.0, 50.0, 712.0, 842.0]);
        let text = String::from_utf8_lossy(&body);
        assert!(text.contains("398.00"));
        assert!(text.contains("84.97"));
    }

    #[test]
    fn declared_length_matches_stream() {
        let opts = StampOptions::default();
        let body = content_stream_body(&opts, [0.0, 0.0, 612.0, 792.0]);
        let (s, e) = body_dict_get(&body, b"/Length").unwrap();
        let declared: usize = std::str::from_utf8(&body[s..e]).unwrap().parse().unwrap();
        let stream_start = find_pattern(&body, b"stream\n").unwrap() + 7;
        let stream_end = find_pattern(&body, b"\nendstream").unwrap();
        assert_eq!(declared, stream_end - stream_start);
    }
}
