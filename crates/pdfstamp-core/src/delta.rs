//! Incremental update serialization
//!
//! Each flushed batch becomes one PDF update section appended after the
//! verbatim copy: the batch's replacement and new objects, a classic
//! cross-reference section covering exactly those objects, and a trailer
//! whose `/Prev` points at the previous section. Every section leaves the
//! output independently loadable.

use std::io::{self, Seek, Write};

use crate::sink::AppendSink;
use crate::structure::ObjRef;

/// One batch's pending objects, serialized as a single update section.
pub struct IncrementalUpdate {
    objects: Vec<(u32, u16, Vec<u8>)>,
}

impl IncrementalUpdate {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Queue an object body (dictionary/stream bytes without the `N G obj`
    /// header or `endobj`) for this section.
    pub fn push_object(&mut self, id: u32, generation: u16, body: Vec<u8>) {
        self.objects.push((id, generation, body));
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Serialize the section into `sink` as one append-only write, then
    /// clear the pending objects. `size` is the document's object high-water
    /// mark (highest id + 1); `prev_startxref` is the previous section's
    /// xref offset. Returns this section's xref offset for the next `/Prev`.
    pub fn write_to<W: Write + Seek>(
        &mut self,
        sink: &mut AppendSink<W>,
        root: ObjRef,
        info: Option<ObjRef>,
        size: u32,
        prev_startxref: u64,
    ) -> io::Result<u64> {
        self.objects.sort_by_key(|&(id, _, _)| id);
        debug_assert!(
            self.objects.windows(2).all(|w| w[0].0 < w[1].0),
            "duplicate object id in one update section"
        );

        let base = sink.position();
        let mut out: Vec<u8> = Vec::new();
        // Separator in case the section before ends without a newline.
        out.push(b'\n');

        let mut positions: Vec<(u32, u16, u64)> = Vec::with_capacity(self.objects.len());
        for (id, generation, body) in &self.objects {
            positions.push((*id, *generation, base + out.len() as u64));
            out.extend_from_slice(format!("{} {} obj\n", id, generation).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_offset = base + out.len() as u64;
        out.extend_from_slice(b"xref\n");
        // Contiguous ids share a subsection.
        let mut i = 0;
        while i < positions.len() {
            let run_start = i;
            while i + 1 < positions.len() && positions[i + 1].0 == positions[i].0 + 1 {
                i += 1;
            }
            i += 1;
            let first = positions[run_start].0;
            out.extend_from_slice(format!("{} {}\n", first, i - run_start).as_bytes());
            for (_, generation, offset) in &positions[run_start..i] {
                out.extend_from_slice(
                    format!("{:010} {:05} n \n", offset, generation).as_bytes(),
                );
            }
        }

        out.extend_from_slice(b"trailer\n<<\n");
        out.extend_from_slice(format!("/Size {}\n", size).as_bytes());
        out.extend_from_slice(format!("/Root {} {} R\n", root.0, root.1).as_bytes());
        if let Some(info) = info {
            out.extend_from_slice(format!("/Info {} {} R\n", info.0, info.1).as_bytes());
        }
        out.extend_from_slice(format!("/Prev {}\n", prev_startxref).as_bytes());
        out.extend_from_slice(b">>\n");
        out.extend_from_slice(format!("startxref\n{}\n%%EOF\n", xref_offset).as_bytes());

        sink.write_all(&out)?;
        sink.flush()?;
        self.objects.clear();
        Ok(xref_offset)
    }
}

impl Default for IncrementalUpdate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{find_pattern, PdfStructure};
    use std::io::Cursor;

    fn section_bytes(update: &mut IncrementalUpdate) -> (Vec<u8>, u64) {
        let mut sink = AppendSink::new(Cursor::new(Vec::new()));
        sink.copy_from(&mut &b"0123456789"[..]).unwrap();
        sink.mark_append_point().unwrap();
        let startxref = update
            .write_to(&mut sink, ObjRef(1, 0), None, 9, 42)
            .unwrap();
        (sink.into_inner().into_inner(), startxref)
    }

    #[test]
    fn section_layout() {
        let mut update = IncrementalUpdate::new();
        update.push_object(7, 0, b"<< /A 1 >>".to_vec());
        let (out, startxref) = section_bytes(&mut update);

        assert!(update.is_empty(), "objects cleared after flush");
        assert_eq!(&out[..10], b"0123456789");
        let section = &out[10..];
        assert!(section.starts_with(b"\n7 0 obj\n<< /A 1 >>\nendobj\n"));
        assert!(find_pattern(section, b"xref\n7 1\n").is_some());
        assert!(find_pattern(section, b"/Prev 42\n").is_some());
        assert!(find_pattern(section, b"/Size 9\n").is_some());
        assert!(find_pattern(section, b"/Root 1 0 R\n").is_some());
        assert!(section.ends_with(b"%%EOF\n"));
        assert_eq!(
            startxref,
            10 + find_pattern(section, b"xref\n").unwrap() as u64
        );
    }

    #[test]
    fn contiguous_ids_share_a_subsection() {
        let mut update = IncrementalUpdate::new();
        update.push_object(7, 0, b"<< >>".to_vec());
        update.push_object(3, 0, b"<< >>".to_vec());
        update.push_object(4, 0, b"<< >>".to_vec());
        let (out, _) = section_bytes(&mut update);

        assert!(find_pattern(&out, b"xref\n3 2\n").is_some());
        assert!(find_pattern(&out, b"\n7 1\n").is_some());
    }

    #[test]
    fn generation_preserved_in_entries() {
        let mut update = IncrementalUpdate::new();
        update.push_object(5, 2, b"<< >>".to_vec());
        let (out, _) = section_bytes(&mut update);
        assert!(find_pattern(&out, b"5 2 obj\n").is_some());
        assert!(find_pattern(&out, b" 00002 n \n").is_some());
    }

    #[test]
    fn written_section_reloads_over_a_real_document() {
        // Build a document, append an update replacing the catalog's
        // /PageMode, and make sure the chain resolves.
        let base = minimal_pdf();
        let prev = PdfStructure::load(&base[..]).unwrap().startxref;

        let mut sink = AppendSink::new(Cursor::new(Vec::new()));
        sink.copy_from(&mut &base[..]).unwrap();
        sink.mark_append_point().unwrap();

        let mut update = IncrementalUpdate::new();
        update.push_object(
            1,
            0,
            b"<< /Type /Catalog /Pages 2 0 R /PageMode /UseOutlines >>".to_vec(),
        );
        update
            .write_to(&mut sink, ObjRef(1, 0), None, 4, prev)
            .unwrap();

        let out = sink.into_inner().into_inner();
        let mut doc = PdfStructure::load(&out[..]).unwrap();
        let catalog = doc.read_object(ObjRef(1, 0)).unwrap();
        assert!(find_pattern(&catalog, b"/PageMode /UseOutlines").is_some());
        assert_eq!(doc.page_count().unwrap(), 1);
    }

    fn minimal_pdf() -> Vec<u8> {
        let mut pdf = Vec::new();
        pdf.extend_from_slice(b"%PDF-1.4\n");
        let o1 = pdf.len();
        pdf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");
        let o2 = pdf.len();
        pdf.extend_from_slice(b"2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n");
        let o3 = pdf.len();
        pdf.extend_from_slice(
            b"3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >>\nendobj\n",
        );
        let xref = pdf.len();
        pdf.extend_from_slice(b"xref\n0 4\n0000000000 65535 f \n");
        for off in [o1, o2, o3] {
            pdf.extend_from_slice(format!("{:010} 00000 n \n", off).as_bytes());
        }
        pdf.extend_from_slice(b"trailer\n<< /Size 4 /Root 1 0 R >>\n");
        pdf.extend_from_slice(format!("startxref\n{}\n%%EOF\n", xref).as_bytes());
        pdf
    }
}
