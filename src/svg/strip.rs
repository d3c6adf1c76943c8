use quick_xml::{
    Reader, Writer,
    events::{BytesStart, Event},
};

use crate::foundation::error::{KanjiError, KanjiResult};

/// Marker carried by the `id` of the stroke-number annotation layer,
/// e.g. `kvg:StrokeNumbers_04e00`.
pub const STROKE_NUMBERS_MARKER: &[u8] = b"StrokeNumbers";

/// KanjiVG declares this prefix only as a `#FIXED` default in its internal DTD,
/// which namespace-aware parsers without DTD attribute defaults do not apply.
pub const KVG_NAMESPACE: &str = "http://kanjivg.tagaini.net";
const KVG_XMLNS: &str = "xmlns:kvg";

/// Remove every direct child of the root element whose `id` contains
/// [`STROKE_NUMBERS_MARKER`].
///
/// The document is rewritten event by event, so everything else (prolog,
/// doctype, comments, whitespace and nested markup) comes out as it went in.
/// The one addition is an `xmlns:kvg` declaration on the root element when it
/// lacks one, so the `kvg:` attributes resolve without the DTD.
pub fn strip_stroke_numbers(svg: &[u8]) -> KanjiResult<Vec<u8>> {
    let mut reader = Reader::from_reader(svg);
    let mut writer = Writer::new(Vec::with_capacity(svg.len()));
    // 0 = outside the root, 1 = directly inside the root.
    let mut depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| KanjiError::svg(format!("read svg: {e}")))?;

        match event {
            Event::Start(elem) => {
                if depth == 1 && is_stroke_numbers(&elem)? {
                    reader
                        .read_to_end(elem.name())
                        .map_err(|e| KanjiError::svg(format!("skip stroke numbers: {e}")))?;
                    continue;
                }
                let elem = if depth == 0 {
                    declare_kvg_namespace(elem)?
                } else {
                    elem
                };
                depth += 1;
                write_event(&mut writer, Event::Start(elem))?;
            }
            Event::Empty(elem) => {
                if depth == 1 && is_stroke_numbers(&elem)? {
                    continue;
                }
                write_event(&mut writer, Event::Empty(elem))?;
            }
            Event::End(elem) => {
                depth = depth.saturating_sub(1);
                write_event(&mut writer, Event::End(elem))?;
            }
            Event::Eof => break,
            other => write_event(&mut writer, other)?,
        }
    }

    Ok(writer.into_inner())
}

fn is_stroke_numbers(elem: &BytesStart<'_>) -> KanjiResult<bool> {
    let id = elem
        .try_get_attribute("id")
        .map_err(|e| KanjiError::svg(format!("bad attribute: {e}")))?;
    Ok(id.is_some_and(|attr| {
        attr.value
            .windows(STROKE_NUMBERS_MARKER.len())
            .any(|w| w == STROKE_NUMBERS_MARKER)
    }))
}

fn declare_kvg_namespace(mut root: BytesStart<'_>) -> KanjiResult<BytesStart<'_>> {
    let declared = root
        .try_get_attribute(KVG_XMLNS)
        .map_err(|e| KanjiError::svg(format!("bad attribute: {e}")))?
        .is_some();
    if !declared {
        root.push_attribute((KVG_XMLNS, KVG_NAMESPACE));
    }
    Ok(root)
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> KanjiResult<()> {
    writer
        .write_event(event)
        .map_err(|e| KanjiError::svg(format!("write svg: {e}")))
}
