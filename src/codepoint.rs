//! Code point helpers shared by the image preparer and the dataset assembler.
//!
//! Raster and vector files are named after the code point they depict, as five
//! lowercase hex digits (`04e00.svg`, `04e00.png`). Every conversion between a
//! name and a code point goes through this module so both stages decode the
//! same way.

/// First kanji code point (CJK Unified Ideographs).
pub const KANJI_MIN: u32 = 0x4E00;
/// Last kanji code point, inclusive. Kana live below [`KANJI_MIN`].
pub const KANJI_MAX: u32 = 0x9FBF;

/// Number of hex digits in a strict file stem.
pub const STEM_LEN: usize = 5;

pub fn is_japanese_code_point(c: u32) -> bool {
    (KANJI_MIN..=KANJI_MAX).contains(&c)
}

/// Decode a bare hex identifier such as `4e00` or `04E00`.
pub fn unicode_id_to_code_point(unicode_id: &str) -> Option<u32> {
    if unicode_id.is_empty() || !unicode_id.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(unicode_id, 16).ok()
}

/// Decode a stroke-order corpus identifier, e.g. `kvg:kanji_04e00`.
pub fn extract_code_point(id: &str) -> Option<u32> {
    let (_, local) = id.split_once(':')?;
    let (_, hex) = local.split_once('_')?;
    unicode_id_to_code_point(hex)
}

pub fn raster_file_name(code_point: u32) -> String {
    format!("{code_point:05x}.png")
}

/// Stem of a file name: everything before the first `.`.
pub fn file_stem(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// Accept only `<5 hex digits>.<extension>` names in the kanji range.
///
/// Variant files (`04e00-Kaisho.svg`) and renamed leftovers (`04e00.png.old`)
/// are rejected.
pub fn strict_stem(file_name: &str, extension: &str) -> Option<u32> {
    let stem = file_name.strip_suffix(extension)?.strip_suffix('.')?;
    if stem.len() != STEM_LEN {
        return None;
    }
    unicode_id_to_code_point(stem).filter(|&c| is_japanese_code_point(c))
}
