//! Embedded TrueType font for PDF text outside WinAnsi
//!
//! Text drawn with this font uses the Identity-H encoding. Every distinct
//! character gets a two-byte code, assigned in order of first use, and a
//! ToUnicode CMap maps the codes back to the original characters.

use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use std::collections::HashMap;
use ttf_parser::{Face, FaceParsingError, GlyphId};

const FONT_DATA: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans.ttf");
const FONT_NAME: &str = "DejaVuSans";

/// Entries allowed in one `bfchar` block of a CMap
const BFCHAR_LIMIT: usize = 100;

pub(super) struct UnicodeFont {
    face: Face<'static>,
    codes: HashMap<char, u16>,
    chars: Vec<char>,
}

impl UnicodeFont {
    pub(super) fn load() -> Result<Self, FaceParsingError> {
        Ok(Self {
            face: Face::parse(FONT_DATA, 0)?,
            codes: HashMap::new(),
            chars: Vec::new(),
        })
    }

    /// Whether any text has been encoded with this font
    pub(super) fn is_used(&self) -> bool {
        !self.chars.is_empty()
    }

    /// Two-byte codes for `text`, registering characters not seen before
    pub(super) fn encode(&mut self, text: &str) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(text.len() * 2);
        for c in text.chars() {
            bytes.extend_from_slice(&self.code_for(c).to_be_bytes());
        }
        bytes
    }

    fn code_for(&mut self, c: char) -> u16 {
        if let Some(code) = self.codes.get(&c) {
            return *code;
        }
        // 0 is .notdef
        let Ok(code) = u16::try_from(self.chars.len() + 1) else {
            return 0;
        };
        self.codes.insert(c, code);
        self.chars.push(c);
        code
    }

    fn glyph(&self, c: char) -> GlyphId {
        self.face.glyph_index(c).unwrap_or(GlyphId(0))
    }

    /// Font units to PDF text-space units
    fn scale(&self, value: impl Into<i64>) -> i64 {
        value.into() * 1000 / i64::from(self.face.units_per_em().max(1))
    }

    /// Add the Type0 font and everything it references
    pub(super) fn embed(&self, doc: &mut Document) -> ObjectId {
        let file_id = doc.add_object(Stream::new(
            dictionary! { "Length1" => FONT_DATA.len() as i64 },
            FONT_DATA.to_vec(),
        ));

        let bbox = self.face.global_bounding_box();
        let ascent = self.face.ascender();
        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => FONT_NAME,
            "Flags" => 32_i64,
            "FontBBox" => vec![
                Object::Integer(self.scale(bbox.x_min)),
                Object::Integer(self.scale(bbox.y_min)),
                Object::Integer(self.scale(bbox.x_max)),
                Object::Integer(self.scale(bbox.y_max)),
            ],
            "ItalicAngle" => 0_i64,
            "Ascent" => self.scale(ascent),
            "Descent" => self.scale(self.face.descender()),
            "CapHeight" => self.scale(self.face.capital_height().unwrap_or(ascent)),
            "StemV" => 80_i64,
            "FontFile2" => file_id,
        });

        let mut gid_map = Vec::with_capacity((self.chars.len() + 1) * 2);
        gid_map.extend_from_slice(&0u16.to_be_bytes());
        for c in &self.chars {
            gid_map.extend_from_slice(&self.glyph(*c).0.to_be_bytes());
        }
        let gid_map_id = doc.add_object(Stream::new(dictionary! {}, gid_map));

        let widths: Vec<Object> = self
            .chars
            .iter()
            .map(|c| {
                let advance = self.face.glyph_hor_advance(self.glyph(*c)).unwrap_or(0);
                Object::Integer(self.scale(advance))
            })
            .collect();

        let cid_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => FONT_NAME,
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => 0_i64,
            },
            "FontDescriptor" => descriptor_id,
            "DW" => 1000_i64,
            "W" => vec![Object::Integer(1), Object::Array(widths)],
            "CIDToGIDMap" => gid_map_id,
        });

        let to_unicode_id = doc.add_object(Stream::new(
            dictionary! {},
            self.to_unicode_cmap().into_bytes(),
        ));

        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => FONT_NAME,
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![Object::Reference(cid_font_id)],
            "ToUnicode" => to_unicode_id,
        })
    }

    fn to_unicode_cmap(&self) -> String {
        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        let entries: Vec<(usize, char)> = self
            .chars
            .iter()
            .enumerate()
            .map(|(i, c)| (i + 1, *c))
            .collect();
        for block in entries.chunks(BFCHAR_LIMIT) {
            cmap.push_str(&format!("{} beginbfchar\n", block.len()));
            for (code, c) in block {
                let mut units = [0u16; 2];
                let target: String = c
                    .encode_utf16(&mut units)
                    .iter()
                    .map(|unit| format!("{unit:04X}"))
                    .collect();
                cmap.push_str(&format!("<{code:04X}> <{target}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
        cmap
    }
}
