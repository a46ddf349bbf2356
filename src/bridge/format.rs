// In: src/bridge/format.rs

//! Defines all wire-level constants of the permalink format.
//! This is the single source of truth for the integer alphabet, the structural
//! separators, the geometry tags and the style token keys shared by the
//! encoders and the decoders.

//==================================================================================
// I. Integer Alphabet
//==================================================================================

/// The 64 code symbols; a symbol's position is its value. `~ ' ( )` are
/// absent so coordinate runs never contain a structural character.
pub const ALPHABET: &[u8; 64] =
    b".-_!*ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789abcdefghjkmnpqrstuvwxyz";

//==================================================================================
// II. Structural Separators
//==================================================================================

/// Separates the geometry, attribute and style zones of a feature record.
pub const ZONE_SEPARATOR: char = '~';
/// Separates rings, parts and tokens.
pub const PART_SEPARATOR: char = '\'';
pub const OPEN: char = '(';
pub const CLOSE: char = ')';
/// Separates the polygons of a multi-polygon.
pub const GROUP_SEPARATOR: &str = ")(";
/// Separates the key and value of an attribute or style token.
pub const KEY_VALUE_SEPARATOR: char = '*';

/// Characters replaced with `_` in attribute keys and values before escaping.
pub const ATTRIBUTE_RESERVED: [char; 4] = ['(', ')', '\'', '*'];
pub const ATTRIBUTE_REPLACEMENT: char = '_';

/// Leading character of a non-empty feature collection.
pub const COLLECTION_PREFIX: char = 'F';

//==================================================================================
// III. Geometry Tags
//==================================================================================

pub const TAG_POINT: char = 'p';
pub const TAG_LINE_STRING: char = 'l';
pub const TAG_POLYGON: char = 'a';
pub const TAG_MULTI_POINT: char = 'P';
pub const TAG_MULTI_LINE_STRING: char = 'L';
pub const TAG_MULTI_POLYGON: char = 'A';

//==================================================================================
// IV. Style Token Keys
//==================================================================================

pub const KEY_FILL_COLOR: &str = "fillColor";
pub const KEY_STROKE_COLOR: &str = "strokeColor";
pub const KEY_STROKE_WIDTH: &str = "strokeWidth";
pub const KEY_POINT_RADIUS: &str = "pointRadius";
pub const KEY_FONT_SIZE: &str = "fontSize";
pub const KEY_FONT_COLOR: &str = "fontColor";

/// Font family appended to a decoded font size.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
