//! Sprite metadata document: typed records, schema template, JSON persistence
//!
//! The on-disk format is a human-editable UTF-8 JSON file:
//! `meta` (tile size, resource name, version, creator) plus a `sprites`
//! mapping keyed by `"{x}_{y}"`. Record order is insertion order and is
//! preserved through save/load.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reserved identity field
pub const NAME_FIELD: &str = "NAME";
/// Name given to records created before the user sets one
pub const PLACEHOLDER_NAME: &str = "NONAME";
/// Default value for fields created implicitly
pub const UNDEFINED_VALUE: &str = "UNDEF";
/// Key of the schema template record
pub const PRIMARY_KEY: &str = "_primary_";
/// Field tags offered when no template record is present
pub const DEFAULT_FIELD_TAGS: [&str; 8] = [
    "ACT_NAME", "FRAME_NUM", "ANIM_SPD", "EXT1", "EXT2", "EXT3", "EXT4", "EXT5",
];

/// Document format version written to `meta.version`
pub const FORMAT_VERSION: &str = "3.0";
/// Creator tag written to `meta.created_by`
pub const CREATOR_TAG: &str = "SpriteDefiner";

/// Coordinate key for a tile: `"{x}_{y}"`
pub fn tile_key(x: u32, y: u32) -> String {
    format!("{}_{}", x, y)
}

/// Metadata attached to one tile: group name plus named string fields.
/// `x`/`y` are tile-grid coordinates (multiples of the tile size); the
/// record's map key is always reconstructible from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteRecord {
    pub x: u32,
    pub y: u32,
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(flatten)]
    pub fields: IndexMap<String, String>,
}

impl SpriteRecord {
    /// Minimal record created when a field is set before a name exists
    pub fn placeholder(x: u32, y: u32, first_tag: &str) -> Self {
        let mut fields = IndexMap::new();
        fields.insert(first_tag.to_string(), UNDEFINED_VALUE.to_string());
        Self {
            x,
            y,
            name: PLACEHOLDER_NAME.to_string(),
            fields,
        }
    }

    /// Minimal record created by the legacy naming shortcut
    pub fn named(x: u32, y: u32, name: &str, first_tag: &str) -> Self {
        let mut record = Self::placeholder(x, y, first_tag);
        record.name = name.to_string();
        record
    }
}

/// Document header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocMeta {
    pub sprite_size: u32,
    pub resource_file: String,
    pub created_by: String,
    pub version: String,
}

impl DocMeta {
    pub fn new(sprite_size: u32, resource_file: &str) -> Self {
        Self {
            sprite_size,
            resource_file: resource_file.to_string(),
            created_by: CREATOR_TAG.to_string(),
            version: FORMAT_VERSION.to_string(),
        }
    }
}

/// The full metadata document: header plus the ordered sprite table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteDocument {
    pub meta: DocMeta,
    pub sprites: IndexMap<String, SpriteRecord>,
}

/// Result of a field-set operation
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSet {
    /// Field written; carries the record's current name for the recent ring
    Updated { name: String },
    /// No record existed: a placeholder was created, name should be set first
    CreatedPlaceholder,
}

/// Rejected field command; no state was mutated
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    EmptyName,
    EmptyValue,
    UnknownTag(String),
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::EmptyName => write!(f, "Cannot set empty name"),
            FieldError::EmptyValue => write!(f, "Cannot set empty field"),
            FieldError::UnknownTag(tag) => write!(f, "Unknown field: {}", tag),
        }
    }
}

impl SpriteDocument {
    pub fn empty(meta: DocMeta) -> Self {
        Self {
            meta,
            sprites: IndexMap::new(),
        }
    }

    /// Default template document: a `_primary_` schema record carrying the
    /// stock field tags, resource name patched in by the caller.
    pub fn from_template(sprite_size: u32, resource_file: &str) -> Self {
        let mut doc = Self::empty(DocMeta::new(sprite_size, resource_file));
        let mut fields = IndexMap::new();
        for tag in DEFAULT_FIELD_TAGS {
            fields.insert(tag.to_string(), UNDEFINED_VALUE.to_string());
        }
        doc.sprites.insert(
            PRIMARY_KEY.to_string(),
            SpriteRecord {
                x: 0,
                y: 0,
                name: PRIMARY_KEY.to_string(),
                fields,
            },
        );
        doc
    }

    /// Field tags offered for editing: the template record's field names,
    /// or the stock set when no template record exists.
    pub fn schema_tags(&self) -> Vec<String> {
        match self.sprites.get(PRIMARY_KEY) {
            Some(primary) if !primary.fields.is_empty() => {
                primary.fields.keys().cloned().collect()
            }
            _ => DEFAULT_FIELD_TAGS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// First schema tag, used as the default field of implicit records
    pub fn first_tag(&self) -> String {
        self.schema_tags()
            .into_iter()
            .next()
            .unwrap_or_else(|| DEFAULT_FIELD_TAGS[0].to_string())
    }

    /// Find the record at a tile coordinate. Scans by coordinates rather
    /// than key so hand-edited files with stale keys still resolve.
    pub fn record_at(&self, x: u32, y: u32) -> Option<&SpriteRecord> {
        self.sprites
            .iter()
            .filter(|(key, _)| key.as_str() != PRIMARY_KEY)
            .map(|(_, rec)| rec)
            .find(|rec| rec.x == x && rec.y == y)
    }

    /// Set the group name at a tile. Non-name fields of an existing record
    /// at that coordinate are preserved; the record is re-keyed under the
    /// coordinate-derived key.
    pub fn set_name(&mut self, x: u32, y: u32, name: &str) -> Result<(), FieldError> {
        if name.is_empty() {
            return Err(FieldError::EmptyName);
        }
        let existing_key = self
            .sprites
            .iter()
            .filter(|(key, _)| key.as_str() != PRIMARY_KEY)
            .find(|(_, rec)| rec.x == x && rec.y == y)
            .map(|(key, _)| key.clone());
        let fields = match existing_key {
            Some(key) => self
                .sprites
                .shift_remove(&key)
                .map(|rec| rec.fields)
                .unwrap_or_default(),
            None => IndexMap::new(),
        };
        self.sprites.insert(
            tile_key(x, y),
            SpriteRecord {
                x,
                y,
                name: name.to_string(),
                fields,
            },
        );
        Ok(())
    }

    /// Set one field at a tile. Creates a placeholder record when none
    /// exists there, signalling that the name should be set first.
    pub fn set_field(
        &mut self,
        x: u32,
        y: u32,
        tag: &str,
        value: &str,
    ) -> Result<FieldSet, FieldError> {
        if !self.schema_tags().iter().any(|t| t == tag) {
            return Err(FieldError::UnknownTag(tag.to_string()));
        }
        let existing_key = self
            .sprites
            .iter()
            .filter(|(key, _)| key.as_str() != PRIMARY_KEY)
            .find(|(_, rec)| rec.x == x && rec.y == y)
            .map(|(key, _)| key.clone());
        match existing_key {
            Some(key) => {
                if value.is_empty() {
                    return Err(FieldError::EmptyValue);
                }
                let rec = self.sprites.get_mut(&key).expect("key just looked up");
                rec.fields.insert(tag.to_string(), value.to_string());
                Ok(FieldSet::Updated {
                    name: rec.name.clone(),
                })
            }
            None => {
                let first = self.first_tag();
                self.sprites
                    .insert(tile_key(x, y), SpriteRecord::placeholder(x, y, &first));
                Ok(FieldSet::CreatedPlaceholder)
            }
        }
    }

    /// Overwrite the record at a tile with a minimal named record
    /// (legacy naming shortcut).
    pub fn set_legacy_record(&mut self, x: u32, y: u32, name: &str) -> Result<(), FieldError> {
        if name.is_empty() {
            return Err(FieldError::EmptyName);
        }
        let first = self.first_tag();
        self.sprites
            .insert(tile_key(x, y), SpriteRecord::named(x, y, name, &first));
        Ok(())
    }

    /// Explicit opt-in schema sync: add every template field missing from a
    /// record, with the undefined value. Never removes or rewrites existing
    /// fields. Returns the number of fields added.
    pub fn sync_schema(&mut self) -> usize {
        let tags = self.schema_tags();
        let mut added = 0;
        for (key, rec) in self.sprites.iter_mut() {
            if key == PRIMARY_KEY {
                continue;
            }
            for tag in &tags {
                if !rec.fields.contains_key(tag) {
                    rec.fields
                        .insert(tag.clone(), UNDEFINED_VALUE.to_string());
                    added += 1;
                }
            }
        }
        added
    }

    /// Number of defined sprites, template record excluded
    pub fn sprite_count(&self) -> usize {
        self.sprites
            .keys()
            .filter(|key| key.as_str() != PRIMARY_KEY)
            .count()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Persistence
// ─────────────────────────────────────────────────────────────────────────────

/// Error type for document I/O
#[derive(Debug)]
pub enum DocumentError {
    IoError(std::io::Error),
    ParseError(serde_json::Error),
    ValidationError(String),
}

impl From<std::io::Error> for DocumentError {
    fn from(e: std::io::Error) -> Self {
        DocumentError::IoError(e)
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        DocumentError::ParseError(e)
    }
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::IoError(e) => write!(f, "IO error: {}", e),
            DocumentError::ParseError(e) => write!(f, "Parse error: {}", e),
            DocumentError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl DocumentError {
    /// Missing metadata file: an empty-state condition, never fatal
    pub fn is_missing_file(&self) -> bool {
        matches!(self, DocumentError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Check document invariants: coordinates are non-negative tile multiples
/// and every key is reconstructible from its record's coordinates.
pub fn validate_document(doc: &SpriteDocument) -> Result<(), DocumentError> {
    let tile = doc.meta.sprite_size;
    if tile == 0 {
        return Err(DocumentError::ValidationError(
            "meta.sprite_size must be non-zero".to_string(),
        ));
    }
    for (key, rec) in &doc.sprites {
        if key == PRIMARY_KEY {
            continue;
        }
        if rec.x % tile != 0 || rec.y % tile != 0 {
            return Err(DocumentError::ValidationError(format!(
                "sprite {}: coordinates ({}, {}) are not multiples of {}",
                key, rec.x, rec.y, tile
            )));
        }
        if *key != tile_key(rec.x, rec.y) {
            return Err(DocumentError::ValidationError(format!(
                "sprite {}: key does not match coordinates ({}, {})",
                key, rec.x, rec.y
            )));
        }
    }
    Ok(())
}

/// Load a document from a JSON file. A missing file surfaces as
/// `DocumentError::IoError` with `NotFound`; callers treat it as empty state.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<SpriteDocument, DocumentError> {
    let contents = fs::read_to_string(path)?;
    let doc: SpriteDocument = serde_json::from_str(&contents)?;
    validate_document(&doc)?;
    Ok(doc)
}

/// Save a document as pretty-printed JSON, insertion order preserved.
/// Writes a sibling temp file and renames it into place so a failure never
/// leaves a partial document on disk.
pub fn save_document<P: AsRef<Path>>(doc: &SpriteDocument, path: P) -> Result<(), DocumentError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(doc)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, json.as_bytes())?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Metadata path for a resource: `<stem>.sprites.json` beside the resource
pub fn metadata_path_for(resource: &Path) -> PathBuf {
    let stem = resource
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sprites".to_string());
    resource.with_file_name(format!("{}.sprites.json", stem))
}

/// Open the metadata document for a resource. When no file exists, the
/// template document is instantiated with the resource name patched in and
/// written out immediately.
pub fn open_or_create_for_resource(
    metadata_path: &Path,
    resource_file: &str,
    sprite_size: u32,
) -> Result<(SpriteDocument, bool), DocumentError> {
    match load_document(metadata_path) {
        Ok(doc) => Ok((doc, false)),
        Err(e) if e.is_missing_file() => {
            let doc = SpriteDocument::from_template(sprite_size, resource_file);
            save_document(&doc, metadata_path)?;
            Ok((doc, true))
        }
        Err(e) => Err(e),
    }
}
