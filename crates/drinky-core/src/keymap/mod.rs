//! The canonical key table and logical-key resolution.
//!
//! Clients identify keys by DOM `KeyboardEvent.code` strings (`"KeyA"`,
//! `"Numpad4"`, `"ControlLeft"`). This module resolves those strings to
//! validated hardware mappings through a precomputed alias index, and
//! folds the right-hand modifier variants onto the left-hand physical key
//! the controller actually drives.

mod table;

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::matrix::{
    ChipPin, CrossbarPin, MatrixError, PhysicalMapping, COL_CHIP_ADDR, ROW_CHIP_ADDR,
};

pub use table::{KeyId, KEY_COUNT};

// ── Errors ────────────────────────────────────────────────────────────────────

/// Errors detected while validating the static key table.
///
/// Any of these is a data bug in [`table`]; construction fails at startup
/// rather than surfacing as a bad lookup later.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeymapError {
    /// A table entry carries an out-of-range crossbar channel.
    #[error("key {id:?}: {source}")]
    InvalidPin {
        id: KeyId,
        #[source]
        source: MatrixError,
    },

    /// The same key id appears in the table twice.
    #[error("key {id:?} is defined more than once")]
    DuplicateKey { id: KeyId },

    /// The same client alias points at two different keys.
    #[error("alias {alias:?} is claimed by both {first:?} and {second:?}")]
    DuplicateAlias {
        alias: &'static str,
        first: KeyId,
        second: KeyId,
    },
}

// ── Key definitions ───────────────────────────────────────────────────────────

/// A fully validated key: its identity, hardware mapping, and the client
/// code strings that resolve to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDefinition {
    id: KeyId,
    mapping: PhysicalMapping,
    aliases: &'static [&'static str],
}

impl KeyDefinition {
    pub const fn id(&self) -> KeyId {
        self.id
    }

    pub const fn mapping(&self) -> PhysicalMapping {
        self.mapping
    }

    pub const fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }
}

// ── Modifier canonicalization ─────────────────────────────────────────────────

/// DOM modifier codes and the physical key each one drives.
///
/// The controller only wires the left-hand modifier of each pair into the
/// modifier path, so both the left and right DOM codes fold onto the LEFT
/// physical key.
const MODIFIER_CODES: &[(&str, KeyId)] = &[
    ("ControlLeft", KeyId::LeftCtrl),
    ("ControlRight", KeyId::LeftCtrl),
    ("ShiftLeft", KeyId::LeftShift),
    ("ShiftRight", KeyId::LeftShift),
    ("AltLeft", KeyId::LeftAlt),
    ("AltRight", KeyId::LeftAlt),
    ("MetaLeft", KeyId::LeftWindows),
    ("MetaRight", KeyId::LeftWindows),
];

/// Maps a DOM modifier code to the canonical physical modifier key.
/// Returns `None` for non-modifier codes.
pub fn canonical_modifier(code: &str) -> Option<KeyId> {
    MODIFIER_CODES
        .iter()
        .find(|(alias, _)| *alias == code)
        .map(|(_, id)| *id)
}

// ── The key table ─────────────────────────────────────────────────────────────

/// The validated key table with precomputed lookup indexes.
///
/// Built once at startup; lookups afterwards are `HashMap` gets, replacing
/// the per-event linear scan of earlier controller revisions.
pub struct KeyTable {
    defs: Vec<KeyDefinition>,
    by_id: HashMap<KeyId, usize>,
    by_alias: HashMap<&'static str, usize>,
}

impl KeyTable {
    /// Validates the static table and builds the lookup indexes.
    ///
    /// Fails on the first out-of-range pin, duplicate key id, or duplicate
    /// alias. A failure here means the table data itself is wrong, so
    /// callers should treat it as fatal.
    pub fn new() -> Result<Self, KeymapError> {
        let mut defs = Vec::with_capacity(table::RAW_KEYS.len());
        let mut by_id = HashMap::with_capacity(table::RAW_KEYS.len());
        let mut by_alias = HashMap::new();

        for raw in table::RAW_KEYS {
            let (row_pin, row_axis, row_channel) = raw.row;
            let (col_pin, col_axis, col_channel) = raw.col;

            let row_crossbar = CrossbarPin::new(row_axis, row_channel)
                .map_err(|source| KeymapError::InvalidPin { id: raw.id, source })?;
            let col_crossbar = CrossbarPin::new(col_axis, col_channel)
                .map_err(|source| KeymapError::InvalidPin { id: raw.id, source })?;

            let def = KeyDefinition {
                id: raw.id,
                mapping: PhysicalMapping {
                    row: ChipPin::new(ROW_CHIP_ADDR, row_pin, row_crossbar),
                    col: ChipPin::new(COL_CHIP_ADDR, col_pin, col_crossbar),
                },
                aliases: raw.aliases,
            };

            let index = defs.len();
            if by_id.insert(raw.id, index).is_some() {
                return Err(KeymapError::DuplicateKey { id: raw.id });
            }
            for alias in raw.aliases {
                if let Some(&existing) = by_alias.get(alias) {
                    let first: &KeyDefinition = &defs[existing];
                    return Err(KeymapError::DuplicateAlias {
                        alias,
                        first: first.id(),
                        second: raw.id,
                    });
                }
                by_alias.insert(*alias, index);
            }
            defs.push(def);
        }

        debug!(keys = defs.len(), aliases = by_alias.len(), "key table built");
        Ok(Self { defs, by_id, by_alias })
    }

    /// Looks up a key by identity.
    ///
    /// Total: `new()` guarantees every id in the table resolves, and
    /// `KeyId` values only come from the table.
    pub fn get(&self, id: KeyId) -> &KeyDefinition {
        &self.defs[self.by_id[&id]]
    }

    /// Resolves an external client code string to a key definition.
    ///
    /// Modifier codes are canonicalized first, so `"ControlRight"` yields
    /// the `LeftCtrl` definition even though a distinct right-hand key
    /// exists in the table. Unknown codes return `None`; that is a
    /// recoverable condition, not an error.
    pub fn resolve(&self, code: &str) -> Option<&KeyDefinition> {
        if let Some(id) = canonical_modifier(code) {
            return Some(self.get(id));
        }
        self.by_alias.get(code).map(|&index| &self.defs[index])
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Iterates over every key definition in schematic order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyDefinition> {
        self.defs.iter()
    }
}
