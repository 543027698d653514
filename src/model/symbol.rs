//! Symbol table records.

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;
use smol_str::SmolStr;
use tracing::warn;

/// What a declared name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolKind {
    Variable,
    Label,
    /// Declared with `EQU`.
    Constant,
}

/// Storage size of a declared name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    /// `DB`, 8-bit.
    Byte,
    /// `DW`, 16-bit.
    Word,
    /// `DD`, 32-bit.
    Dword,
    /// Labels and untyped constants.
    None,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Byte => write!(f, "Byte"),
            DataType::Word => write!(f, "Word"),
            DataType::Dword => write!(f, "Dword"),
            DataType::None => write!(f, "-"),
        }
    }
}

/// A declared name and its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolRecord {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub data_type: DataType,
    /// Offset for variables and labels, value for constants.
    pub value: u64,
    pub segment: SmolStr,
}

impl SymbolRecord {
    pub fn new(
        name: impl Into<SmolStr>,
        kind: SymbolKind,
        data_type: DataType,
        value: u64,
        segment: impl Into<SmolStr>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            data_type,
            value,
            segment: segment.into(),
        }
    }
}

/// Symbols keyed by `(name, segment)`, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<SymbolRecord>", into = "Vec<SymbolRecord>")
)]
pub struct SymbolTable {
    records: IndexMap<(SmolStr, SmolStr), SymbolRecord>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. A record whose `(name, segment)` is already present is
    /// handed back and the existing declaration is kept.
    pub fn insert(&mut self, record: SymbolRecord) -> Result<(), SymbolRecord> {
        match self
            .records
            .entry((record.name.clone(), record.segment.clone()))
        {
            Entry::Occupied(_) => Err(record),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str, segment: &str) -> Option<&SymbolRecord> {
        self.records
            .get(&(SmolStr::new(name), SmolStr::new(segment)))
    }

    /// All records with the given name, across segments.
    pub fn lookup<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SymbolRecord> + 'a {
        self.records.values().filter(move |r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<SymbolRecord>> for SymbolTable {
    fn from(records: Vec<SymbolRecord>) -> Self {
        let mut table = SymbolTable::new();
        for record in records {
            if let Err(dup) = table.insert(record) {
                warn!(
                    "Duplicate symbol {} in segment {}, keeping first declaration",
                    dup.name, dup.segment
                );
            }
        }
        table
    }
}

impl From<SymbolTable> for Vec<SymbolRecord> {
    fn from(table: SymbolTable) -> Self {
        table.records.into_values().collect()
    }
}
