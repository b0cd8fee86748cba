//! Dataset rows and the schema they are validated against.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::{Error, Result};

/// Number of columns in the address dataset.
pub const ADDRESS_FIELD_COUNT: usize = 35;

/// Index of `EZI_ADD`, the full street address column.
pub const EZI_ADD: usize = 1;

/// Column names of the address dataset, in file order.
pub const ADDRESS_FIELDS: [&str; ADDRESS_FIELD_COUNT] = [
    "PFI", "EZI_ADD", "SRC_VERIF", "PROPSTATUS", "GCODEFEAT", "LOC_DESC", "BLGUNTTYP",
    "HSAUNITID", "BUNIT_PRE1", "BUNIT_ID1", "BUNIT_SUF1", "BUNIT_PRE2", "BUNIT_ID2",
    "BUNIT_SUF2", "FLOOR_TYPE", "FLOOR_NO_1", "FLOOR_NO_2", "BUILDING", "COMPLEX",
    "HSE_PREF1", "HSE_NUM1", "HSE_SUF1", "HSE_PREF2", "HSE_NUM2", "HSE_SUF2", "DISP_NUM1",
    "ROAD_NAME", "ROAD_TYPE", "RD_SUF", "LOCALITY", "STATE", "POSTCODE", "ACCESSTYPE", "x",
    "y",
];

// Keyed by upper-cased name.
static ADDRESS_INDEX: Lazy<HashMap<String, usize>> = Lazy::new(|| {
    ADDRESS_FIELDS
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_ascii_uppercase(), index))
        .collect()
});

/// Looks up an address column by name, ignoring ASCII case.
pub fn address_field_index(name: &str) -> Option<usize> {
    ADDRESS_INDEX.get(&name.to_ascii_uppercase()).copied()
}

/// The shape every record of a dictionary must have.
///
/// A schema fixes the number of fields per record and which of them is the
/// lookup key. Both are checked once here so the dictionaries can rely on
/// them afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    field_count: usize,
    key_field: usize,
}

impl Schema {
    /// Creates a schema of `field_count` fields keyed on `key_field`.
    pub fn new(field_count: usize, key_field: usize) -> Result<Self> {
        if field_count == 0 {
            return Err(Error::EmptySchema);
        }
        if key_field >= field_count {
            return Err(Error::KeyFieldOutOfRange {
                index: key_field,
                field_count,
            });
        }
        Ok(Schema {
            field_count,
            key_field,
        })
    }

    /// The 35-column address layout keyed on `key_field`.
    pub fn address(key_field: usize) -> Result<Self> {
        Schema::new(ADDRESS_FIELD_COUNT, key_field)
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }

    pub fn key_field(&self) -> usize {
        self.key_field
    }

    /// Checks that a row has exactly `field_count` fields.
    pub fn check(&self, found: usize) -> Result<()> {
        if found != self.field_count {
            return Err(Error::FieldCount {
                expected: self.field_count,
                found,
            });
        }
        Ok(())
    }
}

/// One dataset row: an immutable, ordered collection of string fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    fields: Box<[String]>,
}

impl Record {
    /// Takes ownership of a parsed row after checking it against `schema`.
    pub fn new(fields: Vec<String>, schema: &Schema) -> Result<Self> {
        schema.check(fields.len())?;
        Ok(Record {
            fields: fields.into_boxed_slice(),
        })
    }

    /// Deep-copies a borrowed row.
    pub fn copy_from<S: AsRef<str>>(fields: &[S], schema: &Schema) -> Result<Self> {
        Record::new(fields.iter().map(|f| f.as_ref().to_string()).collect(), schema)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The value of the schema's key field, or `""` if the record is shorter.
    pub fn key(&self, schema: &Schema) -> &str {
        self.field(schema.key_field()).unwrap_or("")
    }
}
