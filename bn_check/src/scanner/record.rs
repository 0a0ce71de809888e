//! Parsed test records

use super::error::{ScanError, ScanResult};
use num_bigint::BigInt;
use std::collections::btree_map::{BTreeMap, Entry};

/// One test case: a type tag plus named integer attributes.
///
/// The type is the key of the first attribute, and that attribute's value is
/// stored under the same key, so `values()` always contains `test_type()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    line_number: usize,
    test_type: String,
    values: BTreeMap<String, BigInt>,
}

impl Record {
    /// Start a record from its first attribute
    pub(crate) fn start(line_number: usize, key: String, value: BigInt) -> Self {
        let mut values = BTreeMap::new();
        values.insert(key.clone(), value);
        Self {
            line_number,
            test_type: key,
            values,
        }
    }

    /// Add a further attribute; repeating a key is a fatal error
    pub(crate) fn insert(&mut self, line: usize, key: String, value: BigInt) -> ScanResult<()> {
        match self.values.entry(key) {
            Entry::Occupied(entry) => Err(ScanError::duplicate_key(line, entry.key())),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
        }
    }

    /// 1-based line of the first attribute
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn test_type(&self) -> &str {
        &self.test_type
    }

    pub fn values(&self) -> &BTreeMap<String, BigInt> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&BigInt> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Attribute names in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
