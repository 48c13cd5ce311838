use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::LoaderError;

/// Per-run table mapping a source file's base name to the free-text
/// experimental-condition label attached to its records. Loaded once at run
/// start, read-only afterwards. A missing entry means "no condition
/// recorded", never an error.
#[derive(Debug, Default)]
pub struct ConditionMap {
    entries: HashMap<String, String>,
}

impl ConditionMap {
    pub fn load(path: &Path) -> Result<Self, LoaderError> {
        let content = fs::read_to_string(path).map_err(|err| LoaderError::io(path, err))?;
        Ok(Self::parse(&content))
    }

    fn parse(content: &str) -> Self {
        let mut entries = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            if let Some(separator) = line.find(['=', ':']) {
                let key = line[..separator].trim();
                let value = line[separator + 1..].trim();
                if !key.is_empty() {
                    entries.insert(key.to_string(), value.to_string());
                }
            }
        }
        Self { entries }
    }

    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.entries.get(file_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
