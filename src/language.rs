use std::collections::BTreeMap;

/// Android resource qualifiers put a lowercase `r` in front of the region,
/// OneSky expects the plain BCP 47 spelling.
const BUILTIN_MAPPINGS: &[(&str, &str)] = &[("pt-rBR", "pt-BR"), ("zh-rCN", "zh-CN")];

/// Read-only table of language code rewrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageMappings {
    entries: BTreeMap<String, String>,
}

impl Default for LanguageMappings {
    fn default() -> Self {
        Self {
            entries: BUILTIN_MAPPINGS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}

impl LanguageMappings {
    /// Built-in table extended with `extra`. Built-in keys always win.
    pub fn with_extra<'a, I>(extra: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut mappings = Self::default();
        for (from, to) in extra {
            mappings
                .entries
                .entry(from.clone())
                .or_insert_with(|| to.clone());
        }
        mappings
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Returns the vendor spelling of `code`, or `code` itself when no rewrite exists.
pub fn normalize<'a>(code: &'a str, table: &'a LanguageMappings) -> &'a str {
    table.get(code).unwrap_or(code)
}
