use crate::error::{AppError, AppResult};

#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Key/value entries of one `[section]`, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    entries: Vec<(String, String)>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Overwrites keys present in `other` and keeps everything else.
    pub fn overlay(&mut self, other: &Section) {
        for (key, value) in other.iter() {
            self.set(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Section
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut section = Section::new();
        for (key, value) in iter {
            section.set(key, value);
        }
        section
    }
}

/// In-memory form of an `.astrarc` file: named sections in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    sections: Vec<(String, Section)>,
}

impl ConfigFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str, source_name: &str) -> AppResult<Self> {
        let mut file = Self::new();
        let mut current: Option<String> = None;

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if let Some(name) = section_header(trimmed) {
                file.insert_section(name, Section::new());
                current = Some(name.to_string());
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(AppError::Format {
                    source_name: source_name.to_string(),
                    line: line.to_string(),
                });
            };

            let Some(section) = current.as_deref() else {
                return Err(AppError::SectionMissing {
                    source_name: source_name.to_string(),
                    line: line.to_string(),
                });
            };

            file.set(section, key, value);
        }

        Ok(file)
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (name, section) in &self.sections {
            out.push_str(LINE_SEPARATOR);
            out.push('[');
            out.push_str(name);
            out.push(']');
            out.push_str(LINE_SEPARATOR);

            for (key, value) in section.iter() {
                out.push_str(key);
                out.push('=');
                out.push_str(value);
                out.push_str(LINE_SEPARATOR);
            }
        }
        out
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, section)| section)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections
            .iter()
            .map(|(name, section)| (name.as_str(), section))
    }

    /// Raw lookup; an empty value is returned as `Some("")`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    pub fn set(&mut self, section: &str, key: impl Into<String>, value: impl Into<String>) {
        self.section_entry(section).set(key, value);
    }

    /// Replaces the named section, keeping its position when it already exists.
    pub fn insert_section(&mut self, name: impl Into<String>, section: Section) {
        let name = name.into();
        match self
            .sections
            .iter_mut()
            .find(|(existing, _)| *existing == name)
        {
            Some(entry) => entry.1 = section,
            None => self.sections.push((name, section)),
        }
    }

    /// Overlays sections that already exist and appends the others.
    pub fn merge(&mut self, updates: &ConfigFile) {
        for (name, section) in updates.iter() {
            self.section_entry(name).overlay(section);
        }
    }

    /// Checks that every name, key and value survives `serialize` then `parse`.
    pub fn validate(&self) -> AppResult<()> {
        for (name, section) in self.iter() {
            validate_section_name(name)?;
            for (key, value) in section.iter() {
                validate_key(name, key)?;
                if has_line_break(value) {
                    return Err(AppError::InvalidInput(format!(
                        "value of `{key}` in [{name}] must not contain a line break"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn section_entry(&mut self, name: &str) -> &mut Section {
        let index = match self.sections.iter().position(|(existing, _)| existing == name) {
            Some(index) => index,
            None => {
                self.sections.push((name.to_string(), Section::new()));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index].1
    }
}

fn validate_section_name(name: &str) -> AppResult<()> {
    if has_line_break(name) || name.trim() != name {
        return Err(AppError::InvalidInput(format!(
            "section name `{}` must not contain line breaks or surrounding whitespace",
            name.escape_debug()
        )));
    }
    Ok(())
}

fn validate_key(section: &str, key: &str) -> AppResult<()> {
    let trimmed = key.trim();
    let invalid = trimmed.is_empty()
        || key.contains('=')
        || has_line_break(key)
        || trimmed.starts_with('#')
        || trimmed.starts_with('[');

    if invalid {
        return Err(AppError::InvalidInput(format!(
            "key `{}` in [{section}] must be non-empty, contain no `=` or line break, and not start with `#` or `[`",
            key.escape_debug()
        )));
    }
    Ok(())
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

fn section_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')?
        .strip_suffix(']')
        .map(str::trim)
}
