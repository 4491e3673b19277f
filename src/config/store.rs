//! Sectioned key/value settings store with an INI text representation.
//!
//! The dialect is the classic one the viewer has always written:
//!
//! ```ini
//! [content]
//! xalign = 0.50
//! start_fullscreen = on
//! ```
//!
//! Keys are case-insensitive (stored lower-cased), section names are not.
//! Options under `[DEFAULT]` act as fallbacks for every other section, and
//! values may reference each other with `%(name)s`.

use std::collections::HashSet;
use std::fmt;
use std::io::{self, Write};

use thiserror::Error;

/// Name of the fallback section.
pub const DEFAULT_SECTION: &str = "DEFAULT";

const MAX_INTERPOLATION_DEPTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("line {line}: option outside of any section: {text:?}")]
    MissingSectionHeader { line: usize, text: String },

    #[error("line {line}: cannot parse {text:?}")]
    Parse { line: usize, text: String },

    #[error("line {line}: section [{section}] appears twice")]
    DuplicateSection { section: String, line: usize },

    #[error("line {line}: option {option:?} appears twice in section [{section}]")]
    DuplicateOption {
        section: String,
        option: String,
        line: usize,
    },

    #[error("section [{0}] already exists")]
    SectionExists(String),

    #[error("[{name}] cannot be added as a regular section", name = DEFAULT_SECTION)]
    DefaultSectionName,

    #[error("no section [{0}]")]
    NoSection(String),

    #[error("no option {option:?} in section [{section}]")]
    NoOption { section: String, option: String },

    #[error("[{section}] {option}: reference to unknown option {reference:?}")]
    InterpolationMissingOption {
        section: String,
        option: String,
        reference: String,
    },

    #[error("[{section}] {option}: interpolation nested deeper than {max} levels", max = MAX_INTERPOLATION_DEPTH)]
    InterpolationDepth { section: String, option: String },

    #[error("[{section}] {option}: {message}")]
    InterpolationSyntax {
        section: String,
        option: String,
        message: String,
    },

    #[error("[{section}] {option}: {value:?} is not a valid {expected}")]
    InvalidValue {
        section: String,
        option: String,
        value: String,
        expected: &'static str,
    },
}

// ───────────────────────────────────────── section ───────────

/// One named group of options, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Section {
    name: String,
    options: Vec<(String, String)>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            options: Vec::new(),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace in place so the option keeps its position in the file.
    fn set(&mut self, key: String, value: String) {
        match self.options.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.options.push((key, value)),
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        let before = self.options.len();
        self.options.retain(|(k, _)| k != key);
        self.options.len() != before
    }

    fn append_line(&mut self, key: &str, line: &str) {
        if let Some((_, v)) = self.options.iter_mut().find(|(k, _)| k == key) {
            v.push('\n');
            v.push_str(line);
        }
    }
}

// ───────────────────────────────────────── store ─────────────

/// In-memory settings: ordered sections of string options plus the
/// `[DEFAULT]` fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    defaults: Section,
    sections: Vec<Section>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore {
    pub fn new() -> Self {
        Self {
            defaults: Section::new(DEFAULT_SECTION),
            sections: Vec::new(),
        }
    }

    /// Parse `text` into a fresh store.
    pub fn parse(text: &str) -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.read_str(text)?;
        Ok(store)
    }

    // ── sections ────────────────────────────────────────────────

    pub fn add_section(&mut self, name: &str) -> Result<(), StoreError> {
        if name == DEFAULT_SECTION {
            return Err(StoreError::DefaultSectionName);
        }
        if self.has_section(name) {
            return Err(StoreError::SectionExists(name.to_string()));
        }
        self.sections.push(Section::new(name));
        Ok(())
    }

    /// Add `name` unless it is already present.  `[DEFAULT]` always exists.
    pub fn ensure_section(&mut self, name: &str) {
        if name != DEFAULT_SECTION && !self.has_section(name) {
            self.sections.push(Section::new(name));
        }
    }

    /// Regular sections only; `[DEFAULT]` is never reported.
    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    pub fn remove_section(&mut self, name: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.name != name);
        self.sections.len() != before
    }

    fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    fn section_mut(&mut self, name: &str) -> Result<&mut Section, StoreError> {
        if name == DEFAULT_SECTION {
            return Ok(&mut self.defaults);
        }
        self.sections
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| StoreError::NoSection(name.to_string()))
    }

    // ── options ─────────────────────────────────────────────────

    /// Option names visible in `section`, its own first, then inherited
    /// defaults it does not override.
    pub fn options(&self, section: &str) -> Result<Vec<&str>, StoreError> {
        let own = self
            .section(section)
            .ok_or_else(|| StoreError::NoSection(section.to_string()))?;
        let mut names: Vec<&str> = own.options.iter().map(|(k, _)| k.as_str()).collect();
        for (k, _) in &self.defaults.options {
            if own.get(k).is_none() {
                names.push(k);
            }
        }
        Ok(names)
    }

    /// `true` when `key` is set in `section` or in `[DEFAULT]`.  Always
    /// `false` for a section that does not exist.
    pub fn has_option(&self, section: &str, key: &str) -> bool {
        let key = key.to_lowercase();
        if section == DEFAULT_SECTION {
            return self.defaults.get(&key).is_some();
        }
        match self.section(section) {
            Some(s) => s.get(&key).is_some() || self.defaults.get(&key).is_some(),
            None => false,
        }
    }

    fn lookup(&self, section: &str, key: &str) -> Result<&str, StoreError> {
        let own = if section == DEFAULT_SECTION {
            None
        } else {
            Some(
                self.section(section)
                    .ok_or_else(|| StoreError::NoSection(section.to_string()))?,
            )
        };
        own.and_then(|s| s.get(key))
            .or_else(|| self.defaults.get(key))
            .ok_or_else(|| StoreError::NoOption {
                section: section.to_string(),
                option: key.to_string(),
            })
    }

    /// Stored value with no `%(name)s` substitution.
    pub fn get_raw(&self, section: &str, key: &str) -> Result<&str, StoreError> {
        self.lookup(section, &key.to_lowercase())
    }

    /// Stored value with `%(name)s` references expanded.
    pub fn get(&self, section: &str, key: &str) -> Result<String, StoreError> {
        let key = key.to_lowercase();
        let raw = self.lookup(section, &key)?;
        self.interpolate(section, &key, raw, 1)
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Result<bool, StoreError> {
        let value = self.get(section, key)?;
        match value.to_lowercase().as_str() {
            "1" | "yes" | "true" | "on" => Ok(true),
            "0" | "no" | "false" | "off" => Ok(false),
            _ => Err(invalid(section, key, value, "boolean")),
        }
    }

    pub fn get_int(&self, section: &str, key: &str) -> Result<i64, StoreError> {
        let value = self.get(section, key)?;
        value
            .trim()
            .parse()
            .map_err(|_| invalid(section, key, value, "integer"))
    }

    pub fn get_float(&self, section: &str, key: &str) -> Result<f64, StoreError> {
        let value = self.get(section, key)?;
        value
            .trim()
            .parse()
            .map_err(|_| invalid(section, key, value, "number"))
    }

    /// Set `key` in `section` (or in `[DEFAULT]`).  The section must exist
    /// and the value must be valid interpolation syntax.
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> Result<(), StoreError> {
        let key = key.to_lowercase();
        check_interpolation_syntax(value).map_err(|message| StoreError::InterpolationSyntax {
            section: section.to_string(),
            option: key.clone(),
            message,
        })?;
        self.section_mut(section)?.set(key, value.to_string());
        Ok(())
    }

    pub fn remove_option(&mut self, section: &str, key: &str) -> Result<bool, StoreError> {
        let key = key.to_lowercase();
        Ok(self.section_mut(section)?.remove(&key))
    }

    // ── interpolation ───────────────────────────────────────────

    fn interpolate(
        &self,
        section: &str,
        option: &str,
        raw: &str,
        depth: usize,
    ) -> Result<String, StoreError> {
        if depth > MAX_INTERPOLATION_DEPTH {
            return Err(StoreError::InterpolationDepth {
                section: section.to_string(),
                option: option.to_string(),
            });
        }

        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos..];
            match rest[1..].chars().next() {
                Some('%') => {
                    out.push('%');
                    rest = &rest[2..];
                }
                Some('(') => {
                    let Some((name, len)) = parse_reference(rest) else {
                        return Err(StoreError::InterpolationSyntax {
                            section: section.to_string(),
                            option: option.to_string(),
                            message: format!("bad variable reference {rest:?}"),
                        });
                    };
                    let reference = name.to_lowercase();
                    let value = self.lookup(section, &reference).map_err(|_| {
                        StoreError::InterpolationMissingOption {
                            section: section.to_string(),
                            option: option.to_string(),
                            reference: reference.clone(),
                        }
                    })?;
                    if value.contains('%') {
                        out.push_str(&self.interpolate(section, option, value, depth + 1)?);
                    } else {
                        out.push_str(value);
                    }
                    rest = &rest[len..];
                }
                _ => {
                    return Err(StoreError::InterpolationSyntax {
                        section: section.to_string(),
                        option: option.to_string(),
                        message: format!("'%' must be followed by '%' or '(', found {rest:?}"),
                    });
                }
            }
        }
        out.push_str(rest);
        Ok(out)
    }

    // ── reading ─────────────────────────────────────────────────

    /// Merge INI `text` into the store.  Sections that already exist are
    /// extended; a section or option repeated within `text` is an error.
    pub fn read_str(&mut self, text: &str) -> Result<(), StoreError> {
        let mut seen_sections: HashSet<String> = HashSet::new();
        let mut seen_options: HashSet<(String, String)> = HashSet::new();
        let mut current: Option<String> = None;
        // Option still accepting continuation lines, and its own indent.
        let mut open: Option<(String, usize)> = None;
        let mut pending_blanks = 0;

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                if open.is_some() {
                    pending_blanks += 1;
                }
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                open = None;
                pending_blanks = 0;
                continue;
            }

            // A line indented deeper than the open option continues its value.
            let indent = raw.len() - raw.trim_start().len();
            if let (Some(section), Some((key, option_indent))) = (&current, &open) {
                if indent > *option_indent {
                    let target = self.section_mut(section)?;
                    for _ in 0..pending_blanks {
                        target.append_line(key, "");
                    }
                    target.append_line(key, trimmed);
                    pending_blanks = 0;
                    continue;
                }
            }
            pending_blanks = 0;

            if let Some(name) = parse_header(trimmed) {
                if !seen_sections.insert(name.to_string()) {
                    return Err(StoreError::DuplicateSection {
                        section: name.to_string(),
                        line,
                    });
                }
                self.ensure_section(name);
                current = Some(name.to_string());
                open = None;
                continue;
            }

            let Some(section) = current.clone() else {
                return Err(StoreError::MissingSectionHeader {
                    line,
                    text: raw.to_string(),
                });
            };

            let Some((key, value)) = split_option(trimmed) else {
                return Err(StoreError::Parse {
                    line,
                    text: raw.to_string(),
                });
            };

            if !seen_options.insert((section.clone(), key.clone())) {
                return Err(StoreError::DuplicateOption {
                    section,
                    option: key,
                    line,
                });
            }
            self.section_mut(&section)?.set(key.clone(), value.to_string());
            open = Some((key, indent));
        }

        Ok(())
    }

    // ── writing ─────────────────────────────────────────────────

    /// Serialise to `w` in INI form.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write!(w, "{}", self)
    }
}

impl fmt::Display for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.defaults.options.is_empty() {
            write_section(f, &self.defaults)?;
        }
        for section in &self.sections {
            write_section(f, section)?;
        }
        Ok(())
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, section: &Section) -> fmt::Result {
    writeln!(f, "[{}]", section.name)?;
    for (key, value) in &section.options {
        writeln!(f, "{key} = {}", value.replace('\n', "\n\t"))?;
    }
    writeln!(f)
}

/// `[name]` → `name`.  Anything after the last `]` is ignored.
fn parse_header(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?;
    let end = inner.rfind(']')?;
    let name = &inner[..end];
    (!name.is_empty()).then_some(name)
}

/// Split on the first `=` or `:`.  Key is lower-cased.
fn split_option(line: &str) -> Option<(String, &str)> {
    let pos = line.find(['=', ':'])?;
    let key = line[..pos].trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_lowercase(), line[pos + 1..].trim()))
}

/// `%(name)s` at the start of `tail` as `(name, length)`.  The name ends at
/// the first `)` and must not be empty.
fn parse_reference(tail: &str) -> Option<(&str, usize)> {
    let inner = tail.strip_prefix("%(")?;
    let close = inner.find(')')?;
    let name = &inner[..close];
    (!name.is_empty() && inner[close + 1..].starts_with('s')).then_some((name, close + 4))
}

/// Reject a value whose `%` signs are not `%%` or `%(name)s`.
fn check_interpolation_syntax(value: &str) -> Result<(), String> {
    let mut rest = value;
    let mut offset = 0;
    while let Some(pos) = rest.find('%') {
        let tail = &rest[pos..];
        let consumed = if tail.starts_with("%%") {
            2
        } else if let Some((_, len)) = parse_reference(tail) {
            len
        } else {
            return Err(format!("invalid interpolation syntax at position {}", offset + pos));
        };
        offset += pos + consumed;
        rest = &tail[consumed..];
    }
    Ok(())
}

fn invalid(section: &str, key: &str, value: String, expected: &'static str) -> StoreError {
    StoreError::InvalidValue {
        section: section.to_string(),
        option: key.to_lowercase(),
        value,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sections_and_both_delimiters() {
        let store = SettingsStore::parse("[content]\nxalign = 0.1\nmonitor: 2\n").unwrap();
        assert_eq!(store.get_raw("content", "xalign").unwrap(), "0.1");
        assert_eq!(store.get_raw("content", "monitor").unwrap(), "2");
    }

    #[test]
    fn keys_are_case_insensitive_sections_are_not() {
        let store = SettingsStore::parse("[Content]\nXAlign = 0.3\n").unwrap();
        assert_eq!(store.get("Content", "xalign").unwrap(), "0.3");
        assert_eq!(store.get("Content", "XALIGN").unwrap(), "0.3");
        assert!(!store.has_section("content"));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "# leading\n\n[cache]\n; note\nmaxpages = 50\n\n";
        let store = SettingsStore::parse(text).unwrap();
        assert_eq!(store.options("cache").unwrap(), vec!["maxpages"]);
    }

    #[test]
    fn first_delimiter_splits_the_line() {
        let store = SettingsStore::parse("[a]\nurl = http://host:80/x=y\n").unwrap();
        assert_eq!(store.get_raw("a", "url").unwrap(), "http://host:80/x=y");
    }

    #[test]
    fn indented_lines_continue_the_previous_value() {
        let store = SettingsStore::parse("[a]\nnotes = one\n  two\n\tthree\nnext = 1\n").unwrap();
        assert_eq!(store.get_raw("a", "notes").unwrap(), "one\ntwo\nthree");
        assert_eq!(store.get_raw("a", "next").unwrap(), "1");
    }

    #[test]
    fn indented_options_are_separate_keys() {
        let store = SettingsStore::parse("[content]\n  xalign = 0.1\n  yalign = 0.2\n").unwrap();
        assert_eq!(store.get_raw("content", "xalign").unwrap(), "0.1");
        assert_eq!(store.get_raw("content", "yalign").unwrap(), "0.2");
    }

    #[test]
    fn deeper_indent_continues_an_indented_option() {
        let store = SettingsStore::parse("[a]\n  notes = one\n    two\n  next = 1\n").unwrap();
        assert_eq!(store.get_raw("a", "notes").unwrap(), "one\ntwo");
        assert_eq!(store.get_raw("a", "next").unwrap(), "1");
    }

    #[test]
    fn comment_ends_a_multiline_value() {
        let err = SettingsStore::parse("[a]\nnotes = one\n# note\n  two\n").unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 4, .. }));
    }

    #[test]
    fn blank_lines_inside_a_value_are_kept() {
        let store = SettingsStore::parse("[a]\nnotes = one\n\n  two\n\nnext = 1\n").unwrap();
        assert_eq!(store.get_raw("a", "notes").unwrap(), "one\n\ntwo");
        assert_eq!(store.get_raw("a", "next").unwrap(), "1");

        let again = SettingsStore::parse(&store.to_string()).unwrap();
        assert_eq!(again.get_raw("a", "notes").unwrap(), "one\n\ntwo");
    }

    #[test]
    fn option_before_header_is_rejected() {
        let err = SettingsStore::parse("xalign = 0.1\n[content]\n").unwrap_err();
        assert!(matches!(err, StoreError::MissingSectionHeader { line: 1, .. }));
    }

    #[test]
    fn line_without_delimiter_is_rejected() {
        let err = SettingsStore::parse("[content]\nxalign 0.1\n").unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 2, .. }));
    }

    #[test]
    fn repeated_section_in_one_file_is_rejected() {
        let err = SettingsStore::parse("[a]\nx = 1\n[b]\n[a]\n").unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateSection {
                section: "a".into(),
                line: 4
            }
        );
    }

    #[test]
    fn repeated_option_in_one_section_is_rejected() {
        let err = SettingsStore::parse("[a]\nx = 1\nX = 2\n").unwrap_err();
        assert!(matches!(err, StoreError::DuplicateOption { line: 3, .. }));
    }

    #[test]
    fn reading_merges_into_existing_sections() {
        let mut store = SettingsStore::new();
        store.add_section("content").unwrap();
        store.set("content", "monitor", "0").unwrap();
        store.read_str("[content]\nxalign = 0.1\n").unwrap();
        assert_eq!(store.options("content").unwrap(), vec!["monitor", "xalign"]);
    }

    #[test]
    fn default_section_is_a_fallback() {
        let store = SettingsStore::parse("[DEFAULT]\nmonitor = 3\n[content]\n[presenter]\nmonitor = 1\n").unwrap();
        assert!(store.has_option("content", "monitor"));
        assert_eq!(store.get("content", "monitor").unwrap(), "3");
        assert_eq!(store.get("presenter", "monitor").unwrap(), "1");
        assert_eq!(store.sections().collect::<Vec<_>>(), vec!["content", "presenter"]);
        assert!(!store.has_option("missing", "monitor"));
    }

    #[test]
    fn default_section_cannot_be_added() {
        let mut store = SettingsStore::new();
        assert_eq!(store.add_section(DEFAULT_SECTION), Err(StoreError::DefaultSectionName));
        store.add_section("a").unwrap();
        assert_eq!(store.add_section("a"), Err(StoreError::SectionExists("a".into())));
    }

    #[test]
    fn interpolation_expands_references() {
        let text = "[DEFAULT]\nbase = /srv\n[paths]\nshare = %(base)s/share\ncss = %(share)s/css\npct = 50%%\n";
        let store = SettingsStore::parse(text).unwrap();
        assert_eq!(store.get("paths", "css").unwrap(), "/srv/share/css");
        assert_eq!(store.get("paths", "pct").unwrap(), "50%");
        assert_eq!(store.get_raw("paths", "css").unwrap(), "%(share)s/css");
    }

    #[test]
    fn interpolation_reports_unknown_reference() {
        let store = SettingsStore::parse("[a]\nx = %(nope)s\n").unwrap();
        assert!(matches!(
            store.get("a", "x"),
            Err(StoreError::InterpolationMissingOption { reference, .. }) if reference == "nope"
        ));
    }

    #[test]
    fn interpolation_stops_at_max_depth() {
        let store = SettingsStore::parse("[a]\nx = %(x)s\n").unwrap();
        assert!(matches!(store.get("a", "x"), Err(StoreError::InterpolationDepth { .. })));
    }

    #[test]
    fn stray_percent_is_a_syntax_error() {
        let store = SettingsStore::parse("[a]\nx = 50%\n").unwrap();
        assert!(matches!(store.get("a", "x"), Err(StoreError::InterpolationSyntax { .. })));
    }

    #[test]
    fn reference_ends_at_the_first_paren() {
        let store = SettingsStore::parse("[a]\nb = 1\nc = 2\nx = %(b)q %(c)s\ny = %()s\n").unwrap();
        assert!(matches!(store.get("a", "x"), Err(StoreError::InterpolationSyntax { .. })));
        assert!(matches!(store.get("a", "y"), Err(StoreError::InterpolationSyntax { .. })));

        let mut store = store;
        assert!(matches!(
            store.set("a", "z", "%(b)q %(c)s"),
            Err(StoreError::InterpolationSyntax { .. })
        ));
        assert!(matches!(
            store.set("a", "z", "%()s"),
            Err(StoreError::InterpolationSyntax { .. })
        ));
        store.set("a", "z", "%(b)s-%(c)s").unwrap();
        assert_eq!(store.get("a", "z").unwrap(), "1-2");
    }

    #[test]
    fn set_validates_interpolation_syntax() {
        let mut store = SettingsStore::new();
        store.add_section("a").unwrap();
        assert!(store.set("a", "ok", "100%% and %(ok2)s").is_ok());
        assert!(matches!(
            store.set("a", "bad", "100%"),
            Err(StoreError::InterpolationSyntax { .. })
        ));
        assert!(matches!(store.set("b", "x", "1"), Err(StoreError::NoSection(_))));
    }

    #[test]
    fn typed_getters_parse_values() {
        let text = "[a]\nflag = On\nno = 0\nn = 200\nf = 0.75\nbad = maybe\n";
        let store = SettingsStore::parse(text).unwrap();
        assert!(store.get_bool("a", "flag").unwrap());
        assert!(!store.get_bool("a", "no").unwrap());
        assert_eq!(store.get_int("a", "n").unwrap(), 200);
        assert_eq!(store.get_float("a", "f").unwrap(), 0.75);
        assert!(matches!(
            store.get_bool("a", "bad"),
            Err(StoreError::InvalidValue { expected: "boolean", .. })
        ));
        assert!(matches!(
            store.get_int("a", "f"),
            Err(StoreError::InvalidValue { expected: "integer", .. })
        ));
    }

    #[test]
    fn missing_lookups_name_what_is_missing() {
        let store = SettingsStore::parse("[a]\n").unwrap();
        assert_eq!(store.get_raw("b", "x"), Err(StoreError::NoSection("b".into())));
        assert!(matches!(store.get_raw("a", "x"), Err(StoreError::NoOption { .. })));
    }

    #[test]
    fn remove_option_and_section() {
        let mut store = SettingsStore::parse("[a]\nx = 1\n[b]\n").unwrap();
        assert!(store.remove_option("a", "X").unwrap());
        assert!(!store.remove_option("a", "x").unwrap());
        assert!(store.remove_section("b"));
        assert!(!store.has_section("b"));
    }

    #[test]
    fn serialises_in_file_order_with_defaults_first() {
        let mut store = SettingsStore::parse("[z]\nb = 2\na = 1\n[DEFAULT]\nk = v\n").unwrap();
        store.set("z", "multi", "one\ntwo").unwrap();
        assert_eq!(
            store.to_string(),
            "[DEFAULT]\nk = v\n\n[z]\nb = 2\na = 1\nmulti = one\n\ttwo\n\n"
        );
    }

    #[test]
    fn written_text_reads_back_identically() {
        let text = "[content]\nxalign = 0.1\nnotes = a\n\tb\n\n[custom]\nkey = %(other)s\nother = x\n\n";
        let store = SettingsStore::parse(text).unwrap();
        let mut buf = Vec::new();
        store.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), text);
        assert_eq!(SettingsStore::parse(text).unwrap(), store);
    }
}
