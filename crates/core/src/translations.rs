//! Grouping of flat translation rows into the client-facing shape.
//!
//! Rows are stored as `section.key` triples (`"home.title"`, en, pt) and
//! the client consumes them grouped per section and language:
//!
//! ```json
//! { "home": { "en": { "title": "..." }, "pt": { "title": "..." } } }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

/// Per-section translation table, one map per supported language.
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct SectionTranslations {
    pub en: BTreeMap<String, String>,
    pub pt: BTreeMap<String, String>,
}

/// Group `(key, en, pt)` rows by the section prefix of their key.
///
/// Keys without a `.` separator land in the `"general"` section under
/// their full key.
pub fn group_by_section<I, K, V>(rows: I) -> BTreeMap<String, SectionTranslations>
where
    I: IntoIterator<Item = (K, V, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut sections: BTreeMap<String, SectionTranslations> = BTreeMap::new();

    for (key, en, pt) in rows {
        let key = key.as_ref();
        let (section, subkey) = match key.split_once('.') {
            Some((section, subkey)) => (section, subkey),
            None => ("general", key),
        };

        let entry = sections.entry(section.to_string()).or_default();
        entry.en.insert(subkey.to_string(), en.into());
        entry.pt.insert(subkey.to_string(), pt.into());
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_rows_by_section_prefix() {
        let grouped = group_by_section([
            ("home.title", "Home", "Início"),
            ("home.subtitle", "Welcome", "Bem-vindo"),
            ("profile.title", "Profile", "Perfil"),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["home"].en["title"], "Home");
        assert_eq!(grouped["home"].pt["subtitle"], "Bem-vindo");
        assert_eq!(grouped["profile"].en["title"], "Profile");
    }

    #[test]
    fn undotted_keys_fall_back_to_general() {
        let grouped = group_by_section([("cancel", "Cancel", "Cancelar")]);
        assert_eq!(grouped["general"].pt["cancel"], "Cancelar");
    }

    #[test]
    fn empty_input_yields_empty_map() {
        let grouped = group_by_section(Vec::<(&str, &str, &str)>::new());
        assert!(grouped.is_empty());
    }
}
