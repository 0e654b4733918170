//! Parsed manifest trees and version field access.

use thiserror::Error;

use crate::{FieldPath, Format};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid JSON")]
    JsonParse(#[source] serde_json::Error),
    #[error("failed to render JSON")]
    JsonRender(#[source] serde_json::Error),
    #[error("invalid TOML")]
    TomlParse(#[from] toml::de::Error),
    #[error("failed to render TOML")]
    TomlRender(#[from] toml::ser::Error),
    #[error("JSON manifest root is not an object")]
    RootNotATable,
    #[error("missing field `{0}`")]
    MissingField(String),
    #[error("field `{0}` is not a table")]
    NotATable(String),
    #[error("field `{0}` is not a string")]
    NotAString(String),
}

/// A manifest held fully in memory.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Json(serde_json::Value),
    Toml(toml::Table),
}

impl Document {
    pub fn parse(format: Format, text: &str) -> Result<Self, DocumentError> {
        match format {
            Format::Json => {
                let value: serde_json::Value =
                    serde_json::from_str(text).map_err(DocumentError::JsonParse)?;
                if !value.is_object() {
                    return Err(DocumentError::RootNotATable);
                }
                Ok(Document::Json(value))
            }
            Format::Toml => Ok(Document::Toml(text.parse::<toml::Table>()?)),
        }
    }

    pub fn format(&self) -> Format {
        match self {
            Document::Json(_) => Format::Json,
            Document::Toml(_) => Format::Toml,
        }
    }

    /// Serialize in the format's canonical layout.
    ///
    /// JSON is pretty printed with two-space indentation. Both formats end
    /// with a newline.
    pub fn render(&self) -> Result<String, DocumentError> {
        let mut out = match self {
            Document::Json(value) => {
                serde_json::to_string_pretty(value).map_err(DocumentError::JsonRender)?
            }
            Document::Toml(table) => toml::to_string(table)?,
        };
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }

    pub fn get_str(&self, field: &FieldPath) -> Result<&str, DocumentError> {
        match self {
            Document::Json(root) => {
                let (parents, last) = field.split_last();
                let mut node = root;
                for (i, key) in parents.iter().enumerate() {
                    node = node
                        .get(key)
                        .ok_or_else(|| DocumentError::MissingField(field.prefix(i)))?;
                    if !node.is_object() {
                        return Err(DocumentError::NotATable(field.prefix(i)));
                    }
                }
                node.get(last)
                    .ok_or_else(|| DocumentError::MissingField(field.to_string()))?
                    .as_str()
                    .ok_or_else(|| DocumentError::NotAString(field.to_string()))
            }
            Document::Toml(root) => {
                let (parents, last) = field.split_last();
                let mut table = root;
                for (i, key) in parents.iter().enumerate() {
                    table = table
                        .get(key)
                        .ok_or_else(|| DocumentError::MissingField(field.prefix(i)))?
                        .as_table()
                        .ok_or_else(|| DocumentError::NotATable(field.prefix(i)))?;
                }
                table
                    .get(last)
                    .ok_or_else(|| DocumentError::MissingField(field.to_string()))?
                    .as_str()
                    .ok_or_else(|| DocumentError::NotAString(field.to_string()))
            }
        }
    }

    /// Replace an existing string field. Keys are never created.
    pub fn set_str(&mut self, field: &FieldPath, value: String) -> Result<(), DocumentError> {
        match self {
            Document::Json(root) => {
                let (parents, last) = field.split_last();
                let mut node = root;
                for (i, key) in parents.iter().enumerate() {
                    node = node
                        .get_mut(key)
                        .ok_or_else(|| DocumentError::MissingField(field.prefix(i)))?;
                    if !node.is_object() {
                        return Err(DocumentError::NotATable(field.prefix(i)));
                    }
                }
                let slot = node
                    .get_mut(last)
                    .ok_or_else(|| DocumentError::MissingField(field.to_string()))?;
                if !slot.is_string() {
                    return Err(DocumentError::NotAString(field.to_string()));
                }
                *slot = serde_json::Value::String(value);
                Ok(())
            }
            Document::Toml(root) => {
                let (parents, last) = field.split_last();
                let mut table = root;
                for (i, key) in parents.iter().enumerate() {
                    table = table
                        .get_mut(key)
                        .ok_or_else(|| DocumentError::MissingField(field.prefix(i)))?
                        .as_table_mut()
                        .ok_or_else(|| DocumentError::NotATable(field.prefix(i)))?;
                }
                let slot = table
                    .get_mut(last)
                    .ok_or_else(|| DocumentError::MissingField(field.to_string()))?;
                if !slot.is_str() {
                    return Err(DocumentError::NotAString(field.to_string()));
                }
                *slot = toml::Value::String(value);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(s: &str) -> FieldPath { s.parse().unwrap() }

    #[test]
    fn test_json_get_set() {
        let mut doc = Document::parse(
            Format::Json,
            r#"{"package": {"productName": "app", "version": "0.3.0"}}"#,
        )
        .unwrap();
        assert_eq!(doc.get_str(&field("package.version")).unwrap(), "0.3.0");

        doc.set_str(&field("package.version"), "0.4.0".to_string()).unwrap();
        assert_eq!(doc.get_str(&field("package.version")).unwrap(), "0.4.0");
        assert_eq!(doc.get_str(&field("package.productName")).unwrap(), "app");
    }

    #[test]
    fn test_toml_get_set() {
        let mut doc = Document::parse(
            Format::Toml,
            "[workspace]\nmembers = [\"a\"]\n\n[workspace.package]\nversion = \"0.3.0\"\n",
        )
        .unwrap();
        let path = field("workspace.package.version");
        assert_eq!(doc.get_str(&path).unwrap(), "0.3.0");

        doc.set_str(&path, "0.4.0".to_string()).unwrap();
        assert_eq!(doc.get_str(&path).unwrap(), "0.4.0");
    }

    #[test]
    fn test_missing_field_names_first_absent_key() {
        let doc = Document::parse(Format::Json, r#"{"version": "1.0.0"}"#).unwrap();
        let err = doc.get_str(&field("package.version")).unwrap_err();
        assert!(matches!(err, DocumentError::MissingField(ref f) if f == "package"));
    }

    #[test]
    fn test_not_a_table() {
        let doc = Document::parse(Format::Toml, "package = \"x\"\n").unwrap();
        let err = doc.get_str(&field("package.version")).unwrap_err();
        assert!(matches!(err, DocumentError::NotATable(ref f) if f == "package"));
    }

    #[test]
    fn test_not_a_string() {
        let mut doc = Document::parse(Format::Json, r#"{"version": 3}"#).unwrap();
        assert!(matches!(
            doc.get_str(&field("version")),
            Err(DocumentError::NotAString(_))
        ));
        assert!(matches!(
            doc.set_str(&field("version"), "4".to_string()),
            Err(DocumentError::NotAString(_))
        ));
    }

    #[test]
    fn test_set_does_not_create_keys() {
        let mut doc = Document::parse(Format::Toml, "[package]\nname = \"x\"\n").unwrap();
        let err = doc.set_str(&field("package.version"), "1.0".to_string()).unwrap_err();
        assert!(matches!(err, DocumentError::MissingField(ref f) if f == "package.version"));
    }

    #[test]
    fn test_json_root_must_be_object() {
        assert!(matches!(
            Document::parse(Format::Json, "[1, 2]"),
            Err(DocumentError::RootNotATable)
        ));
    }

    #[test]
    fn test_json_render_two_space_indent_keeps_order() {
        let doc = Document::parse(Format::Json, r#"{"version":"1.0.0","name":"app"}"#).unwrap();
        assert_eq!(
            doc.render().unwrap(),
            "{\n  \"version\": \"1.0.0\",\n  \"name\": \"app\"\n}\n"
        );
    }

    #[test]
    fn test_render_without_change_keeps_content() {
        let json = r#"{"b": {"x": [1, 2, {"y": null}]}, "a": true, "version": "0.1.0"}"#;
        let doc = Document::parse(Format::Json, json).unwrap();
        let reparsed = Document::parse(Format::Json, &doc.render().unwrap()).unwrap();
        assert_eq!(doc, reparsed);

        let toml = "title = \"t\"\n\n[workspace]\nmembers = [\"a\", \"b\"]\n\n[workspace.package]\nversion = \"0.1.0\"\nedition = \"2021\"\n\n[[bin]]\nname = \"x\"\n";
        let doc = Document::parse(Format::Toml, toml).unwrap();
        let reparsed = Document::parse(Format::Toml, &doc.render().unwrap()).unwrap();
        assert_eq!(doc, reparsed);
    }
}
