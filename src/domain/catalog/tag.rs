use serde::{Deserialize, Serialize};

use crate::domain::foundation::{slugify, TagId, Timestamp, UserId, ValidationError};

pub const TAG_NAME_MAX_LEN: usize = 30;
pub const DEFAULT_TAG_COLOR: &str = "#2ecc71";

/// Free-form label attached to events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub created_by: Option<UserId>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl Tag {
    pub fn new(
        name: &str,
        color: Option<&str>,
        created_by: Option<UserId>,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if name.chars().count() > TAG_NAME_MAX_LEN {
            return Err(ValidationError::too_long("name", TAG_NAME_MAX_LEN));
        }
        let color = match color.map(str::trim) {
            None | Some("") => DEFAULT_TAG_COLOR.to_string(),
            Some(c) if is_hex_color(c) => c.to_lowercase(),
            Some(_) => {
                return Err(ValidationError::invalid_format(
                    "color",
                    "Color must be a hex value like #2ecc71",
                ))
            }
        };
        Ok(Self {
            id: TagId::new(),
            name: name.to_string(),
            slug: slugify(name),
            color,
            created_by,
            is_active: true,
            created_at: Timestamp::now(),
        })
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_color() {
        let t = Tag::new("Outdoor", None, None).unwrap();
        assert_eq!(t.color, DEFAULT_TAG_COLOR);
        assert_eq!(t.slug, "outdoor");
    }

    #[test]
    fn accepts_custom_hex_color() {
        let creator = UserId::new();
        let t = Tag::new("Family", Some("#FFAA00"), Some(creator)).unwrap();
        assert_eq!(t.color, "#ffaa00");
        assert_eq!(t.created_by, Some(creator));
    }

    #[test]
    fn rejects_bad_color() {
        let err = Tag::new("Family", Some("orange"), None).unwrap_err();
        assert_eq!(err.field(), "color");
    }

    #[test]
    fn rejects_long_name() {
        assert_eq!(
            Tag::new(&"t".repeat(31), None, None),
            Err(ValidationError::too_long("name", 30))
        );
    }
}
