use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// A stored cat. `id` and `created_at` never change once assigned.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cat {
    pub id: String,
    pub name: String,
    pub sex: String,
    pub age: u32,
    pub breed: String,
    pub colour: String,
    pub likes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a client supplies on creation; id and timestamps come from the service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewCat {
    pub name: String,
    pub sex: String,
    pub age: u32,
    pub breed: String,
    pub colour: String,
    pub likes: Vec<String>,
}

impl NewCat {
    pub fn into_cat(self, id: String, now: DateTime<Utc>) -> Cat {
        Cat {
            id,
            name: self.name,
            sex: self.sex,
            age: self.age,
            breed: self.breed,
            colour: self.colour,
            likes: self.likes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. Absent fields are left as they are; unknown keys
/// (including `id`, `createdAt`, `updatedAt`) are ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CatChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<Vec<String>>,
}

impl CatChanges {
    /// Supplied text fields must not be blank.
    pub fn validate(&self) -> Result<(), ServiceError> {
        let texts = [
            ("name", &self.name),
            ("sex", &self.sex),
            ("breed", &self.breed),
            ("colour", &self.colour),
        ];
        for (key, value) in texts {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ServiceError::Validation(format!("Key '{key}' can not be empty")));
            }
        }
        Ok(())
    }

    /// Merge into `cat` and stamp `updated_at`.
    pub fn apply(self, cat: &mut Cat, now: DateTime<Utc>) {
        if let Some(v) = self.name { cat.name = v; }
        if let Some(v) = self.sex { cat.sex = v; }
        if let Some(v) = self.age { cat.age = v; }
        if let Some(v) = self.breed { cat.breed = v; }
        if let Some(v) = self.colour { cat.colour = v; }
        if let Some(v) = self.likes { cat.likes = v; }
        cat.updated_at = now;
    }
}

/// On-disk layout: `{"cats": [...]}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CatDocument {
    #[serde(default)]
    pub cats: Vec<Cat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Cat {
        NewCat {
            name: "Mittens".into(),
            sex: "Male".into(),
            age: 2,
            breed: "Bengal".into(),
            colour: "Brown".into(),
            likes: vec!["chicken".into()],
        }
        .into_cat("c-1".into(), Utc::now())
    }

    #[test]
    fn serializes_camel_case() {
        let v = serde_json::to_value(sample()).unwrap();
        assert!(v.get("createdAt").is_some());
        assert!(v.get("updatedAt").is_some());
        assert!(v.get("created_at").is_none());
        assert_eq!(v["likes"], serde_json::json!(["chicken"]));
    }

    #[test]
    fn changes_ignore_immutable_keys() {
        let changes: CatChanges = serde_json::from_value(serde_json::json!({
            "id": "hijack",
            "createdAt": "2000-01-01T00:00:00Z",
            "age": 3
        }))
        .unwrap();
        assert_eq!(changes, CatChanges { age: Some(3), ..Default::default() });

        let mut cat = sample();
        let created = cat.created_at;
        changes.apply(&mut cat, Utc::now());
        assert_eq!(cat.id, "c-1");
        assert_eq!(cat.created_at, created);
        assert_eq!(cat.age, 3);
        assert_eq!(cat.name, "Mittens");
    }

    #[test]
    fn blank_text_changes_are_rejected() {
        let changes = CatChanges { colour: Some("  ".into()), ..Default::default() };
        assert!(matches!(changes.validate(), Err(ServiceError::Validation(_))));
        assert!(CatChanges::default().validate().is_ok());
    }

    #[test]
    fn document_tolerates_missing_collection() {
        let doc: CatDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.cats.is_empty());
    }
}
