use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use service::cats::{Cat, CatChanges, NewCat};
use tracing::info;

use crate::errors::ApiError;
use crate::response::Envelope;
use crate::state::AppState;

const MISSING_CREATE_KEYS: &str = "One of the following keys is missing or is empty in request body: \
     'name', 'sex', 'age', 'breed', 'colour', 'likes'";

/// `POST /cats` body. Every field is optional at the wire level so a missing
/// key produces the envelope error instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateCatBody {
    pub name: Option<String>,
    pub sex: Option<String>,
    pub age: Option<u32>,
    pub breed: Option<String>,
    pub colour: Option<String>,
    pub likes: Option<Vec<String>>,
}

impl CreateCatBody {
    /// Blank strings and `age == 0` count as missing; an empty `likes` list does not.
    pub fn into_new_cat(self) -> Result<NewCat, ApiError> {
        fn text(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.trim().is_empty())
        }
        match (
            text(self.name),
            text(self.sex),
            self.age.filter(|a| *a > 0),
            text(self.breed),
            text(self.colour),
            self.likes,
        ) {
            (Some(name), Some(sex), Some(age), Some(breed), Some(colour), Some(likes)) => {
                Ok(NewCat { name, sex, age, breed, colour, likes })
            }
            _ => Err(ApiError::bad_request(MISSING_CREATE_KEYS)),
        }
    }
}

fn require_id(cat_id: &str) -> Result<&str, ApiError> {
    if cat_id.trim().is_empty() {
        return Err(ApiError::missing_cat_id());
    }
    Ok(cat_id)
}

pub async fn get_all_cats(State(state): State<AppState>) -> Json<Envelope<Vec<Cat>>> {
    Json(Envelope::ok(state.cats.get_all().await))
}

/// An unknown id is not an error here: the envelope comes back without `data`.
pub async fn get_one_cat(
    State(state): State<AppState>,
    cat_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Envelope<Cat>>, ApiError> {
    let Path(cat_id) = cat_id?;
    let id = require_id(&cat_id)?;
    let envelope = match state.cats.get_by_id(id).await {
        Some(cat) => Envelope::ok(cat),
        None => Envelope::ok_empty(),
    };
    Ok(Json(envelope))
}

pub async fn create_new_cat(
    State(state): State<AppState>,
    body: Result<Json<CreateCatBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Cat>>), ApiError> {
    let Json(body) = body?;
    let new_cat = body.into_new_cat()?;
    let created = state.cats.create(new_cat).await?;
    info!(id = %created.id, name = %created.name, "created cat");
    Ok((StatusCode::CREATED, Json(Envelope::ok(created))))
}

pub async fn update_one_cat(
    State(state): State<AppState>,
    cat_id: Result<Path<String>, PathRejection>,
    body: Result<Json<CatChanges>, JsonRejection>,
) -> Result<Json<Envelope<Cat>>, ApiError> {
    let Path(cat_id) = cat_id?;
    let id = require_id(&cat_id)?;
    let Json(changes) = body?;
    let updated = state.cats.update(id, changes).await?;
    Ok(Json(Envelope::ok(updated)))
}

pub async fn delete_one_cat(
    State(state): State<AppState>,
    cat_id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(cat_id) = cat_id?;
    let id = require_id(&cat_id)?;
    state.cats.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: serde_json::Value) -> CreateCatBody {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn complete_body_converts() {
        let cat = body(serde_json::json!({
            "name": "Mittens", "sex": "Male", "age": 2,
            "breed": "Bengal", "colour": "Brown", "likes": []
        }))
        .into_new_cat()
        .unwrap();
        assert_eq!(cat.name, "Mittens");
        assert!(cat.likes.is_empty());
    }

    #[test]
    fn missing_blank_or_zero_fields_are_rejected() {
        let bodies = [
            serde_json::json!({"sex": "Male", "age": 2, "breed": "B", "colour": "C", "likes": []}),
            serde_json::json!({"name": " ", "sex": "Male", "age": 2, "breed": "B", "colour": "C", "likes": []}),
            serde_json::json!({"name": "N", "sex": "Male", "age": 0, "breed": "B", "colour": "C", "likes": []}),
            serde_json::json!({"name": "N", "sex": "Male", "age": 2, "breed": "B", "colour": "C"}),
        ];
        for b in bodies {
            let err = body(b).into_new_cat().unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.message, MISSING_CREATE_KEYS);
        }
    }

    #[test]
    fn blank_id_is_missing() {
        assert!(require_id("  ").is_err());
        assert_eq!(require_id("abc").unwrap(), "abc");
    }
}
