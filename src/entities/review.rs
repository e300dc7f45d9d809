// ⭐ Review Entity - A rating written by an account for a place
//
// Both relations are required at construction and stored as identifiers.
// The facade resolves them against the repositories before a review is
// built; once created, a review never re-points (text and rating are the
// only updatable fields).
//
// Field rules:
// - text: trimmed, non-empty
// - rating: strictly an integer (a float or numeric string is a shape
//   error), in 1..=5

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::{int_value, require, string_value, Entity, Patch};
use crate::error::{CatalogError, Result};

// ============================================================================
// FIELD VALIDATORS
// ============================================================================

fn validate_text(value: &Value) -> Result<String> {
    let text = string_value("text", value)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(CatalogError::invalid_value("text", "cannot be empty"));
    }
    Ok(text.to_string())
}

fn validate_rating(value: &Value) -> Result<i64> {
    let rating = int_value("rating", value)?;
    if !(1..=5).contains(&rating) {
        return Err(CatalogError::invalid_value("rating", "must be between 1 and 5"));
    }
    Ok(rating)
}

/// Shape check only. Whether the place exists is the facade's call.
pub(crate) fn validate_place_id(value: &Value) -> Result<String> {
    let place_id = string_value("place_id", value)?;
    let place_id = place_id.trim();
    if place_id.is_empty() {
        return Err(CatalogError::invalid_value("place_id", "is required"));
    }
    Ok(place_id.to_string())
}

/// Shape check only. Whether the account exists is the facade's call.
pub(crate) fn validate_user_id(value: &Value) -> Result<String> {
    let user_id = string_value("user_id", value)?;
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(CatalogError::invalid_value("user_id", "is required"));
    }
    Ok(user_id.to_string())
}

// ============================================================================
// REVIEW ENTITY
// ============================================================================

/// A review of a place, written by an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Stable identity (UUID) - NEVER changes
    pub id: String,
    pub text: String,
    /// Integer stars, 1..=5.
    pub rating: i64,
    /// Place this review belongs to. Fixed for the review's lifetime.
    pub place_id: String,
    /// Account that wrote the review. Fixed for the review's lifetime.
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Build a review from a raw payload plus the relationship ids the
    /// facade already shape-checked and resolved.
    ///
    /// Requires `text` and `rating` in the payload.
    pub fn new(payload: &Patch, place_id: String, user_id: String) -> Result<Self> {
        let text = validate_text(require(payload, "text")?)?;
        let rating = validate_rating(require(payload, "rating")?)?;

        let now = Utc::now();
        Ok(Review {
            id: uuid::Uuid::new_v4().to_string(),
            text,
            rating,
            place_id,
            user_id,
            created_at: now,
            updated_at: now,
        })
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Review {
    fn id(&self) -> &str {
        &self.id
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.clone()),
            "text" => Some(self.text.clone()),
            "place_id" => Some(self.place_id.clone()),
            "user_id" => Some(self.user_id.clone()),
            _ => None,
        }
    }

    /// Allow-list: text, rating. The relations never change.
    fn update(&mut self, patch: &Patch) -> Result<()> {
        let mut text = None;
        let mut rating = None;
        let mut changed = false;

        for (key, value) in patch {
            match key.as_str() {
                "text" => text = Some(validate_text(value)?),
                "rating" => rating = Some(validate_rating(value)?),
                _ => continue,
            }
            changed = true;
        }

        if let Some(text) = text {
            self.text = text;
        }
        if let Some(rating) = rating {
            self.rating = rating;
        }
        if changed {
            self.touch();
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> Patch {
        value.as_object().cloned().unwrap()
    }

    fn new_review(body: &Patch) -> Result<Review> {
        Review::new(body, "place-1".to_string(), "user-1".to_string())
    }

    #[test]
    fn test_review_creation() {
        let review = new_review(&payload(json!({
            "text": "  Great stay!  ",
            "rating": 5
        })))
        .unwrap();

        assert!(!review.id.is_empty());
        assert_eq!(review.text, "Great stay!");
        assert_eq!(review.rating, 5);
        assert_eq!(review.place_id, "place-1");
        assert_eq!(review.user_id, "user-1");
        assert_eq!(review.created_at, review.updated_at);
    }

    #[test]
    fn test_review_text_rules() {
        let err = new_review(&payload(json!({ "text": "   ", "rating": 3 }))).unwrap_err();
        assert_eq!(err, CatalogError::invalid_value("text", "cannot be empty"));

        let err = new_review(&payload(json!({ "text": 42, "rating": 3 }))).unwrap_err();
        assert_eq!(err, CatalogError::wrong_type("text", "a string"));

        let err = new_review(&payload(json!({ "rating": 3 }))).unwrap_err();
        assert_eq!(err, CatalogError::wrong_type("text", "provided"));
    }

    #[test]
    fn test_review_rating_shape_vs_range() {
        // a numeric string is a shape error...
        let err = new_review(&payload(json!({ "text": "ok", "rating": "5" }))).unwrap_err();
        assert_eq!(err, CatalogError::wrong_type("rating", "an integer"));

        // ...and so is a float...
        let err = new_review(&payload(json!({ "text": "ok", "rating": 4.5 }))).unwrap_err();
        assert_eq!(err, CatalogError::wrong_type("rating", "an integer"));

        // ...while an out-of-range integer is a value error
        let err = new_review(&payload(json!({ "text": "ok", "rating": 0 }))).unwrap_err();
        assert_eq!(err, CatalogError::invalid_value("rating", "must be between 1 and 5"));

        let err = new_review(&payload(json!({ "text": "ok", "rating": 6 }))).unwrap_err();
        assert_eq!(err, CatalogError::invalid_value("rating", "must be between 1 and 5"));

        // boundaries are inclusive
        assert_eq!(new_review(&payload(json!({ "text": "ok", "rating": 1 }))).unwrap().rating, 1);
        assert_eq!(new_review(&payload(json!({ "text": "ok", "rating": 5 }))).unwrap().rating, 5);
    }

    #[test]
    fn test_review_update() {
        let mut review = new_review(&payload(json!({ "text": "ok", "rating": 3 }))).unwrap();
        let before = review.updated_at;

        std::thread::sleep(std::time::Duration::from_millis(10));

        review
            .update(&payload(json!({ "text": "Better than ok", "rating": 4 })))
            .unwrap();

        assert_eq!(review.text, "Better than ok");
        assert_eq!(review.rating, 4);
        assert!(review.updated_at > before);
    }

    #[test]
    fn test_review_update_cannot_repoint_relations() {
        let mut review = new_review(&payload(json!({ "text": "ok", "rating": 3 }))).unwrap();
        let before = review.updated_at;

        review
            .update(&payload(json!({ "place_id": "other", "user_id": "other" })))
            .unwrap();

        assert_eq!(review.place_id, "place-1");
        assert_eq!(review.user_id, "user-1");
        assert_eq!(review.updated_at, before);
    }

    #[test]
    fn test_review_update_is_atomic() {
        let mut review = new_review(&payload(json!({ "text": "ok", "rating": 3 }))).unwrap();
        let before = review.updated_at;

        let err = review
            .update(&payload(json!({ "text": "Fine", "rating": 9 })))
            .unwrap_err();

        assert_eq!(err, CatalogError::invalid_value("rating", "must be between 1 and 5"));
        assert_eq!(review.text, "ok");
        assert_eq!(review.rating, 3);
        assert_eq!(review.updated_at, before);
    }

    #[test]
    fn test_review_relation_shape_checks() {
        assert_eq!(
            validate_place_id(&json!("")).unwrap_err(),
            CatalogError::invalid_value("place_id", "is required")
        );
        assert_eq!(
            validate_user_id(&json!(7)).unwrap_err(),
            CatalogError::wrong_type("user_id", "a string")
        );
        assert_eq!(validate_place_id(&json!(" p-1 ")).unwrap(), "p-1");
    }

    #[test]
    fn test_review_attribute_lookup() {
        let review = new_review(&payload(json!({ "text": "ok", "rating": 3 }))).unwrap();

        assert_eq!(review.attribute("place_id").as_deref(), Some("place-1"));
        assert_eq!(review.attribute("user_id").as_deref(), Some("user-1"));
        assert_eq!(review.attribute("text").as_deref(), Some("ok"));
        assert!(review.attribute("rating").is_none());
    }
}
