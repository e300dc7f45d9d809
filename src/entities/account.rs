// 👤 Account Entity - Registered users of the catalog
//
// "Account email is a VALUE (can change), Account UUID is IDENTITY (never changes)"
//
// Field rules:
// - first_name / last_name: trimmed, non-empty, at most 50 characters
// - email: trimmed and lower-cased before checks, must look like local@domain.tld
// - is_admin: plain boolean, carried as data only (no access control in the core)
//
// Email uniqueness is a cross-entity rule and lives in the facade.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

use crate::entities::{bool_value, require, string_value, Entity, Patch};
use crate::error::{CatalogError, Result};

// ============================================================================
// FIELD VALIDATORS
// ============================================================================

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Compiled once per process; covers the common local@domain.tld shape.
fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
    })
}

/// Trimmed, non-empty, at most 50 characters. Used for both name fields.
fn validate_name(field: &str, value: &Value) -> Result<String> {
    let name = string_value(field, value)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::invalid_value(field, "is required"));
    }
    if name.chars().count() > 50 {
        return Err(CatalogError::invalid_value(field, "max length is 50"));
    }
    Ok(name.to_string())
}

/// Normalizes (trim + lower-case) before any check, so the stored value
/// is canonical and uniqueness checks compare canonical forms.
pub(crate) fn validate_email(value: &Value) -> Result<String> {
    let email = string_value("email", value)?;
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(CatalogError::invalid_value("email", "is required"));
    }
    if email.contains(' ') {
        return Err(CatalogError::invalid_value("email", "must not contain spaces"));
    }
    if !email_pattern().is_match(&email) {
        return Err(CatalogError::invalid_value(
            "email",
            "format must be like john.doe@example.com",
        ));
    }
    Ok(email)
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

/// A registered user of the catalog.
///
/// Identity: UUID (never changes)
/// Values: names, email, admin flag (change only through `update`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Stable identity (UUID) - NEVER changes
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Canonical form: trimmed and lower-cased.
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Build an account from a raw payload.
    ///
    /// Requires `first_name`, `last_name`, `email`; `is_admin` defaults
    /// to false. Fails atomically: any bad field means no account.
    pub fn new(payload: &Patch) -> Result<Self> {
        let first_name = validate_name("first_name", require(payload, "first_name")?)?;
        let last_name = validate_name("last_name", require(payload, "last_name")?)?;
        let email = validate_email(require(payload, "email")?)?;
        let is_admin = match payload.get("is_admin") {
            Some(value) => bool_value("is_admin", value)?,
            None => false,
        };

        let now = Utc::now();
        Ok(Account {
            id: uuid::Uuid::new_v4().to_string(),
            first_name,
            last_name,
            email,
            is_admin,
            created_at: now,
            updated_at: now,
        })
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Account {
    fn id(&self) -> &str {
        &self.id
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.clone()),
            "first_name" => Some(self.first_name.clone()),
            "last_name" => Some(self.last_name.clone()),
            "email" => Some(self.email.clone()),
            "is_admin" => Some(self.is_admin.to_string()),
            _ => None,
        }
    }

    /// Allow-list: first_name, last_name, email, is_admin.
    fn update(&mut self, patch: &Patch) -> Result<()> {
        let mut first_name = None;
        let mut last_name = None;
        let mut email = None;
        let mut is_admin = None;
        let mut changed = false;

        // Validate every supplied field before writing any of them
        for (key, value) in patch {
            match key.as_str() {
                "first_name" => first_name = Some(validate_name("first_name", value)?),
                "last_name" => last_name = Some(validate_name("last_name", value)?),
                "email" => email = Some(validate_email(value)?),
                "is_admin" => is_admin = Some(bool_value("is_admin", value)?),
                _ => continue,
            }
            changed = true;
        }

        if let Some(first_name) = first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            self.last_name = last_name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(is_admin) = is_admin {
            self.is_admin = is_admin;
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
