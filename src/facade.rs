// 🧭 Integrity Facade - The only component that crosses entity boundaries
//
// Owns the four repositories behind one lock and enforces everything a
// single entity cannot see on its own:
// - uniqueness (account email, amenity name), checked against canonical
//   forms under the same lock as the insert
// - reference resolution (place→owner, place→amenities, review→place/user)
//   before any storage mutation
// - cascades (a review attaches to / detaches from its place's review list)
// - read views that resolve stored ids back to snapshots, skipping
//   references that no longer resolve instead of failing the whole read
//
// Every operation is synchronous and runs to completion under the lock,
// so a check-then-act sequence never observes a concurrent mutation.

use serde::Serialize;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

use crate::entities::{account, amenity, place, review};
use crate::entities::{require, Account, Amenity, Patch, Place, Review};
use crate::error::{CatalogError, EntityKind, Result};
use crate::repository::InMemoryRepository;

// ============================================================================
// READ VIEWS
// ============================================================================

/// Owner snapshot embedded in a place view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Amenity snapshot embedded in a place view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmenityRef {
    pub id: String,
    pub name: String,
}

/// A place with its references resolved for reading.
///
/// `owner` is None when the stored owner id no longer resolves (should
/// not happen under normal invariants); amenities that no longer
/// resolve are skipped rather than failing the read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner: Option<OwnerSummary>,
    pub amenities: Vec<AmenityRef>,
}

/// Review snapshot returned by `get_reviews_by_place`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub id: String,
    pub text: String,
    pub rating: i64,
}

// ============================================================================
// CATALOG FACADE
// ============================================================================

struct CatalogState {
    accounts: InMemoryRepository<Account>,
    amenities: InMemoryRepository<Amenity>,
    places: InMemoryRepository<Place>,
    reviews: InMemoryRepository<Review>,
}

/// Shared catalog state plus every cross-entity rule.
///
/// Constructed once at service start and handed to the transport by
/// cloning: clones are cheap and share the same underlying state.
#[derive(Clone)]
pub struct CatalogFacade {
    state: Arc<RwLock<CatalogState>>,
}

impl CatalogFacade {
    /// Create a facade with empty repositories.
    pub fn new() -> Self {
        CatalogFacade {
            state: Arc::new(RwLock::new(CatalogState {
                accounts: InMemoryRepository::new(),
                amenities: InMemoryRepository::new(),
                places: InMemoryRepository::new(),
                reviews: InMemoryRepository::new(),
            })),
        }
    }

    // ========================================================================
    // ACCOUNTS
    // ========================================================================

    /// Create an account. The normalized email must not be registered yet.
    pub fn create_account(&self, payload: &Patch) -> Result<Account> {
        let account = Account::new(payload)?;

        let mut state = self.state.write().unwrap();
        if state
            .accounts
            .get_by_attribute("email", &account.email)
            .is_some()
        {
            return Err(CatalogError::conflict("email", account.email));
        }
        state.accounts.add(account.clone());
        info!("Created account: {} <{}>", account.id, account.email);
        Ok(account)
    }

    /// Get an account by id, or None.
    pub fn get_account(&self, id: &str) -> Option<Account> {
        let state = self.state.read().unwrap();
        state.accounts.get(id)
    }

    /// Look an account up by its canonical (trimmed, lower-cased) email.
    pub fn get_account_by_email(&self, email: &str) -> Option<Account> {
        let state = self.state.read().unwrap();
        state.accounts.get_by_attribute("email", email)
    }

    /// All accounts in insertion order.
    pub fn get_all_accounts(&self) -> Vec<Account> {
        let state = self.state.read().unwrap();
        state.accounts.get_all()
    }

    /// Update an account. A supplied email must normalize to something
    /// not registered to any other account.
    pub fn update_account(&self, id: &str, payload: &Patch) -> Result<()> {
        let mut state = self.state.write().unwrap();
        if state.accounts.get(id).is_none() {
            return Err(CatalogError::not_found(EntityKind::Account, id));
        }

        if let Some(value) = payload.get("email") {
            let email = account::validate_email(value)?;
            if let Some(existing) = state.accounts.get_by_attribute("email", &email) {
                if existing.id != id {
                    return Err(CatalogError::conflict("email", email));
                }
            }
        }

        state.accounts.update(id, payload)?;
        info!("Updated account: {}", id);
        Ok(())
    }

    // ========================================================================
    // AMENITIES
    // ========================================================================

    /// Create an amenity. The trimmed name must not be registered yet.
    pub fn create_amenity(&self, payload: &Patch) -> Result<Amenity> {
        let amenity = Amenity::new(payload)?;

        let mut state = self.state.write().unwrap();
        if state
            .amenities
            .get_by_attribute("name", &amenity.name)
            .is_some()
        {
            return Err(CatalogError::conflict("name", amenity.name));
        }
        state.amenities.add(amenity.clone());
        info!("Created amenity: {} ({})", amenity.name, amenity.id);
        Ok(amenity)
    }

    /// Get an amenity by id, or None.
    pub fn get_amenity(&self, id: &str) -> Option<Amenity> {
        let state = self.state.read().unwrap();
        state.amenities.get(id)
    }

    /// All amenities in insertion order.
    pub fn get_all_amenities(&self) -> Vec<Amenity> {
        let state = self.state.read().unwrap();
        state.amenities.get_all()
    }

    /// Update an amenity. A supplied name must not belong to another one.
    pub fn update_amenity(&self, id: &str, payload: &Patch) -> Result<()> {
        let mut state = self.state.write().unwrap();
        if state.amenities.get(id).is_none() {
            return Err(CatalogError::not_found(EntityKind::Amenity, id));
        }

        if let Some(value) = payload.get("name") {
            let name = amenity::validate_name(value)?;
            if let Some(existing) = state.amenities.get_by_attribute("name", &name) {
                if existing.id != id {
                    return Err(CatalogError::conflict("name", name));
                }
            }
        }

        state.amenities.update(id, payload)?;
        info!("Updated amenity: {}", id);
        Ok(())
    }

    // ========================================================================
    // PLACES
    // ========================================================================

    /// Create a place. `owner_id` and every amenity id must resolve
    /// before anything is stored; amenity order is preserved.
    pub fn create_place(&self, payload: &Patch) -> Result<Place> {
        let owner_id = place::validate_owner_id(require(payload, "owner_id")?)?;
        let amenity_ids = place::validate_amenity_ids(require(payload, "amenities")?)?;

        let mut state = self.state.write().unwrap();
        if state.accounts.get(&owner_id).is_none() {
            return Err(CatalogError::reference_not_found(EntityKind::Account, owner_id));
        }
        for amenity_id in &amenity_ids {
            if state.amenities.get(amenity_id).is_none() {
                return Err(CatalogError::reference_not_found(
                    EntityKind::Amenity,
                    amenity_id.clone(),
                ));
            }
        }

        let place = Place::new(payload, owner_id, amenity_ids)?;
        state.places.add(place.clone());
        info!("Created place: {} ({})", place.title, place.id);
        Ok(place)
    }

    /// Get a place with its owner and amenities resolved, or None.
    pub fn get_place(&self, id: &str) -> Option<PlaceView> {
        let state = self.state.read().unwrap();
        let place = state.places.get(id)?;

        let owner = state.accounts.get(&place.owner_id).map(|account| OwnerSummary {
            id: account.id,
            first_name: account.first_name,
            last_name: account.last_name,
            email: account.email,
        });
        if owner.is_none() {
            warn!("Place {} owner {} no longer resolves", place.id, place.owner_id);
        }

        let mut amenities = Vec::with_capacity(place.amenities.len());
        for amenity_id in &place.amenities {
            match state.amenities.get(amenity_id) {
                Some(amenity) => amenities.push(AmenityRef {
                    id: amenity.id,
                    name: amenity.name,
                }),
                None => warn!("Place {} amenity {} no longer resolves", place.id, amenity_id),
            }
        }

        Some(PlaceView {
            id: place.id,
            title: place.title,
            description: place.description,
            price: place.price,
            latitude: place.latitude,
            longitude: place.longitude,
            owner,
            amenities,
        })
    }

    /// All places in insertion order, relations unresolved.
    pub fn get_all_places(&self) -> Vec<Place> {
        let state = self.state.read().unwrap();
        state.places.get_all()
    }

    /// Update a place. A supplied `owner_id` / `amenities` must fully
    /// resolve or the whole call fails before any field is written.
    pub fn update_place(&self, id: &str, payload: &Patch) -> Result<()> {
        let mut state = self.state.write().unwrap();
        if state.places.get(id).is_none() {
            return Err(CatalogError::not_found(EntityKind::Place, id));
        }

        if let Some(value) = payload.get("owner_id") {
            let owner_id = place::validate_owner_id(value)?;
            if state.accounts.get(&owner_id).is_none() {
                return Err(CatalogError::reference_not_found(EntityKind::Account, owner_id));
            }
        }
        if let Some(value) = payload.get("amenities") {
            let amenity_ids = place::validate_amenity_ids(value)?;
            for amenity_id in &amenity_ids {
                if state.amenities.get(amenity_id).is_none() {
                    return Err(CatalogError::reference_not_found(
                        EntityKind::Amenity,
                        amenity_id.clone(),
                    ));
                }
            }
        }

        state.places.update(id, payload)?;
        info!("Updated place: {}", id);
        Ok(())
    }

    // ========================================================================
    // REVIEWS
    // ========================================================================

    /// Create a review. The place is resolved first, then the user; on
    /// success the review id is appended to the place's review list and
    /// the place's `updated_at` advances.
    pub fn create_review(&self, payload: &Patch) -> Result<Review> {
        let place_id = review::validate_place_id(require(payload, "place_id")?)?;
        let user_id = review::validate_user_id(require(payload, "user_id")?)?;

        let mut state = self.state.write().unwrap();
        let mut place = match state.places.get(&place_id) {
            Some(place) => place,
            None => return Err(CatalogError::reference_not_found(EntityKind::Place, place_id)),
        };
        if state.accounts.get(&user_id).is_none() {
            return Err(CatalogError::reference_not_found(EntityKind::Account, user_id));
        }

        let review = Review::new(payload, place_id, user_id)?;
        place.attach_review(&review.id);
        state.places.add(place);
        state.reviews.add(review.clone());
        info!("Created review: {} on place {}", review.id, review.place_id);
        Ok(review)
    }

    /// Get a review by id, or None.
    pub fn get_review(&self, id: &str) -> Option<Review> {
        let state = self.state.read().unwrap();
        state.reviews.get(id)
    }

    /// All reviews in insertion order.
    pub fn get_all_reviews(&self) -> Vec<Review> {
        let state = self.state.read().unwrap();
        state.reviews.get_all()
    }

    /// Update a review. Only `text` and `rating` can change.
    pub fn update_review(&self, id: &str, payload: &Patch) -> Result<()> {
        let mut state = self.state.write().unwrap();
        if state.reviews.get(id).is_none() {
            return Err(CatalogError::not_found(EntityKind::Review, id));
        }
        state.reviews.update(id, payload)?;
        info!("Updated review: {}", id);
        Ok(())
    }

    /// Delete a review and detach its id from the owning place's review
    /// list, advancing the place's `updated_at`.
    pub fn delete_review(&self, id: &str) -> Result<()> {
        let mut state = self.state.write().unwrap();
        let review = match state.reviews.get(id) {
            Some(review) => review,
            None => return Err(CatalogError::not_found(EntityKind::Review, id)),
        };

        state.reviews.delete(id);
        match state.places.get(&review.place_id) {
            Some(mut place) => {
                if place.detach_review(id) {
                    state.places.add(place);
                }
            }
            None => warn!("Review {} pointed at missing place {}", id, review.place_id),
        }
        info!("Deleted review: {}", id);
        Ok(())
    }

    /// Reviews recorded on a place, in attach order. None when the place
    /// does not exist; review ids that no longer resolve are skipped.
    pub fn get_reviews_by_place(&self, place_id: &str) -> Option<Vec<ReviewSummary>> {
        let state = self.state.read().unwrap();
        let place = state.places.get(place_id)?;

        let mut summaries = Vec::with_capacity(place.reviews.len());
        for review_id in &place.reviews {
            match state.reviews.get(review_id) {
                Some(review) => summaries.push(ReviewSummary {
                    id: review.id,
                    text: review.text,
                    rating: review.rating,
                }),
                None => warn!("Place {} lists unknown review {}", place.id, review_id),
            }
        }
        Some(summaries)
    }
}

impl Default for CatalogFacade {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
