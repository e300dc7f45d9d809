use anyhow::Result;
use serde_json::json;

use stay_catalog::{CatalogFacade, Patch};

fn payload(value: serde_json::Value) -> Patch {
    value.as_object().cloned().unwrap_or_default()
}

fn main() -> Result<()> {
    println!("🏡 Stay Catalog - In-Memory Walkthrough");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let facade = CatalogFacade::new();

    // 1. Accounts
    println!("\n👤 Registering accounts...");
    let alice = facade.create_account(&payload(json!({
        "first_name": "Alice",
        "last_name": "Nguyen",
        "email": " ALICE@EXAMPLE.COM "
    })))?;
    println!("✓ {} {} <{}>", alice.first_name, alice.last_name, alice.email);

    let bruno = facade.create_account(&payload(json!({
        "first_name": "Bruno",
        "last_name": "Costa",
        "email": "bruno@example.com",
        "is_admin": true
    })))?;
    println!("✓ {} {} <{}> (admin)", bruno.first_name, bruno.last_name, bruno.email);

    match facade.create_account(&payload(json!({
        "first_name": "Imposter",
        "last_name": "Alice",
        "email": "alice@example.com"
    }))) {
        Err(err) => println!("✓ Duplicate email rejected: {}", err),
        Ok(_) => println!("⚠ duplicate email was accepted"),
    }

    // 2. Amenities
    println!("\n🛁 Registering amenities...");
    let wifi = facade.create_amenity(&payload(json!({ "name": "Wifi" })))?;
    let pool = facade.create_amenity(&payload(json!({ "name": "Pool" })))?;
    let parking = facade.create_amenity(&payload(json!({ "name": "Parking" })))?;
    println!("✓ {} / {} / {}", wifi.name, pool.name, parking.name);

    // 3. Places
    println!("\n🏠 Listing places...");
    let loft = facade.create_place(&payload(json!({
        "title": "Downtown Loft",
        "description": "Bright corner unit near the market",
        "price": 120.0,
        "latitude": 37.7749,
        "longitude": -122.4194,
        "owner_id": alice.id,
        "amenities": [wifi.id, pool.id]
    })))?;
    println!("✓ {} (${}/night, {} amenities)", loft.title, loft.price, loft.amenities.len());

    let cabin = facade.create_place(&payload(json!({
        "title": "Forest Cabin",
        "price": 85,
        "latitude": 45.52,
        "longitude": -122.68,
        "owner_id": bruno.id,
        "amenities": [wifi.id, parking.id]
    })))?;
    println!("✓ {} (${}/night, {} amenities)", cabin.title, cabin.price, cabin.amenities.len());

    match facade.create_place(&payload(json!({
        "title": "Phantom Flat",
        "price": 50,
        "latitude": 0,
        "longitude": 0,
        "owner_id": "no-such-account",
        "amenities": []
    }))) {
        Err(err) => println!("✓ Unknown owner rejected: {}", err),
        Ok(_) => println!("⚠ unknown owner was accepted"),
    }

    // 4. Reviews
    println!("\n⭐ Recording reviews...");
    let review = facade.create_review(&payload(json!({
        "text": "Loved the light and the location.",
        "rating": 5,
        "place_id": loft.id,
        "user_id": bruno.id
    })))?;
    println!("✓ {} stars on {}", review.rating, loft.title);

    facade.create_review(&payload(json!({
        "text": "Quiet, but the wifi dropped at night.",
        "rating": 3,
        "place_id": cabin.id,
        "user_id": alice.id
    })))?;
    println!("✓ 3 stars on {}", cabin.title);

    match facade.create_review(&payload(json!({
        "text": "Off the scale!",
        "rating": 6,
        "place_id": loft.id,
        "user_id": bruno.id
    }))) {
        Err(err) => println!("✓ Out-of-range rating rejected: {}", err),
        Ok(_) => println!("⚠ out-of-range rating was accepted"),
    }

    // 5. Updates
    println!("\n✏️  Applying updates...");
    facade.update_place(&loft.id, &payload(json!({ "price": 135.0 })))?;
    println!("✓ {} repriced to $135/night", loft.title);
    facade.update_account(&alice.id, &payload(json!({ "first_name": "Alicia" })))?;
    let alice = facade
        .get_account(&alice.id)
        .ok_or_else(|| anyhow::anyhow!("account vanished"))?;
    println!("✓ Account renamed to {}", alice.first_name);

    // 6. Resolved view
    println!("\n🔍 Resolving {}...", loft.title);
    if let Some(view) = facade.get_place(&loft.id) {
        if let Some(owner) = &view.owner {
            println!("✓ Owner: {} {} <{}>", owner.first_name, owner.last_name, owner.email);
        }
        let names: Vec<&str> = view.amenities.iter().map(|a| a.name.as_str()).collect();
        println!("✓ Amenities: {}", names.join(", "));
        println!("✓ Price: ${}/night", view.price);
    }
    if let Some(summaries) = facade.get_reviews_by_place(&loft.id) {
        for summary in &summaries {
            println!("   ⭐ {}: {}", summary.rating, summary.text);
        }
    }

    // 7. Cascade delete
    println!("\n🗑️  Deleting the loft review...");
    facade.delete_review(&review.id)?;
    let remaining = facade
        .get_reviews_by_place(&loft.id)
        .map(|summaries| summaries.len())
        .unwrap_or(0);
    println!("✓ Review removed, {} left on {}", remaining, loft.title);

    // Summary
    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("🎉 Walkthrough complete!");
    println!("✓ Accounts:  {}", facade.get_all_accounts().len());
    println!("✓ Amenities: {}", facade.get_all_amenities().len());
    println!("✓ Places:    {}", facade.get_all_places().len());
    println!("✓ Reviews:   {}", facade.get_all_reviews().len());

    Ok(())
}
