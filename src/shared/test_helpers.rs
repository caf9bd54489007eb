//! Fixture builders shared by unit tests.

#![cfg(test)]

use chrono::Utc;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Sentence, Words};
use fake::faker::name::en::Name;
use fake::{Fake, Faker};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::features::auth::model::IdentityUser;
use crate::features::cart::models::CartLine;
use crate::features::collections::models::Collection;
use crate::features::products::models::Product;
use crate::features::profiles::models::Profile;

fn title() -> String {
    let words: Vec<String> = Words(2..4).fake();
    words.join(" ")
}

fn price() -> Decimal {
    Decimal::new((500..50_000).fake::<i64>(), 2)
}

pub fn profile_fixture(id: &str, is_admin: bool) -> Profile {
    Profile {
        id: id.to_string(),
        email: Some(SafeEmail().fake()),
        full_name: Some(Name().fake()),
        is_admin,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn identity_fixture(id: &str, is_suspended: bool) -> IdentityUser {
    IdentityUser {
        id: id.to_string(),
        email: Some(SafeEmail().fake()),
        name: Some(Name().fake()),
        is_suspended,
    }
}

/// Active, in-stock product outside any collection or category
pub fn product_fixture() -> Product {
    Product {
        id: Faker.fake::<Uuid>(),
        sku: format!("SKU-{}", (10_000..99_999).fake::<u32>()),
        name_en: title(),
        name_pt: title(),
        name_es: title(),
        name_fr: title(),
        description_en: Some(Sentence(5..12).fake()),
        description_pt: None,
        description_es: None,
        description_fr: None,
        price: price(),
        stock_quantity: (10..100).fake(),
        images: vec![format!("/images/{}.jpg", Faker.fake::<Uuid>())],
        is_active: true,
        is_featured: false,
        collection_id: None,
        collection_slug: None,
        category_id: None,
        category_slug: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn collection_fixture(slug: &str) -> Collection {
    let name: String = CompanyName().fake();

    Collection {
        id: Faker.fake::<Uuid>(),
        slug: slug.to_string(),
        name_en: name.clone(),
        name_pt: name.clone(),
        name_es: name.clone(),
        name_fr: name,
        description_en: Some(Sentence(5..12).fake()),
        description_pt: None,
        description_es: None,
        description_fr: None,
        story_en: None,
        story_pt: None,
        story_es: None,
        story_fr: None,
        hero_image: None,
        is_active: true,
        display_order: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn cart_line_fixture(id: Uuid, quantity: i32, stock_quantity: i32) -> CartLine {
    CartLine {
        id,
        product_id: Faker.fake::<Uuid>(),
        quantity,
        sku: format!("SKU-{}", (10_000..99_999).fake::<u32>()),
        name_en: title(),
        name_pt: title(),
        name_es: title(),
        name_fr: title(),
        price: price(),
        stock_quantity,
        images: Vec::new(),
        is_active: true,
        created_at: Utc::now(),
    }
}
