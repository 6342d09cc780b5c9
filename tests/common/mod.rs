#![allow(dead_code)]

use std::io::Write;

use httpmock::MockServer;
use petstore_client::model::{Category, Order, OrderStatus, Pet, PetStatus, Tag, User};
use petstore_client::Configuration;
use rand::Rng;
use tempfile::{NamedTempFile, TempPath};

pub const API_KEY: &str = "integration-key";

pub fn config_for(server: &MockServer) -> Configuration {
    Configuration {
        base_url: server.url("/v2"),
        api_key: API_KEY.to_string(),
        ..Configuration::default()
    }
}

pub fn create_file(contents: &str) -> TempPath {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.into_temp_path()
}

pub fn generate_valid_id() -> i64 {
    rand::rng().random_range(1..i64::from(i32::MAX))
}

pub fn generate_pet() -> Pet {
    Pet {
        id: Some(generate_valid_id()),
        category: Some(Category::new(generate_valid_id(), "Dogs")),
        name: Some(format!("Pet {}", generate_valid_id())),
        photo_urls: Some(vec!["https://example.com/photo.png".to_string()]),
        tags: Some(vec![Tag::new(1, "tag1"), Tag::new(2, "tag2")]),
        status: Some(PetStatus::Available),
    }
}

pub fn generate_order(pet_id: i64) -> Order {
    Order {
        id: Some(generate_valid_id()),
        pet_id: Some(pet_id),
        quantity: Some(rand::rng().random_range(1..10)),
        status: Some(OrderStatus::Placed),
        complete: Some(false),
        ..Order::default()
    }
}

pub fn generate_user() -> User {
    let n = generate_valid_id();
    User {
        id: Some(n),
        username: Some(format!("user{}", n)),
        first_name: Some("Jane".to_string()),
        last_name: Some("Doe".to_string()),
        email: Some(format!("user{}@example.com", n)),
        password: Some("secret".to_string()),
        phone: Some("555-0100".to_string()),
        user_status: Some(1),
    }
}
