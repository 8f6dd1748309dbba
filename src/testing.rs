// Shared fixtures and storage doubles for unit tests.

use chrono::{DateTime, TimeZone, Utc};
use std::future::Future;
use std::pin::Pin;

use crate::error::StoreError;
use crate::memory_store::InMemoryStore;
use crate::models::{Brand, Car, CarImage, Location, Seo};
use crate::store::{MockBrandRepository, MockCarRepository};
use crate::vocabulary::{BodyType, FuelType, Transmission};

fn brand(slug: &str, name: &str, is_active: bool) -> Brand {
    Brand {
        id: format!("brand-{}", slug),
        name: name.to_string(),
        slug: slug.to_string(),
        is_active,
        is_deleted: false,
    }
}

// Toyota and Honda are live; "retired" is an inactive brand.
pub fn brands() -> Vec<Brand> {
    vec![
        brand("toyota", "Toyota", true),
        brand("honda", "Honda", true),
        brand("retired", "Retired Motors", false),
    ]
}

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0).unwrap()
}

// Visible, unsold petrol sedan with overridable basics.
pub fn car(id: &str, brand_id: &str, price: i64) -> Car {
    Car {
        id: id.to_string(),
        slug: format!("car-{}", id),
        name: format!("Car {}", id),
        description: String::new(),
        brand: brand_id.to_string(),
        price,
        year: 2020,
        kms_driven: 30_000,
        fuel_type: FuelType::Petrol,
        transmission: Transmission::Manual,
        body_type: BodyType::Sedan,
        color: Some("White".into()),
        owners: 1,
        location: Location { city: "Pune".into(), state: Some("Maharashtra".into()) },
        features: Vec::new(),
        images: vec![CarImage { url: format!("{}.jpg", id), is_primary: true }],
        slider_videos: vec!["slider.mp4".into()],
        reel_videos: Vec::new(),
        sections: Vec::new(),
        seo: Seo::default(),
        is_active: true,
        is_deleted: false,
        is_sold: false,
        is_featured: false,
        created_at: at(1),
    }
}

// (Toyota, Petrol, 2020, 500000), (Honda, Diesel, 2019, 700000),
// (Toyota, Diesel, 2021, 900000).
pub fn three_cars() -> Vec<Car> {
    let mut corolla = car("corolla", "brand-toyota", 500_000);
    corolla.slug = "toyota-corolla-2020".into();
    corolla.name = "Toyota Corolla".into();
    corolla.created_at = at(2);

    let mut city = car("city", "brand-honda", 700_000);
    city.slug = "honda-city-2019".into();
    city.name = "Honda City".into();
    city.year = 2019;
    city.fuel_type = FuelType::Diesel;
    city.kms_driven = 55_000;
    city.location = Location { city: "Mumbai".into(), state: None };
    city.created_at = at(3);

    let mut fortuner = car("fortuner", "brand-toyota", 900_000);
    fortuner.slug = "toyota-fortuner-2021".into();
    fortuner.name = "Toyota Fortuner".into();
    fortuner.year = 2021;
    fortuner.fuel_type = FuelType::Diesel;
    fortuner.transmission = Transmission::Automatic;
    fortuner.body_type = BodyType::Suv;
    fortuner.kms_driven = 15_000;
    fortuner.features = vec!["Sunroof".into(), "Cruise control".into()];
    fortuner.location = Location { city: "Delhi".into(), state: None };
    fortuner.created_at = at(4);

    vec![corolla, city, fortuner]
}

pub fn seeded_store() -> InMemoryStore {
    InMemoryStore::new(three_cars(), brands())
}

type Reply<T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send>>;

fn reply<T: Send + 'static>(result: Result<T, StoreError>) -> Reply<T> {
    Box::pin(std::future::ready(result))
}

fn unavailable<T: Send + 'static>() -> Reply<T> {
    reply(Err(StoreError::Unavailable("connection refused".into())))
}

fn stall<T: Send + 'static>() -> Reply<T> {
    Box::pin(std::future::pending::<Result<T, StoreError>>())
}

fn active_ids(slugs: &[String]) -> Vec<String> {
    brands()
        .into_iter()
        .filter(|b| b.is_active && !b.is_deleted && slugs.contains(&b.slug))
        .map(|b| b.id)
        .collect()
}

fn by_ids(ids: &[String]) -> Vec<Brand> {
    brands().into_iter().filter(|b| ids.contains(&b.id)).collect()
}

// Brand repository answering from `brands()`.
pub fn brand_lookup() -> MockBrandRepository {
    let mut repo = MockBrandRepository::new();
    repo.expect_find_active_ids_by_slugs()
        .returning(|slugs| reply(Ok(active_ids(slugs))));
    repo.expect_find_by_ids().returning(|ids| reply(Ok(by_ids(ids))));
    repo
}

// Slug lookups must happen exactly `times` times.
pub fn brand_lookup_times(times: usize) -> MockBrandRepository {
    let mut repo = MockBrandRepository::new();
    repo.expect_find_active_ids_by_slugs()
        .times(times)
        .returning(|slugs| reply(Ok(active_ids(slugs))));
    repo
}

// Slug lookups work, the stats join by id fails.
pub fn brand_join_failing() -> MockBrandRepository {
    let mut repo = MockBrandRepository::new();
    repo.expect_find_active_ids_by_slugs()
        .returning(|slugs| reply(Ok(active_ids(slugs))));
    repo.expect_find_by_ids().returning(|_| unavailable());
    repo
}

// Car repository whose every call fails.
pub fn failing_cars() -> MockCarRepository {
    let mut repo = MockCarRepository::new();
    repo.expect_find().returning(|_, _, _| unavailable());
    repo.expect_count().returning(|_| unavailable());
    repo.expect_group_count().returning(|_, _| unavailable());
    repo.expect_bounds().returning(|_, _| unavailable());
    repo.expect_find_by_slug().returning(|_, _| unavailable());
    repo
}

// Car repository whose listing calls never complete.
pub fn stalled_cars() -> MockCarRepository {
    let mut repo = MockCarRepository::new();
    repo.expect_find().returning(|_, _, _| stall());
    repo.expect_count().returning(|_| stall());
    repo.expect_group_count().returning(|_, _| stall());
    repo.expect_bounds().returning(|_, _| stall());
    repo
}
