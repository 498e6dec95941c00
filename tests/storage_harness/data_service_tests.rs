//! Macro-generated test suite for `DataService<Brand>` contract validation.
//!
//! Brands stand in for every slug-addressed collection; categories go
//! through the same generic code paths.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use storefront::storage::InMemoryDataService;
//!
//! data_service_tests!(InMemoryDataService::<Brand>::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_create_and_find_by_id`
//! - `test_find_one_missing`
//! - `test_find_by_slug_ignores_case`
//! - `test_slug_must_match_whole_name`
//! - `test_find_orders_newest_first`
//! - `test_replace_returns_previous`
//! - `test_replace_missing_returns_none`
//! - `test_delete_returns_removed`
//! - `test_concurrent_access`

/// Generate a `DataService<Brand>` conformance test suite.
///
/// `$factory` is re-evaluated for each test. For the concurrent access test
/// the service must also be `Clone + 'static`.
#[macro_export]
macro_rules! data_service_tests {
    ($factory:expr) => {
        mod data_service_contract_tests {
            use super::*;
            use storefront::prelude::*;

            #[tokio::test]
            async fn test_create_and_find_by_id() {
                let service = $factory;
                let apple = brand("Apple");

                let created = service.create(apple.clone()).await.unwrap();
                assert_eq!(created, apple);

                let found = service.find_one(&Lookup::id(apple.id)).await.unwrap();
                assert_eq!(found, Some(apple));
            }

            #[tokio::test]
            async fn test_find_one_missing() {
                let service = $factory;

                assert!(service.find_one(&Lookup::id(Uuid::new_v4())).await.unwrap().is_none());
                assert!(service.find_one(&Lookup::slug("nothing")).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_find_by_slug_ignores_case() {
                let service = $factory;
                let north_face = service.create(brand("North Face")).await.unwrap();
                service.create(brand("Apple")).await.unwrap();

                for slug in ["north-face", "North-Face", "NORTH-FACE"] {
                    let found = service.find_one(&Lookup::slug(slug)).await.unwrap();
                    assert_eq!(found.map(|b| b.id), Some(north_face.id), "slug {slug}");
                }
            }

            #[tokio::test]
            async fn test_slug_must_match_whole_name() {
                let service = $factory;
                service.create(brand("North Face Kids")).await.unwrap();

                assert!(service.find_one(&Lookup::slug("north-face")).await.unwrap().is_none());
                assert!(service.find_one(&Lookup::slug("face-kids")).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_find_orders_newest_first() {
                let service = $factory;
                service.create(brand_aged("Oldest", 3)).await.unwrap();
                service.create(brand_aged("Newest", 0)).await.unwrap();
                service.create(brand_aged("Middle", 1)).await.unwrap();

                let all = service.find(&CollectionQuery::newest_first()).await.unwrap();
                let names: Vec<_> = all.iter().map(|b| b.english_name.as_str()).collect();
                assert_eq!(names, vec!["Newest", "Middle", "Oldest"]);
            }

            #[tokio::test]
            async fn test_replace_returns_previous() {
                let service = $factory;
                let apple = service.create(brand("Apple")).await.unwrap();

                let mut edited = apple.clone();
                edited.english_name = "Apple Inc".to_string();
                edited.logo = "apple-2.png".to_string();

                let previous = service.replace(&apple.id, edited.clone()).await.unwrap();
                assert_eq!(previous, Some(apple.clone()));

                let stored = service.find_one(&Lookup::id(apple.id)).await.unwrap();
                assert_eq!(stored, Some(edited));
                assert!(service.find_one(&Lookup::slug("apple-inc")).await.unwrap().is_some());
            }

            #[tokio::test]
            async fn test_replace_missing_returns_none() {
                let service = $factory;
                let ghost = brand("Ghost");

                let previous = service.replace(&ghost.id, ghost.clone()).await.unwrap();
                assert!(previous.is_none());
                assert!(service.find(&CollectionQuery::default()).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_returns_removed() {
                let service = $factory;
                let apple = service.create(brand("Apple")).await.unwrap();

                let removed = service.delete(&apple.id).await.unwrap();
                assert_eq!(removed.map(|b| b.logo), Some(apple.logo.clone()));
                assert!(service.find_one(&Lookup::id(apple.id)).await.unwrap().is_none());
                assert!(service.delete(&apple.id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_concurrent_access() {
                let service = $factory;
                let handles: Vec<_> = (0..10)
                    .map(|i| {
                        let service = service.clone();
                        tokio::spawn(async move { service.create(brand(&format!("Brand {i}"))).await.unwrap() })
                    })
                    .collect();

                for handle in handles {
                    handle.await.unwrap();
                }

                let all = service.find(&CollectionQuery::default()).await.unwrap();
                assert_count(&all, 10);
            }
        }
    };
}
