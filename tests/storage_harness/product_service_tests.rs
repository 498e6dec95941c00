//! Macro-generated test suite for `ProductService` contract validation.
//!
//! # Generated Tests
//!
//! - `test_find_all`
//! - `test_scope_by_brand_and_category`
//! - `test_restrictions_combine`
//! - `test_empty_restriction_matches_nothing`
//! - `test_variants_come_cheapest_first`
//! - `test_comment_filtering`

/// Generate a `ProductService` conformance test suite.
///
/// `$factory` is re-evaluated for each test.
#[macro_export]
macro_rules! product_service_tests {
    ($factory:expr) => {
        mod product_service_contract_tests {
            use super::*;
            use storefront::prelude::*;

            async fn loaded() -> (impl ProductService, SampleCatalog) {
                let service = $factory;
                let catalog = sample_catalog(Utc::now());
                for p in &catalog.products {
                    service.create(p.clone()).await.unwrap();
                }
                (service, catalog)
            }

            #[tokio::test]
            async fn test_find_all() {
                let (service, catalog) = loaded().await;
                let all = service.find(&ProductQuery::all()).await.unwrap();
                assert_count(&all, catalog.products.len());
            }

            #[tokio::test]
            async fn test_scope_by_brand_and_category() {
                let (service, catalog) = loaded().await;

                let apple = service.find(&ProductQuery::for_brand(catalog.apple.id)).await.unwrap();
                assert_eq!(titles(&apple), vec!["Apple Jacket", "iPhone 15", "iPhone SE"]);

                let jackets = service.find(&ProductQuery::for_category(catalog.jackets.id)).await.unwrap();
                assert_eq!(titles(&jackets), vec!["Apple Jacket", "Summit Parka"]);
            }

            #[tokio::test]
            async fn test_restrictions_combine() {
                let (service, catalog) = loaded().await;

                let query = ProductQuery::for_brand(catalog.apple.id)
                    .restricted(Restriction::Categories(vec![catalog.jackets.id]));
                let found = service.find(&query).await.unwrap();
                assert_eq!(titles(&found), vec!["Apple Jacket"]);

                let query = ProductQuery::all()
                    .restricted(Restriction::Brands(vec![catalog.north_face.id]))
                    .restricted(Restriction::Categories(vec![catalog.phones.id, catalog.jackets.id]));
                let found = service.find(&query).await.unwrap();
                assert_eq!(titles(&found), vec!["Base Camp Phone Case", "Summit Parka"]);
            }

            #[tokio::test]
            async fn test_empty_restriction_matches_nothing() {
                let (service, catalog) = loaded().await;

                let query = ProductQuery::for_category(catalog.phones.id).restricted(Restriction::Brands(vec![]));
                assert!(service.find(&query).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_variants_come_cheapest_first() {
                let service = $factory;
                let catalog = sample_catalog(Utc::now());
                let product = Product::new("Unordered", catalog.apple.id, catalog.phones.id)
                    .with_variant(Variant::new("Large", 30.0))
                    .with_variant(Variant::new("Small", 10.0))
                    .with_variant(Variant::new("Medium", 20.0));
                service.create(product).await.unwrap();

                let found = service.find(&ProductQuery::all()).await.unwrap();
                let names: Vec<_> = found[0].variants.iter().map(|v| v.name.as_str()).collect();
                assert_eq!(names, vec!["Small", "Medium", "Large"]);
            }

            #[tokio::test]
            async fn test_comment_filtering() {
                let (service, catalog) = loaded().await;
                let scoped = ProductQuery::for_brand(catalog.apple.id);

                let confirmed = service.find(&scoped).await.unwrap();
                let se = confirmed.iter().find(|p| p.title == "iPhone SE").unwrap();
                assert!(se.comments.is_empty());

                let everything = service.find(&scoped.with_all_comments()).await.unwrap();
                let se = everything.iter().find(|p| p.title == "iPhone SE").unwrap();
                assert_eq!(se.comments.len(), 1);
            }
        }
    };
}
