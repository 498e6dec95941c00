//! REST integration test macro for storage backends.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that drive
//! the full router: multipart form → handler → services → upload directory
//! → JSON response.

/// Generate a REST integration test suite for a storage backend.
///
/// `$factory` must produce a `(brands, categories, products)` tuple of
/// services. It is re-evaluated for each test.
///
/// # Generated Tests
///
/// ## Writes
/// - `test_rest_create_brand`: POST 201, logo written and served
/// - `test_rest_create_without_logo`: POST 400, nothing written
/// - `test_rest_create_invalid_fields`: POST 422, nothing written
/// - `test_rest_create_rejects_non_image`: POST 415
/// - `test_rest_update_replaces_logo`: PUT 200, old logo removed
/// - `test_rest_update_keeps_logo`: PUT without a file keeps the old logo
/// - `test_rest_update_unknown_id`: PUT 404, new logo not kept
/// - `test_rest_delete_removes_logo`: DELETE 200, then GET 404
/// - `test_rest_invalid_id`: PUT/DELETE with garbage id → 400
///
/// ## Reads
/// - `test_rest_list_pagination`
/// - `test_rest_list_page_out_of_range`
/// - `test_rest_brand_listing`
/// - `test_rest_brand_listing_filters`
/// - `test_rest_category_listing_restricted`
/// - `test_rest_products_listing`
/// - `test_rest_unknown_slug`
/// - `test_rest_invalid_query`
#[macro_export]
macro_rules! rest_integration_tests {
    ($factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use axum_test::multipart::{MultipartForm, Part};
            use serde_json::Value;
            use std::path::{Path, PathBuf};
            use storefront::prelude::*;
            use tempfile::TempDir;

            const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

            struct TestApp {
                server: TestServer,
                uploads: TempDir,
                catalog: SampleCatalog,
            }

            impl TestApp {
                fn brand_dir(&self) -> PathBuf {
                    self.uploads.path().join("brands")
                }

                fn category_dir(&self) -> PathBuf {
                    self.uploads.path().join("images/categories")
                }
            }

            async fn make_app(seeded: bool) -> TestApp {
                let (brands, categories, products) = $factory;
                let catalog = sample_catalog(Utc::now());
                if seeded {
                    catalog.load_into(&brands, &categories, &products).await;
                }

                let uploads = TempDir::new().unwrap();
                let mut config = CatalogConfig::default();
                config.uploads.root = uploads.path().to_path_buf();

                let router = ServerBuilder::new()
                    .with_config(config)
                    .with_brand_service(brands)
                    .with_category_service(categories)
                    .with_product_service(products)
                    .build()
                    .unwrap();

                TestApp {
                    server: TestServer::new(router),
                    uploads,
                    catalog,
                }
            }

            fn logo() -> Part {
                Part::bytes(PNG.to_vec()).file_name("logo.png").mime_type("image/png")
            }

            fn brand_form(name: &str, english_name: &str) -> MultipartForm {
                MultipartForm::new()
                    .add_text("name", name.to_string())
                    .add_text("englishName", english_name.to_string())
            }

            fn files_in(dir: &Path) -> Vec<String> {
                let Ok(entries) = std::fs::read_dir(dir) else {
                    return Vec::new();
                };
                let mut names: Vec<String> = entries
                    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                    .collect();
                names.sort();
                names
            }

            fn product_titles(products: &Value) -> Vec<String> {
                products
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|p| p["title"].as_str().unwrap().to_string())
                    .collect()
            }

            async fn brand_by_slug(app: &TestApp, slug: &str) -> Value {
                let response = app.server.get(&format!("/brands/{slug}")).await;
                response.assert_status_ok();
                response.json()
            }

            // ==============================================================
            // Writes
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create_brand() {
                let app = make_app(false).await;

                let response = app
                    .server
                    .post("/brands")
                    .multipart(brand_form("اپل", "Apple").add_part("logo", logo()))
                    .await;

                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                assert_eq!(body["message"], "The brand has been successfully added.");

                let files = files_in(&app.brand_dir());
                assert_eq!(files.len(), 1);
                assert!(files[0].ends_with(".png"));

                let brand = brand_by_slug(&app, "apple").await;
                assert_eq!(brand["englishName"], "Apple");
                assert_eq!(brand["logo"], files[0].as_str());
                assert_eq!(brand["totalProducts"], 0);

                let served = app.server.get(&format!("/public/brands/{}", files[0])).await;
                served.assert_status_ok();
                assert_eq!(&served.as_bytes()[..], PNG);
            }

            #[tokio::test]
            async fn test_rest_create_without_logo() {
                let app = make_app(false).await;

                let response = app.server.post("/brands").multipart(brand_form("اپل", "Apple")).await;

                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["code"], "VALIDATION_ERROR");
                assert_eq!(body["details"]["field"], "logo");
                assert!(files_in(&app.brand_dir()).is_empty());
            }

            #[tokio::test]
            async fn test_rest_create_invalid_fields() {
                let app = make_app(false).await;

                let response = app
                    .server
                    .post("/categories")
                    .multipart(
                        MultipartForm::new()
                            .add_text("title", "")
                            .add_text("englishTitle", "موبایل")
                            .add_part("logo", logo()),
                    )
                    .await;

                response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
                let body: Value = response.json();
                let fields: Vec<&str> = body["details"]["fields"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|f| f["field"].as_str().unwrap())
                    .collect();
                assert!(fields.contains(&"title"));
                assert!(fields.contains(&"englishTitle"));
                assert!(files_in(&app.category_dir()).is_empty());
            }

            #[tokio::test]
            async fn test_rest_create_rejects_non_image() {
                let app = make_app(false).await;

                let text = Part::bytes(b"hello".to_vec()).file_name("logo.txt").mime_type("text/plain");
                let response = app
                    .server
                    .post("/brands")
                    .multipart(brand_form("اپل", "Apple").add_part("logo", text))
                    .await;

                response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
                assert!(files_in(&app.brand_dir()).is_empty());
            }

            #[tokio::test]
            async fn test_rest_update_replaces_logo() {
                let app = make_app(false).await;
                app.server
                    .post("/brands")
                    .multipart(brand_form("اپل", "Apple").add_part("logo", logo()))
                    .await
                    .assert_status(StatusCode::CREATED);
                let before = brand_by_slug(&app, "apple").await;
                let id = before["id"].as_str().unwrap();

                let response = app
                    .server
                    .put(&format!("/brands/{id}"))
                    .multipart(brand_form("اپل", "Apple Inc").add_part("logo", logo()))
                    .await;

                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["message"], "The brand has been successfully edited.");

                let after = brand_by_slug(&app, "apple-inc").await;
                assert_eq!(after["id"], id);
                assert_ne!(after["logo"], before["logo"]);
                assert_eq!(files_in(&app.brand_dir()), vec![after["logo"].as_str().unwrap().to_string()]);
            }

            #[tokio::test]
            async fn test_rest_update_keeps_logo() {
                let app = make_app(false).await;
                app.server
                    .post("/brands")
                    .multipart(brand_form("اپل", "Apple").add_part("logo", logo()))
                    .await
                    .assert_status(StatusCode::CREATED);
                let before = brand_by_slug(&app, "apple").await;
                let id = before["id"].as_str().unwrap();

                app.server
                    .put(&format!("/brands/{id}"))
                    .multipart(brand_form("اپل جدید", "Apple"))
                    .await
                    .assert_status_ok();

                let after = brand_by_slug(&app, "apple").await;
                assert_eq!(after["name"], "اپل جدید");
                assert_eq!(after["logo"], before["logo"]);
                assert_eq!(files_in(&app.brand_dir()).len(), 1);
            }

            #[tokio::test]
            async fn test_rest_update_unknown_id() {
                let app = make_app(false).await;

                let response = app
                    .server
                    .put(&format!("/categories/{}", Uuid::new_v4()))
                    .multipart(
                        MultipartForm::new()
                            .add_text("title", "کفش")
                            .add_text("englishTitle", "Shoes")
                            .add_part("logo", logo()),
                    )
                    .await;

                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_eq!(body["code"], "ENTITY_NOT_FOUND");
                assert!(files_in(&app.category_dir()).is_empty());
            }

            #[tokio::test]
            async fn test_rest_delete_removes_logo() {
                let app = make_app(false).await;
                app.server
                    .post("/categories")
                    .multipart(
                        MultipartForm::new()
                            .add_text("title", "کفش")
                            .add_text("englishTitle", "Shoes")
                            .add_part("logo", logo()),
                    )
                    .await
                    .assert_status(StatusCode::CREATED);
                assert_eq!(files_in(&app.category_dir()).len(), 1);

                let listed: Value = app.server.get("/categories").await.json();
                let id = listed["items"][0]["id"].as_str().unwrap().to_string();

                let response = app.server.delete(&format!("/categories/{id}")).await;
                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["message"], "The category has been successfully removed.");
                assert!(files_in(&app.category_dir()).is_empty());

                app.server.get("/categories/shoes").await.assert_status(StatusCode::NOT_FOUND);
                app.server
                    .delete(&format!("/categories/{id}"))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            #[tokio::test]
            async fn test_rest_invalid_id() {
                let app = make_app(true).await;

                app.server.delete("/brands/apple").await.assert_status(StatusCode::BAD_REQUEST);
                app.server
                    .put("/brands/not-a-uuid")
                    .multipart(brand_form("اپل", "Apple"))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
            }

            // ==============================================================
            // Reads
            // ==============================================================

            #[tokio::test]
            async fn test_rest_list_pagination() {
                let app = make_app(true).await;

                let all: Value = app.server.get("/brands").await.json();
                assert_eq!(all["total"], 2);
                assert_eq!(all["nextPage"], Value::Null);
                assert_eq!(all["items"][0]["englishName"], "North Face");
                assert_eq!(all["items"][1]["englishName"], "Apple");

                let first = app.server.get("/brands").add_query_param("length", 1).await;
                first.assert_status_ok();
                let first: Value = first.json();
                assert_eq!(first["items"].as_array().unwrap().len(), 1);
                assert_eq!(first["nextPage"], 2);

                let second: Value = app
                    .server
                    .get("/brands")
                    .add_query_param("page", 2)
                    .add_query_param("length", 1)
                    .await
                    .json();
                assert_eq!(second["items"][0]["englishName"], "Apple");
                assert_eq!(second["nextPage"], Value::Null);
            }

            #[tokio::test]
            async fn test_rest_list_page_out_of_range() {
                let app = make_app(true).await;

                let response = app
                    .server
                    .get("/brands")
                    .add_query_param("page", 3)
                    .add_query_param("length", 1)
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_eq!(body["code"], "PAGE_OUT_OF_RANGE");

                let empty = make_app(false).await;
                let body: Value = empty.server.get("/brands").await.json();
                assert_eq!(body["items"], serde_json::json!([]));
                assert_eq!(body["total"], 0);
            }

            #[tokio::test]
            async fn test_rest_brand_listing() {
                let app = make_app(true).await;

                let body = brand_by_slug(&app, "APPLE").await;
                assert_eq!(body["id"], app.catalog.apple.id.to_string());
                assert_eq!(body["totalProducts"], 3);
                assert_eq!(body["nextProductsPage"], Value::Null);
                assert_eq!(
                    product_titles(&body["products"]),
                    vec!["Apple Jacket", "iPhone SE", "iPhone 15"]
                );

                let scores: Vec<f64> = body["products"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|p| p["score"].as_f64().unwrap())
                    .collect();
                assert_eq!(scores, vec![3.0, 5.0, 4.3]);
                assert!(body["products"][0].get("comments").is_none());

                let paged: Value = app
                    .server
                    .get("/brands/apple")
                    .add_query_param("products-length", 2)
                    .await
                    .json();
                assert_eq!(paged["totalProducts"], 3);
                assert_eq!(paged["nextProductsPage"], 2);
                assert_eq!(paged["products"].as_array().unwrap().len(), 2);

                let past_end = app
                    .server
                    .get("/brands/apple")
                    .add_query_param("products-page", 3)
                    .add_query_param("products-length", 2)
                    .await;
                past_end.assert_status(StatusCode::NOT_FOUND);
                let body: Value = past_end.json();
                assert_eq!(body["code"], "PAGE_OUT_OF_RANGE");
            }

            #[tokio::test]
            async fn test_rest_brand_listing_filters() {
                let app = make_app(true).await;

                let ranged: Value = app
                    .server
                    .get("/brands/apple")
                    .add_query_param("products-price", "100-450")
                    .add_query_param("products-sort", "cheap")
                    .await
                    .json();
                assert_eq!(product_titles(&ranged["products"]), vec!["Apple Jacket", "iPhone SE"]);
                assert_eq!(ranged["totalProducts"], 2);

                let discounted: Value = app
                    .server
                    .get("/brands/apple")
                    .add_query_param("only-amazing-products", "true")
                    .await
                    .json();
                assert_eq!(product_titles(&discounted["products"]), vec!["iPhone SE"]);

                let expensive: Value = app
                    .server
                    .get("/brands/apple")
                    .add_query_param("products-sort", "expensive")
                    .await
                    .json();
                assert_eq!(
                    product_titles(&expensive["products"]),
                    vec!["iPhone 15", "iPhone SE", "Apple Jacket"]
                );
            }

            #[tokio::test]
            async fn test_rest_category_listing_restricted() {
                let app = make_app(true).await;

                let available: Value = app
                    .server
                    .get("/categories/jackets")
                    .add_query_param("only-available-products", "true")
                    .await
                    .json();
                assert_eq!(product_titles(&available["products"]), vec!["Apple Jacket"]);

                let apple_phones: Value = app
                    .server
                    .get("/categories/mobile-phones")
                    .add_query_param("products-brands", "apple")
                    .add_query_param("products-sort", "popular")
                    .await
                    .json();
                assert_eq!(product_titles(&apple_phones["products"]), vec!["iPhone SE", "iPhone 15"]);

                let nobody: Value = app
                    .server
                    .get("/categories/mobile-phones")
                    .add_query_param("products-brands", "unknown-brand")
                    .await
                    .json();
                assert_eq!(nobody["totalProducts"], 0);
                assert_eq!(nobody["products"], serde_json::json!([]));
            }

            #[tokio::test]
            async fn test_rest_products_listing() {
                let app = make_app(true).await;

                let all: Value = app.server.get("/products").await.json();
                assert_eq!(all["total"], app.catalog.products.len());

                let best: Value = app
                    .server
                    .get("/products")
                    .add_query_param("products-sort", "best-seller")
                    .add_query_param("products-length", 2)
                    .await
                    .json();
                assert_eq!(product_titles(&best["items"]), vec!["Summit Parka", "iPhone 15"]);
                assert_eq!(best["nextPage"], 2);

                let north_face: Value = app
                    .server
                    .get("/products")
                    .add_query_param("products-brands", "north-face")
                    .add_query_param("products-categories", "jackets")
                    .await
                    .json();
                assert_eq!(product_titles(&north_face["items"]), vec!["Summit Parka"]);
            }

            #[tokio::test]
            async fn test_rest_unknown_slug() {
                let app = make_app(true).await;

                let response = app.server.get("/brands/samsung").await;
                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_eq!(body["code"], "ENTITY_NOT_FOUND");
                assert_eq!(body["details"]["key"], "samsung");
            }

            #[tokio::test]
            async fn test_rest_invalid_query() {
                let app = make_app(true).await;

                for (param, value) in [
                    ("products-sort", "random"),
                    ("products-price", "500-100"),
                    ("only-available-products", "yes"),
                    ("products-page", "0"),
                ] {
                    let response = app.server.get("/brands/apple").add_query_param(param, value).await;
                    response.assert_status(StatusCode::BAD_REQUEST);
                    let body: Value = response.json();
                    assert_eq!(body["details"]["field"], param, "{param}={value}");
                }

                app.server
                    .get("/brands")
                    .add_query_param("length", "-1")
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
            }
        }
    };
}
