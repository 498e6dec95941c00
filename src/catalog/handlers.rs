//! Catalog HTTP handlers

use super::form::FormFields;
use super::{CatalogEntity, CatalogState};
use crate::core::entity::Entity;
use crate::core::error::{CatalogResult, EntityError, RequestError, ValidationError};
use crate::core::query::{Page, ProductListingQuery, RawCollectionQuery, RawListingQuery};
use crate::core::service::DataService;
use crate::core::slug::Slug;
use crate::core::store::{CollectionQuery, Lookup, ProductQuery, Restriction};
use crate::core::upload::StoredFile;
use crate::entities::ListedProduct;
use crate::listing;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::Utc;
use futures::future::try_join_all;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

/// Body of every successful write
#[derive(Debug, Clone, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    fn new<T: Entity>(verb: &str) -> Json<Self> {
        Json(Self {
            message: format!("The {} has been successfully {verb}.", T::resource_name_singular()),
        })
    }
}

/// A brand or category together with one page of its products
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListing<T> {
    #[serde(flatten)]
    pub item: T,
    pub products: Vec<ListedProduct>,
    pub total_products: usize,
    pub next_products_page: Option<usize>,
}

/// `GET /{plural}?page&length`, newest first
pub async fn list_entities<T: CatalogEntity>(
    State(state): State<CatalogState>,
    Query(raw): Query<RawCollectionQuery>,
) -> CatalogResult<Json<Page<T>>> {
    let pagination = raw.parse()?;

    let entities = T::service(&state).find(&CollectionQuery::newest_first()).await?;
    let page = pagination.paginate(entities).ensure_in_range()?;

    Ok(Json(page))
}

/// `GET /{plural}/{slug}` with the entity's filtered product listing
pub async fn get_entity<T: CatalogEntity>(
    State(state): State<CatalogState>,
    Path(slug): Path<String>,
    Query(raw): Query<RawListingQuery>,
) -> CatalogResult<Json<ItemListing<T>>> {
    let query = raw.parse()?;

    let item = T::service(&state)
        .find_one(&Lookup::slug(&slug))
        .await?
        .ok_or_else(|| EntityError::not_found(T::resource_name_singular(), &slug))?;

    let mut products = T::products(item.id());
    for restriction in resolve_restrictions(&state, &query).await? {
        products = products.restricted(restriction);
    }

    let page = run_listing(&state, &products, &query).await?;

    Ok(Json(ItemListing {
        item,
        products: page.items,
        total_products: page.total,
        next_products_page: page.next_page,
    }))
}

/// `GET /products` across the whole catalog
pub async fn list_products(
    State(state): State<CatalogState>,
    Query(raw): Query<RawListingQuery>,
) -> CatalogResult<Json<Page<ListedProduct>>> {
    let query = raw.parse()?;

    let mut products = ProductQuery::all();
    for restriction in resolve_restrictions(&state, &query).await? {
        products = products.restricted(restriction);
    }

    Ok(Json(run_listing(&state, &products, &query).await?))
}

/// `POST /{plural}` from a multipart form; the logo is required
pub async fn create_entity<T: CatalogEntity>(
    State(state): State<CatalogState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> CatalogResult<(StatusCode, Json<MessageBody>)> {
    let form = read_form(multipart).await?;

    let input = T::input(&form);
    input.validate()?;

    let upload = form
        .file("logo")
        .ok_or_else(|| ValidationError::field("logo", "a logo image is required"))?;
    let stored = state.uploads.store(T::UPLOAD_KIND, upload).await?;

    let entity = T::from_input(input, stored.file_name.clone());
    if let Err(e) = T::service(&state).create(entity).await {
        state.uploads.discard(&stored).await;
        return Err(e.into());
    }

    tracing::info!(entity = T::resource_name_singular(), logo = %stored.file_name, "created");
    Ok((StatusCode::CREATED, MessageBody::new::<T>("added")))
}

/// `PUT /{plural}/{id}` from a multipart form; without a logo the old one stays
pub async fn update_entity<T: CatalogEntity>(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> CatalogResult<Json<MessageBody>> {
    let id = parse_id(&id)?;
    let form = read_form(multipart).await?;

    let input = T::input(&form);
    input.validate()?;

    let service = T::service(&state);
    let mut entity = service
        .find_one(&Lookup::id(id))
        .await?
        .ok_or_else(|| EntityError::not_found(T::resource_name_singular(), id))?;

    let stored = match form.file("logo") {
        Some(upload) => Some(state.uploads.store(T::UPLOAD_KIND, upload).await?),
        None => None,
    };

    entity.apply(input, stored.as_ref().map(|f| f.file_name.clone()));

    let previous = match service.replace(&id, entity).await {
        Ok(Some(previous)) => previous,
        Ok(None) => {
            discard_new(&state, stored.as_ref()).await;
            return Err(EntityError::not_found(T::resource_name_singular(), id).into());
        }
        Err(e) => {
            discard_new(&state, stored.as_ref()).await;
            return Err(e.into());
        }
    };

    if stored.is_some() {
        state.uploads.discard_named(T::UPLOAD_KIND, previous.logo()).await;
    }

    tracing::info!(entity = T::resource_name_singular(), %id, "updated");
    Ok(MessageBody::new::<T>("edited"))
}

/// `DELETE /{plural}/{id}`, removing the logo file as well
pub async fn remove_entity<T: CatalogEntity>(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> CatalogResult<Json<MessageBody>> {
    let id = parse_id(&id)?;

    let removed = T::service(&state)
        .delete(&id)
        .await?
        .ok_or_else(|| EntityError::not_found(T::resource_name_singular(), id))?;

    state.uploads.discard_named(T::UPLOAD_KIND, removed.logo()).await;

    tracing::info!(entity = T::resource_name_singular(), %id, "removed");
    Ok(MessageBody::new::<T>("removed"))
}

async fn read_form(multipart: Result<Multipart, MultipartRejection>) -> CatalogResult<FormFields> {
    let multipart = multipart.map_err(|e| RequestError::InvalidBody { message: e.body_text() })?;
    FormFields::read(multipart).await
}

async fn discard_new(state: &CatalogState, stored: Option<&StoredFile>) {
    if let Some(file) = stored {
        state.uploads.discard(file).await;
    }
}

fn parse_id(raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw).map_err(|_| ValidationError::field("id", format!("'{raw}' is not a valid id")))
}

async fn run_listing(
    state: &CatalogState,
    products: &ProductQuery,
    query: &ProductListingQuery,
) -> CatalogResult<Page<ListedProduct>> {
    let items = state.products.find(products).await?;
    listing::run(items, &query.listing, Utc::now()).ensure_in_range()
}

/// Turn requested brand/category slugs into id restrictions
///
/// Slugs that match nothing are dropped; when none match the restriction is
/// empty and the listing comes back empty.
async fn resolve_restrictions(
    state: &CatalogState,
    query: &ProductListingQuery,
) -> CatalogResult<Vec<Restriction>> {
    let mut restrictions = Vec::new();

    if let Some(slugs) = &query.brands {
        restrictions.push(Restriction::Brands(resolve_ids(state.brands.as_ref(), slugs).await?));
    }
    if let Some(slugs) = &query.categories {
        restrictions.push(Restriction::Categories(
            resolve_ids(state.categories.as_ref(), slugs).await?,
        ));
    }

    Ok(restrictions)
}

async fn resolve_ids<T: Entity>(service: &dyn DataService<T>, slugs: &[Slug]) -> CatalogResult<Vec<Uuid>> {
    let lookups: Vec<Lookup> = slugs.iter().cloned().map(Lookup::Slug).collect();
    let found = try_join_all(lookups.iter().map(|lookup| service.find_one(lookup))).await?;

    let ids: Vec<Uuid> = found.iter().flatten().map(|entity| entity.id()).collect();
    if ids.len() < slugs.len() {
        tracing::debug!(
            entity = T::resource_name(),
            requested = slugs.len(),
            resolved = ids.len(),
            "dropping unknown slugs from restriction"
        );
    }
    Ok(ids)
}
