//! Item append endpoint
//!
//! The form is multipart so an image can ride along. The image is written
//! before the price is converted; if conversion or the store write fails
//! the file stays on disk.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Path, State},
    response::Html,
    routing::post,
    Router,
};

use crate::currency::convert;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::http::views;
use crate::models::{NewItem, ValidationError};

/// Multipart field carrying the optional image
pub const IMAGE_FIELD: &str = "itemImage";

fn malformed(e: MultipartError) -> ApiError {
    tracing::debug!("Rejected multipart body: {}", e);
    ApiError::Validation(ValidationError::InvalidFormat {
        field: "form",
        reason: "malformed multipart body",
    })
}

/// Read text fields and store the image, if one was chosen.
async fn read_form(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<(NewItem, Option<String>), ApiError> {
    let mut form = NewItem::default();
    let mut image_path = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == IMAGE_FIELD {
            // browsers send an empty, unnamed part when no file is picked
            let file_name = field.file_name().unwrap_or_default().to_owned();
            let bytes = field.bytes().await.map_err(malformed)?;
            if !file_name.is_empty() {
                image_path = Some(state.uploads.save(&file_name, &bytes).await?);
            }
        } else {
            let value = field.text().await.map_err(malformed)?;
            form.set_field(&name, value);
        }
    }

    Ok((form, image_path))
}

/// POST /createWishlist/{id}/processAddToWishlist
async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Html<String>, ApiError> {
    let (form, image_path) = read_form(&state, multipart).await?;
    let amount = form.amount()?;

    let conversion = convert(state.rates.as_ref(), amount, &form.price, &form.currency).await?;
    let item = form.into_item(conversion.converted_price, conversion.exchange_info, image_path);

    state.store.append_item(&id, item.clone()).await?;
    tracing::info!(%id, item = %item.name, currency = %item.currency, "Added item");

    Ok(views::item_added(&id, &item))
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/createWishlist/{id}/processAddToWishlist", post(add_item))
        .layer(DefaultBodyLimit::disable())
}
