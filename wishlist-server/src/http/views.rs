//! Server-rendered HTML pages
//!
//! Every value that came from a user or the store goes through [`escape`].

use std::fmt::Write;

use axum::response::Html;

use crate::models::{encode_component, CategoryMatch, Item, Wishlist};

/// Inline message for lookups by title or id that matched nothing
pub const WISHLIST_NOT_FOUND: &str = "Wishlist not found.";

/// Label used when there is no item to take a currency from
pub const NO_CURRENCY: &str = "N/A";

/// Currencies offered by the add-item form
const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "JPY", "CAD", "AUD", "INR", "MXN", "CNY", "KRW"];

const PRIORITIES: &[&str] = &["High", "Medium", "Low"];

/// Escape text for HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="/style.css">
</head>
<body>
<main>
{body}
</main>
<footer><a href="/">Home</a></footer>
</body>
</html>
"#,
        title = escape(title),
        body = body,
    ))
}

/// Single-field form posting to `action`.
fn lookup_form(title: &str, action: &str, field: &str, label: &str, submit: &str) -> Html<String> {
    page(
        title,
        &format!(
            r#"<h1>{title}</h1>
<form method="post" action="{action}">
<label for="{field}">{label}</label>
<input type="text" id="{field}" name="{field}" required>
<button type="submit">{submit}</button>
</form>"#,
            title = escape(title),
        ),
    )
}

fn options(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!(r#"<option value="{v}">{v}</option>"#))
        .collect::<Vec<_>>()
        .join("")
}

fn image_tag(image_path: Option<&str>) -> String {
    match image_path {
        Some(src) => format!(
            r#"<img class="image-styling" src="{}" width="100" alt="Item Image"/>"#,
            escape(src)
        ),
        None => String::new(),
    }
}

pub fn index() -> Html<String> {
    page(
        "Wishlists",
        r#"<h1>Wishlists</h1>
<ul>
<li><a href="/createWishlist">Create a wishlist</a></li>
<li><a href="/revisitWishlist">Revisit a wishlist</a></li>
<li><a href="/getTotalOfWishlist">Get the total of a wishlist</a></li>
<li><a href="/searchByCategory">Search items by category</a></li>
<li><a href="/deleteAllWishlists">Delete all wishlists</a></li>
</ul>"#,
    )
}

pub fn create_wishlist_form() -> Html<String> {
    page(
        "Create Wishlist",
        r#"<h1>Create Wishlist</h1>
<form method="post" action="/createWishlist">
<label for="title">Title</label>
<input type="text" id="title" name="title" required>
<label for="description">Description</label>
<textarea id="description" name="description"></textarea>
<button type="submit">Create</button>
</form>"#,
    )
}

/// Link-safe form of a wishlist id.
fn id_segment(id: &str) -> String {
    escape(&encode_component(id))
}

pub fn add_items_form(wishlist: &Wishlist) -> Html<String> {
    let id = id_segment(&wishlist.id);
    let mut body = format!(
        r#"<h1>Add Items to {title}</h1>
<p>{description}</p>
<form method="post" action="/createWishlist/{id}/processAddToWishlist" enctype="multipart/form-data">
<label for="name">Item name</label>
<input type="text" id="name" name="name" required>
<label for="price">Price (USD)</label>
<input type="number" id="price" name="price" step="0.01" min="0" required>
<label for="currency">Display currency</label>
<select id="currency" name="currency">{currencies}</select>
<label for="store">Store</label>
<input type="text" id="store" name="store">
<label for="category">Category</label>
<input type="text" id="category" name="category">
<label for="priority">Priority</label>
<select id="priority" name="priority">{priorities}</select>
<label for="itemImage">Image</label>
<input type="file" id="itemImage" name="itemImage" accept="image/*">
<button type="submit">Add to wishlist</button>
</form>"#,
        title = escape(&wishlist.title),
        description = escape(&wishlist.description),
        currencies = options(CURRENCIES),
        priorities = options(PRIORITIES),
    );

    if !wishlist.items.is_empty() {
        let _ = write!(body, "<p>{} item(s) so far.</p>", wishlist.items.len());
    }

    page("Add Items", &body)
}

pub fn item_added(wishlist_id: &str, item: &Item) -> Html<String> {
    let mut body = format!(
        r#"<h1>Added {name}</h1>
<dl>
<dt>Price</dt><dd>{price:.2} {currency}</dd>
<dt>Store</dt><dd>{store}</dd>
<dt>Category</dt><dd>{category}</dd>
<dt>Priority</dt><dd>{priority}</dd>
</dl>"#,
        name = escape(&item.name),
        price = item.converted_price,
        currency = escape(&item.currency),
        store = escape(&item.store),
        category = escape(&item.category),
        priority = escape(&item.priority),
    );

    if !item.exchange_info.is_empty() {
        let _ = write!(body, "<p>{}</p>", escape(&item.exchange_info));
    }
    body.push_str(&image_tag(item.image_path.as_deref()));
    let _ = write!(
        body,
        r#"<p><a href="/createWishlist/{}/addItems">Add another item</a></p>"#,
        id_segment(wishlist_id)
    );

    page("Item Added", &body)
}

pub fn revisit_form() -> Html<String> {
    lookup_form("Revisit Wishlist", "/processRevisitWishlist", "wishlistName", "Wishlist title", "View")
}

pub fn revisit_result(wishlist: &Wishlist) -> Html<String> {
    let currency = wishlist.display_currency().unwrap_or(NO_CURRENCY);
    let mut body = format!(
        r#"<h2 id="revisit-wishlist-title">{title}</h2><p id="revisit-wishlist-desc">{description}</p>
<table><thead><tr><th>Item Name</th><th>Price ({currency})</th><th>Store</th><th>Image</th></tr></thead><tbody>"#,
        title = escape(&wishlist.title),
        description = escape(&wishlist.description),
        currency = escape(currency),
    );

    for item in &wishlist.items {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>${:.2}</td><td>{}</td><td>{}</td></tr>",
            escape(&item.name),
            item.converted_price,
            escape(&item.store),
            image_tag(item.image_path.as_deref()),
        );
    }
    body.push_str("</tbody></table>");

    let id = escape(&wishlist.id);
    let segment = id_segment(&wishlist.id);
    let _ = write!(
        body,
        r#"<p><a href="/createWishlist/{segment}/addItems">Add items</a></p>
<form method="post" action="/processDeleteWishlist">
<input type="hidden" name="wishlistName" value="{id}">
<button type="submit">Delete this wishlist</button>
</form>"#
    );

    page(&wishlist.title, &body)
}

pub fn wishlist_deleted(title: &str) -> Html<String> {
    page(
        "Wishlist Deleted",
        &format!("<h1>Deleted {}</h1>", escape(title)),
    )
}

pub fn total_form() -> Html<String> {
    lookup_form("Wishlist Total", "/processGetTotal", "wishlistName", "Wishlist title", "Get total")
}

pub fn total_result(title: &str, total: f64, currency: Option<&str>) -> Html<String> {
    page(
        "Wishlist Total",
        &format!(
            r#"<h1>{title}</h1>
<p>Total: <span id="wishlist-total">{total:.2}</span> <span id="wishlist-currency">{currency}</span></p>"#,
            title = escape(title),
            currency = escape(currency.unwrap_or(NO_CURRENCY)),
        ),
    )
}

pub fn delete_all_form() -> Html<String> {
    page(
        "Delete All Wishlists",
        r#"<h1>Delete All Wishlists</h1>
<p>This removes every wishlist and cannot be undone.</p>
<form method="post" action="/processDeleteAllWishlists">
<button type="submit">Delete everything</button>
</form>"#,
    )
}

pub fn all_deleted(count: u64) -> Html<String> {
    page(
        "Wishlists Deleted",
        &format!("<h1>All wishlists deleted</h1><p>{} removed.</p>", count),
    )
}

pub fn search_form() -> Html<String> {
    lookup_form("Search by Category", "/processSearchByCategory", "categoryName", "Category", "Search")
}

pub fn search_result(category: &str, matches: &[CategoryMatch]) -> Html<String> {
    let currency = matches.first().map(|m| m.currency.as_str()).unwrap_or(NO_CURRENCY);
    let mut body = format!(
        r#"<h1>Items in {category}</h1>
<table><thead><tr><th>Wishlist</th><th>Item Name</th><th>Price ({currency})</th><th>Store</th><th>Image</th></tr></thead><tbody>"#,
        category = escape(category),
        currency = escape(currency),
    );

    for m in matches {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td><td>{}</td></tr>",
            escape(&m.wishlist_title),
            escape(&m.name),
            m.price,
            escape(&m.store),
            image_tag(m.image_path.as_deref()),
        );
    }
    body.push_str("</tbody></table>");

    page("Search Results", &body)
}

pub fn not_found() -> Html<String> {
    Html(WISHLIST_NOT_FOUND.to_string())
}
