//! Book directory endpoints (catalog reads and admin mutations).
//!
//! Reads are public; create/update/delete require an admin bearer
//! credential server-side. This layer does not enforce privilege locally;
//! the backend's 401/403 answers are classified by `decode_error` and
//! surfaced to the caller. No change notifications are issued: callers
//! patch their own list snapshot (create prepends, update replaces by id,
//! delete removes by id).

use std::path::Path;

use super::{ApiClient, ApiError, ApiResult, expect_json, expect_ok};
use crate::catalog::{Book, BookDraft};

/// Fetches the full book list in server order.
///
/// # Errors
/// `Network` or `Api` on failure; the caller renders an empty state.
pub async fn list_books(api: &ApiClient) -> ApiResult<Vec<Book>> {
    let response = api.get("/api/books").send().await?;
    expect_json(response).await
}

/// Fetches a single book by id.
///
/// # Errors
/// `Api { status: 404 }` when the id is unknown.
pub async fn get_book(api: &ApiClient, id: &str) -> ApiResult<Book> {
    let response = api.get(&format!("/api/books/{id}")).send().await?;
    expect_json(response).await
}

/// Fetches the category strings currently in use server-side.
///
/// The `"all"` sentinel is a UI concern; it is never part of this list.
///
/// # Errors
/// `Network` or `Api` on failure.
pub async fn list_categories(api: &ApiClient) -> ApiResult<Vec<String>> {
    let response = api.get("/api/categories").send().await?;
    expect_json(response).await
}

/// Creates a book from the draft (admin only).
///
/// # Errors
/// `Forbidden` for non-admin callers; `Api` with the backend's validation
/// detail otherwise.
pub async fn create_book(api: &ApiClient, draft: &BookDraft) -> ApiResult<Book> {
    let form = book_form(draft).await?;
    let response = api.post("/api/books").multipart(form).send().await?;
    expect_json(response).await
}

/// Updates an existing book from the draft (admin only).
///
/// # Errors
/// `Api { status: 404 }` when the id is unknown; `Forbidden` for non-admin
/// callers.
pub async fn update_book(api: &ApiClient, id: &str, draft: &BookDraft) -> ApiResult<Book> {
    let form = book_form(draft).await?;
    let response = api
        .put(&format!("/api/books/{id}"))
        .multipart(form)
        .send()
        .await?;
    expect_json(response).await
}

/// Deletes a book by id (admin only).
///
/// Not idempotent: a repeated delete surfaces the backend's 404 detail.
///
/// # Errors
/// Whatever the backend answers, classified as usual.
pub async fn delete_book(api: &ApiClient, id: &str) -> ApiResult<()> {
    let response = api.delete(&format!("/api/books/{id}")).send().await?;
    expect_ok(response).await
}

/// Builds the multipart payload: scalar fields as text parts plus the
/// optional cover image as a binary part.
async fn book_form(draft: &BookDraft) -> ApiResult<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new()
        .text("title", draft.title.clone())
        .text("author", draft.author.clone())
        .text("description", draft.description.clone())
        .text("price", draft.price.to_string())
        .text("category", draft.category.clone())
        .text("is_featured", draft.is_featured.to_string())
        .text("cta_button_text", draft.cta_button_text.clone());

    if let Some(path) = &draft.cover_image {
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            ApiError::Request(format!(
                "Failed to read cover image {}: {err}",
                path.display()
            ))
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cover".to_string());
        let mut part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
        if let Some(mime) = guess_mime(path) {
            // Extension-derived MIME is a hint; the backend stores the bytes as-is.
            part = part.mime_str(mime)?;
        }
        form = form.part("cover_image", part);
    }

    Ok(form)
}

fn guess_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn book_json(id: &str, title: &str, featured: bool) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": title,
            "author": "Author",
            "description": "Desc",
            "price": 12.5,
            "category": "Fiction",
            "cover_image": null,
            "is_featured": featured,
            "cta_button_text": "Buy Now",
            "created_at": "2026-08-06T10:00:00.000000",
            "updated_at": "2026-08-06T10:00:00.000000"
        })
    }

    /// Test: list preserves server order.
    #[tokio::test]
    async fn test_list_books_preserves_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/books"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                book_json("b2", "Newest", true),
                book_json("b1", "Older", false),
            ])))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri());
        let books = list_books(&api).await.unwrap();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Newest");
        assert_eq!(books[1].title, "Older");
    }

    /// Test: create submits multipart with the bearer credential attached.
    #[tokio::test]
    async fn test_create_book_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/books"))
            .and(header("authorization", "Bearer admin-tok"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(book_json("b9", "Created", false)),
            )
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri());
        api.set_bearer("admin-tok");
        let draft = BookDraft {
            title: "Created".to_string(),
            author: "Author".to_string(),
            description: "Desc".to_string(),
            price: 12.5,
            category: "Fiction".to_string(),
            ..BookDraft::default()
        };
        let created = create_book(&api, &draft).await.unwrap();
        assert_eq!(created.id, "b9");
    }

    /// Test: non-admin mutation surfaces the backend detail as Forbidden.
    #[tokio::test]
    async fn test_create_book_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/books"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "detail": "Admin access required",
            })))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri());
        api.set_bearer("user-tok");
        let err = create_book(&api, &BookDraft::default()).await.unwrap_err();
        match err {
            ApiError::Forbidden(detail) => assert_eq!(detail, "Admin access required"),
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }

    /// Test: repeated delete surfaces the backend's 404 verbatim.
    #[tokio::test]
    async fn test_delete_book_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/books/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "detail": "Book not found",
            })))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri());
        api.set_bearer("admin-tok");
        let err = delete_book(&api, "gone").await.unwrap_err();
        match err {
            ApiError::Api { status, detail } => {
                assert_eq!(status, 404);
                assert_eq!(detail, "Book not found");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    /// Test: MIME guessing by extension.
    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime(Path::new("cover.JPG")), Some("image/jpeg"));
        assert_eq!(guess_mime(Path::new("cover.png")), Some("image/png"));
        assert_eq!(guess_mime(Path::new("cover.tiff")), None);
        assert_eq!(guess_mime(Path::new("cover")), None);
    }
}
