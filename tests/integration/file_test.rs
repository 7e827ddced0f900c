//! Integration tests for upload, listing, download, and delete.

use axum::http::StatusCode;
use tower::ServiceExt;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_upload_appears_in_folder_listing() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let token = app.register_and_login().await;

    let response = app.upload(&token, "docs", "a.txt", "file body").await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["folder"], "docs");
    assert_eq!(response.body["name"], "a.txt");

    let listing = app
        .request("GET", "/files/folders", None, Some(&token))
        .await;
    assert_eq!(listing.status, StatusCode::OK);

    let folders: Vec<&str> = listing.body["folders"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert!(folders.contains(&"docs"));

    let files = listing.body["files"].as_array().unwrap();
    assert!(
        files
            .iter()
            .any(|f| f["name"] == "a.txt" && f["folder"] == "docs")
    );
}

#[tokio::test]
async fn test_staging_is_empty_after_upload() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let token = app.register_and_login().await;

    let response = app.upload(&token, "docs", "staged.txt", "payload").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.staging_file_count(), 0);

    // A rejected upload must not leave staging files behind either.
    let response = app
        .request("POST", "/files/upload", None, Some(&token))
        .await;
    assert_ne!(response.status, StatusCode::OK);
    assert_eq!(app.staging_file_count(), 0);
}

#[tokio::test]
async fn test_upload_without_file_field_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let token = app.register_and_login().await;

    let boundary = "X-NIMBUS-TEST-BOUNDARY";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"folder\"\r\n\r\n\
         docs\r\n\
         --{boundary}--\r\n"
    );
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/files/upload")
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(axum::body::Body::from(body))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_listings_are_per_owner() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let token_a = app.register_and_login().await;
    let token_b = app.register_and_login().await;

    let response = app.upload(&token_a, "private", "secret.txt", "mine").await;
    assert_eq!(response.status, StatusCode::OK);

    let listing_b = app.request("GET", "/files", None, Some(&token_b)).await;
    assert_eq!(listing_b.status, StatusCode::OK);
    assert!(
        listing_b.body.as_array().unwrap().is_empty(),
        "user B sees user A's files"
    );

    // And B cannot delete A's record: it is not found for them.
    let listing_a = app.request("GET", "/files", None, Some(&token_a)).await;
    let id = listing_a.body[0]["id"].as_str().unwrap().to_string();
    let response = app
        .request("DELETE", &format!("/files/{id}"), None, Some(&token_b))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_removes_record_and_blob() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let token = app.register_and_login().await;

    let uploaded = app.upload(&token, "docs", "doomed.txt", "bye").await;
    let id = uploaded.body["id"].as_str().unwrap().to_string();
    let blobs_before = app.stored_blob_count();

    let response = app
        .request("DELETE", &format!("/files/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["message"].is_string());
    assert_eq!(app.stored_blob_count(), blobs_before - 1);

    let listing = app.request("GET", "/files", None, Some(&token)).await;
    assert!(
        !listing
            .body
            .as_array()
            .unwrap()
            .iter()
            .any(|f| f["id"] == id.as_str())
    );
}

#[tokio::test]
async fn test_delete_nonexistent_returns_404_and_touches_no_blob() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let token = app.register_and_login().await;

    app.upload(&token, "docs", "keep.txt", "keep me").await;
    let blobs_before = app.stored_blob_count();

    let response = app
        .request(
            "DELETE",
            "/files/00000000-0000-0000-0000-999999999999",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.stored_blob_count(), blobs_before);
}

#[tokio::test]
async fn test_download_serves_inline_content() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let token = app.register_and_login().await;

    let uploaded = app.upload(&token, "docs", "view.txt", "inline body").await;
    let id = uploaded.body["id"].as_str().unwrap().to_string();

    let request = axum::http::Request::builder()
        .method("GET")
        .uri(format!("/files/{id}/download"))
        .header("authorization", format!("Bearer {token}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(disposition.starts_with("inline"));

    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    assert_eq!(&bytes[..], b"inline body");
}
