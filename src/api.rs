//! The client for the finance REST API.
//!
//! The finance API owns all persisted data. This module only knows how to
//! send the category and transaction requests and how to classify the
//! responses into success or one of the [Error] variants.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, header::AUTHORIZATION};
use serde::Deserialize;

use crate::{
    Error,
    auth::BearerToken,
    category::{CategoryDraft, CategoryId},
    config::ClientConfig,
    transaction::{Transaction, TransactionDraft, TransactionId},
    user::SetUserPayload,
};

/// The requests the web client makes to the finance API.
///
/// Every call is awaited to completion: there are no retries, timeouts or
/// cancellation.
#[async_trait]
pub trait FinanceApi: Send + Sync {
    /// Load the authenticated user and their categories.
    async fn fetch_user(&self, token: &BearerToken) -> Result<SetUserPayload, Error>;

    /// Persist a new category.
    ///
    /// Returns the identifier the server assigned, if the response included one.
    async fn create_category(
        &self,
        token: &BearerToken,
        draft: &CategoryDraft,
    ) -> Result<Option<CategoryId>, Error>;

    /// Overwrite the stored fields of the category `id`.
    async fn update_category(
        &self,
        token: &BearerToken,
        id: &CategoryId,
        draft: &CategoryDraft,
    ) -> Result<(), Error>;

    /// Load every transaction of the authenticated user.
    async fn list_transactions(&self, token: &BearerToken) -> Result<Vec<Transaction>, Error>;

    /// Persist a new transaction.
    async fn create_transaction(
        &self,
        token: &BearerToken,
        draft: &TransactionDraft,
    ) -> Result<(), Error>;

    /// Overwrite the stored fields of the transaction `id`.
    async fn update_transaction(
        &self,
        token: &BearerToken,
        id: &TransactionId,
        draft: &TransactionDraft,
    ) -> Result<(), Error>;
}

/// [FinanceApi] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFinanceApi {
    client: reqwest::Client,
    config: ClientConfig,
}

/// The part of a create response the client cares about.
#[derive(Deserialize)]
struct CreatedEntity {
    #[serde(rename = "_id")]
    id: Option<CategoryId>,
}

impl HttpFinanceApi {
    /// Create a client for the finance API described by `config`.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config: config.clone(),
        }
    }

    fn request(&self, method: Method, segments: &[&str], token: &BearerToken) -> RequestBuilder {
        let url = self.config.endpoint(segments);
        tracing::debug!("{method} {url}");

        self.client
            .request(method, url)
            .header(AUTHORIZATION, token.header_value())
    }

    /// Send `request` and turn transport failures and non-success statuses into errors.
    async fn send(request: RequestBuilder) -> Result<Response, Error> {
        let response = request
            .send()
            .await
            .inspect_err(|error| tracing::error!("request to the finance API failed: {error}"))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                "the finance API rejected {} with status {status}",
                response.url()
            );
            return Err(Error::RequestRejected {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl FinanceApi for HttpFinanceApi {
    async fn fetch_user(&self, token: &BearerToken) -> Result<SetUserPayload, Error> {
        let response = Self::send(self.request(Method::GET, &["user"], token)).await?;

        let body = response.json().await?;

        Ok(body)
    }

    async fn create_category(
        &self,
        token: &BearerToken,
        draft: &CategoryDraft,
    ) -> Result<Option<CategoryId>, Error> {
        let request = self.request(Method::POST, &["category"], token).json(draft);
        let response = Self::send(request).await?;

        // The category was created whether or not the body names the new ID.
        let body = response.bytes().await.unwrap_or_default();
        let id = serde_json::from_slice::<CreatedEntity>(&body)
            .ok()
            .and_then(|created| created.id);

        if id.is_none() {
            tracing::debug!("create category response did not include an ID");
        }

        Ok(id)
    }

    async fn update_category(
        &self,
        token: &BearerToken,
        id: &CategoryId,
        draft: &CategoryDraft,
    ) -> Result<(), Error> {
        let request = self
            .request(Method::PATCH, &["category", id.as_ref()], token)
            .json(draft);
        Self::send(request).await?;

        Ok(())
    }

    async fn list_transactions(&self, token: &BearerToken) -> Result<Vec<Transaction>, Error> {
        let response = Self::send(self.request(Method::GET, &["transaction"], token)).await?;

        let body = response.json().await?;

        Ok(body)
    }

    async fn create_transaction(
        &self,
        token: &BearerToken,
        draft: &TransactionDraft,
    ) -> Result<(), Error> {
        let request = self.request(Method::POST, &["transaction"], token).json(draft);
        Self::send(request).await?;

        Ok(())
    }

    async fn update_transaction(
        &self,
        token: &BearerToken,
        id: &TransactionId,
        draft: &TransactionDraft,
    ) -> Result<(), Error> {
        let request = self
            .request(Method::PATCH, &["transaction", id.as_ref()], token)
            .json(draft);
        Self::send(request).await?;

        Ok(())
    }
}

#[cfg(test)]
mod http_finance_api_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json, Router,
        extract::{Path, State},
        http::{HeaderMap, Method, StatusCode, Uri},
        response::IntoResponse,
        routing::{get, patch, post},
    };
    use serde_json::{Value, json};
    use time::macros::date;
    use tokio::net::TcpListener;

    use crate::{
        Error,
        auth::BearerToken,
        category::{CategoryDraft, CategoryId, Icon},
        config::ClientConfig,
        transaction::{TransactionDraft, TransactionId},
        user::UserId,
    };

    use super::{FinanceApi, HttpFinanceApi};

    /// A request received by the fake finance API.
    #[derive(Debug, Clone, PartialEq)]
    struct Received {
        method: Method,
        path: String,
        authorization: Option<String>,
        body: Value,
    }

    #[derive(Clone, Default)]
    struct Backend {
        received: Arc<Mutex<Vec<Received>>>,
        status: Arc<Mutex<Option<StatusCode>>>,
    }

    impl Backend {
        fn record(&self, method: Method, uri: &Uri, headers: &HeaderMap, body: Value) {
            self.received.lock().unwrap().push(Received {
                method,
                path: uri.path().to_owned(),
                authorization: headers
                    .get("authorization")
                    .map(|value| value.to_str().unwrap().to_owned()),
                body,
            });
        }

        fn status(&self) -> StatusCode {
            self.status.lock().unwrap().unwrap_or(StatusCode::OK)
        }
    }

    async fn record_write(
        State(backend): State<Backend>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> impl IntoResponse {
        backend.record(method, &uri, &headers, body);
        (backend.status(), Json(json!({ "_id": "new-id" })))
    }

    async fn record_patch(
        State(backend): State<Backend>,
        Path(_id): Path<String>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> impl IntoResponse {
        backend.record(method, &uri, &headers, body);
        (backend.status(), Json(json!({ "ok": true })))
    }

    async fn list(State(backend): State<Backend>, uri: Uri, headers: HeaderMap) -> impl IntoResponse {
        backend.record(Method::GET, &uri, &headers, Value::Null);
        (
            backend.status(),
            Json(json!([
                { "_id": "t1", "amount": 20, "description": "Fuel", "date": "2024-03-05T00:00:00.000Z", "category_id": "c1" },
            ])),
        )
    }

    async fn user(State(backend): State<Backend>, uri: Uri, headers: HeaderMap) -> impl IntoResponse {
        backend.record(Method::GET, &uri, &headers, Value::Null);
        (
            backend.status(),
            Json(json!({ "user": { "_id": "u1", "categories": [] } })),
        )
    }

    /// Serve the fake finance API on an ephemeral port.
    async fn spawn_backend() -> (HttpFinanceApi, Backend) {
        let backend = Backend::default();
        let app = Router::new()
            .route("/user", get(user))
            .route("/category", post(record_write))
            .route("/category/{id}", patch(record_patch))
            .route("/transaction", post(record_write).get(list))
            .route("/transaction/{id}", patch(record_patch))
            .with_state(backend.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = ClientConfig::new(&format!("http://{addr}")).unwrap();

        (HttpFinanceApi::new(&config), backend)
    }

    fn received(backend: &Backend) -> Vec<Received> {
        backend.received.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn create_category_posts_label_and_icon() {
        let (api, backend) = spawn_backend().await;
        let draft = CategoryDraft {
            label: "Groceries".to_owned(),
            icon: Some(Icon::ShoppingCart),
        };

        let id = api
            .create_category(&BearerToken::new("abc"), &draft)
            .await
            .unwrap();

        assert_eq!(id, Some(CategoryId::new("new-id")));
        assert_eq!(
            received(&backend),
            vec![Received {
                method: Method::POST,
                path: "/category".to_owned(),
                authorization: Some("Bearer abc".to_owned()),
                body: json!({ "label": "Groceries", "icon": "🛒" }),
            }]
        );
    }

    #[tokio::test]
    async fn update_transaction_patches_by_id() {
        let (api, backend) = spawn_backend().await;
        let draft = TransactionDraft {
            amount: 25.0,
            description: "Fuel".to_owned(),
            date: date!(2024 - 03 - 05),
            category_id: None,
        };

        api.update_transaction(&BearerToken::new("abc"), &TransactionId::new("t1"), &draft)
            .await
            .unwrap();

        let received = received(&backend);
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].method, Method::PATCH);
        assert_eq!(received[0].path, "/transaction/t1");
        assert_eq!(received[0].body["amount"], json!(25.0));
        assert_eq!(received[0].body["category_id"], json!(""));
    }

    #[tokio::test]
    async fn update_category_patches_by_id() {
        let (api, backend) = spawn_backend().await;

        api.update_category(
            &BearerToken::new("abc"),
            &CategoryId::new("c7"),
            &CategoryDraft::default(),
        )
        .await
        .unwrap();

        assert_eq!(received(&backend)[0].path, "/category/c7");
    }

    #[tokio::test]
    async fn identifiers_are_escaped_in_the_path() {
        let (api, backend) = spawn_backend().await;

        api.update_category(
            &BearerToken::new("abc"),
            &CategoryId::new("a/b?c"),
            &CategoryDraft::default(),
        )
        .await
        .unwrap();

        assert_eq!(received(&backend)[0].path, "/category/a%2Fb%3Fc");
    }

    #[tokio::test]
    async fn empty_token_is_still_sent() {
        let (api, backend) = spawn_backend().await;

        api.create_transaction(&BearerToken::default(), &TransactionDraft::default())
            .await
            .unwrap();

        let received = received(&backend);
        assert_eq!(received[0].path, "/transaction");
        assert_eq!(
            received[0].authorization.as_deref().map(str::trim),
            Some("Bearer")
        );
    }

    #[tokio::test]
    async fn list_transactions_decodes_response() {
        let (api, _backend) = spawn_backend().await;

        let transactions = api
            .list_transactions(&BearerToken::new("abc"))
            .await
            .unwrap();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].id, TransactionId::new("t1"));
        assert_eq!(transactions[0].date, date!(2024 - 03 - 05));
        assert_eq!(transactions[0].category_id, Some(CategoryId::new("c1")));
    }

    #[tokio::test]
    async fn fetch_user_unwraps_payload() {
        let (api, _backend) = spawn_backend().await;

        let user = api
            .fetch_user(&BearerToken::new("abc"))
            .await
            .unwrap()
            .into_user();

        assert_eq!(user.id, UserId::new("u1"));
    }

    #[tokio::test]
    async fn non_success_status_is_rejected() {
        let (api, backend) = spawn_backend().await;
        *backend.status.lock().unwrap() = Some(StatusCode::UNAUTHORIZED);

        let result = api
            .create_category(&BearerToken::new("abc"), &CategoryDraft::default())
            .await;

        assert_eq!(result, Err(Error::RequestRejected { status: 401 }));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        // Bind then drop a listener so that nothing is listening on the port.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let api = HttpFinanceApi::new(&ClientConfig::new(&format!("http://{addr}")).unwrap());

        let result = api.list_transactions(&BearerToken::new("abc")).await;

        assert!(
            matches!(result, Err(Error::Network(_))),
            "want network error, got {result:?}"
        );
    }
}
