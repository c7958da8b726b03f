//! Product gateway
//!
//! The five REST operations of the inventory API behind a trait seam, so
//! the controller and workflows can run against a test double.

use async_trait::async_trait;
use shared::models::{ProductCreate, ProductUpdate};
use shared::response::{ListEnvelope, ProductEnvelope};

use crate::error::ClientResult;
use crate::http::{HttpClient, NetworkHttpClient};

/// Outbound REST calls
///
/// Failures propagate the transport error as-is: no retry, no backoff.
/// Responses keep their envelope shape; callers normalize.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    async fn list(&self) -> ClientResult<ListEnvelope>;
    async fn get_one(&self, id: i64) -> ClientResult<ProductEnvelope>;
    async fn create(&self, payload: &ProductCreate) -> ClientResult<ProductEnvelope>;
    async fn update(&self, id: i64, payload: &ProductUpdate) -> ClientResult<ProductEnvelope>;
    async fn delete(&self, id: i64) -> ClientResult<()>;
}

/// Gateway over the network HTTP client
#[derive(Debug, Clone)]
pub struct HttpProductGateway<C = NetworkHttpClient> {
    http: C,
}

impl<C: HttpClient> HttpProductGateway<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }
}

#[async_trait]
impl<C: HttpClient> ProductGateway for HttpProductGateway<C> {
    async fn list(&self) -> ClientResult<ListEnvelope> {
        self.http.get("/productos/").await
    }

    async fn get_one(&self, id: i64) -> ClientResult<ProductEnvelope> {
        self.http.get(&format!("/productos/{id}")).await
    }

    async fn create(&self, payload: &ProductCreate) -> ClientResult<ProductEnvelope> {
        self.http.post("/productos/add", payload).await
    }

    async fn update(&self, id: i64, payload: &ProductUpdate) -> ClientResult<ProductEnvelope> {
        self.http.put(&format!("/productos/update/{id}"), payload).await
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http.delete(&format!("/productos/delete/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// Records every request and answers them all with one canned body.
    struct RecordingHttp {
        calls: Mutex<Vec<(&'static str, String)>>,
        response: Value,
    }

    impl RecordingHttp {
        fn new(response: Value) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                response,
            }
        }

        fn answer<T: serde::de::DeserializeOwned>(&self, method: &'static str, path: &str) -> T {
            self.calls.lock().unwrap().push((method, path.to_string()));
            serde_json::from_value(self.response.clone()).unwrap()
        }
    }

    #[async_trait]
    impl HttpClient for RecordingHttp {
        async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
            Ok(self.answer("GET", path))
        }

        async fn post<T: serde::de::DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
            &self,
            path: &str,
            _body: &B,
        ) -> ClientResult<T> {
            Ok(self.answer("POST", path))
        }

        async fn put<T: serde::de::DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
            &self,
            path: &str,
            _body: &B,
        ) -> ClientResult<T> {
            Ok(self.answer("PUT", path))
        }

        async fn delete(&self, path: &str) -> ClientResult<()> {
            self.calls.lock().unwrap().push(("DELETE", path.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn gateway_hits_the_documented_routes() {
        let gateway = HttpProductGateway::new(RecordingHttp::new(json!([])));

        gateway.list().await.unwrap();
        gateway.get_one(3).await.unwrap();
        gateway
            .create(&ProductCreate {
                nombre: "Tornillo".into(),
                marca: "ACME".into(),
                cantidad: 10,
                precio: 2.5,
                categoria_id: None,
            })
            .await
            .unwrap();
        gateway.update(3, &ProductUpdate::default()).await.unwrap();
        gateway.delete(3).await.unwrap();

        let calls = gateway.http.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                ("GET", "/productos/".to_string()),
                ("GET", "/productos/3".to_string()),
                ("POST", "/productos/add".to_string()),
                ("PUT", "/productos/update/3".to_string()),
                ("DELETE", "/productos/delete/3".to_string()),
            ]
        );
    }
}
