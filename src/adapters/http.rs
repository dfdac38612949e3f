use crate::domain::model::{RecordId, UploadReceipt};
use crate::domain::ports::EntityBackend;
use crate::utils::error::{AdminError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

pub const UPLOAD_PATH: &str = "upload-excel";
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// REST backend reached through `reqwest`. No timeout and no retry are
/// configured: a hung request waits until the server answers.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

/// Error text including its sources, e.g. `builder error: relative URL without a base`.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// 區分「請求無法建立」與「送出後沒有回應」
fn classify(err: reqwest::Error) -> AdminError {
    if err.is_builder() {
        return AdminError::RequestError {
            message: describe(&err),
        };
    }
    if let Some(status) = err.status() {
        return AdminError::ServerError {
            status: status.as_u16(),
            message: None,
        };
    }
    AdminError::ConnectivityError {
        message: describe(&err),
    }
}

async fn error_from_response(response: Response) -> AdminError {
    let status = response.status().as_u16();
    // 錯誤回應的 body 可有可無
    let message = response
        .json::<UploadReceipt>()
        .await
        .ok()
        .and_then(|body| body.message);
    AdminError::ServerError { status, message }
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait::async_trait]
impl EntityBackend for HttpBackend {
    async fn list(&self, collection: &str) -> Result<Vec<serde_json::Value>> {
        let url = self.url(collection);
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(&url).send().await.map_err(classify)?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_decode() {
                AdminError::DecodeError {
                    message: describe(&e),
                }
            } else {
                classify(e)
            }
        })?;

        match body {
            serde_json::Value::Array(items) => Ok(items),
            other => Err(AdminError::DecodeError {
                message: format!("expected a JSON array, got {}", json_kind(&other)),
            }),
        }
    }

    async fn delete(&self, collection: &str, id: &RecordId) -> Result<()> {
        let url = self.url(&format!("{}/{}", collection, id));
        tracing::debug!("Making DELETE request to: {}", url);
        let response = self.client.delete(&url).send().await.map_err(classify)?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }
        Ok(())
    }

    async fn upload(
        &self,
        table: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<UploadReceipt> {
        let url = self.url(UPLOAD_PATH);
        tracing::debug!(
            "Uploading {} bytes as '{}' to {}?table={}",
            content.len(),
            file_name,
            url,
            table
        );

        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str(XLSX_MIME)
            .map_err(classify)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .query(&[("table", table)])
            .multipart(form)
            .send()
            .await
            .map_err(classify)?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        // 成功時 body 不一定是 JSON
        let text = response.text().await.map_err(classify)?;
        Ok(serde_json::from_str::<UploadReceipt>(&text).unwrap_or_default())
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_list_returns_array_items() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/pacientes");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([{"id": 1}, {"id": 2}]));
        });

        let backend = HttpBackend::new(server.base_url());
        let items = backend.list("pacientes").await.unwrap();

        api_mock.assert();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_list_rejects_non_array_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/costos");
            then.status(200).json_body(serde_json::json!({"id": 1}));
        });

        let backend = HttpBackend::new(format!("{}/", server.base_url()));
        let err = backend.list("costos").await.unwrap_err();
        assert!(matches!(err, AdminError::DecodeError { .. }));
    }

    #[tokio::test]
    async fn test_list_error_status_is_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/visitas");
            then.status(503);
        });

        let backend = HttpBackend::new(server.base_url());
        match backend.list("visitas").await.unwrap_err() {
            AdminError::ServerError { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, None);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_uses_record_path() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(DELETE).path("/indicadores-medioambientales/7");
            then.status(204);
        });

        let backend = HttpBackend::new(server.base_url());
        backend
            .delete("indicadores-medioambientales", &RecordId::Int(7))
            .await
            .unwrap();
        api_mock.assert();
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_with_table_query() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/upload-excel")
                .query_param("table", "centro")
                .header_exists("content-type")
                .body_contains("name=\"file\"")
                .body_contains("filename=\"centros.xlsx\"");
            then.status(200)
                .json_body(serde_json::json!({"message": "Datos cargados"}));
        });

        let backend = HttpBackend::new(server.base_url());
        let receipt = backend
            .upload("centro", "centros.xlsx", b"PK-fake".to_vec())
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(receipt.message.as_deref(), Some("Datos cargados"));
    }

    #[tokio::test]
    async fn test_upload_success_without_json_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/upload-excel");
            then.status(200).body("ok");
        });

        let backend = HttpBackend::new(server.base_url());
        let receipt = backend.upload("visita", "v.xlsx", Vec::new()).await.unwrap();
        assert_eq!(receipt.message, None);
    }

    #[tokio::test]
    async fn test_upload_error_carries_backend_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/upload-excel");
            then.status(500)
                .json_body(serde_json::json!({"message": "Columna 'edad' inválida"}));
        });

        let backend = HttpBackend::new(server.base_url());
        let err = backend
            .upload("paciente", "p.xlsx", Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err.backend_message(), Some("Columna 'edad' inválida"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connectivity_error() {
        // 埠 1 通常沒有服務
        let backend = HttpBackend::new("http://127.0.0.1:1");
        let err = backend
            .upload("paciente", "p.xlsx", Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::ConnectivityError { .. }));
    }

    #[tokio::test]
    async fn test_malformed_base_url_is_request_error() {
        let backend = HttpBackend::new("not a url");
        let err = backend.list("pacientes").await.unwrap_err();
        match err {
            AdminError::RequestError { message } => assert!(message.contains("builder error")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
