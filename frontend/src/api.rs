use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{console, Request, RequestInit, Response};

/// How a request failed: the server answered outside 2xx, nothing answered
/// at all, or the request never made it off this side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("server responded with status {status}")]
    Status { status: u16 },
    #[error("no response received: {0}")]
    Network(String),
    #[error("request setup failed: {0}")]
    Request(String),
}

/// Preconfigured client for the task API: one base URL, JSON bodies, a
/// console log line per request and per failure. Failures are handed back
/// to the caller unchanged; there is no retry and no recovery here.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send("GET", path, None).await?;
        decode(response).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = encode(body)?;
        let response = self.send("POST", path, Some(body)).await?;
        decode(response).await
    }

    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let body = encode(body)?;
        self.send("PUT", path, Some(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send("DELETE", path, None).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, method: &str, path: &str, body: Option<String>) -> Result<Response, ApiError> {
        let url = self.url(path);
        console::log_1(&format!("api: {} {}", method, url).into());

        let opts = RequestInit::new();
        opts.set_method(method);
        let has_body = body.is_some();
        if let Some(body) = body {
            opts.set_body(&JsValue::from_str(&body));
        }

        let request = Request::new_with_str_and_init(&url, &opts)
            .map_err(|err| fail(ApiError::Request(js_detail(&err))))?;
        if has_body {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(|err| fail(ApiError::Request(js_detail(&err))))?;
        }

        let window = web_sys::window()
            .ok_or_else(|| fail(ApiError::Request("no window to fetch from".into())))?;
        let value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|err| fail(ApiError::Network(js_detail(&err))))?;
        let response: Response = value.into();

        if !response.ok() {
            return Err(fail(ApiError::Status {
                status: response.status(),
            }));
        }
        console::log_1(&format!("api: {} {} -> {}", method, url, response.status()).into());
        Ok(response)
    }
}

fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|err| fail(ApiError::Request(format!("encode body: {}", err))))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let promise = response
        .text()
        .map_err(|err| fail(ApiError::Request(js_detail(&err))))?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|err| fail(ApiError::Network(js_detail(&err))))?
        .as_string()
        .ok_or_else(|| fail(ApiError::Request("response body is not text".into())))?;
    serde_json::from_str(&text)
        .map_err(|err| fail(ApiError::Request(format!("decode response: {}", err))))
}

// Logged once here, then re-raised unchanged.
fn fail(err: ApiError) -> ApiError {
    console::error_1(&format!("api: {}", err).into());
    err
}

fn js_detail(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
