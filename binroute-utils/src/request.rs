#[cfg(all(feature = "request", feature = "request-js"))]
compile_error!("features `request` and `request-js` are mutually exclusive");

use anyhow::{anyhow, Result};

/// Non-2xx response. Kept as a distinct type so callers can tell an HTTP
/// error apart from a transport failure with `downcast_ref`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusError {
    pub status: u16,
    pub body: String,
}

impl std::fmt::Display for StatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Request error (status: {}, body: {})",
            self.status, self.body
        )
    }
}

impl std::error::Error for StatusError {}

pub fn is_success(status: u16) -> bool {
    (200..=299).contains(&status)
}

#[cfg(feature = "request-js")]
mod request {
    use super::*;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

    #[allow(async_fn_in_trait)]
    pub trait FromResponse: Sized {
        async fn from_response(response: Response) -> Result<Self>;
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if !is_success(status) {
            let body = match response.text() {
                Ok(promise) => match JsFuture::from(promise).await {
                    Ok(value) => value.as_string().unwrap_or_default(),
                    Err(_) => String::new(),
                },
                Err(_) => String::new(),
            };
            return Err(StatusError { status, body }.into());
        }
        Ok(response)
    }

    impl FromResponse for String {
        async fn from_response(response: Response) -> Result<Self> {
            let promise = check_status(response)
                .await?
                .text()
                .map_err(|_| anyhow!("Failed to read response body as text"))?;
            JsFuture::from(promise)
                .await
                .map_err(|_| anyhow!("Failed to read response body as text"))?
                .as_string()
                .ok_or_else(|| anyhow!("Failed to convert JsValue to String"))
        }
    }

    pub async fn get<T>(url: &str, headers: Option<Vec<(String, String)>>) -> Result<T>
    where
        T: FromResponse,
    {
        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);
        if let Some(h) = convert_headers(headers)? {
            opts.set_headers(&h);
        }

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|_| anyhow!("Failed to create request"))?;

        let window = web_sys::window().ok_or_else(|| anyhow!("No global `window` exists"))?;
        let response_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| anyhow!("Failed to fetch: {:?}", e))?;

        let response: Response = response_value
            .dyn_into()
            .map_err(|_| anyhow!("Failed to cast to Response"))?;

        T::from_response(response).await
    }

    fn convert_headers(headers_option: Option<Vec<(String, String)>>) -> Result<Option<Headers>> {
        headers_option
            .map(|headers_map| {
                let headers = Headers::new().map_err(|_| anyhow!("Failed to create Headers"))?;
                for (key, value) in headers_map {
                    headers
                        .set(&key, &value)
                        .map_err(|_| anyhow!("Failed to set header"))?;
                }
                Ok(headers)
            })
            .transpose()
    }
}

#[cfg(feature = "request")]
mod request {
    use super::*;
    use reqwest::{
        header::{HeaderMap, HeaderName, HeaderValue},
        Response,
    };

    #[allow(async_fn_in_trait)]
    pub trait FromResponse: Sized {
        async fn from_response(response: Response) -> Result<Self>;
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status().as_u16();
        if !is_success(status) {
            let body = response.text().await.unwrap_or_default();
            return Err(StatusError { status, body }.into());
        }
        Ok(response)
    }

    impl FromResponse for String {
        async fn from_response(response: Response) -> Result<Self> {
            Ok(check_status(response).await?.text().await?)
        }
    }

    pub async fn get<T: FromResponse>(
        url: &str,
        headers: Option<Vec<(String, String)>>,
    ) -> Result<T> {
        let client = reqwest::Client::new();
        let mut request_builder = client.get(url);
        if let Some(h) = convert_headers(headers)? {
            request_builder = request_builder.headers(h);
        }
        let response = request_builder.send().await?;
        T::from_response(response).await
    }

    fn convert_headers(headers_option: Option<Vec<(String, String)>>) -> Result<Option<HeaderMap>> {
        headers_option
            .map(|headers_map| {
                let mut headers = HeaderMap::new();
                for (key, value) in headers_map {
                    let header_name = HeaderName::from_bytes(key.as_bytes())
                        .map_err(|_| anyhow!("Invalid header name"))?;
                    let header_value = HeaderValue::from_str(&value)
                        .map_err(|_| anyhow!("Invalid header value"))?;
                    headers.insert(header_name, header_value);
                }
                Ok(headers)
            })
            .transpose()
    }
}

pub use request::*;
