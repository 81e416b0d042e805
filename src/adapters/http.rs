use crate::config::HttpConfig;
use crate::utils::error::{EtlError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use reqwest::{Client, Method, Request, RequestBuilder, Response, StatusCode};
use std::time::Duration;

/// 需要重試的狀態碼
const RETRY_STATUSES: [StatusCode; 5] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// 帶重試與指數退避的 HTTP client，整個批次共用一個
#[derive(Debug, Clone)]
pub struct RetryingClient {
    client: Client,
    max_retries: u32,
    backoff_factor: f64,
    backoff_max: Duration,
    retry_post: bool,
}

impl RetryingClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            backoff_factor: config.backoff_factor,
            backoff_max: config.backoff_max,
            retry_post: config.retry_post,
        })
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url)
    }

    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build()?;
        self.execute(request).await
    }

    /// 送出請求；可重試的狀態碼與連線錯誤會依退避時間重送，
    /// 用完重試次數或遇到其他 4xx/5xx 時回傳 `EtlError::HttpStatus`
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().to_string();
        let idempotent = self.is_retryable_method(&method);
        let mut retries = 0u32;

        loop {
            let attempt = request.try_clone().ok_or_else(|| EtlError::ProcessingError {
                message: format!("request body for {} cannot be replayed", url),
            })?;

            match self.client.execute(attempt).await {
                Ok(response) => {
                    let status = response.status();
                    if idempotent && RETRY_STATUSES.contains(&status) && retries < self.max_retries {
                        retries += 1;
                        let delay = self.retry_after(&response).unwrap_or_else(|| self.backoff(retries));
                        tracing::warn!(
                            "🔁 {} {} returned {}, retry {}/{} in {:?}",
                            method,
                            url,
                            status.as_u16(),
                            retries,
                            self.max_retries,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    if status.is_client_error() || status.is_server_error() {
                        return Err(EtlError::HttpStatus {
                            status: status.as_u16(),
                            url,
                        });
                    }

                    tracing::debug!("{} {} -> {}", method, url, status);
                    return Ok(response);
                }
                Err(e) if retries < self.max_retries && (e.is_connect() || (idempotent && e.is_timeout())) => {
                    retries += 1;
                    let delay = self.backoff(retries);
                    tracing::warn!(
                        "🔁 {} {} failed ({}), retry {}/{} in {:?}",
                        method,
                        url,
                        e,
                        retries,
                        self.max_retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// 第 n 次重試前的等待時間：第一次立即重試，之後為 factor * 2^(n-1)
    pub fn backoff(&self, retry: u32) -> Duration {
        if retry <= 1 {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(retry - 1).unwrap_or(i32::MAX);
        self.capped_delay(self.backoff_factor * 2f64.powi(exponent))
            .unwrap_or(Duration::ZERO)
    }

    /// 429/503 帶數字 `Retry-After` 時以它取代計算出的退避時間
    fn retry_after(&self, response: &Response) -> Option<Duration> {
        if !matches!(
            response.status(),
            StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE
        ) {
            return None;
        }
        let seconds: f64 = response
            .headers()
            .get(RETRY_AFTER)?
            .to_str()
            .ok()?
            .trim()
            .parse()
            .ok()?;
        self.capped_delay(seconds)
    }

    /// 秒數轉成等待時間，超過 `backoff_max` 一律取上限；負數或 NaN 回傳 None
    fn capped_delay(&self, seconds: f64) -> Option<Duration> {
        if seconds.is_nan() || seconds < 0.0 {
            return None;
        }
        if seconds >= self.backoff_max.as_secs_f64() {
            return Some(self.backoff_max);
        }
        Some(Duration::from_secs_f64(seconds))
    }

    fn is_retryable_method(&self, method: &Method) -> bool {
        *method == Method::GET || *method == Method::HEAD || (self.retry_post && *method == Method::POST)
    }
}

/// 去掉回應開頭的 BOM
pub fn strip_bom(text: &str) -> &str {
    text.trim_start_matches('\u{feff}').trim_start_matches('\u{fffe}')
}
