//! HTTP-клиент API инвентаря.
//!
//! Оборачивает `reqwest::Client`: построение URL операций, разбор не-2xx
//! ответов в доменную ошибку из тела `{error}`. По одному методу на
//! операцию wire-контракта; повторов и отмены запросов нет — сбой
//! сообщается вызывающему один раз.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::types::{
    Device, DeviceCreate, DeviceUpdate, Health, Link, LinkCreate, LinkUpdate, Stats, TopologyView,
};

/// Базовый URL API по умолчанию.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// Клиент API инвентаря топологии.
pub struct TopologyClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TopologyClient {
    /// Создать клиент; `base_url` указывает на корень API (`.../api`).
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    /// Клиент с уже созданным `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Базовый URL API.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Операции ─────────────────────────────────────────────────────

    /// GET /health — health живёт в корне сервера, не под /api.
    pub async fn health(&self) -> Result<Health, Error> {
        let url = self.base_url.join("/health")?;
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        Self::parse_response(resp).await
    }

    /// GET {base}/topology — граф для канвы.
    pub async fn topology(&self) -> Result<TopologyView, Error> {
        self.get("topology").await
    }

    /// GET {base}/stats — счётчики инвентаря.
    pub async fn stats(&self) -> Result<Stats, Error> {
        self.get("stats").await
    }

    /// GET {base}/devices — все устройства в порядке создания.
    pub async fn list_devices(&self) -> Result<Vec<Device>, Error> {
        self.get("devices").await
    }

    /// GET {base}/devices/{id} — карточка устройства.
    pub async fn get_device(&self, id: &str) -> Result<Device, Error> {
        self.get(&format!("devices/{id}")).await
    }

    /// POST {base}/devices — создание устройства.
    pub async fn create_device(&self, data: &DeviceCreate) -> Result<Device, Error> {
        self.post("devices", data).await
    }

    /// PATCH {base}/devices/{id} — частичное обновление.
    pub async fn update_device(&self, id: &str, data: &DeviceUpdate) -> Result<Device, Error> {
        self.patch(&format!("devices/{id}"), data).await
    }

    /// PATCH {base}/devices/{id}/position — только координаты.
    pub async fn update_position(&self, id: &str, x: f64, y: f64) -> Result<Device, Error> {
        self.patch(
            &format!("devices/{id}/position"),
            &serde_json::json!({ "x": x, "y": y }),
        )
        .await
    }

    /// DELETE {base}/devices/{id} — удаление с каскадом связей.
    pub async fn delete_device(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("devices/{id}")).await
    }

    /// GET {base}/links — все связи в порядке создания.
    pub async fn list_links(&self) -> Result<Vec<Link>, Error> {
        self.get("links").await
    }

    /// POST {base}/links — создание связи.
    pub async fn create_link(&self, data: &LinkCreate) -> Result<Link, Error> {
        self.post("links", data).await
    }

    /// PATCH {base}/links/{id} — частичное обновление.
    pub async fn update_link(&self, id: &str, data: &LinkUpdate) -> Result<Link, Error> {
        self.patch(&format!("links/{id}"), data).await
    }

    /// DELETE {base}/links/{id} — удаление связи.
    pub async fn delete_link(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("links/{id}")).await
    }

    // ── Транспортные помощники ───────────────────────────────────────

    /// Построить полный URL операции.
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        let full = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path);
        Ok(Url::parse(&full)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("GET {url}");
        let resp = self.http.get(url).send().await?;
        Self::parse_response(resp).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("POST {url}");
        let resp = self.http.post(url).json(body).send().await?;
        Self::parse_response(resp).await
    }

    async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("PATCH {url}");
        let resp = self.http.patch(url).json(body).send().await?;
        Self::parse_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.api_url(path)?;
        debug!("DELETE {url}");
        let resp = self.http.delete(url).send().await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(Self::error_from(status, body))
    }

    /// Разобрать ответ: 2xx → JSON-тело, иначе — доменная ошибка.
    async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Self::error_from(status, body));
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Достать сообщение из тела `{error}`; иначе показать тело как есть.
    fn error_from(status: reqwest::StatusCode, body: String) -> Error {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|m| m.as_str()).map(str::to_owned))
            .unwrap_or_else(|| {
                if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.clone()
                }
            });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}
