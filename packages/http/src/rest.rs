//! Coordination-store client over a ZooKeeper REST gateway.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use coordfs_core_store::{Bytes, CoordinationClient, Error as StoreError, NodePath, Stat};

use crate::types::{ChildrenView, ZNodeView};

/// Path prefix of the gateway's node resources.
pub const ZNODES_PREFIX: &str = "znodes/v1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads a coordination store through a ZooKeeper REST gateway.
///
/// - `list_children` is `GET {base}/znodes/v1{path}?view=children`
/// - `stat` and `get_data` are `GET {base}/znodes/v1{path}?dataformat=base64`
///
/// 404 answers map to `NoNode`, 401/403 to `NoAuth`, and connection or
/// timeout failures to `ConnectionLoss`.
pub struct RestClient {
    client: Client,
    base_url: url::Url,
    default_headers: HeaderMap,
}

impl RestClient {
    /// Create a client for the gateway at `base_url`, with the default
    /// request timeout.
    pub fn new(base_url: &str) -> Result<Self, crate::Error> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with the given request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, crate::Error> {
        let base_url = url::Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(crate::Error::InvalidUrl {
                message: format!("'{}' cannot be used as a base URL", base_url),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(crate::Error::from)?;

        Ok(Self {
            client,
            base_url,
            default_headers: HeaderMap::new(),
        })
    }

    /// Add a header sent with every request (credentials, tracing ids).
    pub fn with_default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, crate::Error> {
        let name = HeaderName::try_from(name.as_ref())?;
        let value = HeaderValue::try_from(value.as_ref())?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// URL of the gateway resource for `path`.
    ///
    /// Each node name is pushed as its own segment, so `%`, `?` and other
    /// reserved characters in a name are percent-encoded.
    pub fn znode_url(&self, path: &NodePath) -> url::Url {
        let mut url = self.base_url.clone();
        // Base URLs are checked in `with_timeout`, so segments are available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(ZNODES_PREFIX.split('/'))
                .extend(path.components());
            if path.components().next().is_none() {
                segments.push("");
            }
        }
        url
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &NodePath,
        query: &[(&str, &str)],
    ) -> Result<T, StoreError> {
        let mut url = self.znode_url(path);
        url.query_pairs_mut().extend_pairs(query);

        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .headers(self.default_headers.clone())
            .send()
            .map_err(crate::Error::from)?;

        let status = response.status();
        debug!(%path, status = status.as_u16(), "gateway answered");
        match status {
            StatusCode::NOT_FOUND => Err(StoreError::NoNode { path: path.clone() }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(StoreError::NoAuth { path: path.clone() })
            }
            s if !s.is_success() => Err(StoreError::Protocol {
                status: s.as_u16(),
                message: response.text().unwrap_or_default(),
            }),
            _ => {
                let text = response.text().map_err(crate::Error::from)?;
                Ok(serde_json::from_str(&text).map_err(crate::Error::from)?)
            }
        }
    }

    fn znode(&self, path: &NodePath) -> Result<ZNodeView, StoreError> {
        self.get_json(path, &[("dataformat", "base64")])
    }
}

impl CoordinationClient for RestClient {
    fn list_children(&self, path: &NodePath) -> Result<Vec<String>, StoreError> {
        let view: ChildrenView = self.get_json(path, &[("view", "children")])?;
        Ok(view.children)
    }

    fn stat(&self, path: &NodePath) -> Result<Stat, StoreError> {
        Ok(self.znode(path)?.stat())
    }

    fn get_data(&self, path: &NodePath) -> Result<Option<Bytes>, StoreError> {
        Ok(self.znode(path)?.data().map_err(crate::Error::from)?)
    }
}
