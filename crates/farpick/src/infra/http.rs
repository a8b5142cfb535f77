use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::{Url, form_urlencoded};

use crate::domain::{Entry, EntryKind, FileContent, Listing};
use crate::infra::transport::{FilesTransport, TransportError, TransportFuture};

const BROWSE_ENDPOINT: [&str; 3] = ["v1", "files", "browse"];
const READ_FILE_ENDPOINT: [&str; 3] = ["v1", "files", "read-file"];
/// Listing filter sent on every browse call; click handling, not the
/// server, decides what each entry kind does.
const BROWSE_MODE_ALL: &str = "all";
const UNKNOWN_ERROR_DETAIL: &str = "unknown error";

/// Connection settings for [`HttpFilesTransport`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransportConfig {
    /// Server origin, optionally with a path prefix the endpoints live under.
    pub base_url: Url,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// [`FilesTransport`] speaking the `/v1/files` JSON API over HTTP.
#[derive(Clone, Debug)]
pub struct HttpFilesTransport {
    base_url: Url,
    client: Client,
}

impl HttpFilesTransport {
    /// Builds a transport with its own connection pool.
    ///
    /// # Errors
    /// Returns an error when the underlying HTTP client cannot be
    /// initialized (for example when the TLS backend fails to load).
    pub fn new(config: TransportConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.base_url,
            client: builder.build()?,
        })
    }

    /// Returns the endpoint URL for `segments` with `query` appended.
    fn endpoint_url(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                TransportError::Connectivity(format!(
                    "server url `{}` cannot carry an endpoint path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        let query = query
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    encode_query_component(name),
                    encode_query_component(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        url.set_query(Some(&query));

        Ok(url)
    }
}

/// Percent-encodes one query component, spelling a space `%20` instead of
/// the form-style `+`.
fn encode_query_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .map(|chunk| if chunk == "+" { "%20" } else { chunk })
        .collect()
}

impl FilesTransport for HttpFilesTransport {
    fn browse(&self, path: String) -> TransportFuture<Result<Listing, TransportError>> {
        let client = self.client.clone();
        let url = self.endpoint_url(
            &BROWSE_ENDPOINT,
            &[("path", path.as_str()), ("mode", BROWSE_MODE_ALL)],
        );

        Box::pin(async move {
            let url = url?;
            debug!(%url, "requesting directory listing");
            let response = send(&client, url).await?;
            let payload: BrowseResponse = decode_json(response).await?;

            payload.into_listing()
        })
    }

    fn read_file(&self, path: String) -> TransportFuture<Result<FileContent, TransportError>> {
        let client = self.client.clone();
        let url = self.endpoint_url(&READ_FILE_ENDPOINT, &[("path", path.as_str())]);

        Box::pin(async move {
            let url = url?;
            debug!(%url, "requesting file content");
            let response = send(&client, url).await?;
            let payload: ReadFileResponse = decode_json(response).await?;

            Ok(FileContent {
                path: payload.path,
                name: payload.name,
                content: payload.content,
            })
        })
    }
}

/// Sends one GET request and rejects non-success statuses.
async fn send(client: &Client, url: Url) -> Result<Response, TransportError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(TransportError::connectivity)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let fallback_detail = status
        .canonical_reason()
        .unwrap_or(UNKNOWN_ERROR_DETAIL)
        .to_string();
    let body = response.text().await.unwrap_or_default();
    let body = body.trim();
    let detail = if body.is_empty() {
        fallback_detail
    } else {
        body.to_string()
    };

    Err(TransportError::Http {
        status: status.as_u16(),
        detail,
    })
}

/// Reads and parses a JSON body; unreadable bodies count as connectivity
/// failures.
async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    response
        .json::<T>()
        .await
        .map_err(TransportError::connectivity)
}

#[derive(Debug, Deserialize)]
struct BrowseResponse {
    #[serde(default)]
    current: String,
    #[serde(default)]
    entries: Vec<EntryPayload>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    parent: Option<String>,
}

impl BrowseResponse {
    /// Converts the wire payload, surfacing a reported `error` as an
    /// application failure that supersedes entries and paths.
    fn into_listing(self) -> Result<Listing, TransportError> {
        if let Some(message) = self.error {
            return Err(TransportError::Application(message));
        }

        Ok(Listing {
            entries: self.entries.into_iter().map(Entry::from).collect(),
            resolved_path: self.current,
            parent_path: self.parent,
        })
    }
}

#[derive(Debug, Deserialize)]
struct EntryPayload {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: EntryKindPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EntryKindPayload {
    Dir,
    #[serde(other)]
    File,
}

impl From<EntryPayload> for Entry {
    fn from(payload: EntryPayload) -> Self {
        let kind = match payload.kind {
            EntryKindPayload::Dir => EntryKind::Directory,
            EntryKindPayload::File => EntryKind::File,
        };

        Self {
            name: payload.name,
            kind,
            path: payload.path,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReadFileResponse {
    content: String,
    name: String,
    path: String,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::Router;
    use axum::extract::{Query, RawQuery};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response as AxumResponse};
    use axum::routing::get;
    use serde_json::json;

    use super::*;

    async fn spawn_server(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let address = listener.local_addr().expect("failed to read local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Url::parse(&format!("http://{address}")).expect("failed to build server url")
    }

    fn transport_for(base_url: Url) -> HttpFilesTransport {
        HttpFilesTransport::new(TransportConfig {
            base_url,
            timeout: Some(Duration::from_secs(5)),
        })
        .expect("failed to build transport")
    }

    async fn echo_browse(Query(params): Query<HashMap<String, String>>) -> AxumResponse {
        if params.get("mode").map(String::as_str) != Some("all") {
            return (StatusCode::BAD_REQUEST, "mode must be all").into_response();
        }
        let path = params.get("path").cloned().unwrap_or_default();

        axum::Json(json!({
            "entries": [
                {"name": "docs", "type": "dir", "path": format!("{path}/docs")},
                {"name": "notes.txt", "type": "file", "path": format!("{path}/notes.txt")},
                {"name": "link", "type": "symlink", "path": format!("{path}/link")}
            ],
            "current": path,
            "parent": "/"
        }))
        .into_response()
    }

    #[tokio::test]
    async fn test_browse_sends_encoded_path_and_maps_entries() {
        // Arrange
        let router = Router::new().route("/v1/files/browse", get(echo_browse));
        let transport = transport_for(spawn_server(router).await);

        // Act
        let listing = transport.browse("/tmp/with space&more".to_string()).await;

        // Assert
        assert_eq!(
            listing,
            Ok(Listing {
                entries: vec![
                    Entry::directory("docs", "/tmp/with space&more/docs"),
                    Entry::file("notes.txt", "/tmp/with space&more/notes.txt"),
                    Entry::file("link", "/tmp/with space&more/link"),
                ],
                resolved_path: "/tmp/with space&more".to_string(),
                parent_path: Some("/".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn test_browse_percent_encodes_query_like_uri_components() {
        // Arrange
        let router = Router::new().route(
            "/v1/files/browse",
            get(|RawQuery(query): RawQuery| async move {
                axum::Json(json!({"entries": [], "current": query.unwrap_or_default()}))
            }),
        );
        let transport = transport_for(spawn_server(router).await);

        // Act
        let listing = transport.browse("/a b/c+d~".to_string()).await;

        // Assert
        assert_eq!(
            listing.map(|listing| listing.resolved_path),
            Ok("path=%2Fa%20b%2Fc%2Bd%7E&mode=all".to_string())
        );
    }

    #[test]
    fn test_encode_query_component_never_emits_plus_for_space() {
        // Arrange
        let value = "my notes+draft.txt";

        // Act
        let encoded = encode_query_component(value);

        // Assert
        assert_eq!(encoded, "my%20notes%2Bdraft.txt");
    }

    #[tokio::test]
    async fn test_browse_keeps_base_url_path_prefix() {
        // Arrange
        let router = Router::new().route("/api/v1/files/browse", get(echo_browse));
        let server_url = spawn_server(router).await;
        let base_url = server_url.join("/api/").expect("failed to join prefix");
        let transport = transport_for(base_url);

        // Act
        let listing = transport.browse("/srv".to_string()).await;

        // Assert
        assert_eq!(
            listing.map(|listing| listing.resolved_path),
            Ok("/srv".to_string())
        );
    }

    #[tokio::test]
    async fn test_browse_maps_root_listing_without_parent() {
        // Arrange
        let router = Router::new().route(
            "/v1/files/browse",
            get(|| async { axum::Json(json!({"entries": [], "current": "/", "parent": null})) }),
        );
        let transport = transport_for(spawn_server(router).await);

        // Act
        let listing = transport.browse("/".to_string()).await;

        // Assert
        assert_eq!(
            listing,
            Ok(Listing {
                entries: Vec::new(),
                resolved_path: "/".to_string(),
                parent_path: None,
            })
        );
    }

    #[tokio::test]
    async fn test_browse_maps_error_payload_to_application_error() {
        // Arrange
        let router = Router::new().route(
            "/v1/files/browse",
            get(|| async { axum::Json(json!({"error": "Path does not exist"})) }),
        );
        let transport = transport_for(spawn_server(router).await);

        // Act
        let listing = transport.browse("/missing".to_string()).await;

        // Assert
        assert_eq!(
            listing,
            Err(TransportError::Application(
                "Path does not exist".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_browse_maps_non_success_status_to_http_error() {
        // Arrange
        let router = Router::new().route(
            "/v1/files/browse",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let transport = transport_for(spawn_server(router).await);

        // Act
        let listing = transport.browse("/".to_string()).await;

        // Assert
        assert_eq!(
            listing,
            Err(TransportError::Http {
                status: 500,
                detail: "Internal Server Error".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_browse_maps_malformed_body_to_connectivity_error() {
        // Arrange
        let router = Router::new().route("/v1/files/browse", get(|| async { "not json" }));
        let transport = transport_for(spawn_server(router).await);

        // Act
        let listing = transport.browse("/".to_string()).await;

        // Assert
        assert!(matches!(listing, Err(TransportError::Connectivity(_))));
    }

    #[tokio::test]
    async fn test_browse_maps_refused_connection_to_connectivity_error() {
        // Arrange
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind placeholder listener");
        let address = listener.local_addr().expect("failed to read local addr");
        drop(listener);
        let base_url = Url::parse(&format!("http://{address}")).expect("failed to build url");
        let transport = transport_for(base_url);

        // Act
        let listing = transport.browse("/".to_string()).await;

        // Assert
        assert!(matches!(listing, Err(TransportError::Connectivity(_))));
    }

    #[tokio::test]
    async fn test_browse_times_out_as_connectivity_error() {
        // Arrange
        let router = Router::new().route(
            "/v1/files/browse",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;

                "late"
            }),
        );
        let base_url = spawn_server(router).await;
        let transport = HttpFilesTransport::new(TransportConfig {
            base_url,
            timeout: Some(Duration::from_millis(50)),
        })
        .expect("failed to build transport");

        // Act
        let listing = transport.browse("/".to_string()).await;

        // Assert
        assert!(matches!(listing, Err(TransportError::Connectivity(_))));
    }

    #[tokio::test]
    async fn test_read_file_returns_content() {
        // Arrange
        let router = Router::new().route(
            "/v1/files/read-file",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let path = params.get("path").cloned().unwrap_or_default();

                axum::Json(json!({"path": path, "name": "notes.txt", "content": "hello\n"}))
            }),
        );
        let transport = transport_for(spawn_server(router).await);

        // Act
        let content = transport.read_file("/home/user/notes.txt".to_string()).await;

        // Assert
        assert_eq!(
            content,
            Ok(FileContent {
                path: "/home/user/notes.txt".to_string(),
                name: "notes.txt".to_string(),
                content: "hello\n".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_read_file_keeps_plain_text_error_detail() {
        // Arrange
        let router = Router::new().route(
            "/v1/files/read-file",
            get(|| async { (StatusCode::FORBIDDEN, "permission denied\n") }),
        );
        let transport = transport_for(spawn_server(router).await);

        // Act
        let content = transport.read_file("/root/secret".to_string()).await;

        // Assert
        assert_eq!(
            content,
            Err(TransportError::Http {
                status: 403,
                detail: "permission denied".to_string(),
            })
        );
    }

    #[test]
    fn test_endpoint_url_rejects_cannot_be_a_base_url() {
        // Arrange
        let transport = HttpFilesTransport::new(TransportConfig {
            base_url: Url::parse("mailto:files@example.com").expect("failed to parse url"),
            timeout: None,
        })
        .expect("failed to build transport");

        // Act
        let url = transport.endpoint_url(&BROWSE_ENDPOINT, &[]);

        // Assert
        assert!(matches!(url, Err(TransportError::Connectivity(_))));
    }
}
