//! Single-use request objects for the four HTTP verbs
//!
//! Every request object follows the same two-phase lifecycle: it is built
//! with a [`RequestDescriptor`], then [`execute`](GetRequest::execute)d
//! exactly once against a [`Transport`]. Before execution every accessor
//! returns `None`.
//!
//! A non-success status is not an error. The status code is stored and the
//! caller is expected to check [`code`](GetRequest::code) before trusting
//! any reshaped data. For [`GetRequest`] the reshape hook only runs on a
//! 200 response, so `data()` stays `None` otherwise while `body()` still
//! exposes whatever the service sent back.

use http_client::{HttpRequest, HttpResponse, Method, Transport};
use serde_json::Value;

use crate::error::{ApiError, Result};

/// A query parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    /// Sent as one comma-joined value: `ids=a1,a2,a3`
    Joined(Vec<String>),
    /// Sent as repeated keys: `ids=a1&ids=a2`
    Repeated(Vec<String>),
}

impl QueryValue {
    pub fn joined<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Joined(values.into_iter().map(Into::into).collect())
    }

    pub fn repeated<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Repeated(values.into_iter().map(Into::into).collect())
    }

    /// Encoded values in the order they are sent
    pub fn encode(&self) -> Vec<String> {
        match self {
            QueryValue::Single(value) => vec![value.clone()],
            QueryValue::Joined(values) => vec![values.join(",")],
            QueryValue::Repeated(values) => values.clone(),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::Single(value.clone())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Single(value.to_string())
    }
}

macro_rules! query_value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    Self::Single(value.to_string())
                }
            }
        )*
    };
}

query_value_from_number!(u8, u32, u64, i32, i64, usize);

/// Target URL, query, headers and optional JSON payload of one call
///
/// Optional query values that are `None` are never recorded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestDescriptor {
    url: String,
    query: Vec<(String, QueryValue)>,
    headers: Vec<(String, String)>,
    payload: Option<Value>,
}

impl RequestDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn query_opt<V: Into<QueryValue>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn headers<I>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.headers.extend(headers);
        self
    }

    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The stored value for `key`, if it was set
    pub fn query_value(&self, key: &str) -> Option<&QueryValue> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The first encoded value for `key` as it goes on the wire
    pub fn encoded_query(&self, key: &str) -> Option<String> {
        self.query_value(key)
            .and_then(|value| value.encode().into_iter().next())
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn payload_ref(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    fn payload_mut(&mut self) -> &mut Option<Value> {
        &mut self.payload
    }

    /// Lower into a transport request for `method`
    ///
    /// PUT and POST always carry a body, `{}` when no payload was set. A
    /// DELETE only carries one when a payload is present.
    pub fn to_http(&self, method: Method) -> Result<HttpRequest> {
        let mut request = HttpRequest::new(method, self.url.clone());
        for (key, value) in &self.query {
            for encoded in value.encode() {
                request.query.push((key.clone(), encoded));
            }
        }
        request.headers = self.headers.clone();
        request.body = match (&self.payload, method) {
            (Some(payload), _) => Some(serde_json::to_string(payload)?),
            (None, Method::Put | Method::Post) => Some("{}".to_string()),
            (None, _) => None,
        };
        Ok(request)
    }
}

/// Post-processing step run on a 200 body before it is exposed as data
pub type Reshape<T> = Box<dyn Fn(&Value) -> Result<T>>;

fn dispatch<C>(transport: &C, method: Method, descriptor: &RequestDescriptor) -> Result<HttpResponse>
where
    C: Transport + ?Sized,
{
    let request = descriptor.to_http(method)?;
    tracing::debug!(method = %method, url = %request.url, "dispatching request");
    let response = transport.send(&request)?;
    if !response.is_success() {
        tracing::debug!(method = %method, url = %request.url, status = response.status, "non-success status");
    }
    Ok(response)
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Behaviour shared by every request object
pub trait Request {
    const METHOD: Method;

    fn descriptor(&self) -> &RequestDescriptor;

    /// Status code of the executed call, `None` before execute
    fn code(&self) -> Option<u16>;

    /// Perform the single network call and return its status code
    ///
    /// The request counts as executed once dispatch starts, so a call that
    /// failed at the transport cannot be retried on the same object.
    fn execute<C: Transport + ?Sized>(&mut self, transport: &C) -> Result<u16>;

    fn is_executed(&self) -> bool;

    fn is_success(&self) -> bool {
        matches!(self.code(), Some(code) if (200..300).contains(&code))
    }
}

/// A read call whose 200 body is reshaped into `T`
pub struct GetRequest<T = Value> {
    descriptor: RequestDescriptor,
    reshape: Reshape<T>,
    executed: bool,
    code: Option<u16>,
    body: Option<Value>,
    data: Option<T>,
}

impl GetRequest<Value> {
    /// A request exposing the untouched JSON body as its data
    pub fn new(descriptor: RequestDescriptor) -> Self {
        Self::with_reshape(descriptor, |body| Ok(body.clone()))
    }
}

impl<T> GetRequest<T> {
    pub fn with_reshape<F>(descriptor: RequestDescriptor, reshape: F) -> Self
    where
        F: Fn(&Value) -> Result<T> + 'static,
    {
        Self {
            descriptor,
            reshape: Box::new(reshape),
            executed: false,
            code: None,
            body: None,
            data: None,
        }
    }

    /// Parsed response body, or the raw text as a JSON string
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Reshaped data, present only after a 200 response
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl<T> Request for GetRequest<T> {
    const METHOD: Method = Method::Get;

    fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    fn code(&self) -> Option<u16> {
        self.code
    }

    fn is_executed(&self) -> bool {
        self.executed
    }

    fn execute<C: Transport + ?Sized>(&mut self, transport: &C) -> Result<u16> {
        if self.executed {
            return Err(ApiError::AlreadyExecuted);
        }
        self.executed = true;
        let response = dispatch(transport, Self::METHOD, &self.descriptor)?;
        let body = parse_body(&response.body);
        self.code = Some(response.status);

        let reshaped = (response.status == 200).then(|| (self.reshape)(&body));
        self.body = Some(body);
        if let Some(reshaped) = reshaped {
            self.data = Some(reshaped?);
        }
        Ok(response.status)
    }
}

impl<T> std::fmt::Debug for GetRequest<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetRequest")
            .field("descriptor", &self.descriptor)
            .field("executed", &self.executed)
            .field("code", &self.code)
            .field("body", &self.body)
            .field("data", &self.data)
            .finish()
    }
}

/// Declare a write-style request: the response is kept as raw text
macro_rules! define_text_request {
    ($(#[$meta:meta])* $name:ident, $method:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            descriptor: RequestDescriptor,
            executed: bool,
            code: Option<u16>,
            text: Option<String>,
        }

        impl $name {
            pub fn new(descriptor: RequestDescriptor) -> Self {
                Self {
                    descriptor,
                    executed: false,
                    code: None,
                    text: None,
                }
            }

            /// Raw response text
            pub fn text(&self) -> Option<&str> {
                self.text.as_deref()
            }

            /// Parse the stored text as JSON, `None` before execute
            pub fn json(&self) -> Option<Result<Value>> {
                self.text
                    .as_deref()
                    .map(|text| serde_json::from_str(text).map_err(ApiError::from))
            }
        }

        impl Request for $name {
            const METHOD: Method = $method;

            fn descriptor(&self) -> &RequestDescriptor {
                &self.descriptor
            }

            fn code(&self) -> Option<u16> {
                self.code
            }

            fn is_executed(&self) -> bool {
                self.executed
            }

            fn execute<C: Transport + ?Sized>(&mut self, transport: &C) -> Result<u16> {
                if self.executed {
                    return Err(ApiError::AlreadyExecuted);
                }
                self.executed = true;
                let response = dispatch(transport, Self::METHOD, &self.descriptor)?;
                self.code = Some(response.status);
                self.text = Some(response.body);
                Ok(response.status)
            }
        }
    };
}

define_text_request!(
    /// A write call sending the descriptor payload as a JSON body
    PutRequest,
    Method::Put
);

define_text_request!(
    /// A create/trigger call sending the descriptor payload as a JSON body
    PostRequest,
    Method::Post
);

define_text_request!(
    /// A delete call; the payload is optional and sent as a body when set
    DeleteRequest,
    Method::Delete
);

impl PutRequest {
    /// Replace the whole payload before execute
    pub fn set_payload(&mut self, payload: Value) {
        *self.descriptor.payload_mut() = Some(payload);
    }

    /// Set one top-level payload key, creating the payload object if needed
    pub fn set_payload_field(&mut self, key: &str, value: Value) {
        let payload = self.descriptor.payload_mut();
        match payload {
            Some(Value::Object(map)) => {
                map.insert(key.to_string(), value);
            }
            _ => {
                let mut map = serde_json::Map::new();
                map.insert(key.to_string(), value);
                *payload = Some(Value::Object(map));
            }
        }
    }

    pub fn payload(&self) -> Option<&Value> {
        self.descriptor.payload_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubTransport;
    use serde_json::json;

    fn descriptor() -> RequestDescriptor {
        RequestDescriptor::new("https://api.example.test/v1/albums")
            .query("ids", QueryValue::joined(["a1", "a2", "a3"]))
            .query_opt("market", Some("gb"))
            .query_opt::<&str>("offset", None)
            .header("Authorization", "Bearer token")
    }

    #[test]
    fn test_comma_join_encoding() {
        let descriptor = descriptor();
        assert_eq!(descriptor.encoded_query("ids").as_deref(), Some("a1,a2,a3"));
        assert!(descriptor.query_value("offset").is_none());

        let http = descriptor.to_http(Method::Get).unwrap();
        assert_eq!(http.query_values("ids"), vec!["a1,a2,a3"]);
        assert_eq!(http.query_values("market"), vec!["gb"]);
        assert_eq!(http.header("authorization"), Some("Bearer token"));
        assert!(http.body.is_none());
    }

    #[test]
    fn test_repeated_encoding() {
        let http = RequestDescriptor::new("https://api.example.test")
            .query("ids", QueryValue::repeated(["a", "b"]))
            .to_http(Method::Get)
            .unwrap();
        assert_eq!(http.query_values("ids"), vec!["a", "b"]);
    }

    #[test]
    fn test_accessors_unset_before_execute() {
        let request = GetRequest::new(descriptor());
        assert!(request.code().is_none());
        assert!(request.body().is_none());
        assert!(request.data().is_none());
        assert!(!request.is_executed());
    }

    #[test]
    fn test_get_reshapes_on_200() {
        let transport = StubTransport::new(200, r#"{"albums":[{"id":"a1"}]}"#);
        let mut request = GetRequest::with_reshape(descriptor(), |body| {
            body.get("albums")
                .cloned()
                .ok_or_else(|| ApiError::missing_key("response", "albums"))
        });

        let code = request.execute(&transport).unwrap();
        assert_eq!(code, 200);
        assert_eq!(request.data(), Some(&json!([{"id": "a1"}])));
        assert_eq!(transport.calls(), 1);
        assert_eq!(transport.last_request().unwrap().method, Method::Get);
    }

    #[test]
    fn test_get_status_gating() {
        let transport = StubTransport::new(403, r#"{"error": "forbidden"}"#);
        let mut request = GetRequest::with_reshape(descriptor(), |_| -> Result<Value> {
            panic!("reshape must not run on a failed call")
        });

        let code = request.execute(&transport).unwrap();
        assert_eq!(code, 403);
        assert_eq!(request.code(), Some(403));
        assert!(request.data().is_none());
        assert_eq!(request.body(), Some(&json!({"error": "forbidden"})));
    }

    #[test]
    fn test_reshape_failure_propagates() {
        let transport = StubTransport::new(200, r#"{"error": "forbidden"}"#);
        let mut request = GetRequest::with_reshape(descriptor(), |body| {
            body.get("albums")
                .cloned()
                .ok_or_else(|| ApiError::missing_key("response", "albums"))
        });

        let result = request.execute(&transport);
        assert!(matches!(result, Err(ApiError::MissingKey { .. })));
        assert!(request.data().is_none());
    }

    #[test]
    fn test_non_json_body_kept_as_text() {
        let transport = StubTransport::new(502, "Bad Gateway");
        let mut request = GetRequest::new(descriptor());
        request.execute(&transport).unwrap();
        assert_eq!(request.body(), Some(&json!("Bad Gateway")));
    }

    #[test]
    fn test_execute_twice_is_rejected() {
        let transport = StubTransport::new(200, "{}");
        let mut request = GetRequest::new(descriptor());
        request.execute(&transport).unwrap();

        assert!(matches!(
            request.execute(&transport),
            Err(ApiError::AlreadyExecuted)
        ));
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_put_sends_payload_and_keeps_text() {
        let transport = StubTransport::new(200, "");
        let mut request = PutRequest::new(
            RequestDescriptor::new("https://api.example.test/v1/me/player")
                .payload(json!({"device_ids": ["d1"]})),
        );
        request.set_payload_field("play", json!(true));

        request.execute(&transport).unwrap();
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Put);
        let body: Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"device_ids": ["d1"], "play": true}));
        assert_eq!(request.text(), Some(""));
    }

    #[test]
    fn test_set_payload_field_creates_object() {
        let mut request = PutRequest::new(RequestDescriptor::new("https://api.example.test"));
        assert!(request.payload().is_none());
        request.set_payload_field("device", json!("AA:BB"));
        assert_eq!(request.payload(), Some(&json!({"device": "AA:BB"})));
    }

    #[test]
    fn test_delete_with_and_without_body() {
        let transport = StubTransport::new(200, r#"{"snapshot_id":"s1"}"#);
        let mut with_body = DeleteRequest::new(
            RequestDescriptor::new("https://api.example.test/v1/playlists/p1/tracks")
                .payload(json!({"tracks": [{"uri": "spotify:track:1"}]})),
        );
        with_body.execute(&transport).unwrap();
        assert!(transport.last_request().unwrap().body.is_some());
        assert_eq!(with_body.json().unwrap().unwrap(), json!({"snapshot_id": "s1"}));

        let mut without_body =
            DeleteRequest::new(RequestDescriptor::new("https://api.example.test/v1/me/albums"));
        without_body.execute(&transport).unwrap();
        assert!(transport.last_request().unwrap().body.is_none());
        assert_eq!(transport.calls(), 2);
    }

    #[test]
    fn test_put_and_post_without_payload_send_empty_object() {
        let transport = StubTransport::new(204, "");
        let descriptor = RequestDescriptor::new("https://api.example.test/v1/me/albums").query("ids", "a1");

        PutRequest::new(descriptor.clone()).execute(&transport).unwrap();
        assert_eq!(transport.last_request().unwrap().body.as_deref(), Some("{}"));

        PostRequest::new(descriptor.clone()).execute(&transport).unwrap();
        assert_eq!(transport.last_request().unwrap().body.as_deref(), Some("{}"));

        DeleteRequest::new(descriptor).execute(&transport).unwrap();
        assert!(transport.last_request().unwrap().body.is_none());
    }

    #[test]
    fn test_failed_dispatch_still_consumes_request() {
        struct FailingTransport;

        impl Transport for FailingTransport {
            fn send(&self, _request: &HttpRequest) -> std::result::Result<HttpResponse, http_client::HttpError> {
                Err(http_client::HttpError::Network("connection refused".to_string()))
            }
        }

        let mut get = GetRequest::new(descriptor());
        assert!(matches!(get.execute(&FailingTransport), Err(ApiError::NetworkError(_))));
        assert!(get.is_executed());
        assert!(get.code().is_none());

        let transport = StubTransport::new(200, "{}");
        assert!(matches!(get.execute(&transport), Err(ApiError::AlreadyExecuted)));

        let mut put = PutRequest::new(descriptor());
        assert!(put.execute(&FailingTransport).is_err());
        assert!(matches!(put.execute(&transport), Err(ApiError::AlreadyExecuted)));
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn test_post_failure_is_not_an_error() {
        let transport = StubTransport::new(401, "unauthorized");
        let mut request = PostRequest::new(RequestDescriptor::new("https://api.example.test/v1/me/player/next"));
        assert_eq!(request.execute(&transport).unwrap(), 401);
        assert!(!request.is_success());
        assert!(request.json().unwrap().is_err());
    }
}
