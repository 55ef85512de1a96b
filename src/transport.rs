//! The verb-level contract every resource wrapper is written against.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;

/// Request parameters: merged into the JSON body for `post`/`put` and into
/// the query string for `get`/`delete`. Keys are not checked locally.
pub type Params = serde_json::Map<String, Value>;

/// Transport-level settings, handed to the transport untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Fields to include in the response (`opt_fields`).
    pub fields: Vec<String>,
    /// Related objects to expand in the response (`opt_expand`).
    pub expand: Vec<String>,
    /// Ask the service for pretty-printed JSON (`opt_pretty`).
    pub pretty: bool,
    /// Extra request headers, keyed by lower-cased name; these override
    /// defaults of the same name.
    pub headers: BTreeMap<String, String>,
    /// Return the whole response body instead of its `data` member.
    pub full_payload: bool,
    /// Per-call override of the transport's retry budget.
    pub max_retries: Option<u32>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_expand<I, S>(mut self, expand: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand = expand.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Header names are case-insensitive, so a later `with_header` for the
    /// same name replaces the earlier value whatever its casing.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_full_payload(mut self, full_payload: bool) -> Self {
        self.full_payload = full_payload;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }
}

/// The four HTTP verbs a resource wrapper needs.
///
/// Implementations own connection setup, authentication, body encoding,
/// response decoding and error translation. Each method returns the decoded
/// response, or `Value::Null` when the service answered with no content.
pub trait Transport {
    fn get(&self, path: &str, params: &Params, options: &RequestOptions) -> Result<Value>;

    fn post(&self, path: &str, params: &Params, options: &RequestOptions) -> Result<Value>;

    fn put(&self, path: &str, params: &Params, options: &RequestOptions) -> Result<Value>;

    fn delete(&self, path: &str, params: &Params, options: &RequestOptions) -> Result<Value>;
}

macro_rules! forward_transport {
    ($($ty:ty),*) => {
        $(
            impl<T: Transport + ?Sized> Transport for $ty {
                fn get(&self, path: &str, params: &Params, options: &RequestOptions) -> Result<Value> {
                    (**self).get(path, params, options)
                }

                fn post(&self, path: &str, params: &Params, options: &RequestOptions) -> Result<Value> {
                    (**self).post(path, params, options)
                }

                fn put(&self, path: &str, params: &Params, options: &RequestOptions) -> Result<Value> {
                    (**self).put(path, params, options)
                }

                fn delete(&self, path: &str, params: &Params, options: &RequestOptions) -> Result<Value> {
                    (**self).delete(path, params, options)
                }
            }
        )*
    };
}

forward_transport!(&T, Box<T>, Arc<T>);

#[cfg(test)]
pub(crate) mod testing {
    //! A transport that records every call and replays canned responses.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::error::AsanaError;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct RecordedCall {
        pub verb: &'static str,
        pub path: String,
        pub params: Params,
        pub options: RequestOptions,
    }

    #[derive(Default)]
    pub(crate) struct RecordingTransport {
        calls: Mutex<Vec<RecordedCall>>,
        responses: Mutex<VecDeque<Result<Value>>>,
    }

    impl RecordingTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        /// Queue a response for the next call. Calls with nothing queued get `Value::Null`.
        pub(crate) fn respond_with(&self, response: Result<Value>) {
            self.responses.lock().unwrap().push_back(response);
        }

        pub(crate) fn not_found(&self, message: &str) {
            self.respond_with(Err(AsanaError::NotFound {
                message: message.to_string(),
            }));
        }

        pub(crate) fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }

        fn record(
            &self,
            verb: &'static str,
            path: &str,
            params: &Params,
            options: &RequestOptions,
        ) -> Result<Value> {
            self.calls.lock().unwrap().push(RecordedCall {
                verb,
                path: path.to_string(),
                params: params.clone(),
                options: options.clone(),
            });
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Value::Null))
        }
    }

    impl Transport for RecordingTransport {
        fn get(&self, path: &str, params: &Params, options: &RequestOptions) -> Result<Value> {
            self.record("GET", path, params, options)
        }

        fn post(&self, path: &str, params: &Params, options: &RequestOptions) -> Result<Value> {
            self.record("POST", path, params, options)
        }

        fn put(&self, path: &str, params: &Params, options: &RequestOptions) -> Result<Value> {
            self.record("PUT", path, params, options)
        }

        fn delete(&self, path: &str, params: &Params, options: &RequestOptions) -> Result<Value> {
            self.record("DELETE", path, params, options)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingTransport;
    use super::*;

    #[test]
    fn options_builder_sets_every_field() {
        let options = RequestOptions::new()
            .with_fields(["name", "created_at"])
            .with_expand(["project"])
            .with_pretty(true)
            .with_header("Asana-Enable", "new_sections")
            .with_full_payload(true)
            .with_max_retries(2);

        assert_eq!(options.fields, vec!["name", "created_at"]);
        assert_eq!(options.expand, vec!["project"]);
        assert!(options.pretty);
        assert_eq!(options.headers["asana-enable"], "new_sections");
        assert!(options.full_payload);
        assert_eq!(options.max_retries, Some(2));
    }

    #[test]
    fn header_names_differing_in_case_are_one_header() {
        let options = RequestOptions::new()
            .with_header("Accept", "text/plain")
            .with_header("accept", "application/json");

        assert_eq!(options.headers.len(), 1);
        assert_eq!(options.headers["accept"], "application/json");
    }

    #[test]
    fn boxed_and_shared_transports_forward_calls() {
        let inner = Arc::new(RecordingTransport::new());
        let boxed: Box<dyn Transport> = Box::new(Arc::clone(&inner));

        boxed
            .put("/sections/1", &Params::new(), &RequestOptions::default())
            .unwrap();

        let calls = inner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].verb, "PUT");
        assert_eq!(calls[0].path, "/sections/1");
    }
}
