//! Request dispatch for the embedded server
//!
//! Decodes the envelope, routes to one of the four served methods, and
//! builds the response, echoing the request id throughout.

use chrono::Local;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{ Value, json };
use tracing::debug;

use crate::errors::error_codes;
use crate::protocol::{
    JSONRPC_VERSION,
    JsonRpcRequest,
    JsonRpcResponse,
    Method,
    error_response,
    success_response,
};

#[derive(Deserialize)]
struct GreetingParams {
    name: String,
}

#[derive(Deserialize)]
struct CalculateParams {
    a: f64,
    b: f64,
}

/// Process a decoded JSON-RPC request into a response
pub(super) fn process_request(request: JsonRpcRequest) -> JsonRpcResponse {
    let JsonRpcRequest { jsonrpc, method, params, id } = request;

    if jsonrpc != JSONRPC_VERSION {
        return error_response(id, error_codes::INVALID_REQUEST, "Invalid Request", None);
    }

    let method = match method.parse::<Method>() {
        Ok(method) => method,
        Err(_) => {
            debug!("rejecting unknown RPC method: {}", method);
            return error_response(id, error_codes::METHOD_NOT_FOUND, "Method not found", None);
        }
    };

    match method {
        Method::GetGreeting =>
            match parse_params::<GreetingParams>(&params, "Missing or invalid 'name' parameter") {
                Ok(p) => success_response(id, json!(greeting(&p.name))),
                Err(message) => error_response(id, error_codes::INVALID_PARAMS, &message, None),
            }
        Method::GetCurrentTime => success_response(id, json!(current_time())),
        Method::Calculate =>
            match
                parse_params::<CalculateParams>(
                    &params,
                    "Missing or invalid 'a' or 'b' parameters"
                )
            {
                Ok(p) => success_response(id, json!(calculate(p.a, p.b))),
                Err(message) => error_response(id, error_codes::INVALID_PARAMS, &message, None),
            }
        Method::GetSystemInfo => success_response(id, json!(system_info())),
    }
}

/// Decode params, distinguishing a missing/non-object params value from a
/// well-formed object with the wrong fields
fn parse_params<T: DeserializeOwned>(params: &Option<Value>, detail: &str) -> Result<T, String> {
    let value = match params {
        Some(value) if value.is_object() => value.clone(),
        _ => {
            return Err("Invalid params".to_string());
        }
    };
    serde_json::from_value(value).map_err(|_| detail.to_string())
}

fn greeting(name: &str) -> String {
    format!("Hello {} from Rust!", name)
}

fn current_time() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Operands are truncated to integers before adding
fn calculate(a: f64, b: f64) -> i64 {
    (a as i64) + (b as i64)
}

fn system_info() -> String {
    format!(
        "Rust server v{} ({} {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::protocol::RequestId;

    fn request(method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest::new(1, method, params)
    }

    #[test]
    fn greeting_formats_name() {
        let response = process_request(
            request("getGreeting", Some(json!({ "name": "HTTP Client" })))
        );
        assert_eq!(response.result(), Some(&json!("Hello HTTP Client from Rust!")));
        assert_eq!(response.id, Some(RequestId::Number(1)));
    }

    #[test]
    fn greeting_without_name_is_invalid_params() {
        let response = process_request(request("getGreeting", Some(json!({}))));
        let error = response.error().expect("error body");
        assert_eq!(error.code, error_codes::INVALID_PARAMS);
        assert_eq!(error.message, "Missing or invalid 'name' parameter");
    }

    #[test]
    fn greeting_with_non_object_params_is_invalid_params() {
        let response = process_request(request("getGreeting", Some(json!([1, 2]))));
        let error = response.error().expect("error body");
        assert_eq!(error.code, error_codes::INVALID_PARAMS);
        assert_eq!(error.message, "Invalid params");
    }

    #[test]
    fn calculate_truncates_before_adding() {
        let response = process_request(
            request("calculate", Some(json!({ "a": 2.9, "b": 3.9 })))
        );
        assert_eq!(response.result(), Some(&json!(5)));

        let response = process_request(request("calculate", Some(json!({ "a": 25, "b": 17 }))));
        assert_eq!(response.result(), Some(&json!(42)));
    }

    #[test]
    fn calculate_rejects_non_numeric_operands() {
        let response = process_request(
            request("calculate", Some(json!({ "a": "x", "b": 1 })))
        );
        let error = response.error().expect("error body");
        assert_eq!(error.code, error_codes::INVALID_PARAMS);
        assert_eq!(error.message, "Missing or invalid 'a' or 'b' parameters");
    }

    #[test]
    fn current_time_matches_layout() {
        let response = process_request(request("getCurrentTime", None));
        let time = response.result().unwrap().as_str().unwrap();
        assert_eq!(time.len(), 19);
        assert_eq!(&time[4..5], "-");
        assert_eq!(&time[10..11], " ");
    }

    #[test]
    fn unknown_method_echoes_id() {
        let mut request = request("fetchWeather", None);
        request.id = Some(RequestId::String("abc".to_string()));

        let response = process_request(request);
        let error = response.error().expect("error body");
        assert_eq!(error.code, error_codes::METHOD_NOT_FOUND);
        assert_eq!(response.id, Some(RequestId::String("abc".to_string())));
    }

    #[test]
    fn wrong_version_is_invalid_request() {
        let mut request = request("getCurrentTime", None);
        request.jsonrpc = "1.0".to_string();

        let response = process_request(request);
        let error = response.error().expect("error body");
        assert_eq!(error.code, error_codes::INVALID_REQUEST);
        assert_eq!(error.message, "Invalid Request");
    }
}
