//! JSON-RPC node double for the ledger and contract tests.

use std::collections::HashMap;

use primitive_types::U256;
use serde_json::{json, Value};

use crate::client::to_wire;
use crate::types::Address;

fn request_json(request: &mockito::Request) -> Value {
    request
        .body()
        .ok()
        .and_then(|body| serde_json::from_slice(body).ok())
        .unwrap_or(Value::Null)
}

fn envelope(request: &mockito::Request, outcome: Value) -> Vec<u8> {
    let mut reply = json!({ "jsonrpc": "2.0", "id": request_json(request)["id"].clone() });
    if let (Some(reply), Some(outcome)) = (reply.as_object_mut(), outcome.as_object()) {
        reply.extend(outcome.clone());
    }
    reply.to_string().into_bytes()
}

pub fn reply_result(request: &mockito::Request, result: &str) -> Vec<u8> {
    envelope(request, json!({ "result": result }))
}

pub fn reply_error(request: &mockito::Request, code: i64, message: &str) -> Vec<u8> {
    envelope(request, json!({ "error": { "code": code, "message": message } }))
}

/// 32-byte ABI word for an unsigned integer
pub fn word_u256(value: U256) -> String {
    hex::encode(to_wire(value).to_be_bytes::<32>())
}

/// 32-byte ABI word for an address
pub fn word_address(address: &Address) -> String {
    format!("{:0>64}", hex::encode(address.as_bytes()))
}

/// `eth_call` answers keyed by `(contract, 4-byte selector hex)`; anything else reverts.
#[derive(Default, Clone)]
pub struct ScriptedNode {
    answers: HashMap<(String, String), String>,
}

impl ScriptedNode {
    pub fn answer(mut self, to: Address, selector: &str, words: &[String]) -> Self {
        self.answers
            .insert((to.to_string(), selector.to_string()), format!("0x{}", words.concat()));
        self
    }

    fn respond(&self, request: &mockito::Request) -> Vec<u8> {
        let body = request_json(request);
        let call = &body["params"][0];
        let to = call["to"].as_str().unwrap_or_default().to_lowercase();
        let input = call["input"].as_str().or_else(|| call["data"].as_str()).unwrap_or_default();
        let selector = input.trim_start_matches("0x").chars().take(8).collect::<String>();

        match self.answers.get(&(to, selector)) {
            Some(result) => reply_result(request, result),
            None => reply_error(request, 3, "execution reverted"),
        }
    }

    /// Serve the script from a fresh mock server; keep both handles alive for the test
    pub async fn serve(self) -> (mockito::ServerGuard, mockito::Mock) {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |request| self.respond(request))
            .create_async()
            .await;
        (server, mock)
    }
}
