#![allow(dead_code)]

use employme::EmployMe;
use httpmock::prelude::*;
use serde_json::{json, Value};

pub const TOKEN: &str = "tok_abc123";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn client_for(server: &MockServer) -> EmployMe {
    init_tracing();
    EmployMe::new(&server.base_url())
}

pub fn user_json(role: &str, has_profile: bool) -> Value {
    json!({
        "id": "usr_1",
        "email": "a@b.com",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "role": role,
        "isVerified": true,
        "hasProfile": has_profile
    })
}

pub fn auth_ok(role: &str, has_profile: bool) -> Value {
    json!({
        "success": true,
        "data": { "user": user_json(role, has_profile), "token": TOKEN }
    })
}

pub fn me_ok(role: &str, has_profile: bool) -> Value {
    json!({
        "success": true,
        "data": { "user": user_json(role, has_profile) }
    })
}

pub fn failure(message: &str) -> Value {
    json!({ "success": false, "message": message })
}

/// Logs `client` in as `role` through a one-shot login mock.
pub async fn log_in(server: &MockServer, client: &mut EmployMe, role: &str, has_profile: bool) {
    let body = auth_ok(role, has_profile);
    let login = server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(200).json_body(body.clone());
        })
        .await;

    client
        .auth()
        .login("a@b.com", "correct horse")
        .await
        .expect("login should succeed");

    login.delete_async().await;
}
