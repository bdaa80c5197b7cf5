use serde_json::Value;

pub fn assert_required_fields(response: &Value) {
    let required: Vec<&str> = response
        .get("required")
        .and_then(|v| v.as_array())
        .expect("Missing required field list")
        .iter()
        .filter_map(|v| v.as_str())
        .collect();

    assert_eq!(required, vec!["code", "code_verifier", "redirect_uri"]);
}

pub fn assert_token_exchange_response(response: &Value) {
    assert_eq!(response.get("success"), Some(&Value::Bool(true)));
    for field in ["access_token", "token_type", "expires_in", "id_token"] {
        assert!(response.get(field).is_some(), "Missing {} field", field);
    }
    assert!(
        response.get("user_info").and_then(|v| v.as_object()).is_some(),
        "user_info must be an object"
    );
}

pub fn assert_upstream_error(response: &Value) {
    assert!(
        response.get("error").and_then(|v| v.as_str()).is_some(),
        "Missing error field"
    );
    assert!(
        response.get("details").and_then(|v| v.as_str()).is_some(),
        "Missing details field"
    );
    for field in ["access_token", "id_token", "user_info", "success"] {
        assert!(
            response.get(field).is_none(),
            "Error response must not carry {}",
            field
        );
    }
}
