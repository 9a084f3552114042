//! Documents that do not have the shape of an OpenAPI 3.0 document

use oas30::{Error, OpenApi};
use serde_json::{json, Value};

fn minimal() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": { "title": "t", "version": "1" },
        "paths": {}
    })
}

fn with_operation(operation: Value) -> Value {
    let mut doc = minimal();
    doc["paths"] = json!({ "/items/{id}": { "get": operation } });
    doc
}

fn load(doc: &Value) -> Result<OpenApi, Error> {
    OpenApi::from_json_str(&doc.to_string())
}

#[test]
fn test_minimal_document_loads() {
    assert!(load(&minimal()).is_ok());
}

#[test]
fn test_missing_required_root_fields() {
    for field in ["openapi", "info", "paths"] {
        let mut doc = minimal();
        doc.as_object_mut().unwrap().remove(field);
        let err = load(&doc).unwrap_err();
        assert!(err.to_string().contains(field), "{}: {}", field, err);
    }
}

#[test]
fn test_info_requires_title_and_version() {
    let mut doc = minimal();
    doc["info"] = json!({ "title": "t" });
    assert!(load(&doc).is_err());
}

#[test]
fn test_operation_requires_responses() {
    let doc = with_operation(json!({ "operationId": "getItem" }));
    assert!(load(&doc).is_err());
}

#[test]
fn test_response_requires_description() {
    let doc = with_operation(json!({ "responses": { "200": {} } }));
    let err = load(&doc).unwrap_err().to_string();
    assert!(err.contains("missing field `description`"), "{}", err);
}

#[test]
fn test_component_schema_error_is_reported() {
    let mut doc = minimal();
    doc["components"] = json!({
        "schemas": { "Pet": { "type": "kitten" } }
    });
    let err = load(&doc).unwrap_err().to_string();
    assert!(err.contains("kitten"), "{}", err);
}

#[test]
fn test_duplicate_status_class() {
    let text = r#"{
        "openapi": "3.0.3",
        "info": { "title": "t", "version": "1" },
        "paths": {
            "/items": {
                "get": {
                    "responses": {
                        "4xx": { "description": "lower" },
                        "4XX": { "description": "upper" }
                    }
                }
            }
        }
    }"#;
    let err = OpenApi::from_json_str(text).unwrap_err().to_string();
    assert!(err.contains("duplicate response key `4XX`"), "{}", err);
}

#[test]
fn test_bad_status_code() {
    let doc = with_operation(json!({ "responses": { "OK": { "description": "ok" } } }));
    assert!(load(&doc).is_err());

    let doc = with_operation(json!({ "responses": { "999": { "description": "ok" } } }));
    assert!(load(&doc).is_err());
}

#[test]
fn test_bad_parameter_location() {
    let doc = with_operation(json!({
        "parameters": [{ "name": "id", "in": "body", "schema": { "type": "string" } }],
        "responses": { "200": { "description": "ok" } }
    }));
    assert!(load(&doc).is_err());
}

#[test]
fn test_path_parameter_must_be_required() {
    let doc = with_operation(json!({
        "parameters": [{ "name": "id", "in": "path", "schema": { "type": "string" } }],
        "responses": { "200": { "description": "ok" } }
    }));
    let err = load(&doc).unwrap_err().to_string();
    assert!(err.contains("path parameter `id` must be required"), "{}", err);
}

#[test]
fn test_parameter_schema_xor_content() {
    let both = with_operation(json!({
        "parameters": [{
            "name": "filter",
            "in": "query",
            "schema": { "type": "string" },
            "content": { "application/json": { "schema": { "type": "object" } } }
        }],
        "responses": { "200": { "description": "ok" } }
    }));
    let err = load(&both).unwrap_err().to_string();
    assert!(err.contains("has both `schema` and `content`"), "{}", err);

    let neither = with_operation(json!({
        "parameters": [{ "name": "filter", "in": "query" }],
        "responses": { "200": { "description": "ok" } }
    }));
    let err = load(&neither).unwrap_err().to_string();
    assert!(err.contains("needs either `schema` or `content`"), "{}", err);
}

#[test]
fn test_unknown_security_scheme_type() {
    let mut doc = minimal();
    doc["components"] = json!({
        "securitySchemes": { "mtls": { "type": "mutualTLS" } }
    });
    assert!(load(&doc).is_err());
}

#[test]
fn test_unknown_http_method_is_not_an_operation() {
    let mut doc = minimal();
    doc["paths"] = json!({
        "/items": {
            "fetch": { "responses": { "200": { "description": "ok" } } }
        }
    });
    let spec = load(&doc).unwrap();
    let item = spec.paths.get("/items").unwrap();
    assert_eq!(item.operations().count(), 0);
    assert!(item.extensions.contains_key("fetch"));
}

#[test]
fn test_security_must_be_a_list() {
    let mut doc = minimal();
    doc["security"] = json!({ "api_key": [] });
    assert!(load(&doc).is_err());
}

#[test]
fn test_syntax_error() {
    let err = OpenApi::from_json_str("{ \"openapi\": ").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}
