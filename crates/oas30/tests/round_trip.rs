//! Saving documents and reading them back

use oas30::prelude::*;
use oas30::{
    is_extension_key, DocumentConfig, DocumentFormat, Error, DEFAULT_OPENAPI_VERSION,
    EXTENSION_PREFIX,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

const PETSTORE_JSON: &str = include_str!("fixtures/petstore.json");

fn petstore() -> OpenApi {
    OpenApi::from_json_str(PETSTORE_JSON).unwrap()
}

#[test]
fn test_write_and_read_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("openapi.json");

    let spec = petstore();
    spec.write_to_path(&path, &DocumentConfig::default()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n"));
    assert_eq!(OpenApi::from_path(&path).unwrap(), spec);
}

#[cfg(feature = "yaml")]
#[test]
fn test_write_and_read_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("openapi.yml");

    let spec = petstore();
    spec.write_to_path(&path, &DocumentConfig::default()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("openapi:"));
    assert_eq!(OpenApi::from_path(&path).unwrap(), spec);
}

#[test]
fn test_sniffs_format_without_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("openapi.txt");
    std::fs::write(&path, PETSTORE_JSON).unwrap();

    assert_eq!(OpenApi::from_path(&path).unwrap(), petstore());
}

#[test]
fn test_unknown_output_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("openapi.txt");

    let err = petstore()
        .write_to_path(&path, &DocumentConfig::default())
        .unwrap_err();
    assert!(matches!(err, Error::UnknownFormat(_)));

    petstore()
        .write_to_path(&path, &DocumentConfig::new().format(DocumentFormat::Json))
        .unwrap();
    assert!(path.exists());
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = OpenApi::from_path(dir.path().join("absent.json")).unwrap_err();
    match err {
        Error::Io { path, .. } => assert!(path.ends_with("absent.json")),
        other => panic!("expected an IO error, got {:?}", other),
    }
}

#[test]
fn test_map_order_survives_a_save() {
    let text = petstore()
        .to_string_with(&DocumentConfig::new().pretty(false))
        .unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&text).unwrap();

    let paths: Vec<&String> = reparsed["paths"].as_object().unwrap().keys().collect();
    assert_eq!(paths, vec!["/pets", "/pets/{id}", "x-paths-note"]);

    let properties: Vec<&String> = reparsed["components"]["schemas"]["NewPet"]["properties"]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(properties, vec!["name", "tag", "status"]);

    let schemas: Vec<&String> = reparsed["components"]["schemas"]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(schemas, vec!["Pet", "NewPet", "Error"]);
}

#[test]
fn test_response_and_extension_positions_survive_a_save() {
    let text = r#"{"openapi":"3.0.3","info":{"title":"t","version":"1"},"paths":{"x-first":1,"/a":{"get":{"responses":{"default":{"description":"error"},"x-mid":true,"200":{"description":"ok"}}}},"x-mid":2,"/b":{}}}"#;

    let spec = OpenApi::from_json_str(text).unwrap();
    let saved = spec
        .to_string_with(&DocumentConfig::new().pretty(false))
        .unwrap();
    assert_eq!(saved, text);
}

#[test]
fn test_explicit_nulls_and_false_survive_a_save() {
    let original = json!({
        "openapi": "3.0.3",
        "info": { "title": "t", "version": "1" },
        "paths": {
            "/items": {
                "get": {
                    "parameters": [{
                        "name": "q",
                        "in": "query",
                        "required": false,
                        "schema": { "type": "string" },
                        "example": null
                    }],
                    "responses": {
                        "200": {
                            "description": "ok",
                            "content": {
                                "application/json": {
                                    "schema": { "type": "string", "nullable": true, "default": null },
                                    "example": null
                                }
                            },
                            "links": {
                                "next": { "operationId": "listItems", "requestBody": null }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "examples": { "Nothing": { "value": null } }
        }
    });

    let spec = OpenApi::from_json_str(&original.to_string()).unwrap();
    assert_eq!(spec.to_json(), original);
}

#[test]
fn test_extensions_survive_a_save() {
    let mut spec = petstore();
    spec.set_extension("x-audience", json!("public"));

    let reloaded = OpenApi::from_json_str(&spec.to_json_pretty()).unwrap();
    assert_eq!(reloaded.extension("x-audience"), Some(&json!("public")));
    assert_eq!(reloaded.extension("x-generated-by"), Some(&json!("hand")));

    let vendor: Vec<&String> = reloaded.vendor_extensions().map(|(k, _)| k).collect();
    assert_eq!(vendor, vec!["x-generated-by", "x-audience"]);
    assert!(vendor.iter().all(|k| k.starts_with(EXTENSION_PREFIX)));
}

#[test]
fn test_built_document_loads_back() {
    let spec = OpenApi::new("Built", "0.1.0")
        .server(Server::new("https://example.com"))
        .tag(Tag::new("users"))
        .schema(
            "User",
            Schema::object()
                .with_property("id", Schema::integer())
                .with_required("id"),
        )
        .security_scheme("bearer", SecurityScheme::bearer("JWT"))
        .path(
            "/users/{id}",
            HttpMethod::Get,
            Operation::new()
                .tag("users")
                .operation_id("getUser")
                .parameter(Parameter::path("id", Schema::integer()))
                .response(200, Response::json("The user", Schema::reference("User")))
                .response(404, Response::new("Not found")),
        );

    let reloaded = OpenApi::from_json_str(&spec.to_json_pretty()).unwrap();
    assert_eq!(reloaded, spec);
    assert_eq!(reloaded.openapi, DEFAULT_OPENAPI_VERSION);
    assert!(reloaded.vendor_extensions().all(|(key, _)| is_extension_key(key)));
}
