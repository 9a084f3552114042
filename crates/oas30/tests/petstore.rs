//! Loading complete documents

use oas30::prelude::*;
use oas30::{AdditionalProperties, DataFormat, ParameterLocation, SchemaKind, SchemaType};
use pretty_assertions::assert_eq;

const PETSTORE_JSON: &str = include_str!("fixtures/petstore.json");
#[cfg(feature = "yaml")]
const PETSTORE_YAML: &str = include_str!("fixtures/petstore.yaml");

fn petstore() -> OpenApi {
    OpenApi::from_json_str(PETSTORE_JSON).expect("petstore.json is a valid document")
}

#[test]
fn test_document_root() {
    let spec = petstore();

    assert_eq!(spec.openapi, "3.0.3");
    assert!(spec.spec_version().unwrap().is_3_0());
    assert_eq!(spec.info.title, "Swagger Petstore");
    assert_eq!(spec.info.license.as_ref().unwrap().name, "Apache 2.0");
    assert_eq!(spec.info.extension("x-logo").unwrap()["altText"], "Petstore");
    assert_eq!(spec.extension("x-generated-by").unwrap(), "hand");
    assert_eq!(spec.find_tag("pets").unwrap().description.as_deref(), Some("Everything about your pets"));
    assert_eq!(spec.security.as_ref().unwrap()[0]["api_key"], Vec::<String>::new());
}

#[test]
fn test_servers_and_variables() {
    let spec = petstore();
    let servers = spec.effective_servers();
    assert_eq!(servers.len(), 1);
    assert_eq!(
        servers[0].resolve_url(&Default::default()),
        "https://api.petstore.example.com/v1"
    );

    let overrides = [("environment".to_string(), "staging".to_string())].into();
    assert_eq!(
        servers[0].resolve_url(&overrides),
        "https://staging.petstore.example.com/v1"
    );
}

#[test]
fn test_paths_and_operations() {
    let spec = petstore();

    let keys: Vec<&str> = spec.paths.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["/pets", "/pets/{id}"]);
    assert_eq!(spec.paths.extensions["x-paths-note"], "internal");

    let ids: Vec<&str> = spec
        .operations()
        .filter_map(|(_, _, op)| op.operation_id.as_deref())
        .collect();
    assert_eq!(ids, vec!["findPets", "addPet", "findPetById", "deletePet"]);

    let (_, _, delete) = spec.operation_by_id("deletePet").unwrap();
    assert!(delete.is_deprecated());

    let (_, _, find) = spec.operation_by_id("findPets").unwrap();
    assert_eq!(find.extension("x-codegen-request-body-name").unwrap(), "body");
}

#[test]
fn test_path_level_parameters() {
    let spec = petstore();
    let item = spec.paths.get("/pets/{id}").unwrap();

    let params = item.parameters_for(HttpMethod::Get);
    assert_eq!(params.len(), 1);
    let id = params[0].as_item().unwrap();
    assert_eq!(id.location, ParameterLocation::Path);
    assert!(id.is_required());
    assert_eq!(
        id.schema.as_ref().unwrap().as_item().unwrap().format,
        Some(DataFormat::Int64)
    );
}

#[test]
fn test_responses() {
    let spec = petstore();
    let (_, _, add) = spec.operation_by_id("addPet").unwrap();

    let created = add.responses.for_status(201).unwrap().as_item().unwrap();
    assert_eq!(created.description, "pet created");
    let link = created.links.as_ref().unwrap()["GetPetById"].as_item().unwrap();
    assert_eq!(
        link.parameter_expression("id").unwrap().unwrap().to_string(),
        "$response.body#/id"
    );

    assert_eq!(
        add.responses.for_status(409).unwrap().as_ref_str(),
        Some("#/components/responses/UnexpectedError")
    );
    assert!(add.responses.for_status(500).is_none());

    let body = add.request_body.as_ref().unwrap().as_item().unwrap();
    assert!(body.is_required());
    assert!(body.content.contains_key("application/json"));
}

#[test]
fn test_callbacks() {
    let spec = petstore();
    let (_, _, add) = spec.operation_by_id("addPet").unwrap();

    let callback = add.callbacks.as_ref().unwrap()["onAdopted"].as_item().unwrap();
    let expressions = callback.runtime_expressions().unwrap();
    assert_eq!(expressions.len(), 1);
    assert_eq!(expressions[0].to_string(), "$request.body#/callbackUrl");

    let all: Vec<String> = spec
        .runtime_expressions()
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(all, vec!["$request.body#/callbackUrl", "$response.body#/id"]);
}

#[test]
fn test_component_schemas() {
    let spec = petstore();

    let pet = spec.component_schema("Pet").unwrap().as_item().unwrap();
    match pet.kind() {
        SchemaKind::AllOf(parts) => {
            assert_eq!(parts[0].as_ref_str(), Some("#/components/schemas/NewPet"));
            assert!(parts[1].as_item().unwrap().is_required("id"));
        }
        other => panic!("Pet should be an allOf schema, got {:?}", other),
    }

    let new_pet = spec.component_schema("NewPet").unwrap().as_item().unwrap();
    assert_eq!(new_pet.schema_type, Some(SchemaType::Object));
    let names: Vec<&str> = new_pet.properties.as_ref().unwrap().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["name", "tag", "status"]);
    assert!(new_pet.property("tag").unwrap().as_item().unwrap().is_nullable());

    let error = spec.component_schema("Error").unwrap().as_item().unwrap();
    assert_eq!(error.additional_properties, Some(AdditionalProperties::Bool(false)));
}

#[test]
fn test_security_schemes() {
    let spec = petstore();
    let schemes = spec.components.as_ref().unwrap().security_schemes.as_ref().unwrap();

    let oauth = schemes["petstore_auth"].as_item().unwrap();
    assert_eq!(oauth.scheme_type(), "oauth2");
    assert!(oauth.uses_scopes());

    let api_key = schemes["api_key"].as_item().unwrap();
    assert_eq!(api_key.scheme_type(), "apiKey");
}

#[test]
fn test_json_round_trip_is_lossless() {
    let original: serde_json::Value = serde_json::from_str(PETSTORE_JSON).unwrap();
    assert_eq!(petstore().to_json(), original);
}

#[cfg(feature = "yaml")]
#[test]
fn test_yaml_matches_json() {
    let yaml = OpenApi::from_yaml_str(PETSTORE_YAML).expect("petstore.yaml is a valid document");
    assert_eq!(yaml, petstore());
}

#[cfg(feature = "yaml")]
#[test]
fn test_yaml_integer_response_keys() {
    let yaml = OpenApi::from_yaml_str(PETSTORE_YAML).unwrap();
    let (_, _, find) = yaml.operation_by_id("findPetById").unwrap();
    let codes: Vec<String> = find.responses.responses.keys().map(ToString::to_string).collect();
    assert_eq!(codes, vec!["200", "404"]);
}
