//! Property tests for the string vocabularies

use oas30::expression::Source;
use oas30::{template_parameters, HttpMethod, Parameter, RuntimeExpression, Schema, StatusCode};
use proptest::prelude::*;

fn source() -> impl Strategy<Value = Source> {
    prop_oneof![
        "[A-Za-z0-9_-]{1,20}".prop_map(Source::Header),
        "[A-Za-z0-9_]{1,20}".prop_map(Source::Query),
        "[A-Za-z0-9_]{1,20}".prop_map(Source::Path),
        Just(Source::Body(None)),
        "(/[a-z0-9]{1,8}){0,4}".prop_map(|p| Source::Body(Some(p))),
    ]
}

fn expression() -> impl Strategy<Value = RuntimeExpression> {
    prop_oneof![
        Just(RuntimeExpression::Url),
        Just(RuntimeExpression::Method),
        Just(RuntimeExpression::StatusCode),
        source().prop_map(RuntimeExpression::Request),
        source().prop_map(RuntimeExpression::Response),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_expression_prints_its_source_text(expr in expression()) {
        let text = expr.to_string();
        let parsed: RuntimeExpression = text.parse().unwrap();
        prop_assert_eq!(&parsed, &expr);
        prop_assert_eq!(parsed.to_string(), text);
    }

    #[test]
    fn prop_expression_without_dollar_is_rejected(text in "[a-zA-Z][a-zA-Z.#/]{0,30}") {
        prop_assert!(text.parse::<RuntimeExpression>().is_err());
    }

    #[test]
    fn prop_status_code_accepts_valid_codes(code in 100u16..=599) {
        let parsed: StatusCode = code.to_string().parse().unwrap();
        prop_assert_eq!(parsed, StatusCode::Code(code));
        prop_assert!(parsed.matches(code));
    }

    #[test]
    fn prop_status_code_rejects_out_of_range(code in 600u16..10000) {
        prop_assert!(code.to_string().parse::<StatusCode>().is_err());
    }

    #[test]
    fn prop_status_range_covers_its_class(class in 1u8..=5, rest in 0u16..100) {
        let range: StatusCode = format!("{}XX", class).parse().unwrap();
        prop_assert!(range.matches(u16::from(class) * 100 + rest));
        prop_assert_eq!(range.to_string(), format!("{}XX", class));
    }

    #[test]
    fn prop_path_parameter_is_always_required(
        name in "[a-zA-Z_][a-zA-Z0-9_]{0,15}",
        required in any::<bool>(),
    ) {
        let param = Parameter::path(name, Schema::string()).required(required);
        prop_assert!(param.is_required());
    }

    #[test]
    fn prop_template_parameters_are_found_in_order(
        names in prop::collection::vec("[a-z][a-z0-9]{0,7}", 0..5),
    ) {
        let path: String = names.iter().map(|n| format!("/seg/{{{}}}", n)).collect();
        let path = if path.is_empty() { "/".to_string() } else { path };
        let found = template_parameters(&path).unwrap();
        prop_assert_eq!(found, names.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn prop_method_parse_is_case_insensitive(index in 0usize..8, upper in any::<bool>()) {
        let method = HttpMethod::ALL[index];
        let text = if upper { method.as_str().to_uppercase() } else { method.to_string() };
        prop_assert_eq!(text.parse::<HttpMethod>().unwrap(), method);
    }
}
