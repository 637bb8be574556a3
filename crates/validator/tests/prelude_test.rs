//! Prelude smoke tests: the common composition paths hosts rely on.

use keyward_validator::prelude::*;

#[test]
fn name_rule_composes_from_the_prelude() {
    let name = not_blank().and(max_length(64));

    assert!(name.validate("cloudflare-prod").is_ok());
    assert_eq!(name.validate("").unwrap_err().code, "required");
    assert_eq!(name.validate(&"x".repeat(65)).unwrap_err().code, "max_length");
}

#[test]
fn errors_collect_across_fields() {
    let mut errors = ValidationErrors::new();
    for (field, value) in [("endpoint", "not a url"), ("mirror", "https://ok.example")] {
        if let Err(error) = url().validate(value) {
            errors.push(error.or_field(field));
        }
    }

    assert_eq!(errors.fields(), vec!["endpoint"]);
    assert_eq!(errors.errors()[0].param("expected"), Some("url"));
}

#[test]
fn numeric_and_choice_validators_are_exported() {
    assert!(in_range(1, 65_535).validate(&22).is_ok());
    assert!(one_of(&["", "RAW"]).validate("RAW").is_ok());
    assert!(min_length(1).validate("a").is_ok());
}
