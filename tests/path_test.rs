use autopsy::lookup::{lookup_path, lookup_paths};
use autopsy::{Location, LookupResult, Path, PathElement, Paths, Undefined, Value, ValueKind};
use serde_json::json;

fn document() -> Value {
    Value::from(json!({
        "users": [
            {"email": "a@example.com", "roles": ["admin"]},
            {"email": null}
        ],
        "count": 2
    }))
}

#[test]
fn test_path_display_matches_location_display() {
    let path = Path::key("users").then_index(0).then_key("email");
    assert_eq!(path.to_string(), "users[0].email");
    assert_eq!(Location::from(&path).to_string(), "users[0].email");
}

#[test]
fn test_paths_display() {
    let paths = Paths::new("email").or(Path::key("contact").then_key("email"));
    assert_eq!(paths.to_string(), "email | contact.email");
    assert_eq!(paths.len(), 2);
}

#[test]
fn test_lookup_nested_value() {
    let document = document();
    let path = Path::key("users").then_index(0).then_key("roles").then_index(0);
    match lookup_path(&Location::root(), &document, &path) {
        LookupResult::Defined { location, value } => {
            assert_eq!(location.to_string(), "users[0].roles[0]");
            assert_eq!(value.as_str(), Some("admin"));
        }
        other => panic!("expected defined, got {:?}", other),
    }
}

#[test]
fn test_lookup_null_is_defined() {
    let document = document();
    let path = Path::key("users").then_index(1).then_key("email");
    let result = lookup_path(&Location::root(), &document, &path);
    assert!(result.is_defined());
}

#[test]
fn test_lookup_relative_to_base_location() {
    let document = document();
    let users = document.as_struct().unwrap().get("users").unwrap();
    let base = Location::root().key("users");
    let result = lookup_path(&base, users, &Path::index(5).then_key("email"));
    assert_eq!(
        result,
        LookupResult::Undefined(Undefined::PathMissing {
            location: base.index(5).key("email"),
        })
    );
}

#[test]
fn test_index_into_struct_is_type_mismatch() {
    let document = document();
    let path = Path::key("count").then_index(0).then_key("x");
    let result = lookup_path(&Location::root(), &document, &path);
    assert_eq!(
        result,
        LookupResult::Undefined(Undefined::InvalidType {
            expected: ValueKind::Array,
            actual: ValueKind::Number,
            breakpoint: Location::root().key("count"),
        })
    );
}

#[test]
fn test_lookup_paths_stops_at_first_defined() {
    let document = document();
    let paths = Paths::new("missing").or("count").or(Path::key("users").then_index(0));
    match lookup_paths(&Location::root(), &document, &paths) {
        LookupResult::Defined { location, .. } => assert_eq!(location.to_string(), "count"),
        other => panic!("expected defined, got {:?}", other),
    }
}

#[test]
fn test_lookup_paths_reports_last_alternative() {
    let document = document();
    let paths = Paths::new(Path::key("count").then_key("x")).or("absent");
    let result = lookup_paths(&Location::root(), &document, &paths);
    assert_eq!(
        result,
        LookupResult::Undefined(Undefined::PathMissing {
            location: Location::root().key("absent"),
        })
    );
}

#[test]
fn test_location_elements_root_first() {
    let location = Location::root().key("a").index(3).append(PathElement::key("b"));
    let elements: Vec<String> = location.elements().iter().map(|e| e.to_string()).collect();
    assert_eq!(elements, vec!["a", "[3]", "b"]);
    assert_eq!(location.parent().map(ToString::to_string).as_deref(), Some("a[3]"));
}
