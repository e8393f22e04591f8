use autopsy::reader::array::items;
use autopsy::reader::primitive::{number, string};
use autopsy::validator::numeric::minimum;
use autopsy::validator::object::max_properties;
use autopsy::validator::string::min_length;
use autopsy::{
    Failure, Location, Path, Paths, Property, ReadResult, Reader, ReaderEnv, StandardError,
    StandardErrors, StructReaderBuilder, StructValidator, ValidationResult, Value,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, PartialEq)]
struct LineItem {
    sku: String,
    quantity: u32,
}

#[derive(Debug, PartialEq)]
struct Order {
    id: String,
    customer: String,
    items: Vec<LineItem>,
    note: Option<String>,
    priority: u8,
}

fn incomplete<T>(location: &Location) -> ReadResult<T, StandardError> {
    ReadResult::failure(location.clone(), StandardError::custom("incomplete"))
}

fn line_item_reader() -> Reader<LineItem, StandardErrors> {
    let mut builder: StructReaderBuilder<StandardErrors> = StructReaderBuilder::new();
    let sku = builder.property(Property::required("sku", string().validation(min_length(3))));
    let quantity = builder.property(Property::required(
        "quantity",
        number::<u32, _, _>().validation(minimum(1)),
    ));
    builder.deny_additional_properties();
    builder.build(move |_, _, location, mut values| {
        match (values.take(&sku), values.take(&quantity)) {
            (Some(sku), Some(quantity)) => {
                ReadResult::success(location.clone(), LineItem { sku, quantity })
            }
            _ => incomplete(location),
        }
    })
}

fn order_reader() -> Reader<Order, StandardErrors> {
    let mut builder: StructReaderBuilder<StandardErrors> = StructReaderBuilder::new();
    let id = builder.property(Property::required(Paths::new("id").or("orderId"), string()));
    let customer = builder.property(Property::required(
        Path::key("customer").then_key("name"),
        string(),
    ));
    let items = builder.property(Property::required("items", items(line_item_reader())));
    let note = builder.property(Property::optional("note", string()));
    let priority = builder.property(Property::defaultable("priority", number::<u8, _, _>(), || 5));

    builder.build(move |_, _, location, mut values| {
        match (
            values.take(&id),
            values.take(&customer),
            values.take(&items),
            values.take(&note),
            values.take(&priority),
        ) {
            (Some(id), Some(customer), Some(items), Some(note), Some(priority)) => {
                let order = Order {
                    id,
                    customer,
                    items,
                    note,
                    priority,
                };
                ReadResult::success(location.clone(), order)
            }
            _ => incomplete(location),
        }
    })
}

fn env() -> ReaderEnv<StandardErrors> {
    ReaderEnv::new(StandardErrors)
}

fn located_codes(failure: &Failure<StandardError>) -> Vec<(String, &'static str)> {
    failure
        .causes()
        .flat_map(|cause| {
            cause
                .errors
                .iter()
                .map(move |error| (cause.location.to_string(), error.code()))
        })
        .collect()
}

#[test]
fn test_decodes_complete_order() {
    let input = Value::from(json!({
        "orderId": "A-1",
        "customer": {"name": "Ann"},
        "items": [
            {"sku": "abc", "quantity": 2},
            {"sku": "xyz", "quantity": 1}
        ]
    }));

    let order = order_reader().decode(&env(), &input).into_value().unwrap();

    assert_eq!(order.id, "A-1");
    assert_eq!(order.customer, "Ann");
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.note, None);
    assert_eq!(order.priority, 5);
}

#[test]
fn test_reports_every_problem_with_location() {
    let input = Value::from(json!({
        "customer": {"name": 7},
        "items": [
            {"sku": "ab", "quantity": 0},
            {"sku": "abc", "quantity": 1, "price": 3},
            "not-an-item"
        ],
        "priority": 300
    }));

    let failure = order_reader().decode(&env(), &input).into_result().unwrap_err();

    assert_eq!(
        located_codes(&failure),
        vec![
            ("orderId".to_string(), "path_missing"),
            ("customer.name".to_string(), "invalid_type"),
            ("items[0].sku".to_string(), "min_length"),
            ("items[0].quantity".to_string(), "min_value"),
            ("items[1].price".to_string(), "additional_property"),
            ("items[2]".to_string(), "invalid_type"),
            ("priority".to_string(), "value_cast"),
        ]
    );
}

#[test]
fn test_fail_fast_stops_at_first_problem() {
    let input = Value::from(json!({
        "id": "A-1",
        "customer": {"name": "Ann"},
        "items": [{"sku": "ab", "quantity": 0}],
        "priority": 300
    }));

    let failure = order_reader()
        .decode(&env().with_fail_fast(true), &input)
        .into_result()
        .unwrap_err();

    assert_eq!(
        located_codes(&failure),
        vec![("items[0].sku".to_string(), "min_length")]
    );
}

#[test]
fn test_type_mismatch_anchored_at_breakpoint() {
    let input = Value::from(json!({
        "id": "A-1",
        "customer": ["Ann"],
        "items": []
    }));

    let failure = order_reader().decode(&env(), &input).into_result().unwrap_err();

    assert_eq!(failure.len(), 1);
    assert_eq!(failure.first().location.to_string(), "customer");
    assert_eq!(
        failure.first().errors.first().to_string(),
        "expected object, got array"
    );
}

#[test]
fn test_multi_path_prefers_first_alternative() {
    let input = Value::from(json!({
        "id": "primary",
        "orderId": "secondary",
        "customer": {"name": "Ann"},
        "items": []
    }));

    let order = order_reader().decode(&env(), &input).into_value().unwrap();
    assert_eq!(order.id, "primary");
}

#[test]
fn test_multi_path_failure_at_last_alternative() {
    let mut builder: StructReaderBuilder<StandardErrors> = StructReaderBuilder::new();
    builder.property(Property::required(
        Paths::new(Path::key("a").then_key("x")).or(Path::key("b").then_key("y")),
        string(),
    ));
    let reader = builder.build(|_, _, location, _| ReadResult::success(location.clone(), ()));

    let failure = reader
        .decode(&env(), &Value::from(json!({})))
        .into_result()
        .unwrap_err();

    assert_eq!(failure.len(), 1);
    assert_eq!(failure.first().location, Location::root().key("b").key("y"));
}

#[test]
fn test_after_validator_sees_decoded_values() {
    let mut builder: StructReaderBuilder<StandardErrors> = StructReaderBuilder::new();
    let low = builder.property(Property::required("low", number::<i64, _, _>()));
    let high = builder.property(Property::required("high", number::<i64, _, _>()));
    let (low_check, high_check) = (low.clone(), high.clone());
    builder.validate_after(StructValidator::new(move |_, _, location, values, _| {
        match (values.get(&low_check), values.get(&high_check)) {
            (Some(low), Some(high)) if low > high => ValidationResult::invalid(
                location.key("low"),
                StandardError::custom("low must not exceed high"),
            ),
            _ => ValidationResult::Valid,
        }
    }));
    let reader = builder.build(move |_, _, location, mut values| {
        match (values.take(&low), values.take(&high)) {
            (Some(low), Some(high)) => ReadResult::success(location.clone(), (low, high)),
            _ => incomplete(location),
        }
    });

    assert_eq!(
        reader.decode(&env(), &Value::from(json!({"low": 1, "high": 2}))).into_value(),
        Some((1, 2))
    );

    let failure = reader
        .decode(&env(), &Value::from(json!({"low": 3, "high": 2})))
        .into_result()
        .unwrap_err();
    assert_eq!(failure.first().location.to_string(), "low");
    assert_eq!(failure.first().errors.first().to_string(), "low must not exceed high");
}

#[test]
fn test_before_validator_sees_raw_struct() {
    let mut builder: StructReaderBuilder<StandardErrors> = StructReaderBuilder::new();
    builder.validate_before(max_properties(1));
    builder.property(Property::optional("a", string()));
    let reader = builder.build(|_, _, location, _| ReadResult::success(location.clone(), ()));

    let failure = reader
        .decode(&env(), &Value::from(json!({"a": "x", "b": 1})))
        .into_result()
        .unwrap_err();
    assert_eq!(failure.first().errors.first().code(), "max_properties");
    assert!(failure.first().location.is_root());
}

#[test]
fn test_builder_failure_is_reported() {
    let mut builder: StructReaderBuilder<StandardErrors> = StructReaderBuilder::new();
    let start = builder.property(Property::required("start", number::<u32, _, _>()));
    let reader = builder.build(move |_, _, location, mut values| match values.take(&start) {
        Some(start) if start % 2 == 0 => ReadResult::success(location.clone(), start),
        Some(_) => {
            ReadResult::failure(location.clone(), StandardError::custom("start must be even"))
        }
        None => incomplete(location),
    });

    let failure = reader
        .decode(&env(), &Value::from(json!({"start": 3})))
        .into_result()
        .unwrap_err();
    assert_eq!(failure.to_string().lines().last(), Some("  1. (root): start must be even"));
}

#[test]
fn test_context_reaches_builder() {
    struct Tenant {
        prefix: &'static str,
    }

    let mut builder: StructReaderBuilder<StandardErrors, Tenant> = StructReaderBuilder::new();
    let name = builder.property(Property::required("name", string()));
    let reader: Reader<String, StandardErrors, Tenant> =
        builder.build(move |_, tenant: &Tenant, location, mut values| match values.take(&name) {
            Some(name) => {
                ReadResult::success(location.clone(), format!("{}/{}", tenant.prefix, name))
            }
            None => incomplete(location),
        });

    let result = reader.read(
        &env(),
        &Tenant { prefix: "acme" },
        &Location::root(),
        &Value::from(json!({"name": "ann"})),
    );
    assert_eq!(result.into_value(), Some("acme/ann".to_string()));
}

#[derive(Debug, PartialEq)]
struct Node {
    label: String,
    children: Vec<Node>,
}

fn node_reader() -> Reader<Node, StandardErrors> {
    let mut builder: StructReaderBuilder<StandardErrors> = StructReaderBuilder::new();
    let label = builder.property(Property::required("label", string()));
    let children = builder.property(Property::defaultable(
        "children",
        items(Reader::lazy(node_reader)),
        Vec::new,
    ));
    builder.build(move |_, _, location, mut values| {
        match (values.take(&label), values.take(&children)) {
            (Some(label), Some(children)) => {
                ReadResult::success(location.clone(), Node { label, children })
            }
            _ => incomplete(location),
        }
    })
}

#[test]
fn test_recursive_structure() {
    let input = Value::from(json!({
        "label": "root",
        "children": [
            {"label": "a"},
            {"label": "b", "children": [{"label": 1}]}
        ]
    }));

    let failure = node_reader().decode(&env(), &input).into_result().unwrap_err();
    assert_eq!(failure.first().location.to_string(), "children[1].children[0].label");

    let input = Value::from(json!({"label": "root", "children": [{"label": "a"}]}));
    let tree = node_reader().decode(&env(), &input).into_value().unwrap();
    assert_eq!(tree.children[0].label, "a");
    assert!(tree.children[0].children.is_empty());
}

static COUNTED_BUILDS: AtomicUsize = AtomicUsize::new(0);

fn counted_node_reader() -> Reader<Node, StandardErrors> {
    COUNTED_BUILDS.fetch_add(1, Ordering::SeqCst);
    let mut builder: StructReaderBuilder<StandardErrors> = StructReaderBuilder::new();
    let label = builder.property(Property::required("label", string()));
    let children = builder.property(Property::defaultable(
        "children",
        items(Reader::lazy(counted_node_reader)),
        Vec::new,
    ));
    builder.build(move |_, _, location, mut values| {
        match (values.take(&label), values.take(&children)) {
            (Some(label), Some(children)) => {
                ReadResult::success(location.clone(), Node { label, children })
            }
            _ => incomplete(location),
        }
    })
}

#[test]
fn test_recursive_reader_is_built_once_per_level() {
    let siblings: Vec<_> = (0..1000).map(|i| json!({"label": format!("n{}", i)})).collect();
    let input = Value::from(json!({"label": "root", "children": siblings}));

    let reader = counted_node_reader();
    for _ in 0..2 {
        let tree = reader.decode(&env(), &input).into_value().unwrap();
        assert_eq!(tree.children.len(), 1000);
    }

    // The root builder plus the single nested level that was reached.
    assert_eq!(COUNTED_BUILDS.load(Ordering::SeqCst), 2);
}
