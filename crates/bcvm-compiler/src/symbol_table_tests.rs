use serde_json::json;

use super::symbol_table::{SymbolError, SymbolKind, SymbolTable};

#[test]
fn labels_and_functions_take_current_address() {
    let mut table = SymbolTable::new(100);

    table.add_label("@start").unwrap();
    table.advance(5);
    table.add_function("$f", "").unwrap();
    table.advance(8);
    table.add_label("@body").unwrap();

    assert_eq!(table.value("@start"), Some(100));
    assert_eq!(table.value("$f"), Some(105));
    assert_eq!(table.value("@body"), Some(113));
    assert_eq!(table.instruction_count(), 13);
}

#[test]
fn duplicate_live_names_fail() {
    let mut table = SymbolTable::new(0);

    table.add_label("@a").unwrap();
    assert_eq!(
        table.add_label("@a"),
        Err(SymbolError::Duplicate("@a".into()))
    );

    table.add_function("$f", "#x").unwrap();
    assert_eq!(
        table.add_function("$f", ""),
        Err(SymbolError::Duplicate("$f".into()))
    );
    assert_eq!(
        table.add_variable("#x", false),
        Err(SymbolError::Duplicate("#x".into()))
    );
}

#[test]
fn statics_fixed_up_after_scan() {
    let mut table = SymbolTable::new(100);

    table.add_variable("#x", false).unwrap();
    table.add_variable("#y", false).unwrap();
    assert_eq!(table.value("#x"), Some(0));
    assert_eq!(table.value("#y"), Some(4));

    table.advance(10);
    table.allocate_static();

    assert_eq!(table.value("#x"), Some(110));
    assert_eq!(table.value("#y"), Some(114));
    assert_eq!(table.static_count(), 2);
}

#[test]
fn allocate_static_only_touches_statics_once() {
    let mut table = SymbolTable::new(64);
    table.add_variable("#s", false).unwrap();
    table.add_label("@l").unwrap();
    table.add_function("$f", "#a").unwrap();
    table.add_variable("#t", false).unwrap();
    table.advance(20);

    table.allocate_static();
    table.allocate_static();

    assert_eq!(table.value("#s"), Some(84));
    assert_eq!(table.value("@l"), Some(64));
    assert_eq!(table.value("$f"), Some(64));
    assert_eq!(table.value("#a"), Some(0));
    assert_eq!(table.value("#t"), Some(0));
    assert!(table.statics_allocated());
}

#[test]
fn arguments_rejected_in_static_section() {
    let mut table = SymbolTable::new(0);

    assert!(table.is_parsing_static());
    assert_eq!(
        table.add_variable("#a", true),
        Err(SymbolError::ArgumentInStaticSection("#a".into()))
    );
}

#[test]
fn function_scope_counts_and_offsets() {
    let mut table = SymbolTable::new(0);

    table.add_function("$f", "#a #b").unwrap();
    table.add_variable("#t", false).unwrap();

    assert_eq!(table.value("#a"), Some(0));
    assert_eq!(table.value("#b"), Some(4));
    assert_eq!(table.value("#t"), Some(0));
    assert_eq!(table.get("#t").unwrap().kind, SymbolKind::Local);
    assert_eq!(table.function_arg_count("$f"), Some(2));
    assert_eq!(table.function_var_count("$f"), Some(1));
    assert_eq!(table.function_arg_count("$nope"), None);
}

#[test]
fn names_are_unique_across_functions() {
    let mut table = SymbolTable::new(0);

    table.add_function("$f", "#a").unwrap();
    table.add_variable("#t", false).unwrap();

    assert_eq!(
        table.add_function("$g", "#a"),
        Err(SymbolError::Duplicate("#a".into()))
    );
    assert_eq!(
        table.add_variable("#t", false),
        Err(SymbolError::Duplicate("#t".into()))
    );
    assert_eq!(
        table.add_label("#a"),
        Err(SymbolError::Duplicate("#a".into()))
    );

    table.add_function("$h", "#b").unwrap();
    assert_eq!(table.value("#b"), Some(0));
    assert_eq!(table.get("#a").unwrap().function.as_deref(), Some("$f"));
    assert_eq!(table.get("#b").unwrap().function.as_deref(), Some("$h"));
}

#[test]
fn statics_visible_inside_functions() {
    let mut table = SymbolTable::new(0);
    table.add_variable("#g", false).unwrap();

    table.add_function("$f", "").unwrap();

    assert!(table.has_symbol("#g"));
    assert_eq!(
        table.add_function("$h", "#g"),
        Err(SymbolError::Duplicate("#g".into()))
    );
}

#[test]
fn malformed_arguments() {
    let mut table = SymbolTable::new(0);

    assert_eq!(
        table.add_function("$f", "a"),
        Err(SymbolError::MalformedArgument("a".into()))
    );
    assert_eq!(
        table.add_function("$g", "#"),
        Err(SymbolError::MalformedArgument("#".into()))
    );
}

#[test]
fn missing_symbol_is_none() {
    let table = SymbolTable::new(0);

    assert!(!table.has_symbol("@x"));
    assert_eq!(table.value("@x"), None);
    assert!(table.is_empty());
}

#[test]
fn listing_serializes() {
    let mut table = SymbolTable::new(8);
    table.add_variable("#n", false).unwrap();
    table.add_function("$f", "#a").unwrap();
    table.advance(9);
    table.allocate_static();

    let value = serde_json::to_value(table.listing()).unwrap();

    assert_eq!(
        value,
        json!({
            "stack_size": 8,
            "instruction_bytes": 9,
            "static_count": 1,
            "symbols": [
                { "name": "#n", "value": 17, "kind": "static" },
                { "name": "$f", "value": 8, "kind": "function" },
                { "name": "#a", "value": 0, "kind": "arg", "function": "$f" },
            ],
            "functions": [
                { "name": "$f", "arg_count": 1, "local_count": 0 },
            ],
        })
    );
}

#[test]
fn code_labels_skip_variables() {
    let mut table = SymbolTable::new(10);

    table.add_variable("#s", false).unwrap();
    table.add_label("@top").unwrap();
    table.advance(1);
    table.add_function("$f", "#a").unwrap();
    table.add_variable("#t", false).unwrap();

    assert_eq!(
        table.code_labels(),
        [(10, "@top".to_string()), (11, "$f".to_string())]
    );
}
