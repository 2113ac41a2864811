//! Property tests for the three strategies on generated person records

use anonbench::anonymization::{AnonymizationConfig, AnonymizationMethod, StrategyRegistry};
use anonbench::config::secret_key;
use anonbench::core::generator::DatasetGenerator;
use anonbench::domain::{BenchError, Dataset, FieldValue, Record};
use std::collections::HashMap;

fn registry_with(fields: &[&str]) -> StrategyRegistry {
    let config = AnonymizationConfig {
        fields: fields.iter().map(|f| f.to_string()).collect(),
        ..AnonymizationConfig::default()
    };
    StrategyRegistry::new(&config).unwrap()
}

fn people(n: i64) -> Dataset {
    DatasetGenerator::default().generate(n).unwrap()
}

#[test]
fn test_deterministic_equal_inputs_equal_outputs() {
    let registry = registry_with(&[]);
    let strategy = registry.get(AnonymizationMethod::Deterministic);
    let dataset = people(500);

    let first = strategy.anonymize(&dataset).unwrap();
    let second = strategy.anonymize(&dataset).unwrap();
    assert_eq!(first, second);
    assert!(first.same_shape(&dataset));

    // zip_code has only ten distinct values; the mapping must keep that
    let mut mapping: HashMap<&FieldValue, &FieldValue> = HashMap::new();
    for (before, after) in dataset.records().iter().zip(first.records()) {
        let (Some(b), Some(a)) = (before.get("zip_code"), after.get("zip_code")) else {
            panic!("zip_code missing");
        };
        assert_ne!(a, b);
        if let Some(previous) = mapping.insert(b, a) {
            assert_eq!(previous, a);
        }
    }
    assert_eq!(mapping.len(), 10);
}

#[test]
fn test_deterministic_is_one_way() {
    let registry = registry_with(&[]);
    let strategy = registry.get(AnonymizationMethod::Deterministic);
    assert!(!strategy.is_reversible());
    assert!(matches!(
        strategy.deanonymize(&people(3)),
        Err(BenchError::Irreversible(_))
    ));
}

#[test]
fn test_shuffle_preserves_column_multisets() {
    let registry = registry_with(&[]);
    let dataset = people(1000);
    let out = registry
        .get(AnonymizationMethod::Shuffle)
        .anonymize(&dataset)
        .unwrap();

    assert_eq!(out.len(), dataset.len());
    for column in dataset.columns() {
        assert_eq!(out.value_counts(column), dataset.value_counts(column));
    }
    assert_ne!(out, dataset);
}

#[test]
fn test_shuffle_small_inputs_unchanged() {
    let registry = registry_with(&[]);
    let strategy = registry.get(AnonymizationMethod::Shuffle);
    for n in [0, 1] {
        let dataset = people(n);
        assert_eq!(strategy.anonymize(&dataset).unwrap(), dataset);
    }
}

#[test]
fn test_reversible_methods_round_trip() {
    let registry = registry_with(&[]);
    let dataset = people(300);
    for method in [AnonymizationMethod::Shuffle, AnonymizationMethod::Bitwise] {
        let strategy = registry.get(method);
        let anonymized = strategy.anonymize(&dataset).unwrap();
        assert_ne!(anonymized, dataset, "{method} left data unchanged");
        assert_eq!(strategy.deanonymize(&anonymized).unwrap(), dataset);
    }
}

#[test]
fn test_bitwise_secondary_key_round_trip() {
    let mut config = AnonymizationConfig::default();
    config.bitwise.secondary_key = secret_key("other-positional-key");
    let custom = StrategyRegistry::new(&config).unwrap();
    let default = registry_with(&[]);
    let dataset = people(200);

    let out = custom
        .get(AnonymizationMethod::Bitwise)
        .anonymize(&dataset)
        .unwrap();
    let baseline = default
        .get(AnonymizationMethod::Bitwise)
        .anonymize(&dataset)
        .unwrap();

    assert_ne!(out, baseline);
    assert_eq!(
        custom.get(AnonymizationMethod::Bitwise).deanonymize(&out).unwrap(),
        dataset
    );
}

#[test]
fn test_bitwise_keeps_value_types() {
    let registry = registry_with(&[]);
    let dataset = people(50);
    let out = registry
        .get(AnonymizationMethod::Bitwise)
        .anonymize(&dataset)
        .unwrap();

    for (before, after) in dataset.records().iter().zip(out.records()) {
        for (field, value) in before.iter() {
            let transformed = after.get(field).unwrap();
            assert!(transformed.same_type(value), "{field}: {transformed:?}");
        }
    }
}

#[test]
fn test_field_selection_limits_every_method() {
    let registry = registry_with(&["name"]);
    let dataset = people(100);

    for method in AnonymizationMethod::ALL {
        let out = registry.get(method).anonymize(&dataset).unwrap();
        assert_ne!(out.column("name"), dataset.column("name"), "{method}");
        for column in ["record_id", "age", "credit_card_number", "zip_code", "blood_sugar"] {
            assert_eq!(out.column(column), dataset.column(column), "{method} {column}");
        }
    }
}

#[test]
fn test_strategies_accept_arbitrary_records() {
    let registry = registry_with(&[]);
    let dataset = Dataset::from_records(vec![
        Record::new().with("note", "żółw").with("score", -1.5),
        Record::new().with("note", "").with("score", f64::MAX),
    ])
    .unwrap();

    for method in AnonymizationMethod::ALL {
        let strategy = registry.get(method);
        let out = strategy.anonymize(&dataset).unwrap();
        assert!(out.same_shape(&dataset), "{method}");
        if strategy.is_reversible() {
            assert_eq!(strategy.deanonymize(&out).unwrap(), dataset, "{method}");
        }
    }
}
