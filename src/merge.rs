use serde_yaml::Value;

/// Deep-merge `overlay` on top of `base`.
/// If both sides are mappings for the same key, recurse.
/// A `null` overlay leaves the base untouched.
/// Otherwise, `overlay`'s value wins.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(mut base_map), Value::Mapping(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_val) => deep_merge(base_val, overlay_val),
                    None => overlay_val,
                };
                base_map.insert(key, merged);
            }
            Value::Mapping(base_map)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn disjoint_keys_merge() {
        let merged = deep_merge(yaml("host: localhost"), yaml("port: 3000"));
        assert_eq!(merged, yaml("{host: localhost, port: 3000}"));
    }

    #[test]
    fn same_scalar_key_overlay_wins() {
        let merged = deep_merge(yaml("port: 8080"), yaml("port: 3000"));
        assert_eq!(merged["port"], yaml("3000"));
    }

    #[test]
    fn nested_mappings_recurse() {
        let base = yaml("data: {host: old, port: 5}");
        let overlay = yaml("data: {port: 20}");
        let merged = deep_merge(base, overlay);
        assert_eq!(merged, yaml("data: {host: old, port: 20}"));
    }

    #[test]
    fn sequences_are_replaced_not_appended() {
        let merged = deep_merge(yaml("animals: [cat, dog]"), yaml("animals: [hare]"));
        assert_eq!(merged["animals"], yaml("[hare]"));
    }

    #[test]
    fn overlay_scalar_replaces_mapping() {
        let merged = deep_merge(yaml("data: {url: x}"), yaml("data: flat"));
        assert_eq!(merged["data"], yaml("flat"));
    }

    #[test]
    fn null_overlay_keeps_base() {
        let merged = deep_merge(yaml("port: 8080"), yaml("port: null"));
        assert_eq!(merged["port"], yaml("8080"));
        assert_eq!(deep_merge(yaml("a: 1"), Value::Null), yaml("a: 1"));
    }

    #[test]
    fn non_finite_floats_survive_the_merge() {
        let base = serde_yaml::to_value(std::collections::BTreeMap::from([
            ("low", f64::NEG_INFINITY),
            ("high", f64::INFINITY),
        ]))
        .unwrap();
        let merged = deep_merge(base, yaml("name: prod"));
        assert_eq!(merged["low"].as_f64(), Some(f64::NEG_INFINITY));
        assert_eq!(merged["high"].as_f64(), Some(f64::INFINITY));
        assert_eq!(merged["name"], yaml("prod"));
    }

    #[test]
    fn multiple_sequential_merges() {
        let merged = deep_merge(
            deep_merge(yaml("host: a"), yaml("port: 1000")),
            yaml("host: c"),
        );
        assert_eq!(merged, yaml("{host: c, port: 1000}"));
    }
}
