/// Builds a [`FlatMap`](crate::FlatMap) from `key => value` pairs.
///
/// Keys and values may be anything implementing `Into<String>`. Entries keep
/// the order they are written in.
///
/// ```rust
/// use serde_flatmap::flatmap;
///
/// let map = flatmap! {
///     "id" => "0000000042",
///     "name" => String::from("ACME"),
/// };
/// assert_eq!(map.get("id"), Some("0000000042"));
/// assert_eq!(map.len(), 2);
/// ```
#[macro_export]
macro_rules! flatmap {
    () => {
        $crate::FlatMap::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::FlatMap::new();
        $(
            map.insert($key, $value);
        )+
        map
    }};
}

#[cfg(test)]
mod tests {
    use crate::FlatMap;

    #[test]
    fn test_flatmap_macro_empty() {
        assert_eq!(flatmap!(), FlatMap::new());
    }

    #[test]
    fn test_flatmap_macro_order_and_overwrite() {
        let map = flatmap! {
            "b" => "2",
            "a" => "1",
            "b" => "3",
        };
        let entries: Vec<_> = map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(entries, [("b", "3"), ("a", "1")]);
    }

    #[test]
    fn test_flatmap_macro_owned_values() {
        let id = 7.to_string();
        let map = flatmap! { "id" => id, String::from("name") => "x" };
        assert_eq!(map.get("id"), Some("7"));
        assert_eq!(map.get("name"), Some("x"));
    }
}
