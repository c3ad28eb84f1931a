pub mod account;
pub mod admin;
pub mod campaigns;
pub mod catalog;
pub mod dashboard;
pub mod homepage;
pub mod learn;
pub mod studio;
pub mod wishlist;

/// Deserialize a value that may be either a JSON number or a string containing
/// a number. HTML form inputs via htmx json-enc always send values as strings.
pub(crate) fn deserialize_string_or_i32<'de, D: serde::Deserializer<'de>>(
    d: D,
) -> Result<i32, D::Error> {
    struct Vis;
    impl<'de> serde::de::Visitor<'de> for Vis {
        type Value = i32;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("number or numeric string")
        }
        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<i32, E> {
            Ok(v as i32)
        }
        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<i32, E> {
            Ok(v as i32)
        }
        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<i32, E> {
            v.parse().map_err(E::custom)
        }
    }
    d.deserialize_any(Vis)
}
