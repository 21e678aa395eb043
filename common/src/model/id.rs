use serde::{de, Deserialize, Deserializer};
use std::fmt;

// REST responses carry numeric ids while channel payloads carry strings.
// Both end up as strings on the client.
struct IdVisitor;

impl<'de> de::Visitor<'de> for IdVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or integer id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }
}

struct OptionalIdVisitor;

impl<'de> de::Visitor<'de> for OptionalIdVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an optional string or integer id")
    }

    fn visit_none<E: de::Error>(self) -> Result<Option<String>, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Option<String>, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Option<String>, D::Error> {
        string_or_number(d).map(Some)
    }
}

pub fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    d.deserialize_any(IdVisitor)
}

pub fn optional_string_or_number<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<String>, D::Error> {
    d.deserialize_option(OptionalIdVisitor)
}

// Servers send `null` for fields a player hasn't been dealt yet
pub fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Ids {
        #[serde(deserialize_with = "super::string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "super::optional_string_or_number")]
        owner: Option<String>,
    }

    #[test]
    fn test_numeric_and_string_ids() {
        let numeric: Ids = serde_json::from_str(r#"{"id": 42, "owner": 7}"#).unwrap();
        assert_eq!(numeric.id, "42");
        assert_eq!(numeric.owner.as_deref(), Some("7"));

        let text: Ids = serde_json::from_str(r#"{"id": "abc", "owner": null}"#).unwrap();
        assert_eq!(text.id, "abc");
        assert_eq!(text.owner, None);

        let missing: Ids = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(missing.owner, None);
    }

    #[test]
    fn test_reject_non_id() {
        let result: Result<Ids, _> = serde_json::from_str(r#"{"id": [1]}"#);
        assert!(result.is_err());
    }
}
