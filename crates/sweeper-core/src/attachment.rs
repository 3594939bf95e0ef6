use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file attached to an issue. Timestamps travel as epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub size: i64,
    #[serde(with = "epoch_millis")]
    pub created: DateTime<Utc>,
    #[serde(with = "epoch_millis")]
    pub updated: DateTime<Utc>,
}

mod epoch_millis {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawMillis {
        Number(i64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(value.timestamp_millis())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let millis = match RawMillis::deserialize(d)? {
            RawMillis::Number(ms) => ms,
            RawMillis::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| de::Error::custom(format!("invalid epoch millis {s:?}: {e}")))?,
        };
        DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| de::Error::custom(format!("epoch millis out of range: {millis}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_integer_millis_as_utc() {
        let a: Attachment = serde_json::from_str(
            r#"{"id": "1-1", "size": 10, "created": 1500000000123, "updated": 1600000000000}"#,
        )
        .unwrap();
        assert_eq!(
            a.created,
            Utc.timestamp_millis_opt(1_500_000_000_123).unwrap()
        );
        assert_eq!(a.updated.timestamp(), 1_600_000_000);
    }

    #[test]
    fn parses_quoted_millis() {
        let a: Attachment = serde_json::from_str(
            r#"{"id": "1-2", "size": 10, "created": "1500000000000", "updated": "1500000000000"}"#,
        )
        .unwrap();
        assert_eq!(a.created.timestamp(), 1_500_000_000);
    }

    #[test]
    fn rejects_non_numeric_timestamp() {
        let result = serde_json::from_str::<Attachment>(
            r#"{"id": "1-3", "size": 10, "created": "yesterday", "updated": 0}"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid epoch millis"), "unexpected error: {err}");
    }

    #[test]
    fn serializes_back_to_millis() {
        let a = Attachment {
            id: "1-4".into(),
            size: 1,
            created: Utc.timestamp_millis_opt(42).unwrap(),
            updated: Utc.timestamp_millis_opt(43).unwrap(),
        };
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["created"], 42);
        assert_eq!(v["updated"], 43);
    }
}
