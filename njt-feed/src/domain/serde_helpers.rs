use chrono::TimeDelta;
use serde::ser::Serializer;

/// Serialize a delay as whole signed seconds.
pub fn serialize_seconds<S>(delay: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_i64(delay.num_seconds())
}
