use {
    super::value_ext::ValueFlattenExt,
    crate::{Flattened, dotted::Separator},
    serde::{Deserialize, Serialize, de::DeserializeOwned},
    tracing::instrument,
};

impl<T, const SEP: char> Serialize for Flattened<T, SEP>
where
    T: Serialize,
{
    #[instrument(skip_all)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_ref().serialize(serializer)
    }
}

impl<'de, T, const SEP: char> Deserialize<'de> for Flattened<T, SEP>
where
    T: DeserializeOwned,
{
    #[instrument(skip(deserializer), fields(separator = %SEP))]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer)
            .and_then(|value| value.flattened_with(Separator::new(SEP)).map_err(serde::de::Error::custom))
            .and_then(|value| serde_json::from_value::<T>(value).map_err(serde::de::Error::custom))
            .map(Self)
    }
}
