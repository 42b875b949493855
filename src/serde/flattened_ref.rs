use {
    super::value_ext::ValueFlattenExt,
    crate::{FlattenedRef, dotted::Separator},
    serde::Serialize,
};

impl<T, const SEP: char> Serialize for FlattenedRef<'_, T, SEP>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde_json::to_value(self.0)
            .map_err(serde::ser::Error::custom)
            .and_then(|value| value.expanded_with(Separator::new(SEP)).map_err(serde::ser::Error::custom))
            .and_then(|value| value.serialize(serializer))
    }
}
