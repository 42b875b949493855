use {
    crate::{
        adapter::{
            Codec, FlatteningAdapter,
            json::{JsonCodec, SerdeDelegate},
        },
        dotted::Separator,
    },
    serde::{Deserialize, Serialize, de::DeserializeOwned},
};

/// Settings for building JSON codecs.
///
/// Deserializable so it can sit inside an application's own config:
///
/// ```
/// let config: serde_dotted::FlatteningConfig = serde_json::from_str(r#"{"separator": "/"}"#).unwrap();
/// assert_eq!(config.separator.as_char(), '/');
/// assert!(!config.pretty);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlatteningConfig {
    pub separator: Separator,
    /// Indent written JSON.
    pub pretty: bool,
}

impl FlatteningConfig {
    pub fn with_separator(mut self, separator: impl Into<Separator>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn json_codec(&self) -> JsonCodec {
        JsonCodec { pretty: self.pretty }
    }

    /// Flattening for object-shaped `T`, plain JSON for everything else.
    pub fn codec_for<T>(&self) -> Codec<T, JsonCodec, SerdeDelegate>
    where
        T: Serialize + DeserializeOwned,
    {
        Codec::new(self.json_codec(), SerdeDelegate, self.separator)
    }

    /// `None` when `T` is scalar- or sequence-shaped.
    pub fn adapter_for<T>(&self) -> Option<FlatteningAdapter<T, JsonCodec, SerdeDelegate>>
    where
        T: Serialize + DeserializeOwned,
    {
        FlatteningAdapter::new(self.json_codec(), SerdeDelegate, self.separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: FlatteningConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, FlatteningConfig::default());
        assert_eq!(config.separator.as_char(), '.');
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(serde_json::from_str::<FlatteningConfig>(r#"{"sep": "/"}"#).is_err());
    }

    #[test]
    fn test_builder() {
        let config = FlatteningConfig::default().with_separator('_').with_pretty(true);
        assert_eq!(config.separator, Separator::new('_'));
        assert!(config.json_codec().pretty);
    }

    #[test]
    fn test_codec_selection() {
        #[derive(Serialize, Deserialize)]
        #[allow(dead_code)]
        struct Record {
            a: i32,
        }
        let config = FlatteningConfig::default();
        assert!(config.codec_for::<Record>().is_flattening());
        assert!(!config.codec_for::<String>().is_flattening());
        assert!(!config.codec_for::<Vec<Record>>().is_flattening());
        assert!(config.adapter_for::<u32>().is_none());
        assert!(config.adapter_for::<serde_json::Value>().is_some());
    }
}
