use serde::Serialize;
use strum::Display;

/// What a URL points at, as inferred from its host and path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceKind {
    /// A model repository on the model hub
    Model,

    /// A dataset repository on the model hub
    Dataset,

    /// A source code repository on a code hosting service
    Code,

    /// Anything the classifier does not recognize
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_uppercase() {
        assert_eq!(ResourceKind::Model.to_string(), "MODEL");
        assert_eq!(ResourceKind::Dataset.to_string(), "DATASET");
        assert_eq!(ResourceKind::Code.to_string(), "CODE");
        assert_eq!(ResourceKind::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_serialize_matches_display() {
        assert_eq!(serde_json::to_string(&ResourceKind::Model).unwrap(), r#""MODEL""#);
    }
}
