use serde::{Deserialize, Serialize};

/// Direction of a punch. Persisted with the labels used by the mobile app
/// ("ENTRADA" / "SAIDA").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EventKind {
    #[serde(rename = "ENTRADA")]
    In,
    #[serde(rename = "SAIDA")]
    Out,
}

impl EventKind {
    /// Label as stored in the JSON blobs and used in photo file names.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::In => "ENTRADA",
            EventKind::Out => "SAIDA",
        }
    }

    /// The opposite direction, used when legacy points get kinds assigned.
    pub fn flip(&self) -> Self {
        match self {
            EventKind::In => EventKind::Out,
            EventKind::Out => EventKind::In,
        }
    }
}
