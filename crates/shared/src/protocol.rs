use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{CreatedAt, RecadoId};

/// One message on the mural, as listed by `GET {endpoint}`.
///
/// Null or missing text fields decode as empty so one incomplete record does
/// not fail the whole listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recado {
    pub id: RecadoId,
    #[serde(
        rename = "autor",
        alias = "author",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub author: String,
    #[serde(
        rename = "mensagem",
        alias = "body",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub body: String,
    #[serde(
        rename = "data_criacao",
        alias = "createdAt",
        alias = "created_at",
        default
    )]
    pub created_at: CreatedAt,
}

/// Payload of `POST {endpoint}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecado {
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "mensagem")]
    pub body: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
