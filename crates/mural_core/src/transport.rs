//! HTTP access to the recados endpoint.

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::protocol::{NewRecado, Recado};
use tracing::debug;
use url::Url;

use crate::error::MuralError;

#[async_trait]
pub trait RecadosApi: Send + Sync {
    /// `GET {endpoint}`: the full list of recados, in server order.
    async fn list_recados(&self) -> Result<Vec<Recado>, MuralError>;
    /// `POST {endpoint}`: any 2xx counts as created; the body is ignored.
    async fn create_recado(&self, recado: &NewRecado) -> Result<(), MuralError>;
}

pub struct HttpRecadosApi {
    http: Client,
    endpoint: Url,
}

impl HttpRecadosApi {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn ensure_success(response: Response) -> Result<Response, MuralError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(MuralError::http(status))
    }
}

#[async_trait]
impl RecadosApi for HttpRecadosApi {
    async fn list_recados(&self) -> Result<Vec<Recado>, MuralError> {
        let response = self.http.get(self.endpoint.clone()).send().await?;
        let body = ensure_success(response)?.bytes().await?;
        let recados: Vec<Recado> = serde_json::from_slice(&body)
            .map_err(|err| MuralError::MalformedResponse(err.to_string()))?;
        debug!(count = recados.len(), endpoint = %self.endpoint, "listed recados");
        Ok(recados)
    }

    async fn create_recado(&self, recado: &NewRecado) -> Result<(), MuralError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(recado)
            .send()
            .await?;
        ensure_success(response)?;
        debug!(endpoint = %self.endpoint, "created recado");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
