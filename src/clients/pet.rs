use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::config::Configuration;
use crate::executor::{Params, RequestExecutor};
use crate::http_client::reqwest::ReqwestHttpClient;
use crate::http_client::{Body, HttpClient, Method, Part};
use crate::model::{Pet, PetStatus};
use crate::specification::{json_default, multipart_default, FORM_URLENCODED};
use crate::{Response, Result};

#[derive(Clone)]
pub struct PetClient {
    executor: RequestExecutor,
    config: Configuration,
}

impl Default for PetClient {
    fn default() -> Self {
        PetClient::new()
    }
}

impl PetClient {
    pub fn new() -> Self {
        PetClient::with_config(Configuration::get_instance())
    }

    pub fn with_config(config: &Configuration) -> Self {
        PetClient::with_http_client(config, Arc::new(ReqwestHttpClient::default()))
    }

    pub fn with_http_client(config: &Configuration, client: Arc<dyn HttpClient>) -> Self {
        PetClient {
            executor: RequestExecutor::new(json_default(config), client),
            config: config.clone(),
        }
    }

    pub fn add_pet(&self, pet: &Pet) -> Result<Response> {
        self.executor.post("/pet", pet)
    }

    pub fn update_pet(&self, pet: &Pet) -> Result<Response> {
        self.executor.put("/pet", pet)
    }

    /// Sends the statuses comma-joined in the given order, e.g. `AVAILABLE,PENDING`.
    pub fn find_pets_by_status(&self, statuses: &[PetStatus]) -> Result<Response> {
        let status = statuses
            .iter()
            .map(PetStatus::as_str)
            .collect::<Vec<_>>()
            .join(",");
        self.find_pets_by_status_raw(&status)
    }

    /// Sends `status` as is, so malformed values can reach the server.
    pub fn find_pets_by_status_raw(&self, status: &str) -> Result<Response> {
        self.executor
            .get_with_query("/pet/findByStatus", &[("status", status)])
    }

    pub fn find_pets_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> Result<Response> {
        let tags = tags.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
        self.executor
            .get_with_query("/pet/findByTags", &[("tags", tags.as_str())])
    }

    pub fn get_pet_by_id(&self, pet_id: i64) -> Result<Response> {
        self.executor.get_with_id("/pet/{id}", pet_id)
    }

    pub fn delete_pet(&self, pet_id: i64) -> Result<Response> {
        self.executor.delete_with_id("/pet/{id}", pet_id)
    }

    /// Form-encoded update; a `None` field is not sent at all.
    pub fn update_pet_with_form(
        &self,
        pet_id: i64,
        name: Option<&str>,
        status: Option<&str>,
    ) -> Result<Response> {
        debug!(
            "POST form to: /pet/{} with name: {:?}, status: {:?}",
            pet_id, name, status
        );
        let template = self.executor.template().with_content_type(FORM_URLENCODED);
        self.executor.execute_with(
            &template,
            Method::Post,
            "/pet/{id}",
            &Params::new().path("id", pet_id),
            Some(Body::form(&[("name", name), ("status", status)])),
        )
    }

    pub fn upload_image(
        &self,
        pet_id: i64,
        file: &Path,
        additional_metadata: &str,
    ) -> Result<Response> {
        debug!(
            "POST multipart to: /pet/{}/uploadImage with file: {}",
            pet_id,
            file.display()
        );
        let parts = vec![
            Part::File {
                name: "file".to_string(),
                path: file.to_path_buf(),
            },
            Part::Text {
                name: "additionalMetadata".to_string(),
                value: additional_metadata.to_string(),
            },
        ];
        self.executor.execute_with(
            &multipart_default(&self.config),
            Method::Post,
            "/pet/{id}/uploadImage",
            &Params::new().path("id", pet_id),
            Some(Body::Multipart(parts)),
        )
    }

    /// Decodes the search result; the status code is not checked first.
    pub fn get_pets_by_status(&self, statuses: &[PetStatus]) -> Result<Vec<Pet>> {
        self.find_pets_by_status(statuses)?.as_model()
    }

    pub fn create_pet_and_get_response(&self, pet: &Pet) -> Result<Pet> {
        self.add_pet(pet)?.as_model()
    }
}
