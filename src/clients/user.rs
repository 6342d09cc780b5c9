use std::sync::Arc;

use tracing::debug;

use crate::config::Configuration;
use crate::executor::{Params, RequestExecutor};
use crate::http_client::reqwest::ReqwestHttpClient;
use crate::http_client::{Body, HttpClient, Method};
use crate::model::User;
use crate::specification::json_default;
use crate::{Response, Result};

const USERNAME_PATH: &str = "/user/{username}";

#[derive(Clone)]
pub struct UserClient {
    executor: RequestExecutor,
}

impl Default for UserClient {
    fn default() -> Self {
        UserClient::new()
    }
}

impl UserClient {
    pub fn new() -> Self {
        UserClient::with_config(Configuration::get_instance())
    }

    pub fn with_config(config: &Configuration) -> Self {
        UserClient::with_http_client(config, Arc::new(ReqwestHttpClient::default()))
    }

    pub fn with_http_client(config: &Configuration, client: Arc<dyn HttpClient>) -> Self {
        UserClient {
            executor: RequestExecutor::new(json_default(config), client),
        }
    }

    pub fn create_user(&self, user: &User) -> Result<Response> {
        self.executor.post("/user", user)
    }

    /// Both batch endpoints take a JSON array of users; the server keeps them apart.
    pub fn create_users_with_list(&self, users: &[User]) -> Result<Response> {
        self.executor.post("/user/createWithList", users)
    }

    pub fn create_users_with_array(&self, users: &[User]) -> Result<Response> {
        self.executor.post("/user/createWithArray", users)
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Response> {
        debug!("GET request to: {} with username: {}", USERNAME_PATH, username);
        self.executor
            .execute(Method::Get, USERNAME_PATH, &by_username(username), None)
    }

    pub fn update_user(&self, username: &str, user: &User) -> Result<Response> {
        let body = Body::json(user)?;
        debug!("PUT request to: {} with username: {} body: {}", USERNAME_PATH, username, body);
        self.executor
            .execute(Method::Put, USERNAME_PATH, &by_username(username), Some(body))
    }

    pub fn delete_user(&self, username: &str) -> Result<Response> {
        debug!("DELETE request to: {} with username: {}", USERNAME_PATH, username);
        self.executor
            .execute(Method::Delete, USERNAME_PATH, &by_username(username), None)
    }

    pub fn login_user(&self, username: &str, password: &str) -> Result<Response> {
        self.executor.get_with_query(
            "/user/login",
            &[("username", username), ("password", password)],
        )
    }

    pub fn logout_user(&self) -> Result<Response> {
        self.executor.get("/user/logout")
    }

    pub fn create_user_and_get_response(&self, user: &User) -> Result<User> {
        self.create_user(user)?.as_model()
    }
}

fn by_username(username: &str) -> Params {
    Params::new().path("username", username)
}
