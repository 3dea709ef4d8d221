use reqwest::{Client, StatusCode, Url};
use tracing::{debug, error};

use crate::{
    domain::{
        common::CoreError,
        identity::{
            entities::{Identity, Session},
            ports::IdentityRepository,
        },
    },
    infrastructure::identity::repositories::entities::{
        AccountResponse, RegisterAccount, SignInAccount, TokenResponse,
    },
};

/// Talks to the account service over HTTP with bearer tokens.
#[derive(Debug, Clone)]
pub struct ReqwestIdentityRepository {
    identity_url: String,
    client: Client,
}

impl ReqwestIdentityRepository {
    pub fn new(identity_url: String, client: Client) -> Self {
        Self {
            identity_url,
            client,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, CoreError> {
        let base = Url::parse(&self.identity_url).map_err(|_| CoreError::ParseRemoteUrl {
            part: self.identity_url.clone(),
        })?;
        base.join(path).map_err(|_| CoreError::ParseRemoteUrl {
            part: path.to_string(),
        })
    }
}

impl IdentityRepository for ReqwestIdentityRepository {
    async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, CoreError> {
        let response = self
            .client
            .post(self.endpoint("accounts/register")?)
            .json(&RegisterAccount {
                email,
                password,
                display_name,
            })
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(CoreError::EmailAlreadyInUse);
        }

        let tokens = response
            .error_for_status()
            .inspect_err(|e| error!("Account registration failed: {}", e))?
            .json::<TokenResponse>()
            .await?;
        Ok(tokens.into())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, CoreError> {
        let response = self
            .client
            .post(self.endpoint("accounts/sign-in")?)
            .json(&SignInAccount { email, password })
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED
        ) {
            return Err(CoreError::InvalidCredentials);
        }

        let tokens = response.error_for_status()?.json::<TokenResponse>().await?;
        Ok(tokens.into())
    }

    async fn sign_out(&self, session: &Session) -> Result<(), CoreError> {
        self.client
            .post(self.endpoint("accounts/sign-out")?)
            .bearer_auth(&session.token)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn current_identity(&self, token: &str) -> Result<Option<Identity>, CoreError> {
        let response = self
            .client
            .get(self.endpoint("accounts/me")?)
            .bearer_auth(token)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("Identity service rejected the bearer token");
            return Ok(None);
        }

        let account = response.error_for_status()?.json::<AccountResponse>().await?;
        Ok(Some(account.into()))
    }

    async fn refresh_token(&self, session: &Session) -> Result<Session, CoreError> {
        let tokens = self
            .client
            .post(self.endpoint("accounts/refresh")?)
            .bearer_auth(&session.token)
            .send()
            .await?
            .error_for_status()?
            .json::<TokenResponse>()
            .await?;
        Ok(tokens.into())
    }
}
