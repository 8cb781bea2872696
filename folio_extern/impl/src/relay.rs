use std::{fmt::Display, sync::Arc};

use anyhow::{anyhow, Context};
use folio_extern_contracts::relay::{MailRelayApiService, MailRelayRequest};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

/// https://www.emailjs.com/docs/rest-api/send/
const SEND_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Clone)]
pub struct MailRelayApiServiceImpl {
    config: MailRelayApiServiceConfig,
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct MailRelayApiServiceConfig {
    send_endpoint: Arc<Url>,
}

impl MailRelayApiServiceConfig {
    pub fn new(send_endpoint_override: Option<Url>) -> Self {
        Self {
            send_endpoint: send_endpoint_override
                .unwrap_or_else(|| SEND_ENDPOINT.parse().unwrap())
                .into(),
        }
    }

    pub fn send_endpoint(&self) -> &Url {
        &self.send_endpoint
    }
}

impl MailRelayApiServiceImpl {
    pub fn new(config: MailRelayApiServiceConfig, http: HttpClient) -> Self {
        Self { config, http }
    }
}

impl MailRelayApiService for MailRelayApiServiceImpl {
    async fn send(&self, request: MailRelayRequest) -> anyhow::Result<()> {
        debug!(
            endpoint = %self.config.send_endpoint,
            service_id = %request.service_id,
            template_id = %request.template_id,
            "sending contact message to mail relay"
        );

        let response = self
            .http
            .post((*self.config.send_endpoint).clone())
            .json(&SendRequest::from(&request))
            .send()
            .await
            .context("Failed to send mail relay request")?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(rejection(status, response.text().await))
    }
}

fn rejection(status: StatusCode, body: Result<String, impl Display>) -> anyhow::Error {
    let body = body.unwrap_or_else(|err| format!("<unreadable body: {err}>"));
    anyhow!("Mail relay rejected the request ({status}): {body}")
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

impl<'a> From<&'a MailRelayRequest> for SendRequest<'a> {
    fn from(value: &'a MailRelayRequest) -> Self {
        Self {
            service_id: &value.service_id,
            template_id: &value.template_id,
            user_id: &value.public_key,
            access_token: value.access_token.as_deref(),
            template_params: TemplateParams {
                name: &value.params.name,
                email: &value.params.email,
                message: &value.params.message,
            },
        }
    }
}
