use std::future::Future;

/// A third party transactional email relay that delivers the contact form
/// content without the site holding mail server credentials.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait MailRelayApiService: Send + Sync + 'static {
    /// Attempts delivery exactly once.
    fn send(&self, request: MailRelayRequest) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRelayRequest {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub access_token: Option<String>,
    pub params: MailRelayTemplateParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRelayTemplateParams {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[cfg(feature = "mock")]
impl MockMailRelayApiService {
    pub fn with_send(mut self, request: MailRelayRequest, result: Result<(), String>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(move |_| {
                Box::pin(std::future::ready(result.map_err(anyhow::Error::msg)))
            });
        self
    }
}
