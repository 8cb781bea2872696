use folio_config::RelayConfig;
use folio_core_contact_impl::{ContactFormServiceConfig, ContactFormServiceImpl};
use folio_extern_impl::{
    http::HttpClient,
    relay::{MailRelayApiServiceConfig, MailRelayApiServiceImpl},
};

pub type ContactForm = ContactFormServiceImpl<MailRelayApiServiceImpl>;

/// Creates an empty contact form that delivers through the configured mail
/// relay.
pub fn contact_form(config: RelayConfig) -> anyhow::Result<ContactForm> {
    let RelayConfig {
        endpoint_override,
        service_id,
        template_id,
        public_key,
        access_token,
        timeout,
    } = config;

    let mail_relay_api = MailRelayApiServiceImpl::new(
        MailRelayApiServiceConfig::new(endpoint_override),
        HttpClient::new()?,
    );

    Ok(ContactFormServiceImpl::new(
        mail_relay_api,
        ContactFormServiceConfig {
            service_id,
            template_id,
            public_key,
            access_token,
            timeout: timeout.map(Into::into),
        },
    ))
}
