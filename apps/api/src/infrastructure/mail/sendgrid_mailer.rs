use super::traits::{EmailMessage, EmailSender};
use anyhow::bail;
use async_trait::async_trait;
use serde::Serialize;

pub const DEFAULT_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

#[derive(Serialize)]
struct Attachment<'a> {
    content: String,
    filename: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    disposition: &'static str,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<Address<'a>>,
    subject: &'a str,
    content: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<Attachment<'a>>,
}

impl<'a> From<&'a EmailMessage> for SendRequest<'a> {
    fn from(message: &'a EmailMessage) -> Self {
        Self {
            personalizations: [Personalization {
                to: [Address {
                    email: &message.to,
                    name: None,
                }],
            }],
            from: Address {
                email: &message.from_email,
                name: Some(&message.from_name),
            },
            reply_to: message.reply_to.as_deref().map(|email| Address { email, name: None }),
            subject: &message.subject,
            content: [Content {
                kind: "text/html",
                value: &message.html,
            }],
            attachments: message
                .attachments
                .iter()
                .map(|attachment| Attachment {
                    content: attachment.encode(),
                    filename: &attachment.file_name,
                    kind: &attachment.content_type,
                    disposition: "attachment",
                })
                .collect(),
        }
    }
}

/// Sends mail through the SendGrid v3 API.
pub struct SendGridMailer {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl SendGridMailer {
    pub fn new(client: reqwest::Client, api_key: String, endpoint: Option<String>) -> Self {
        Self {
            client,
            api_key,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }
}

#[async_trait]
impl EmailSender for SendGridMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&SendRequest::from(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("sendgrid returned {}: {}", status, body);
        }
        Ok(())
    }
}
