use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::models::ContactMessage;

pub const DEFAULT_MAIL_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail relay rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError>;
}

/// Sends mail through an HTTP relay that accepts the JSON shape of
/// [`OutboundEmail`] with a bearer API key.
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl HttpMailer {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        log::info!("📧 Sending '{}' to {}", email.subject, email.to.join(", "));

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .json(&email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

/// Sends the two contact-form emails: a notification to the site owner and
/// an acknowledgement to the visitor, in that order.
pub struct ContactNotifier {
    mailer: Arc<dyn Mailer>,
    from: String,
    owner: String,
}

impl ContactNotifier {
    pub fn new(mailer: Arc<dyn Mailer>, from: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            mailer,
            from: from.into(),
            owner: owner.into(),
        }
    }

    pub async fn notify(&self, message: &ContactMessage) -> Result<(), MailError> {
        self.mailer.send(self.owner_notification(message)).await?;
        self.mailer.send(self.acknowledgement(message)).await
    }

    pub fn owner_notification(&self, message: &ContactMessage) -> OutboundEmail {
        let name = escape_html(&message.name);
        let email = escape_html(&message.email);
        let body = escape_html(&message.message).replace('\n', "<br>");
        let received = message.created_at.format("%Y-%m-%d %H:%M UTC");

        OutboundEmail {
            from: self.from.clone(),
            to: vec![self.owner.clone()],
            reply_to: Some(message.email.clone()),
            subject: format!("New portfolio message from {}", message.name),
            html: format!(
                "<h2>New message from your portfolio</h2>\
                 <p><strong>Name:</strong> {name}</p>\
                 <p><strong>Email:</strong> {email}</p>\
                 <p><strong>Received:</strong> {received}</p>\
                 <p>{body}</p>"
            ),
            text: format!(
                "New message from your portfolio\n\nName: {}\nEmail: {}\nReceived: {}\n\n{}",
                message.name, message.email, received, message.message
            ),
        }
    }

    pub fn acknowledgement(&self, message: &ContactMessage) -> OutboundEmail {
        let name = escape_html(&message.name);
        let body = escape_html(&message.message).replace('\n', "<br>");

        OutboundEmail {
            from: self.from.clone(),
            to: vec![message.email.clone()],
            reply_to: None,
            subject: "Thanks for reaching out!".to_string(),
            html: format!(
                "<p>Hi {name},</p>\
                 <p>Thanks for your message. I have received it and will get back to you soon.</p>\
                 <blockquote>{body}</blockquote>"
            ),
            text: format!(
                "Hi {},\n\nThanks for your message. I have received it and will get back to you soon.\n\n> {}",
                message.name, message.message
            ),
        }
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
