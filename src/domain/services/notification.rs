use std::sync::Arc;
use tera::{Context, Tera};
use tracing::{error, info, info_span, Instrument};

use crate::domain::ports::EmailService;
use crate::error::AppError;

/// One of the three notification mails sent to the site owner.
#[derive(Debug, Clone)]
pub enum Notification {
    Contact {
        name: String,
        contact: Option<String>,
        message: String,
    },
    Story {
        name: String,
        message: String,
    },
    Booking {
        name: String,
        contact: String,
        date: String,
        time: String,
        category: String,
        details: Option<String>,
    },
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::Contact { .. } => "contact",
            Notification::Story { .. } => "story",
            Notification::Booking { .. } => "booking",
        }
    }

    fn subject(&self) -> String {
        match self {
            Notification::Contact { name, .. } => format!("【联系表单】来自 {} 的消息", name),
            Notification::Story { name, .. } => format!("【瓶中信】{} 投递了新故事", name),
            Notification::Booking { name, date, time, .. } => {
                format!("【新预约】{} 预约了 {} {}", name, date, time)
            }
        }
    }

    fn context(&self) -> Context {
        let mut context = Context::new();
        match self {
            Notification::Contact { name, contact, message } => {
                context.insert("name", name);
                if let Some(contact) = contact.as_deref().filter(|c| !c.trim().is_empty()) {
                    context.insert("contact", contact);
                }
                context.insert("message", message);
            }
            Notification::Story { name, message } => {
                context.insert("name", name);
                context.insert("message", message);
            }
            Notification::Booking { name, contact, date, time, category, details } => {
                context.insert("name", name);
                context.insert("contact", contact);
                context.insert("date", date);
                context.insert("time", time);
                context.insert("category", category);
                if let Some(details) = details.as_deref().filter(|d| !d.trim().is_empty()) {
                    context.insert("details", details);
                }
            }
        }
        context
    }
}

pub fn load_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("booking.html", include_str!("../../../templates/booking.html")),
        ("contact.html", include_str!("../../../templates/contact.html")),
        ("story.html", include_str!("../../../templates/story.html")),
    ])
    .map_err(|e| AppError::Internal(format!("Template parse error: {:?}", e)))?;
    Ok(tera)
}

pub struct NotificationService {
    templates: Arc<Tera>,
    email_service: Arc<dyn EmailService>,
    recipient: Option<String>,
}

impl NotificationService {
    pub fn new(templates: Arc<Tera>, email_service: Arc<dyn EmailService>, recipient: Option<String>) -> Self {
        Self { templates, email_service, recipient }
    }

    /// Returns `(subject, html_body)`.
    pub fn render(&self, notification: &Notification) -> Result<(String, String), AppError> {
        let template = format!("{}.html", notification.kind());
        let html = self.templates.render(&template, &notification.context())
            .map_err(|e| AppError::Internal(format!("Tera render error: {:?}", e)))?;
        Ok((notification.subject(), html))
    }

    pub async fn send(&self, notification: &Notification) -> Result<(), AppError> {
        let recipient = self.recipient.as_deref()
            .ok_or(AppError::Config("NOTIFY_EMAIL".into()))?;
        let (subject, html) = self.render(notification)?;
        self.email_service.send(recipient, &subject, &html).await?;
        info!("Sent {} notification", notification.kind());
        Ok(())
    }

    /// Sends on a detached task. Failures are logged and never reach the
    /// request that triggered the notification.
    pub fn dispatch(self: &Arc<Self>, notification: Notification) {
        let service = self.clone();
        let span = info_span!("notification", kind = notification.kind());
        tokio::spawn(
            async move {
                if let Err(e) = service.send(&notification).await {
                    error!("Notification dropped: {}", e);
                }
            }
            .instrument(span),
        );
    }
}
