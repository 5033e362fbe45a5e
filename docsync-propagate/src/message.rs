//! Text written to the host: commit message, PR title/body, link-back comment.
//!
//! Each is a Tera template from [`MessageTemplates`]; the defaults contain no
//! placeholders except the comment's `{{ pull_request_url }}`.

use serde::Serialize;
use tera::{Context, Tera};

use docsync_core::MessageTemplates;

/// Which message to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Commit,
    Title,
    Body,
    Comment,
}

impl Message {
    fn template_name(self) -> &'static str {
        match self {
            Message::Commit => "commit",
            Message::Title => "title",
            Message::Body => "body",
            Message::Comment => "comment",
        }
    }
}

/// Values available to every template.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageContext {
    /// `owner/name#number` of the triggering pull request.
    pub trigger: String,
    /// `owner/name` of the repository receiving the change.
    pub repository: String,
    pub branch: String,
    /// URL of the propagated pull request; empty until it exists.
    pub pull_request_url: String,
}

/// Compiled message templates.
pub struct MessageRenderer {
    tera: Tera,
}

impl MessageRenderer {
    pub fn new(templates: &MessageTemplates) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (Message::Commit.template_name(), templates.commit.as_str()),
            (Message::Title.template_name(), templates.title.as_str()),
            (Message::Body.template_name(), templates.body.as_str()),
            (Message::Comment.template_name(), templates.comment.as_str()),
        ])?;
        Ok(Self { tera })
    }

    pub fn render(&self, message: Message, ctx: &MessageContext) -> Result<String, tera::Error> {
        let context = Context::from_serialize(ctx)?;
        let rendered = self.tera.render(message.template_name(), &context)?;
        Ok(rendered.trim().to_owned())
    }
}
