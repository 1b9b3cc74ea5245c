// Turns an `ErrorRecord` into the notification the error sink delivers.
//
// Pure formatting only; delivery lives behind the `ErrorSink` port.

use super::error_models::ErrorRecord;
use crate::core::extensions::StrExt;

/// Longest stack trace that still fits in an embed description once the code
/// fence is added. Anything longer is sent as a text attachment.
pub const STACK_ATTACHMENT_THRESHOLD: usize = 4087;

pub const ATTACHMENT_FILE_NAME: &str = "error_message.txt";

/// Emotes and colours used for error notifications.
#[derive(Debug, Clone)]
pub struct ReportStyle {
    pub theme_color: String,
    pub footer_text: String,
    pub footer_icon: Option<String>,
    pub error_emote: String,
    pub entry_emote: String,
    pub prohibited_emote: String,
    pub globe_emote: String,
    pub clock_emote: String,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            theme_color: "#2B2D31".to_string(),
            footer_text: "Error reporter".to_string(),
            footer_icon: None,
            error_emote: "❌".to_string(),
            entry_emote: "📥".to_string(),
            prohibited_emote: "⛔".to_string(),
            globe_emote: "🌐".to_string(),
            clock_emote: "⏰".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportField {
    pub name: String,
    pub value: String,
}

/// Rich summary of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEmbed {
    pub author: String,
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<ReportField>,
    pub footer_text: String,
    pub footer_icon: Option<String>,
}

/// Compact summary plus the full stack as a text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorAttachment {
    pub content: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorPayload {
    Embed(ErrorEmbed),
    Attachment(ErrorAttachment),
}

/// Builds the notification for `record`, timestamped with `unix_seconds`.
///
/// Stacks longer than [`STACK_ATTACHMENT_THRESHOLD`] characters switch to the
/// attachment form.
pub fn build_payload(record: &ErrorRecord, unix_seconds: i64, style: &ReportStyle) -> ErrorPayload {
    let name = record.name.as_deref().unwrap_or("Error");
    let timestamp = format!("<t:{unix_seconds}:D> | <t:{unix_seconds}:R>");

    match record.stack.as_deref() {
        Some(stack) if stack.chars().count() > STACK_ATTACHMENT_THRESHOLD => {
            let mut content = format!("**{}| Name: `{}`", style.entry_emote, name);
            if let Some(code) = record.code {
                content.push_str(&format!("\n{}| Code: `{}`", style.prohibited_emote, code));
            }
            if let Some(status) = &record.status {
                content.push_str(&format!("\n{}| httpStatus: `{}`", style.globe_emote, status));
            }
            content.push_str(&format!("\n{}| Timestamp: {}**", style.clock_emote, timestamp));

            ErrorPayload::Attachment(ErrorAttachment {
                content,
                file_name: ATTACHMENT_FILE_NAME.to_string(),
                bytes: stack.as_bytes().to_vec(),
                description: name.to_string(),
            })
        }
        stack => {
            let mut fields = vec![ReportField {
                name: format!("{}| Name:", style.entry_emote),
                value: name.to_string(),
            }];
            if let Some(code) = record.code {
                fields.push(ReportField {
                    name: format!("{}| Code:", style.prohibited_emote),
                    value: code.to_string(),
                });
            }
            if let Some(status) = &record.status {
                fields.push(ReportField {
                    name: format!("{}| httpStatus:", style.globe_emote),
                    value: status.clone(),
                });
            }
            fields.push(ReportField {
                name: format!("{}| Timestamp:", style.clock_emote),
                value: format!("**{timestamp}**"),
            });

            let color = style
                .theme_color
                .hex_to_number()
                .and_then(|value| u32::try_from(value).ok())
                .unwrap_or_default();

            ErrorPayload::Embed(ErrorEmbed {
                author: truncate(&record.message, 256),
                title: format!("{}| An error occurred!!", style.error_emote),
                description: format!(
                    "```\n{}```",
                    stack.unwrap_or("No stack trace was captured.")
                ),
                color,
                fields,
                footer_text: style.footer_text.clone(),
                footer_icon: style.footer_icon.clone(),
            })
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}
