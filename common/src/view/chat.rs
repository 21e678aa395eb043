use crate::messages::ChatMessage;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn push(&mut self, message: ChatMessage) {
        if message.message.trim().is_empty() {
            return;
        }
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// What to send for the text in the chat box, if anything
pub fn outgoing_message(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(text: &str) -> ChatMessage {
        ChatMessage {
            player_id: "1".to_string(),
            player_name: "Ripley".to_string(),
            message: text.to_string(),
            timestamp: String::new(),
        }
    }

    #[test]
    fn test_chat_log_appends_in_order() {
        let mut log = ChatLog::default();
        log.push(message("first"));
        log.push(message("   "));
        log.push(message("second"));
        assert_eq!(log.len(), 2);
        assert_eq!(log.messages()[1].message, "second");
    }

    #[test]
    fn test_outgoing_message() {
        assert_eq!(outgoing_message("  gg  "), Some("gg".to_string()));
        assert_eq!(outgoing_message(" \n "), None);
    }
}
