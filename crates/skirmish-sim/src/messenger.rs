//! Per-entity mailboxes.
//!
//! Messages are queued per recipient and fetched oldest first. Sending never
//! fails; whether the recipient exists is the caller's concern (see
//! `SimContext::send`).

use std::collections::{HashMap, VecDeque};

use skirmish_core::events::Message;
use skirmish_core::types::Uid;

#[derive(Debug, Default)]
pub struct Messenger {
    mailboxes: HashMap<Uid, VecDeque<Message>>,
}

impl Messenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `message` for `to`.
    pub fn send(&mut self, to: Uid, message: Message) {
        self.mailboxes.entry(to).or_default().push_back(message);
    }

    /// Pop the oldest pending message for `uid`.
    pub fn fetch(&mut self, uid: Uid) -> Option<Message> {
        let mailbox = self.mailboxes.get_mut(&uid)?;
        let message = mailbox.pop_front();
        if mailbox.is_empty() {
            self.mailboxes.remove(&uid);
        }
        message
    }

    /// Drop everything queued for `uid`.
    pub fn discard(&mut self, uid: Uid) {
        self.mailboxes.remove(&uid);
    }

    /// Number of messages waiting for `uid`.
    pub fn pending(&self, uid: Uid) -> usize {
        self.mailboxes.get(&uid).map_or(0, VecDeque::len)
    }

    pub fn clear(&mut self) {
        self.mailboxes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::enums::MessageKind;

    #[test]
    fn test_fifo_per_recipient() {
        let mut messenger = Messenger::new();
        let a = Uid(1);
        let b = Uid(2);
        messenger.send(a, Message::anonymous(MessageKind::Start));
        messenger.send(b, Message::new(MessageKind::Help, Some(a)));
        messenger.send(a, Message::new(MessageKind::Evade, Some(a)));
        messenger.send(a, Message::anonymous(MessageKind::Stop));

        assert_eq!(messenger.pending(a), 3);
        assert_eq!(messenger.fetch(a).map(|m| m.kind), Some(MessageKind::Start));
        assert_eq!(messenger.fetch(a).map(|m| m.kind), Some(MessageKind::Evade));
        assert_eq!(messenger.fetch(a).map(|m| m.kind), Some(MessageKind::Stop));
        assert_eq!(messenger.fetch(a), None);

        let help = messenger.fetch(b).unwrap();
        assert_eq!(help.kind, MessageKind::Help);
        assert_eq!(help.from, Some(a));
    }

    #[test]
    fn test_discard_drops_mailbox() {
        let mut messenger = Messenger::new();
        messenger.send(Uid(7), Message::anonymous(MessageKind::Collected));
        messenger.discard(Uid(7));
        assert_eq!(messenger.pending(Uid(7)), 0);
        assert_eq!(messenger.fetch(Uid(7)), None);
    }
}
