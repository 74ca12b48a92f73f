use std::collections::VecDeque;
use std::sync::Mutex;

use crate::help::MessageSink;
use crate::message::{Destination, Response};

use super::*;

pub(super) struct OutgoingQueue {
    queue: Mutex<VecDeque<Response>>,
}

impl OutgoingQueue {
    pub(super) fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
        }
    }

    pub(super) fn push(&self, response: Response) {
        self.queue.lock().unwrap().push_back(response);
    }

    pub(super) fn pop(&self) -> Option<Response> {
        self.queue.lock().unwrap().pop_front()
    }

    #[cfg(test)]
    pub(super) fn snapshot(&self) -> Vec<Response> {
        self.queue.lock().unwrap().iter().cloned().collect()
    }
}

impl MessageSink for OutgoingQueue {
    fn send(&self, response: Response) {
        self.push(response);
    }
}

impl Bot {
    pub(super) fn queue_responses(&self, responses: Vec<Response>) {
        for response in responses {
            self.outgoing.push(response);
        }
    }

    /// Takes every queued reply, logging each one as sent.
    pub(super) fn flush_outgoing(&self) -> Vec<Response> {
        let mut sent = Vec::new();
        while let Some(response) = self.outgoing.pop() {
            let channel = match &response.destination {
                Destination::Channel(name) => Some(name.as_str()),
                Destination::User(_) => None,
            };
            if let Err(e) = self.db.log_message(
                &self.config.bot.name,
                &response.destination.to_string(),
                channel,
                &response.text,
                "out",
            ) {
                log::error!("Failed to log outgoing message: {}", e);
            }
            sent.push(response);
        }
        sent
    }
}
