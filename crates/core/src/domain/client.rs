use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    pub guest_count: u32,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self { name: String::new(), phone_number: None, event_date: None, guest_count: 1 }
    }
}

/// Field-wise patch: only provided fields are applied.
#[derive(Clone, Debug, Default)]
pub struct ClientInfoUpdate {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub guest_count: Option<u32>,
}

impl ClientInfo {
    pub fn merge(&mut self, update: ClientInfoUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number =
                if phone_number.trim().is_empty() { None } else { Some(phone_number) };
        }
        if let Some(event_date) = update.event_date {
            self.event_date = Some(event_date);
        }
        if let Some(guest_count) = update.guest_count {
            // Guest count stays positive; the display layer formats it.
            self.guest_count = guest_count.max(1);
        }
    }
}
