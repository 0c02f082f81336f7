//! Test support shared by unit and integration tests.

use std::sync::Mutex;

use djen_client::{Lawyer, LawyerAssociation, Publication, Recipient};

use crate::progress::ProgressReporter;

/// Captures progress messages for assertions.
#[derive(Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Minimal publication with an id and an optional content hash.
pub fn publication(id: i64, hash: Option<&str>) -> Publication {
    Publication {
        id: Some(id),
        hash: hash.map(str::to_string),
        ..Publication::default()
    }
}

/// Adds a lawyer with the given name and OAB number.
pub fn with_lawyer(mut publication: Publication, name: &str, oab: &str) -> Publication {
    publication.lawyers.push(LawyerAssociation {
        lawyer: Some(Lawyer {
            name: Some(name.to_string()),
            registration_number: Some(oab.to_string()),
            ..Lawyer::default()
        }),
        ..LawyerAssociation::default()
    });
    publication
}

/// Adds a recipient with the given name and pole.
pub fn with_recipient(mut publication: Publication, name: &str, pole: &str) -> Publication {
    publication.recipients.push(Recipient {
        name: Some(name.to_string()),
        pole: Some(pole.to_string()),
        ..Recipient::default()
    });
    publication
}
