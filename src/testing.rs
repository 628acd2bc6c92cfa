//! In-process doubles for the handler tests.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::database::{MemoryStore, Store};
use crate::models::GeoLookup;
use crate::services::{ContactNotifier, GeoError, GeoLocator, MailError, Mailer, OutboundEmail};

/// Records delivered mail; every send from index `fail_from` on fails.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    attempts: Mutex<usize>,
    fail_from: Option<usize>,
}

impl RecordingMailer {
    pub fn failing_from(index: usize) -> Self {
        Self {
            fail_from: Some(index),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts - 1
        };

        if self.fail_from.map(|n| attempt >= n).unwrap_or(false) {
            return Err(MailError::Rejected {
                status: 503,
                body: "relay unavailable".into(),
            });
        }

        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// Answers every lookup with a fixed result and remembers the queried ips.
pub struct StaticLocator {
    answer: Option<GeoLookup>,
    queried: Mutex<Vec<String>>,
}

impl StaticLocator {
    pub fn answering(lookup: GeoLookup) -> Self {
        Self {
            answer: Some(lookup),
            queried: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            queried: Mutex::new(Vec::new()),
        }
    }

    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeoLocator for StaticLocator {
    async fn locate(&self, ip: &str) -> Result<GeoLookup, GeoError> {
        self.queried.lock().unwrap().push(ip.to_string());
        self.answer.clone().ok_or(GeoError::Status(429))
    }
}

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub mailer: Arc<RecordingMailer>,
    pub locator: Arc<StaticLocator>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with(RecordingMailer::default(), StaticLocator::answering(GeoLookup::default()))
    }

    pub fn with(mailer: RecordingMailer, locator: StaticLocator) -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            mailer: Arc::new(mailer),
            locator: Arc::new(locator),
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let store: Arc<dyn Store> = self.store.clone();
        let locator: Arc<dyn GeoLocator> = self.locator.clone();
        let notifier = ContactNotifier::new(self.mailer.clone(), "site@example.com", "owner@example.com");

        App::new()
            .app_data(web::Data::from(store))
            .app_data(web::Data::from(locator))
            .app_data(web::Data::new(notifier))
            .configure(crate::api::configure)
    }
}
