use std::time::Duration;
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, error};

/// Audit trail for lookups. Calls return immediately; delivery happens elsewhere.
pub trait AuditSink: Send + Sync {
    fn check_executed(&self, invoker_tag: &str, queried_id: &str);
}

pub fn check_payload(invoker_tag: &str, queried_id: &str) -> Value {
    json!({
        "username": "FiveM Checker",
        "embeds": [{
            "title": "Comando /check ejecutado",
            "description": format!("**Usuario que ejecutó:** {invoker_tag}\n**Discord ID buscado:** {queried_id}"),
            "color": 65280,
            "timestamp": Utc::now().to_rfc3339()
        }]
    })
}

/// Non-2xx answers count as failures.
pub async fn deliver(client: &Client, url: &str, body: &Value) -> Result<(), reqwest::Error> {
    client.post(url)
        .json(body)
        .send()
        .await?
        .error_for_status()?;

    Ok(())
}

pub struct WebhookNotifier {
    client: Client,
    url: Option<String>
}

impl WebhookNotifier {
    pub fn new(url: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(WebhookNotifier {
            client: Client::builder().timeout(timeout).build()?,
            url: url.filter(|o| !o.trim().is_empty())
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }
}

impl AuditSink for WebhookNotifier {
    fn check_executed(&self, invoker_tag: &str, queried_id: &str) {
        let Some(url) = self.url.clone() else {
            debug!("No webhook configured, skipping audit for {}", queried_id);
            return;
        };

        let client = self.client.clone();
        let body = check_payload(invoker_tag, queried_id);

        // The reply never waits on delivery.
        tokio::spawn(async move {
            if let Err(ex) = deliver(&client, &url, &body).await {
                error!("Failed to deliver audit webhook: {}", ex);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};
    use wiremock::matchers::{method, path};
    use super::*;

    async fn hook_server(status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
        server
    }

    // Delivery is detached, so poll until the requests land.
    async fn wait_for_requests(server: &MockServer, count: usize) -> Vec<Request> {
        for _ in 0..100 {
            let requests = server.received_requests().await.unwrap_or_default();
            if requests.len() >= count {
                return requests;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("webhook was never delivered");
    }

    #[test]
    fn payload_names_invoker_and_target() {
        let payload = check_payload("mod#0001", "100");
        let embed = &payload["embeds"][0];

        assert_eq!(payload["username"], "FiveM Checker");
        assert_eq!(embed["color"], 65280);
        assert!(embed["timestamp"].is_string());
    }

    #[test]
    fn blank_url_disables_the_webhook() {
        let notifier = WebhookNotifier::new(Some("  ".to_string()), Duration::from_secs(1)).unwrap();
        assert!(!notifier.is_enabled());

        let notifier = WebhookNotifier::new(None, Duration::from_secs(1)).unwrap();
        assert!(!notifier.is_enabled());
    }

    #[tokio::test]
    async fn check_audit_reaches_the_webhook() {
        let server = hook_server(204).await;
        let notifier = WebhookNotifier::new(Some(format!("{}/hook", server.uri())), Duration::from_secs(5)).unwrap();

        notifier.check_executed("user#5", "100");

        let requests = wait_for_requests(&server, 1).await;
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let description = body["embeds"][0]["description"].as_str().unwrap();
        assert_eq!(body["username"], "FiveM Checker");
        assert!(description.contains("user#5"));
        assert!(description.contains("**Discord ID buscado:** 100"));
    }

    #[tokio::test]
    async fn server_error_is_reported_not_raised() {
        let server = hook_server(500).await;
        let client = Client::new();
        let url = format!("{}/hook", server.uri());

        let err = deliver(&client, &url, &check_payload("user#5", "100")).await.unwrap_err();
        assert_eq!(err.status().map(|o| o.as_u16()), Some(500));

        // The detached path swallows the same failure.
        let notifier = WebhookNotifier::new(Some(url), Duration::from_secs(5)).unwrap();
        notifier.check_executed("user#5", "100");
        assert_eq!(wait_for_requests(&server, 2).await.len(), 2);
    }
}
