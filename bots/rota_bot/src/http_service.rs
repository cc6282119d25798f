use anyhow::Context;
use reqwest::blocking::Client;
use rota::{BoardSnapshot, ServiceRequest, ServiceResponse};
use rota_bot_utils::GameService;
use tracing::trace;

pub const DEFAULT_URL: &str = "https://rota.praetorian.com/rota/service/play.php";

/// The remote game service.
///
/// The service keeps the session in a cookie, so the client holds on to a cookie store.
pub struct HttpService {
    client: Client,
    url: String,
    email: String,
}

impl HttpService {
    pub fn new(url: String, email: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .context("Could not build the HTTP client")?;
        Ok(Self { client, url, email })
    }

    fn perform_request(&self, req: &ServiceRequest) -> anyhow::Result<BoardSnapshot> {
        let query = req.query_pairs();
        trace!(name: "Sending request", url = %self.url, ?query);
        let response: ServiceResponse = self
            .client
            .post(&self.url)
            .query(&query)
            .send()?
            .error_for_status()?
            .json()
            .with_context(|| format!("Malformed response to {:?}", req))?;
        trace!(name: "Received response", ?response);
        unpack(response).with_context(|| format!("Request {:?} failed", req))
    }
}

/// Extracts the snapshot from a response, or turns a failure into an error.
fn unpack(response: ServiceResponse) -> anyhow::Result<BoardSnapshot> {
    if !response.is_success() {
        anyhow::bail!(
            "Game service answered with status '{}': {}",
            response.status,
            response.message.as_deref().unwrap_or("no message")
        );
    }
    response.data.context("Game service sent no data")
}

impl GameService for HttpService {
    fn start_session(&mut self) -> anyhow::Result<BoardSnapshot> {
        self.perform_request(&ServiceRequest::NewSession {
            email: self.email.clone(),
        })
    }

    fn next_round(&mut self) -> anyhow::Result<BoardSnapshot> {
        self.perform_request(&ServiceRequest::NextRound)
    }

    fn place(&mut self, position: usize) -> anyhow::Result<BoardSnapshot> {
        self.perform_request(&ServiceRequest::Place { position })
    }

    fn move_piece(&mut self, from: usize, to: usize) -> anyhow::Result<BoardSnapshot> {
        self.perform_request(&ServiceRequest::Move { from, to })
    }
}
