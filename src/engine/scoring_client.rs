use std::io::{self, BufRead, BufReader};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use tracing::debug;

use crate::engine::error::{ProtocolError, SubmissionFault};
use crate::engine::feedback_codec;
use crate::model::feedback::FeedbackResult;

pub const DEFAULT_SERVICE_URL: &str = "http://courses.csail.mit.edu/6.005/jotto.py";

/// Anything that can score a guess against a puzzle.
///
/// Implementations are called from many worker threads at once and may
/// block for as long as the exchange takes.
pub trait ScoringService: Send + Sync {
    fn submit(&self, puzzle: i32, guess: &str) -> Result<FeedbackResult, SubmissionFault>;
}

/// HTTP client for the Jotto scoring service.
pub struct ScoringClient {
    http: Client,
    base_url: String,
}

impl ScoringClient {
    /// Reads are unbounded: no request timeout is configured.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(None::<Duration>).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn request_url(&self, puzzle: i32, guess: &str) -> Result<Url, SubmissionFault> {
        let mut url = Url::parse(&self.base_url).map_err(|err| SubmissionFault::Configuration {
            url: self.base_url.clone(),
            reason: err.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(SubmissionFault::Configuration {
                url: self.base_url.clone(),
                reason: "not an http url".into(),
            });
        }

        url.query_pairs_mut()
            .append_pair("puzzle", &puzzle.to_string())
            .append_pair("guess", guess);
        Ok(url)
    }
}

impl ScoringService for ScoringClient {
    fn submit(&self, puzzle: i32, guess: &str) -> Result<FeedbackResult, SubmissionFault> {
        let url = self.request_url(puzzle, guess)?;
        debug!(%url, "sending guess");

        let response = self
            .http
            .get(url.clone())
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|err| {
                if err.is_builder() {
                    SubmissionFault::Configuration {
                        url: url.to_string(),
                        reason: err.to_string(),
                    }
                } else {
                    SubmissionFault::connection(err)
                }
            })?;

        // The reader owns the response; it is dropped, and the connection
        // released, on every return path below.
        let line = first_meaningful_line(BufReader::new(response))
            .map_err(SubmissionFault::connection)?;

        Ok(feedback_codec::parse(&decode_line(line)?)?)
    }
}

/// Skip blank lines and return the raw bytes of the first line with
/// content, or nothing if the stream ends first. Only transport failures
/// are errors here; decoding happens in `decode_line`.
pub fn first_meaningful_line<R: BufRead>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(Vec::new());
        }
        if !line.iter().all(u8::is_ascii_whitespace) {
            return Ok(line);
        }
    }
}

/// A line that is not UTF-8 cannot match the feedback grammar.
pub fn decode_line(line: Vec<u8>) -> Result<String, ProtocolError> {
    String::from_utf8(line).map_err(|err| {
        ProtocolError::Malformed(String::from_utf8_lossy(err.as_bytes()).into_owned())
    })
}
