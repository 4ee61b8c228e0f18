use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use super::messages::{
    AnswerRequest, AnswerResponse, AnswerScore, EmotionReading, EmotionRequest, EmotionResponse,
    FinishRequest, FinishResponse, QuestionResponse, Report, ServiceReply, SessionStart,
    StartRequest, StartResponse,
};
use crate::error::{Endpoint, TransportError};

/// Remote interview service
///
/// Every call is a single request/response with no timeout and no retry;
/// callers decide how a failure is surfaced.
#[async_trait]
pub trait InterviewService: Send + Sync {
    /// Start a session for `role` and learn how many questions it has
    async fn start_session(&self, role: &str) -> Result<SessionStart, TransportError>;

    /// Fetch the text of question `index`
    async fn fetch_question(&self, index: usize) -> Result<String, TransportError>;

    /// Record and score the answer to the current question
    async fn capture_answer(&self, session_id: &str) -> Result<AnswerScore, TransportError>;

    /// Run emotion inference on an encoded still frame
    async fn analyze_emotion(&self, image_data: &str) -> Result<EmotionReading, TransportError>;

    /// Close the session and produce the final report
    async fn finish_session(&self, session_id: &str) -> Result<Report, TransportError>;
}

/// [`InterviewService`] over HTTP/JSON
#[derive(Clone)]
pub struct HttpInterviewService {
    client: Client,
    base_url: String,
}

impl HttpInterviewService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post<B, R>(&self, endpoint: Endpoint, path: &str, body: &B) -> Result<R, TransportError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + ServiceReply,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|source| TransportError::Request { endpoint, source })?;

        Self::decode(endpoint, response).await
    }

    async fn get<R>(&self, endpoint: Endpoint, path: &str) -> Result<R, TransportError>
    where
        R: DeserializeOwned + ServiceReply,
    {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|source| TransportError::Request { endpoint, source })?;

        Self::decode(endpoint, response).await
    }

    async fn decode<R>(endpoint: Endpoint, response: reqwest::Response) -> Result<R, TransportError>
    where
        R: DeserializeOwned + ServiceReply,
    {
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let reply: R = response
            .json()
            .await
            .map_err(|source| TransportError::Request { endpoint, source })?;

        if !reply.success() {
            return Err(TransportError::Unsuccessful { endpoint });
        }

        Ok(reply)
    }
}

#[async_trait]
impl InterviewService for HttpInterviewService {
    async fn start_session(&self, role: &str) -> Result<SessionStart, TransportError> {
        info!("Starting interview for role: {}", role);

        let reply: StartResponse = self
            .post(
                Endpoint::StartSession,
                "start_interview",
                &StartRequest {
                    user_role: role.to_string(),
                },
            )
            .await?;

        if reply.questions.is_empty() {
            return Err(TransportError::EmptyQuestionSet);
        }

        Ok(SessionStart {
            total_questions: reply.questions.len(),
            session_id: reply.session_id,
        })
    }

    async fn fetch_question(&self, index: usize) -> Result<String, TransportError> {
        debug!("Fetching question {}", index);

        let reply: QuestionResponse = self
            .get(Endpoint::FetchQuestion, &format!("ask_question/{}", index))
            .await?;

        reply.question.ok_or(TransportError::Unsuccessful {
            endpoint: Endpoint::FetchQuestion,
        })
    }

    async fn capture_answer(&self, session_id: &str) -> Result<AnswerScore, TransportError> {
        let reply: AnswerResponse = self
            .post(
                Endpoint::CaptureAnswer,
                "record_answer",
                &AnswerRequest {
                    session_id: session_id.to_string(),
                },
            )
            .await?;

        Ok(AnswerScore {
            score: reply.score.unwrap_or_default(),
            feedback: reply.feedback.unwrap_or_default(),
        })
    }

    async fn analyze_emotion(&self, image_data: &str) -> Result<EmotionReading, TransportError> {
        let reply: EmotionResponse = self
            .post(
                Endpoint::AnalyzeEmotion,
                "analyze_emotion",
                &EmotionRequest {
                    image: image_data.to_string(),
                },
            )
            .await?;

        Ok(EmotionReading {
            emotion: reply.emotion,
            confidence: reply.confidence,
        })
    }

    async fn finish_session(&self, session_id: &str) -> Result<Report, TransportError> {
        info!("Finishing interview session: {}", session_id);

        let reply: FinishResponse = self
            .post(
                Endpoint::FinishSession,
                "finish_interview",
                &FinishRequest {
                    session_id: session_id.to_string(),
                },
            )
            .await?;

        reply.report.ok_or(TransportError::Unsuccessful {
            endpoint: Endpoint::FinishSession,
        })
    }
}
