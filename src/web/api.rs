use crate::erx::{Erx, LayoutedC};
use crate::web::except::Except;
use axum::http::StatusCode;
use axum::response::Response;
use serde::{Deserialize, Serialize};

const API_HEADERS: [(&str, &str); 2] = [("Content-Type", "application/json"), ("Powered-By", "mentorclap")];

/// Json envelope of every list api response
#[derive(Serialize, Deserialize, Debug)]
pub struct Out<T> {
    pub code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip)]
    pub status: Option<StatusCode>,
}

impl<T> Out<T> {
    pub fn code_message(code: LayoutedC, message: &str) -> Self {
        let message = if message.is_empty() { None } else { Some(message.to_string()) };
        Out { code: code.into(), message, data: None, status: None }
    }

    pub fn ok(data: T) -> Self {
        Out { code: LayoutedC::okay().into(), message: None, data: Some(data), status: None }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_ok(&self) -> bool {
        LayoutedC::from(self.code.clone()).is_okc()
    }

    /// unwrap the payload on the consumer side, a non okay code becomes an Erx
    pub fn into_result(self) -> Result<T, Erx> {
        if !self.is_ok() {
            return Err(Erx::coded(self.code.into(), &self.message.unwrap_or_default()));
        }

        self.data.ok_or_else(|| Erx::new("okay response without data"))
    }
}

impl<T: Serialize> axum::response::IntoResponse for Out<T> {
    fn into_response(self) -> Response {
        match serde_json::to_string(&self) {
            Ok(body) => (self.status.unwrap_or(StatusCode::OK), API_HEADERS, body).into_response(),
            Err(err) => {
                let body = Except::Unknown(err.to_string()).out::<()>();
                let body = serde_json::to_string(&body).unwrap_or(String::from("json serialization error"));
                (StatusCode::INTERNAL_SERVER_ERROR, API_HEADERS, body).into_response()
            },
        }
    }
}
